pub mod graph_page;
pub mod json_report;

pub use graph_page::GraphPageFormatter;
pub use json_report::JsonReportFormatter;
