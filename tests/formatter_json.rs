use serde_json::Value;
use sitegraph::core::{scan, ScanConfig};
use sitegraph::formatters::JsonReportFormatter;
use std::fs;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn report_value(root: &Path) -> Value {
    let report = scan(root, ScanConfig::default()).unwrap();
    let json = JsonReportFormatter::new().format_report(&report).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn report_carries_all_sections_in_camel_case() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.html", r#"<script src="/app.js"></script>"#);
    write(root, "app.js", "import './missing.js';\n");

    let v = report_value(root);

    assert!(v["generatedAt"].is_string());
    assert!(v["root"].is_string());
    assert!(v["forward"].is_object());
    assert!(v["reverse"].is_object());
    assert!(v["fileTypes"].is_object());
    assert!(v["entryPoints"].is_array());
    assert!(v["orphans"].is_array());
    assert!(v["missing"].is_array());
    assert!(v["cycles"].is_array());
    assert!(v["warnings"].is_array());
    assert!(v["stats"]["filesScanned"].is_u64());
    assert!(v["stats"]["dependenciesFound"].is_u64());
}

#[test]
fn dependencies_found_matches_flattened_forward_map() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.html", r#"<script src="/a.js"></script>"#);
    write(root, "a.js", "import './b.js';\nimport './c.js';\n");
    write(root, "b.js", "export {};\n");
    write(root, "c.js", "export {};\n");

    let v = report_value(root);

    let flattened: usize = v["forward"]
        .as_object()
        .unwrap()
        .values()
        .map(|deps| deps.as_array().unwrap().len())
        .sum();
    assert_eq!(
        v["stats"]["dependenciesFound"].as_u64().unwrap() as usize,
        flattened
    );
    assert_eq!(flattened, 3);
}

#[test]
fn file_types_classify_by_variant() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.html", "<html></html>");
    write(root, "app.mjs", "export {};\n");
    write(root, "site.scss", ".a {}\n");

    let v = report_value(root);
    assert_eq!(v["fileTypes"]["/index.html"], "html");
    assert_eq!(v["fileTypes"]["/app.mjs"], "js");
    assert_eq!(v["fileTypes"]["/site.scss"], "css");
}

#[test]
fn missing_entries_carry_from_and_missing_fields() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "page.html", r#"<img src="/img/gone.png">"#);

    let v = report_value(root);
    assert_eq!(v["missing"][0]["from"], "/page.html");
    assert_eq!(v["missing"][0]["missing"], "/img/gone.png");
}
