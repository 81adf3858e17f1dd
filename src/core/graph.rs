use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Immutable forward/reverse dependency graph over canonical paths.
///
/// Invariant: `b ∈ forward[a]` exactly when `a ∈ reverse[b]`. Both maps
/// give average-case O(1) lookup of a file's neighbor set.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    forward: HashMap<String, HashSet<String>>,
    reverse: HashMap<String, HashSet<String>>,
}

impl DependencyGraph {
    /// Files `path` references.
    pub fn dependencies_of(&self, path: &str) -> Option<&HashSet<String>> {
        self.forward.get(path)
    }

    /// Files referencing `path`.
    pub fn dependents_of(&self, path: &str) -> Option<&HashSet<String>> {
        self.reverse.get(path)
    }

    /// True when `path` has at least one edge in either direction.
    pub fn has_edges(&self, path: &str) -> bool {
        self.forward.get(path).is_some_and(|deps| !deps.is_empty())
            || self.reverse.get(path).is_some_and(|deps| !deps.is_empty())
    }

    /// Total number of directed edges (flattened forward map).
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(HashSet::len).sum()
    }

    /// Forward map with keys and neighbor sets in sorted order. Used
    /// wherever deterministic iteration matters (serialization, DFS roots).
    pub fn sorted_forward(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        sort_adjacency(&self.forward)
    }

    pub fn sorted_reverse(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        sort_adjacency(&self.reverse)
    }
}

fn sort_adjacency(map: &HashMap<String, HashSet<String>>) -> BTreeMap<&str, BTreeSet<&str>> {
    map.iter()
        .map(|(path, deps)| {
            (
                path.as_str(),
                deps.iter().map(String::as_str).collect::<BTreeSet<&str>>(),
            )
        })
        .collect()
}

// Serialized form is always sorted so two scans of an unchanged tree
// produce byte-identical maps.
impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DependencyGraph", 2)?;
        state.serialize_field("forward", &self.sorted_forward())?;
        state.serialize_field("reverse", &self.sorted_reverse())?;
        state.end()
    }
}

/// Accumulates normalized edges, maintaining the forward/reverse
/// transpose invariant on every insertion.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DependencyGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `file` references each path in `deps`. Files with no
    /// dependencies never gain a forward entry.
    pub fn add_dependencies<I>(&mut self, file: &str, deps: I)
    where
        I: IntoIterator<Item = String>,
    {
        for dep in deps {
            self.graph
                .forward
                .entry(file.to_string())
                .or_default()
                .insert(dep.clone());
            self.graph
                .reverse
                .entry(dep)
                .or_default()
                .insert(file.to_string());
        }
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_and_reverse_stay_transposed() {
        let mut builder = GraphBuilder::new();
        builder.add_dependencies("/index.html", vec!["/app.js".to_string()]);
        builder.add_dependencies(
            "/app.js",
            vec!["/util.js".to_string(), "/site.css".to_string()],
        );
        let graph = builder.build();

        for (from, deps) in graph.sorted_forward() {
            for to in deps {
                assert!(
                    graph.dependents_of(to).unwrap().contains(from),
                    "reverse edge missing for {from} -> {to}"
                );
            }
        }
        for (to, dependents) in graph.sorted_reverse() {
            for from in dependents {
                assert!(graph.dependencies_of(from).unwrap().contains(to));
            }
        }
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn files_without_dependencies_have_no_forward_entry() {
        let mut builder = GraphBuilder::new();
        builder.add_dependencies("/a.js", Vec::new());
        let graph = builder.build();
        assert!(graph.dependencies_of("/a.js").is_none());
        assert!(!graph.has_edges("/a.js"));
    }
}
