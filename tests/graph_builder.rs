use sitegraph::core::{DependencyGraph, GraphBuilder};

fn build(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut builder = GraphBuilder::new();
    for (from, to) in edges {
        builder.add_dependencies(from, vec![to.to_string()]);
    }
    builder.build()
}

#[test]
fn forward_and_reverse_maps_are_transposes() {
    let graph = build(&[
        ("/index.html", "/js/app.js"),
        ("/index.html", "/css/site.css"),
        ("/js/app.js", "/js/util.js"),
    ]);

    for (from, deps) in graph.sorted_forward() {
        for to in deps {
            assert!(graph.dependents_of(to).unwrap().contains(from));
        }
    }
    for (to, dependents) in graph.sorted_reverse() {
        for from in dependents {
            assert!(graph.dependencies_of(from).unwrap().contains(to));
        }
    }
}

#[test]
fn repeated_edges_count_once() {
    let mut builder = GraphBuilder::new();
    builder.add_dependencies("/a.js", vec!["/b.js".to_string()]);
    builder.add_dependencies("/a.js", vec!["/b.js".to_string()]);
    let graph = builder.build();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.dependencies_of("/a.js").unwrap().len(), 1);
    assert_eq!(graph.dependents_of("/b.js").unwrap().len(), 1);
}

#[test]
fn edge_count_flattens_the_forward_map() {
    let graph = build(&[
        ("/a.js", "/b.js"),
        ("/a.js", "/c.js"),
        ("/b.js", "/c.js"),
    ]);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn neighbor_lookup_works_in_both_directions() {
    let graph = build(&[("/page.html", "/js/app.js")]);

    assert!(graph.has_edges("/page.html"));
    assert!(graph.has_edges("/js/app.js"));
    assert!(!graph.has_edges("/unrelated.css"));
    assert!(graph.dependencies_of("/js/app.js").is_none());
}
