use std::collections::HashSet;

use query_graph_canvas::dataset::{load_bundled, parse_dataset};
use query_graph_canvas::{HighlightSet, NodeId};

#[test]
fn bundled_links_point_at_known_nodes() {
	let data = load_bundled().unwrap();
	let ids: HashSet<&NodeId> = data.nodes.iter().map(|n| &n.id).collect();
	assert_eq!(ids.len(), data.nodes.len(), "node ids are unique");
	for link in &data.links {
		assert!(ids.contains(&link.source), "missing source {}", link.source);
		assert!(ids.contains(&link.target), "missing target {}", link.target);
	}
}

#[test]
fn bundled_graph_covers_the_highlighted_path() {
	let data = load_bundled().unwrap();
	let highlight = HighlightSet::default();
	let highlighted: HashSet<&str> = data
		.links
		.iter()
		.map(|l| l.pair_id.as_str())
		.filter(|p| highlight.contains_link(p))
		.collect();
	assert_eq!(highlighted, HashSet::from(["0_2", "2_4", "4_6"]));
	assert!(data.nodes.iter().any(|n| highlight.contains_node(&n.id)));
}

#[test]
fn bundled_graph_has_loops_and_parallel_links() {
	let data = load_bundled().unwrap();
	assert!(data.links.iter().filter(|l| l.is_self_loop()).count() >= 2);
	let between_0_and_2 = data.links.iter().filter(|l| l.pair_id == "0_2").count();
	assert_eq!(between_0_and_2, 2);
}

#[test]
fn first_path_names_the_node() {
	let data = load_bundled().unwrap();
	let ada = data.nodes.iter().find(|n| n.id == NodeId::Int(0)).unwrap();
	assert_eq!(ada.label.as_deref(), Some("Ada Lovelace"));
	assert_eq!(ada.group.as_deref(), Some("path1"));
}

#[test]
fn empty_result_gives_empty_graph() {
	let data = parse_dataset(r#"{"results": {"bindings": []}}"#)
		.unwrap()
		.to_graph_data();
	assert!(data.nodes.is_empty());
	assert!(data.links.is_empty());
}
