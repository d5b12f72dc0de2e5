//! Query-result decoding and mapping into [`GraphData`].
//!
//! The dataset is a query result of the shape
//! `{ "results": { "bindings": [ { "start", "property", "end", "path", "index" } ] } }`
//! where each binding describes one hop of a path: `start` and `end` are nodes,
//! `property` is the relation between them.

use std::collections::HashMap;

use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode, NodeId};

const BUNDLED: &str = include_str!("../data/query-result.json");

/// Errors raised while loading a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
	/// The document is not valid JSON or does not have the expected shape.
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),
}

/// A decoded query result.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
	/// Result section of the document.
	pub results: Results,
}

/// The `results` object of a query result.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Results {
	/// One entry per relation record.
	#[serde(default)]
	pub bindings: Vec<Binding>,
}

/// One relation record: `start --property--> end` on a given path.
///
/// Decoding never fails on a record: fields of an unexpected type come
/// through as `None` and the record is drawn with blanks.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "Value")]
pub struct Binding {
	/// Node the relation starts from.
	pub start: Term,
	/// Relation label.
	pub property: Term,
	/// Node the relation points to.
	pub end: Term,
	/// Path the record belongs to.
	pub path: Term,
	/// Position of the record within its path; kept as given.
	pub index: Option<Value>,
}

impl From<Value> for Binding {
	fn from(value: Value) -> Self {
		let term = |key: &str| value.get(key).cloned().map(Term::from).unwrap_or_default();
		Self {
			start: term("start"),
			property: term("property"),
			end: term("end"),
			path: term("path"),
			index: value.get("index").cloned(),
		}
	}
}

/// A bound value with an optional identity.
///
/// Usually an object `{ "id", "value" }`; a bare scalar is taken as the value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Term {
	/// Identity of the value.
	pub id: Option<NodeId>,
	/// Display text of the value.
	pub value: Option<String>,
}

impl From<Value> for Term {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self {
				id: map.get("id").and_then(node_id),
				value: map.get("value").and_then(text),
			},
			other => Self {
				id: None,
				value: text(&other),
			},
		}
	}
}

/// Integers become numeric ids; other numbers and strings become text ids.
fn node_id(value: &Value) -> Option<NodeId> {
	match value {
		Value::Number(n) => match n.as_i64() {
			Some(i) => Some(NodeId::Int(i)),
			None => Some(NodeId::Text(n.to_string())),
		},
		Value::String(s) => Some(NodeId::Text(s.clone())),
		_ => None,
	}
}

fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

impl Dataset {
	/// Maps the records into deduplicated nodes and keyed links.
	pub fn to_graph_data(&self) -> GraphData {
		GraphData::from_bindings(&self.results.bindings)
	}
}

impl GraphData {
	/// Builds nodes and links from relation records.
	///
	/// Nodes are deduplicated by id, keeping the first label and group seen.
	/// Links are keyed by `start-property-end`; a repeated key replaces the
	/// earlier link in place. Records without both endpoint ids are skipped.
	pub fn from_bindings(bindings: &[Binding]) -> Self {
		let mut data = GraphData::default();
		let mut node_idx: HashMap<NodeId, usize> = HashMap::new();
		let mut link_idx: HashMap<String, usize> = HashMap::new();

		for (i, binding) in bindings.iter().enumerate() {
			let (Some(start), Some(end)) = (&binding.start.id, &binding.end.id) else {
				warn!("skipping record {i}: missing start or end id");
				continue;
			};
			let group = binding.path.value.as_ref();

			for (id, term) in [(start, &binding.start), (end, &binding.end)] {
				node_idx.entry(id.clone()).or_insert_with(|| {
					data.nodes.push(GraphNode {
						id: id.clone(),
						label: term.value.clone(),
						group: group.cloned(),
					});
					data.nodes.len() - 1
				});
			}

			let label = binding.property.value.clone();
			let key = format!("{start}-{}-{end}", label.as_deref().unwrap_or_default());
			let link = GraphLink::new(start.clone(), end.clone(), label);
			match link_idx.get(&key) {
				Some(&idx) => data.links[idx] = link,
				None => {
					link_idx.insert(key, data.links.len());
					data.links.push(link);
				}
			}
		}

		data
	}
}

/// Decodes a query-result document.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
	Ok(serde_json::from_str(json)?)
}

/// Decodes the dataset compiled into the binary and maps it into a graph.
pub fn load_bundled() -> Result<GraphData, DatasetError> {
	let dataset = parse_dataset(BUNDLED)?;
	let data = dataset.to_graph_data();
	info!(
		"loaded {} records into {} nodes and {} links",
		dataset.results.bindings.len(),
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(start: (&str, &str), property: &str, end: (&str, &str), path: &str) -> String {
		format!(
			r#"{{"start": {{"id": "{}", "value": "{}"}}, "property": {{"id": "p", "value": "{property}"}},
			"end": {{"id": "{}", "value": "{}"}}, "path": {{"value": "{path}"}}, "index": {{"value": 0}}}}"#,
			start.0, start.1, end.0, end.1
		)
	}

	fn graph(records: &[String]) -> GraphData {
		let json = format!(r#"{{"results": {{"bindings": [{}]}}}}"#, records.join(","));
		parse_dataset(&json).unwrap().to_graph_data()
	}

	#[test]
	fn parallel_relations_share_a_pair() {
		let data = graph(&[
			record(("A", "Alice"), "knows", ("B", "Bob"), "p1"),
			record(("A", "Alice"), "likes", ("B", "Bob"), "p1"),
		]);
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 2);
		assert!(data.links.iter().all(|l| l.pair_id == "A_B"));
		assert_eq!(data.links[0].label.as_deref(), Some("knows"));
		assert_eq!(data.links[1].label.as_deref(), Some("likes"));
	}

	#[test]
	fn first_occurrence_of_a_node_wins() {
		let data = graph(&[
			record(("A", "Alice"), "knows", ("B", "Bob"), "p1"),
			record(("A", "Alicia"), "knows", ("C", "Carol"), "p2"),
		]);
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.to_string()).collect();
		assert_eq!(ids, ["A", "B", "C"]);
		assert_eq!(data.nodes[0].label.as_deref(), Some("Alice"));
		assert_eq!(data.nodes[0].group.as_deref(), Some("p1"));
		assert_eq!(data.nodes[2].group.as_deref(), Some("p2"));
	}

	#[test]
	fn duplicate_keys_overwrite_in_place() {
		let data = graph(&[
			record(("A", "Alice"), "knows", ("B", "Bob"), "p1"),
			record(("B", "Bob"), "knows", ("C", "Carol"), "p1"),
			record(("A", "Alice"), "knows", ("B", "Bob"), "p2"),
		]);
		assert_eq!(data.links.len(), 2);
		assert_eq!(data.links[0].source, NodeId::from("A"));
		assert_eq!(data.links[1].source, NodeId::from("B"));
	}

	#[test]
	fn every_endpoint_is_a_node() {
		let data = graph(&[
			record(("A", "Alice"), "knows", ("B", "Bob"), "p1"),
			record(("C", "Carol"), "self", ("C", "Carol"), "p1"),
			record(("B", "Bob"), "knows", ("D", "Dan"), "p2"),
		]);
		for link in &data.links {
			assert!(data.nodes.iter().any(|n| n.id == link.source));
			assert!(data.nodes.iter().any(|n| n.id == link.target));
		}
		assert_eq!(data.nodes.len(), 4);
	}

	#[test]
	fn missing_values_propagate_as_none() {
		let json = r#"{"results": {"bindings": [
			{"start": {"id": 1}, "property": {}, "end": {"id": 2, "value": "two"}}
		]}}"#;
		let data = parse_dataset(json).unwrap().to_graph_data();
		assert_eq!(data.nodes[0].label, None);
		assert_eq!(data.nodes[0].group, None);
		assert_eq!(data.links[0].label, None);
		assert_eq!(data.links[0].pair_id, "1_2");
	}

	#[test]
	fn records_without_endpoint_ids_are_skipped() {
		let json = r#"{"results": {"bindings": [
			{"start": {"value": "orphan"}, "property": {"value": "r"}, "end": {"id": 2}},
			{"start": {"id": 1}, "property": {"value": "r"}, "end": {"id": 2}}
		]}}"#;
		let data = parse_dataset(json).unwrap().to_graph_data();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
	}

	#[test]
	fn mistyped_fields_do_not_sink_the_document() {
		let json = r#"{"results": {"bindings": [
			{"start": {"id": 1, "value": "one"}, "property": {"value": "r"}, "end": {"id": 2, "value": "two"}, "path": {"value": "p1"}},
			{"start": {"id": 3, "value": 1815}, "property": {"value": "born"}, "end": {"id": 4, "value": "four"}, "path": "p2"},
			{"start": {"id": 1.5, "value": "float"}, "property": {"value": ["x"]}, "end": {"id": true}, "path": {"value": "p3"}},
			"not a record",
			{"start": {"id": 1}, "property": {"value": "r2"}, "end": {"id": 5, "value": "five"}, "path": 7}
		]}}"#;
		let data = parse_dataset(json).unwrap().to_graph_data();
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.to_string()).collect();
		assert_eq!(ids, ["1", "2", "3", "4", "5"]);
		assert_eq!(data.nodes[2].label.as_deref(), Some("1815"));
		assert_eq!(data.nodes[2].group.as_deref(), Some("p2"));
		assert_eq!(data.nodes[4].group.as_deref(), Some("7"));
		assert_eq!(data.links.len(), 3);
	}

	#[test]
	fn terms_decode_leniently() {
		let term: Term = serde_json::from_str(r#"{"id": 1.5, "value": null}"#).unwrap();
		assert_eq!(term.id, Some(NodeId::from("1.5")));
		assert_eq!(term.value, None);
		let term: Term = serde_json::from_str(r#""p1""#).unwrap();
		assert_eq!(term, Term { id: None, value: Some("p1".into()) });
		let term: Term = serde_json::from_str(r#"{"id": -3, "value": false}"#).unwrap();
		assert_eq!(term.id, Some(NodeId::Int(-3)));
		assert_eq!(term.value.as_deref(), Some("false"));
	}

	#[test]
	fn malformed_documents_are_rejected() {
		let err = parse_dataset("{\"results\": [").unwrap_err();
		assert!(matches!(err, DatasetError::Parse(_)));
		assert!(err.to_string().starts_with("failed to parse dataset"));
	}

	#[test]
	fn bundled_dataset_loads() {
		let data = load_bundled().unwrap();
		assert!(!data.nodes.is_empty());
		assert!(!data.links.is_empty());
	}
}
