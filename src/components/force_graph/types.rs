use std::fmt;

use serde::Deserialize;

/// Identity of a node as it appears in the dataset: either a number or a string.
///
/// Numbers order before strings; numbers compare numerically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
	/// Numeric identity.
	Int(i64),
	/// Textual identity.
	Text(String),
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Int(n) => write!(f, "{n}"),
			NodeId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for NodeId {
	fn from(n: i64) -> Self {
		NodeId::Int(n)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		NodeId::Text(s.to_owned())
	}
}

/// A node of the rendered graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Identity, unique within a [`GraphData`].
	pub id: NodeId,
	/// Text painted on the node.
	pub label: Option<String>,
	/// Path grouping the node was first seen in.
	pub group: Option<String>,
}

/// A directed, labelled edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Source node identity.
	pub source: NodeId,
	/// Target node identity.
	pub target: NodeId,
	/// Relation label painted along the edge.
	pub label: Option<String>,
	/// Direction-independent key shared by all links between the same two nodes.
	pub pair_id: String,
	/// Bend of the link; 0 draws a straight line.
	pub curvature: f64,
}

impl GraphLink {
	/// Creates a straight link and derives its pair id.
	pub fn new(source: NodeId, target: NodeId, label: Option<String>) -> Self {
		let pair_id = pair_id(&source, &target);
		Self {
			source,
			target,
			label,
			pair_id,
			curvature: 0.0,
		}
	}

	/// Whether the link starts and ends on the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// `"{lo}_{hi}"` with the endpoints in ascending order.
pub fn pair_id(a: &NodeId, b: &NodeId) -> String {
	if a <= b {
		format!("{a}_{b}")
	} else {
		format!("{b}_{a}")
	}
}

/// Nodes and links ready to hand to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in first-seen order.
	pub nodes: Vec<GraphNode>,
	/// Links in first-inserted order.
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pair_id_ignores_direction() {
		let (a, b) = (NodeId::from("A"), NodeId::from("B"));
		assert_eq!(pair_id(&a, &b), "A_B");
		assert_eq!(pair_id(&b, &a), "A_B");
	}

	#[test]
	fn numeric_ids_order_numerically() {
		assert_eq!(pair_id(&NodeId::Int(10), &NodeId::Int(9)), "9_10");
		assert!(NodeId::Int(99) < NodeId::from("1"));
	}

	#[test]
	fn ids_deserialize_from_numbers_and_strings() {
		let ids: Vec<NodeId> = serde_json::from_str(r#"[4, "n4"]"#).unwrap();
		assert_eq!(ids, vec![NodeId::Int(4), NodeId::from("n4")]);
	}

	#[test]
	fn self_loop_detection() {
		let link = GraphLink::new(NodeId::Int(1), NodeId::Int(1), None);
		assert!(link.is_self_loop());
		assert_eq!(link.pair_id, "1_1");
		assert_eq!(link.curvature, 0.0);
	}
}
