use std::collections::HashSet;

use super::types::NodeId;

/// Nodes and node pairs painted with emphasis.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightSet {
	nodes: HashSet<NodeId>,
	links: HashSet<String>,
}

impl HighlightSet {
	/// Builds a set from node ids and link pair ids.
	pub fn new(
		nodes: impl IntoIterator<Item = NodeId>,
		links: impl IntoIterator<Item = String>,
	) -> Self {
		Self {
			nodes: nodes.into_iter().collect(),
			links: links.into_iter().collect(),
		}
	}

	/// Whether the node is painted highlighted.
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.nodes.contains(id)
	}

	/// Whether links with this pair id carry particles.
	pub fn contains_link(&self, pair_id: &str) -> bool {
		self.links.contains(pair_id)
	}
}

impl Default for HighlightSet {
	/// The path 0 → 2 → 4 → 6.
	fn default() -> Self {
		Self::new(
			[NodeId::Int(0), NodeId::Int(6)],
			["0_2", "2_4", "4_6"].map(String::from),
		)
	}
}
