use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::config::GraphConfig;
use super::curvature::assign_curvature;
use super::highlight::HighlightSet;
use super::types::{GraphData, NodeId};

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub highlighted: bool,
}

/// A link resolved against the physics nodes.
#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
	pub curvature: f64,
	pub highlighted: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	/// Pointer position in screen space.
	pub pointer: (f64, f64),
	/// Label of `node`, captured when the hover starts.
	pub label: Option<String>,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<LinkInfo>,
	pub config: GraphConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	/// Particle progress along every link, in [0, 1).
	pub particle_t: f64,
	positions: HashMap<DefaultNodeIdx, (f64, f64)>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		highlight: &HighlightSet,
		config: GraphConfig,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx: HashMap<&NodeId, DefaultNodeIdx> = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(100.0 * angle.cos()) as f32,
				(100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone().unwrap_or_default(),
					highlighted: highlight.contains_node(&node.id),
				},
			});
			id_to_idx.insert(&node.id, idx);
		}

		let mut curved = data.links.clone();
		assign_curvature(&mut curved, config.curvature_min_max);

		let mut springs = HashSet::new();
		let mut links = Vec::with_capacity(curved.len());
		for link in curved {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				warn!(
					"dropping link {} -> {}: endpoint not in node set",
					link.source, link.target
				);
				continue;
			};
			// one spring per node pair; self-loops exert no force
			if src != tgt && springs.insert(link.pair_id.clone()) {
				graph.add_edge(src, tgt, EdgeData::default());
			}
			links.push(LinkInfo {
				source: src,
				target: tgt,
				label: link.label.unwrap_or_default(),
				curvature: link.curvature,
				highlighted: highlight.contains_link(&link.pair_id),
			});
		}

		let mut state = Self {
			graph,
			links,
			config,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			particle_t: 0.0,
			positions: HashMap::new(),
		};
		state.sync_positions();
		state
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the pointer; later nodes paint over earlier ones.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit = self.config.hit_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Last known position of a node, `None` until the simulation has placed it.
	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		self.positions.get(&idx).copied()
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, pointer: (f64, f64)) {
		self.hover.pointer = pointer;
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.label = None;
		if let Some(idx) = node {
			let label = &mut self.hover.label;
			self.graph.visit_nodes(|n| {
				if n.index() == idx && !n.data.user_data.label.is_empty() {
					*label = Some(n.data.user_data.label.clone());
				}
			});
		}
	}

	pub fn hovered_label(&self) -> Option<&str> {
		self.hover.label.as_deref()
	}

	/// Starts dragging the node under the pointer, or panning when there is none.
	pub fn press(&mut self, x: f64, y: f64) {
		let Some(idx) = self.node_at_position(x, y) else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			return;
		};
		let (nx, ny) = self
			.position(idx)
			.map_or((0.0, 0.0), |(px, py)| (px as f32, py as f32));
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			node_start_x: nx,
			node_start_y: ny,
		};
	}

	/// Follows the pointer: moves and pins the dragged node, pans, or updates hover.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered, (x, y));
		}

		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let k = self.transform.k;
			let nx = self.drag.node_start_x + ((x - self.drag.start_x) / k) as f32;
			let ny = self.drag.node_start_y + ((y - self.drag.start_y) / k) as f32;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			self.sync_positions();
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends any drag or pan; a released node rejoins the simulation.
	pub fn release_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
		self.pan.active = false;
	}

	/// Zooms one wheel step around the pointer, clamped to [0.1, 10].
	pub fn zoom_at(&mut self, x: f64, y: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.particle_t = (self.particle_t + self.config.particle_speed).fract();
		self.sync_positions();
	}

	pub fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
