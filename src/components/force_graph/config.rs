use serde::Deserialize;

/// Rendering and layout constants for [`ForceGraphCanvas`](super::ForceGraphCanvas).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Largest absolute curvature handed to parallel links; lower bound for self-loops.
	pub curvature_min_max: f64,
	/// Node circle radius in world units.
	pub node_radius: f64,
	/// Pointer hit radius in world units.
	pub hit_radius: f64,
	/// Arrow head length in world units.
	pub arrow_length: f64,
	/// Arrow position along the link, 0 at the source and 1 at the target.
	pub arrow_rel_pos: f64,
	/// Particles traveling along each link.
	pub particles: u32,
	/// Fraction of a link a particle covers per frame.
	pub particle_speed: f64,
	/// Particle diameter on highlighted links; others draw none.
	pub highlight_particle_width: f64,
	/// Font size cap for node labels.
	pub node_label_max_font: f64,
	/// Width a node label is shrunk to fit.
	pub node_label_max_width: f64,
	/// Font size cap for link labels.
	pub link_label_max_font: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			curvature_min_max: 0.5,
			node_radius: 4.0,
			hit_radius: 6.0,
			arrow_length: 6.0,
			arrow_rel_pos: 1.0,
			particles: 1,
			particle_speed: 0.01,
			highlight_particle_width: 4.0,
			node_label_max_font: 3.0,
			node_label_max_width: 40.0,
			link_label_max_font: 4.0,
		}
	}
}

impl GraphConfig {
	/// Gap kept between a link label and the nodes at either end.
	pub fn label_node_margin(&self) -> f64 {
		self.node_radius * 1.5
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let cfg: GraphConfig = serde_json::from_str(r#"{"arrow_length": 10}"#).unwrap();
		assert_eq!(cfg.arrow_length, 10.0);
		assert_eq!(cfg.curvature_min_max, 0.5);
		assert_eq!(cfg.label_node_margin(), 6.0);
	}
}
