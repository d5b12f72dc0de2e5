//! Curvature assignment for links sharing the same pair of nodes.
//!
//! Self-loops on a node fan out from `min_max` up to 1. Links between two
//! distinct nodes spread over `[-min_max, min_max]`; the last link of a group is
//! the reference, and links running the other way have their sign flipped so
//! their curves do not draw on top of each other.

use std::collections::HashMap;

use super::types::GraphLink;

pub fn assign_curvature(links: &mut [GraphLink], min_max: f64) {
	let mut self_loops: HashMap<&str, Vec<usize>> = HashMap::new();
	let mut same_nodes: HashMap<&str, Vec<usize>> = HashMap::new();

	for (i, link) in links.iter().enumerate() {
		let groups = if link.is_self_loop() {
			&mut self_loops
		} else {
			&mut same_nodes
		};
		groups.entry(link.pair_id.as_str()).or_default().push(i);
	}

	let mut curvatures = vec![0.0; links.len()];

	for group in self_loops.values() {
		for (i, c) in self_loop_curvatures(group.len(), min_max).into_iter().enumerate() {
			curvatures[group[i]] = c;
		}
	}

	for group in same_nodes.values().filter(|g| g.len() > 1) {
		let reference = &links[group[group.len() - 1]].source;
		for (i, c) in parallel_curvatures(group.len(), min_max).into_iter().enumerate() {
			let flipped = links[group[i]].source != *reference;
			curvatures[group[i]] = if flipped { -c } else { c };
		}
	}

	for (link, c) in links.iter_mut().zip(curvatures) {
		link.curvature = c;
	}
}

/// Evenly spaced from `min_max` to 1; a lone loop gets 1.
fn self_loop_curvatures(n: usize, min_max: f64) -> Vec<f64> {
	if n == 0 {
		return Vec::new();
	}
	let last = n - 1;
	let delta = if last == 0 {
		0.0
	} else {
		(1.0 - min_max) / last as f64
	};
	let mut out: Vec<f64> = (0..last).map(|i| min_max + i as f64 * delta).collect();
	out.push(1.0);
	out
}

/// Evenly spaced from `-min_max` to `min_max`, before orientation flips.
fn parallel_curvatures(n: usize, min_max: f64) -> Vec<f64> {
	if n < 2 {
		return vec![0.0; n];
	}
	let last = n - 1;
	let delta = 2.0 * min_max / last as f64;
	let mut out: Vec<f64> = (0..last).map(|i| -min_max + i as f64 * delta).collect();
	out.push(min_max);
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeId;

	fn link(s: &str, t: &str, label: &str) -> GraphLink {
		GraphLink::new(s.into(), t.into(), Some(label.into()))
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn two_parallel_links_bend_apart() {
		let mut links = vec![link("A", "B", "knows"), link("A", "B", "likes")];
		assign_curvature(&mut links, 0.5);
		assert_eq!(links[0].pair_id, "A_B");
		assert_eq!(links[1].pair_id, "A_B");
		assert_eq!(links[0].curvature, -0.5);
		assert_eq!(links[1].curvature, 0.5);
	}

	#[test]
	fn single_self_loop_is_fully_curved() {
		let mut links = vec![link("A", "A", "self")];
		assign_curvature(&mut links, 0.5);
		assert_eq!(links[0].curvature, 1.0);
	}

	#[test]
	fn self_loops_spread_from_min_to_one() {
		let mut links: Vec<_> = (0..5).map(|i| link("A", "A", &i.to_string())).collect();
		assign_curvature(&mut links, 0.5);
		let got: Vec<f64> = links.iter().map(|l| l.curvature).collect();
		for (g, want) in got.iter().zip([0.5, 0.625, 0.75, 0.875, 1.0]) {
			assert!(close(*g, want), "{got:?}");
		}
	}

	#[test]
	fn reversed_links_flip_sign() {
		let mut links = vec![
			link("A", "B", "r0"),
			link("B", "A", "r1"),
			link("A", "B", "r2"),
			link("B", "A", "r3"),
			link("A", "B", "ref"),
		];
		assign_curvature(&mut links, 0.5);
		let got: Vec<f64> = links.iter().map(|l| l.curvature).collect();
		for (g, want) in got.iter().zip([-0.5, 0.25, 0.0, -0.25, 0.5]) {
			assert!(close(*g, want), "{got:?}");
		}
		assert!(got.iter().all(|c| c.abs() <= 0.5));
	}

	#[test]
	fn lone_links_stay_straight() {
		let mut links = vec![link("A", "B", "x"), link("B", "C", "y"), link("C", "C", "z")];
		assign_curvature(&mut links, 0.5);
		assert_eq!(links[0].curvature, 0.0);
		assert_eq!(links[1].curvature, 0.0);
		assert_eq!(links[2].curvature, 1.0);
	}

	#[test]
	fn loops_and_parallels_on_same_node_are_grouped_apart() {
		let mut links = vec![
			GraphLink::new(NodeId::Int(1), NodeId::Int(1), None),
			GraphLink::new(NodeId::Int(1), NodeId::Int(2), None),
			GraphLink::new(NodeId::Int(1), NodeId::Int(1), None),
			GraphLink::new(NodeId::Int(2), NodeId::Int(1), None),
		];
		assign_curvature(&mut links, 0.5);
		assert_eq!(links[0].curvature, 0.5);
		assert_eq!(links[2].curvature, 1.0);
		// reference is 2 -> 1, so 1 -> 2 is flipped from -0.5
		assert_eq!(links[1].curvature, 0.5);
		assert_eq!(links[3].curvature, 0.5);
	}
}
