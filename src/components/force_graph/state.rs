use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale;
use super::types::GraphData;

pub const HIT_RADIUS: f64 = 12.0;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub width: f64,
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
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// A clicked node and everything one edge away from it.
#[derive(Clone, Debug, Default)]
pub struct Selection {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selection: Selection,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let max_size = data.max_size();

		// Nodes start on a ring around the world origin, which the view
		// transform places at the center of the canvas.
		for (i, node) in data.nodes.iter().enumerate() {
			let color = node
				.color
				.clone()
				.unwrap_or_else(|| scale::node_color(scale::normalize(node.size, max_size)));
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color,
					radius: scale::node_radius(node.size),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							width: scale::link_width(link.value),
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			id_to_idx,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selection: Selection::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn node_index(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// Hit area is in world space, so it scales with zoom like the nodes
			let reach = HIT_RADIUS.max(node.data.user_data.radius);
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	fn neighbors_of(&self, idx: DefaultNodeIdx) -> HashSet<DefaultNodeIdx> {
		self.edges
			.iter()
			.filter_map(|&(src, tgt)| {
				if src == idx {
					Some(tgt)
				} else if tgt == idx {
					Some(src)
				} else {
					None
				}
			})
			.collect()
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			self.hover.neighbors = self.neighbors_of(idx);
		}
	}

	/// Select a node together with its adjacent nodes, or clear with `None`.
	pub fn select(&mut self, node: Option<DefaultNodeIdx>) {
		self.selection = Selection {
			node,
			neighbors: node.map(|idx| self.neighbors_of(idx)).unwrap_or_default(),
		};
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
			|| self.selection.node == Some(idx)
			|| self.selection.neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.prev_node == Some(idx)
			|| self.selection.node == Some(idx)
	}

	pub fn is_neighbor(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.neighbors.contains(&idx)
			|| self.hover.prev_neighbors.contains(&idx)
			|| self.selection.neighbors.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some() || self.selection.node.is_some()
	}

	/// Pin a node at the world origin and put the origin at the canvas center.
	pub fn focus_on(&mut self, id: &str) -> bool {
		let Some(idx) = self.node_index(id) else {
			return false;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = 0.0;
				node.data.y = 0.0;
				node.data.is_anchor = true;
			}
		});
		self.transform.x = self.width / 2.0;
		self.transform.y = self.height / 2.0;
		true
	}

	/// Scale around a screen point, keeping that point fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, k: f64) {
		let new_k = k.clamp(MIN_SCALE, MAX_SCALE);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Scale around the canvas center.
	pub fn set_zoom(&mut self, k: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, k);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let engaged = self.hover.node.is_some() || self.selection.node.is_some();
		let (target, delay, speed) = if engaged {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if engaged {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};

	fn node(id: &str, size: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.into(),
			size,
			color: None,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			weight: 1.0,
			value: 0.5,
		}
	}

	fn star() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![node("root", 2.0), node("a", 1.0), node("b", 1.0), node("c", 0.5)],
			links: vec![link("root", "a"), link("root", "b"), link("b", "c")],
		};
		ForceGraphState::new(&data, 800.0, 600.0)
	}

	#[test]
	fn test_links_to_unknown_nodes_are_dropped() {
		let data = GraphData {
			nodes: vec![node("a", 1.0)],
			links: vec![link("a", "ghost")],
		};
		let state = ForceGraphState::new(&data, 100.0, 100.0);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn test_select_highlights_adjacent_nodes() {
		let mut state = star();
		let root = state.node_index("root").unwrap();
		let (a, b, c) = (
			state.node_index("a").unwrap(),
			state.node_index("b").unwrap(),
			state.node_index("c").unwrap(),
		);

		state.select(Some(b));
		assert!(state.is_highlighted(b));
		assert!(state.is_highlighted(root));
		assert!(state.is_highlighted(c));
		assert!(!state.is_highlighted(a));
		assert!(state.has_active_highlight());

		state.select(None);
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn test_focus_centers_node() {
		let mut state = star();
		assert!(state.focus_on("root"));
		assert!(!state.focus_on("missing"));
		let root = state.node_index("root").unwrap();
		assert_eq!(state.node_at_position(400.0, 300.0), Some(root));
	}

	#[test]
	fn test_zoom_is_clamped_and_keeps_anchor() {
		let mut state = star();
		state.zoom_at(100.0, 100.0, 50.0);
		assert_eq!(state.transform.k, MAX_SCALE);
		let before = state.screen_to_graph(100.0, 100.0);
		state.zoom_at(100.0, 100.0, 2.0);
		let after = state.screen_to_graph(100.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn test_colors_follow_size_unless_given() {
		let mut fixed = node("x", 1.0);
		fixed.color = Some("#000".into());
		let data = GraphData {
			nodes: vec![fixed, node("y", 1.0)],
			links: vec![],
		};
		let state = ForceGraphState::new(&data, 10.0, 10.0);
		let mut colors = Vec::new();
		state
			.graph
			.visit_nodes(|n| colors.push(n.data.user_data.color.clone()));
		assert!(colors.contains(&"#000".to_string()));
		assert!(colors.contains(&scale::node_color(1.0)));
	}
}
