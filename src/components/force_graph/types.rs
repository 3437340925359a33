/// A vertex handed to the canvas: one project, or the synthetic hub root.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique key within a [`GraphData`].
	pub id: String,
	/// Display name drawn next to the node.
	pub label: String,
	/// Visual magnitude, already scaled from the prediction.
	pub size: f64,
	/// Fixed color; when absent the canvas derives one from `size`.
	pub color: Option<String>,
}

/// A directed edge between two [`GraphNode`] ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Scaled display weight.
	pub weight: f64,
	/// Raw prediction in `[0, 1]`.
	pub value: f64,
}

/// Nodes in first-insertion order and links in submission row order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Deduplicated nodes.
	pub nodes: Vec<GraphNode>,
	/// Links, duplicates included.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// True when the graph has nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	/// Largest node size, used to normalize colors.
	pub fn max_size(&self) -> f64 {
		self.nodes.iter().map(|n| n.size).fold(0.0, f64::max)
	}
}
