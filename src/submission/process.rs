//! Join a submission table against the reference table and build the graph.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use log::{debug, warn};

use super::reference::ReferenceTable;
use super::table::{is_header, parse_id, parse_weight};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::error::JoinError;

/// Id of the synthetic hub node.
pub const ROOT_ID: &str = "root";
/// Label drawn on the hub node.
pub const ROOT_LABEL: &str = "Submission";
/// Hub node color.
pub const ROOT_COLOR: &str = "#ff4d6d";
/// Color shared by every source project in the hub layout.
pub const SOURCE_COLOR: &str = "#ffb703";

/// How rows become nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
	/// Every row is an isolated A–B edge.
	#[default]
	PerPair,
	/// A synthetic root fans out to shared source projects, each of which
	/// points at one leaf per row.
	HubAndSpoke,
}

impl Topology {
	/// Prediction multiplier used when no explicit scale is configured.
	pub fn default_scale(self) -> f64 {
		match self {
			Topology::PerPair => 10.0,
			Topology::HubAndSpoke => 1.0,
		}
	}
}

impl FromStr for Topology {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pair" | "pairs" | "per-pair" => Ok(Topology::PerPair),
			"hub" | "star" | "hub-and-spoke" => Ok(Topology::HubAndSpoke),
			other => Err(format!("unknown topology {other:?}")),
		}
	}
}

/// Knobs for graph construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphOptions {
	/// Node identity strategy.
	pub topology: Topology,
	/// Multiplier from prediction to node size and link weight.
	pub size_scale: f64,
}

impl GraphOptions {
	/// Options for a topology with its default scale.
	pub fn new(topology: Topology) -> Self {
		Self {
			topology,
			size_scale: topology.default_scale(),
		}
	}

	/// Replace the scale.
	pub fn with_scale(mut self, size_scale: f64) -> Self {
		self.size_scale = size_scale;
		self
	}

	/// Node the canvas should center on, if the layout has one.
	pub fn focus(&self) -> Option<&'static str> {
		match self.topology {
			Topology::PerPair => None,
			Topology::HubAndSpoke => Some(ROOT_ID),
		}
	}
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self::new(Topology::default())
	}
}

/// Which end of a per-pair edge a node sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
	/// `project_a`.
	A,
	/// `project_b`.
	B,
}

/// Node identity, kept structured until the final id string is rendered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
	/// One end of a per-pair edge.
	Pair {
		/// Which end.
		role: Role,
		/// Submission id of the row.
		row_id: u64,
	},
	/// The hub.
	Root,
	/// A shared source project in the hub layout.
	Source {
		/// Project name.
		label: String,
	},
	/// A per-row leaf in the hub layout.
	Target {
		/// Project name.
		label: String,
		/// Position of the row in the submission.
		row: usize,
	},
}

impl fmt::Display for NodeKey {
	/// Numeric parts come before free text so labels containing the
	/// delimiter cannot collide.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeKey::Pair { role: Role::A, row_id } => write!(f, "Project A ({row_id})"),
			NodeKey::Pair { role: Role::B, row_id } => write!(f, "Project B ({row_id})"),
			NodeKey::Root => f.write_str(ROOT_ID),
			NodeKey::Source { label } => write!(f, "source:{label}"),
			NodeKey::Target { label, row } => write!(f, "target:{row}:{label}"),
		}
	}
}

struct GraphBuilder {
	nodes: IndexMap<NodeKey, GraphNode>,
	links: Vec<GraphLink>,
}

impl GraphBuilder {
	fn new() -> Self {
		Self {
			nodes: IndexMap::new(),
			links: Vec::new(),
		}
	}

	/// Insert or overwrite a node. An overwrite keeps the first position.
	fn node(&mut self, key: NodeKey, label: &str, size: f64, color: Option<&str>) -> String {
		let id = key.to_string();
		self.nodes.insert(
			key,
			GraphNode {
				id: id.clone(),
				label: label.to_string(),
				size,
				color: color.map(str::to_string),
			},
		);
		id
	}

	fn link(&mut self, source: String, target: String, weight: f64, value: f64) {
		self.links.push(GraphLink {
			source,
			target,
			weight,
			value,
		});
	}

	fn finish(self) -> GraphData {
		GraphData {
			nodes: self.nodes.into_values().collect(),
			links: self.links,
		}
	}
}

/// Build a [`GraphData`] from raw submission cells.
///
/// A leading header row is dropped. Rows whose weight is not a finite
/// number are skipped. Ids index the reference table 0-based by position;
/// an id past the end fails the whole join.
pub fn process_submission(
	table: &[Vec<String>],
	reference: &ReferenceTable,
	options: &GraphOptions,
) -> Result<GraphData, JoinError> {
	let rows = match table.first() {
		Some(first) if is_header(first) => &table[1..],
		_ => table,
	};

	let scale = options.size_scale;
	let mut builder = GraphBuilder::new();
	let mut skipped = 0usize;

	for (row, cells) in rows.iter().enumerate() {
		let Some(pred) = cells.get(1).and_then(|w| parse_weight(w)) else {
			skipped += 1;
			continue;
		};
		let id_cell = cells.first().map(String::as_str).unwrap_or_default();
		let id = parse_id(id_cell).ok_or_else(|| JoinError::InvalidId {
			row: row + 1,
			value: id_cell.to_string(),
		})?;
		let pair = reference.get(id).ok_or(JoinError::UnknownId {
			id,
			len: reference.len(),
		})?;

		match options.topology {
			Topology::PerPair => {
				let size = pred * scale;
				let a = builder.node(
					NodeKey::Pair {
						role: Role::A,
						row_id: id,
					},
					&pair.project_a,
					size,
					None,
				);
				let b = builder.node(
					NodeKey::Pair {
						role: Role::B,
						row_id: id,
					},
					&pair.project_b,
					size,
					None,
				);
				builder.link(a, b, size, pred);
			}
			Topology::HubAndSpoke => {
				let root = builder.node(NodeKey::Root, ROOT_LABEL, 2.0 * scale, Some(ROOT_COLOR));
				let source = builder.node(
					NodeKey::Source {
						label: pair.project_a.clone(),
					},
					&pair.project_a,
					scale,
					Some(SOURCE_COLOR),
				);
				let target = builder.node(
					NodeKey::Target {
						label: pair.project_b.clone(),
						row,
					},
					&pair.project_b,
					pred * scale,
					None,
				);
				builder.link(root, source.clone(), 1.0, 1.0);
				builder.link(source, target, pred * scale, pred);
			}
		}
	}

	if skipped > 0 {
		warn!("skipped {skipped} submission rows without a numeric weight");
	}
	let graph = builder.finish();
	debug!(
		"built {:?} graph: {} nodes, {} links",
		options.topology,
		graph.nodes.len(),
		graph.links.len()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::submission::table::parse_table;

	fn reference() -> ReferenceTable {
		ReferenceTable::parse("index,a,b\n0,A,B\n1,C,D\n2,A,E").unwrap()
	}

	fn table(text: &str) -> Vec<Vec<String>> {
		parse_table(text)
	}

	#[test]
	fn test_per_pair_builds_one_edge_per_row() {
		let graph = process_submission(
			&table("id,pred\n0,0.5\n1,0.9"),
			&reference(),
			&GraphOptions::new(Topology::PerPair),
		)
		.unwrap();

		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(
			ids,
			["Project A (0)", "Project B (0)", "Project A (1)", "Project B (1)"]
		);
		assert_eq!(graph.nodes[1].label, "B");
		assert_eq!(graph.nodes[0].size, 5.0);
		assert_eq!(graph.links.len(), 2);
		assert_eq!(graph.links[1].source, "Project A (1)");
		assert_eq!(graph.links[1].target, "Project B (1)");
		assert_eq!(graph.links[1].weight, 9.0);
		assert_eq!(graph.links[1].value, 0.9);
	}

	#[test]
	fn test_per_pair_duplicate_id_keeps_position_last_write() {
		let graph = process_submission(
			&table("0,0.2\n1,0.4\n0,0.8"),
			&reference(),
			&GraphOptions::new(Topology::PerPair),
		)
		.unwrap();
		assert_eq!(graph.nodes.len(), 4);
		assert_eq!(graph.nodes[0].id, "Project A (0)");
		assert_eq!(graph.nodes[0].size, 8.0);
		assert_eq!(graph.links.len(), 3);
	}

	#[test]
	fn test_hub_example() {
		let graph = process_submission(
			&table("id,pred\n0,0.5\n1,0.9"),
			&reference(),
			&GraphOptions::new(Topology::HubAndSpoke),
		)
		.unwrap();

		let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, [ROOT_LABEL, "A", "B", "C", "D"]);
		assert_eq!(graph.nodes[0].color.as_deref(), Some(ROOT_COLOR));
		assert_eq!(graph.nodes[1].color.as_deref(), Some(SOURCE_COLOR));
		assert_eq!(graph.nodes[2].color, None);

		let edges: Vec<_> = graph
			.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str(), l.weight, l.value))
			.collect();
		assert_eq!(
			edges,
			[
				("root", "source:A", 1.0, 1.0),
				("source:A", "target:0:B", 0.5, 0.5),
				("root", "source:C", 1.0, 1.0),
				("source:C", "target:1:D", 0.9, 0.9),
			]
		);
	}

	#[test]
	fn test_hub_shares_sources_and_keeps_leaves_apart() {
		let graph = process_submission(
			&table("0,0.5\n2,0.3\n0,0.7"),
			&reference(),
			&GraphOptions::new(Topology::HubAndSpoke),
		)
		.unwrap();
		// root, A, B(row 0), E(row 1), B(row 2)
		assert_eq!(graph.nodes.len(), 5);
		assert_eq!(graph.links.len(), 6);
		let leaves = graph.nodes.iter().filter(|n| n.label == "B").count();
		assert_eq!(leaves, 2);
	}

	#[test]
	fn test_skips_rows_without_numeric_weight() {
		let graph = process_submission(
			&table("id,pred\n0,abc\n1,0.5\n\n"),
			&reference(),
			&GraphOptions::default(),
		)
		.unwrap();
		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.nodes.iter().all(|n| !n.id.contains("(0)")));
	}

	#[test]
	fn test_empty_inputs_give_empty_graph() {
		let opts = GraphOptions::default();
		assert!(process_submission(&[], &reference(), &opts).unwrap().is_empty());
		assert!(
			process_submission(&table("id,pred"), &reference(), &opts)
				.unwrap()
				.is_empty()
		);
	}

	#[test]
	fn test_out_of_range_id_fails() {
		let err = process_submission(&table("3,0.5"), &reference(), &GraphOptions::default())
			.unwrap_err();
		assert_eq!(err, JoinError::UnknownId { id: 3, len: 3 });
	}

	#[test]
	fn test_bad_id_fails() {
		let err = process_submission(&table("x,0.5"), &reference(), &GraphOptions::default())
			.unwrap_err();
		assert_eq!(
			err,
			JoinError::InvalidId {
				row: 1,
				value: "x".into()
			}
		);
	}

	#[test]
	fn test_scale_is_tunable() {
		let opts = GraphOptions::new(Topology::PerPair).with_scale(2.0);
		let graph = process_submission(&table("0,0.5"), &reference(), &opts).unwrap();
		assert_eq!(graph.nodes[0].size, 1.0);
		assert_eq!(graph.links[0].weight, 1.0);
		assert_eq!(graph.links[0].value, 0.5);
	}

	#[test]
	fn test_node_key_display_is_unambiguous() {
		let a = NodeKey::Target {
			label: "x:1".into(),
			row: 2,
		};
		let b = NodeKey::Target {
			label: "1".into(),
			row: 2,
		};
		assert_ne!(a.to_string(), b.to_string());
	}

	#[test]
	fn test_topology_from_str() {
		assert_eq!("hub".parse::<Topology>(), Ok(Topology::HubAndSpoke));
		assert_eq!("Pair".parse::<Topology>(), Ok(Topology::PerPair));
		assert!("ring".parse::<Topology>().is_err());
	}
}
