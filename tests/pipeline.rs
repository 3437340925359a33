//! End-to-end checks of upload validation and graph construction.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use share_graph::error::{JoinError, ValidationError};
use share_graph::submission::sample::generate_csv;
use share_graph::submission::{
	GraphOptions, ReferenceTable, Topology, parse_table, process_submission, validate_csv,
};

fn reference(rows: usize) -> ReferenceTable {
	let mut text = String::from("index,project_a,project_b");
	for i in 0..rows {
		text.push_str(&format!("\n{i},repo-a-{i},repo-b-{}", i % 7));
	}
	ReferenceTable::parse(&text).unwrap()
}

fn csv(rows: &[(u64, f64)], header: bool) -> String {
	let mut lines: Vec<String> = rows.iter().map(|(id, p)| format!("{id},{p}")).collect();
	if header {
		lines.insert(0, "id,pred".into());
	}
	lines.join("\n")
}

fn rows_strategy(max_id: u64) -> impl Strategy<Value = Vec<(u64, f64)>> {
	prop::collection::vec((0..max_id, 0.0f64..=1.0), 0..60)
}

fn topology_strategy() -> impl Strategy<Value = Topology> {
	prop_oneof![Just(Topology::PerPair), Just(Topology::HubAndSpoke)]
}

proptest! {
	#[test]
	fn node_ids_are_unique(rows in rows_strategy(40), topology in topology_strategy()) {
		let graph = process_submission(
			&parse_table(&csv(&rows, true)),
			&reference(40),
			&GraphOptions::new(topology),
		).unwrap();
		let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		prop_assert_eq!(ids.len(), graph.nodes.len());
	}

	#[test]
	fn per_pair_counts_follow_rows(ids in prop::collection::hash_set(0u64..200, 0..50), pred in 0.0f64..=1.0) {
		let rows: Vec<_> = ids.iter().map(|&id| (id, pred)).collect();
		let graph = process_submission(
			&parse_table(&csv(&rows, true)),
			&reference(200),
			&GraphOptions::new(Topology::PerPair),
		).unwrap();
		prop_assert_eq!(graph.links.len(), rows.len());
		prop_assert_eq!(graph.nodes.len(), 2 * rows.len());
	}

	#[test]
	fn header_does_not_change_the_graph(rows in rows_strategy(40), topology in topology_strategy()) {
		let opts = GraphOptions::new(topology);
		let with = process_submission(&parse_table(&csv(&rows, true)), &reference(40), &opts).unwrap();
		let without = process_submission(&parse_table(&csv(&rows, false)), &reference(40), &opts).unwrap();
		prop_assert_eq!(with, without);
	}

	#[test]
	fn links_carry_raw_predictions_in_row_order(rows in rows_strategy(40)) {
		let graph = process_submission(
			&parse_table(&csv(&rows, true)),
			&reference(40),
			&GraphOptions::new(Topology::PerPair),
		).unwrap();
		let values: Vec<f64> = graph.links.iter().map(|l| l.value).collect();
		let expected: Vec<f64> = rows.iter().map(|&(_, p)| p).collect();
		prop_assert_eq!(values, expected);
	}

	#[test]
	fn valid_uploads_pass_validation(rows in rows_strategy(1000)) {
		let parsed = validate_csv(&csv(&rows, true)).unwrap();
		prop_assert_eq!(parsed.len(), rows.len());
	}

	#[test]
	fn out_of_range_pred_is_rejected_with_its_line(
		rows in rows_strategy(40),
		bad in prop_oneof![1.0001f64..1e6, -1e6f64..-0.0001],
	) {
		let mut text = csv(&rows, true);
		text.push_str(&format!("\n0,{bad}"));
		prop_assert_eq!(
			validate_csv(&text),
			Err(ValidationError::InvalidPred { line: rows.len() + 2 })
		);
	}
}

#[test]
fn sample_round_trip_keeps_every_row() {
	let mut rng = StdRng::seed_from_u64(42);
	let text = generate_csv(500, &mut rng);

	let accepted = validate_csv(&text).unwrap();
	assert_eq!(accepted.len(), 500);

	let graph = process_submission(
		&parse_table(&text),
		&reference(500),
		&GraphOptions::new(Topology::PerPair),
	)
	.unwrap();
	assert_eq!(graph.links.len(), 500);
	assert_eq!(graph.nodes.len(), 1000);
}

#[test]
fn non_numeric_pred_is_dropped_without_error() {
	let table = parse_table("id,pred\n0,0.4\n1,n/a\n2,0.6");
	let graph = process_submission(&table, &reference(3), &GraphOptions::default()).unwrap();
	assert_eq!(graph.links.len(), 2);
	assert!(graph.nodes.iter().all(|n| n.label != "repo-a-1"));
}

#[test]
fn validation_rejects_documented_inputs() {
	assert_eq!(
		validate_csv("foo,bar\n0,0.5").unwrap_err().to_string(),
		"CSV must have exactly two columns: 'id' and 'pred'."
	);
	assert_eq!(
		validate_csv("id,pred\n-1,0.5").unwrap_err().to_string(),
		"Invalid id at line 2: must be a non-negative integer."
	);
	assert_eq!(
		validate_csv("id,pred\n0,0.5\n1,1.5").unwrap_err().to_string(),
		"Invalid pred at line 3: must be a float between 0 and 1."
	);
	assert!(validate_csv("id,pred\n0,0\n1,1").is_ok());
}

#[test]
fn hub_example_from_two_rows() {
	let reference = ReferenceTable::parse("index,a,b\n0,A,B\n1,C,D").unwrap();
	let graph = process_submission(
		&parse_table("id,pred\n0,0.5\n1,0.9"),
		&reference,
		&GraphOptions::new(Topology::HubAndSpoke),
	)
	.unwrap();

	let root = &graph.nodes[0];
	assert_eq!(root.id, "root");
	let label_of = |id: &str| {
		graph
			.nodes
			.iter()
			.find(|n| n.id == id)
			.map(|n| n.label.clone())
			.unwrap()
	};

	let from_root: Vec<_> = graph.links.iter().filter(|l| l.source == root.id).collect();
	assert_eq!(from_root.len(), 2);
	assert!(from_root.iter().all(|l| l.weight == 1.0));
	let sources: Vec<_> = from_root.iter().map(|l| label_of(l.target.as_str())).collect();
	assert_eq!(sources, ["A", "C"]);

	let leaves: Vec<_> = graph
		.links
		.iter()
		.filter(|l| l.source != root.id)
		.map(|l| (label_of(l.source.as_str()), label_of(l.target.as_str()), l.weight, l.value))
		.collect();
	assert_eq!(
		leaves,
		[
			("A".to_string(), "B".to_string(), 0.5, 0.5),
			("C".to_string(), "D".to_string(), 0.9, 0.9),
		]
	);
}

#[test]
fn unknown_id_fails_loudly() {
	let err = process_submission(
		&parse_table("id,pred\n7,0.5"),
		&reference(3),
		&GraphOptions::default(),
	)
	.unwrap_err();
	assert_eq!(err, JoinError::UnknownId { id: 7, len: 3 });
}
