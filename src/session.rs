//! Upload → validate → join → render, as plain state transitions.
//!
//! The reference fetch and each submission load run as independent async
//! tasks. Every submission load is stamped with a [`Ticket`]; a result
//! carrying an older ticket than the latest one is dropped, so a slow fetch
//! can never replace a newer upload.

use log::{debug, error, info, warn};

use crate::components::force_graph::GraphData;
use crate::error::SessionError;
use crate::submission::{
	GraphOptions, ReferenceTable, parse_table, process_submission, validate_csv,
};

/// Generation stamp for one submission load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// State of the reference dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReferenceStatus {
	/// Fetch in flight.
	#[default]
	Loading,
	/// Parsed and ready to join against.
	Ready(ReferenceTable),
	/// Fetch or parse failed.
	Failed(String),
}

/// What the page should be showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
	/// Waiting for an upload.
	#[default]
	Idle,
	/// A submission is being read or fetched.
	Loading,
	/// A graph is available.
	Ready,
	/// The submission failed validation; the message is user-facing.
	Rejected(String),
	/// Something outside the user's file broke.
	Failed(String),
}

/// A submission that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
	/// Where it came from: a file name, URL or sample label.
	pub name: String,
	/// Raw cells, re-read by the join.
	pub table: Vec<Vec<String>>,
}

/// The whole viewer state.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
	options: GraphOptions,
	reference: ReferenceStatus,
	submission: Option<Submission>,
	graph: Option<GraphData>,
	phase: Phase,
	generation: u64,
}

impl Session {
	/// Fresh session waiting on the reference fetch.
	pub fn new(options: GraphOptions) -> Self {
		Self {
			options,
			reference: ReferenceStatus::Loading,
			submission: None,
			graph: None,
			phase: Phase::Idle,
			generation: 0,
		}
	}

	/// Graph construction options.
	pub fn options(&self) -> &GraphOptions {
		&self.options
	}

	/// Reference dataset status.
	pub fn reference(&self) -> &ReferenceStatus {
		&self.reference
	}

	/// Current submission, if one was accepted.
	pub fn submission(&self) -> Option<&Submission> {
		self.submission.as_ref()
	}

	/// Latest joined graph.
	pub fn graph(&self) -> Option<&GraphData> {
		self.graph.as_ref()
	}

	/// Current phase.
	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	/// Generation of the latest submission load.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// True while a spinner belongs on screen: a submission is loading, or one
	/// is accepted but the reference table has not arrived yet.
	pub fn is_busy(&self) -> bool {
		match self.phase {
			Phase::Loading => true,
			Phase::Idle => {
				self.submission.is_some() && matches!(self.reference, ReferenceStatus::Loading)
			}
			_ => false,
		}
	}

	/// User-facing error text for the current phase.
	pub fn error(&self) -> Option<&str> {
		match &self.phase {
			Phase::Rejected(msg) | Phase::Failed(msg) => Some(msg),
			_ => None,
		}
	}

	/// Store the fetched reference dataset and join if a submission waits.
	pub fn reference_loaded(&mut self, text: &str) {
		match ReferenceTable::parse(text) {
			Ok(table) => {
				self.reference = ReferenceStatus::Ready(table);
				self.rejoin();
			}
			Err(e) => self.reference_failed(SessionError::from(e).to_string()),
		}
	}

	/// Record that the reference dataset is unavailable.
	pub fn reference_failed(&mut self, message: String) {
		error!("reference dataset unavailable: {message}");
		self.reference = ReferenceStatus::Failed(message);
		self.phase = self.resting_phase();
	}

	/// Phase to fall back to when nothing is loading: idle, unless the
	/// reference dataset is gone.
	fn resting_phase(&self) -> Phase {
		match &self.reference {
			ReferenceStatus::Failed(msg) => {
				Phase::Failed(format!("Could not load the reference dataset: {msg}"))
			}
			_ => Phase::Idle,
		}
	}

	/// Start a new submission load. Results for older tickets are ignored.
	pub fn begin_submission(&mut self) -> Ticket {
		self.generation += 1;
		self.phase = Phase::Loading;
		Ticket(self.generation)
	}

	fn is_current(&self, ticket: Ticket) -> bool {
		if ticket.0 == self.generation {
			return true;
		}
		debug!(
			"dropping stale submission result (generation {} < {})",
			ticket.0, self.generation
		);
		false
	}

	/// Validate a loaded submission, keep it and rejoin.
	///
	/// Returns `false` when the ticket was stale and nothing changed.
	pub fn submission_received(&mut self, ticket: Ticket, name: &str, text: &str) -> bool {
		if !self.is_current(ticket) {
			return false;
		}
		match validate_csv(text) {
			Ok(rows) => {
				info!("accepted submission {name:?} with {} rows", rows.len());
				self.submission = Some(Submission {
					name: name.to_string(),
					table: parse_table(text),
				});
				self.phase = self.resting_phase();
				self.rejoin();
			}
			Err(e) => {
				warn!("rejected submission {name:?}: {e}");
				self.phase = Phase::Rejected(SessionError::from(e).to_string());
			}
		}
		true
	}

	/// Record a submission that could not be read or fetched.
	pub fn submission_failed(&mut self, ticket: Ticket, message: String) -> bool {
		if !self.is_current(ticket) {
			return false;
		}
		error!("submission load failed: {message}");
		self.phase = Phase::Failed(message);
		true
	}

	/// Rebuild the graph from scratch when both inputs are present.
	pub fn rejoin(&mut self) {
		let (Some(submission), ReferenceStatus::Ready(reference)) =
			(&self.submission, &self.reference)
		else {
			return;
		};
		match process_submission(&submission.table, reference, &self.options) {
			Ok(graph) => {
				self.graph = Some(graph);
				self.phase = Phase::Ready;
			}
			Err(e) => {
				error!("join failed: {e}");
				self.graph = None;
				self.phase = Phase::Failed(SessionError::from(e).to_string());
			}
		}
	}

	/// Back to the upload screen. The reference table is kept, and any load
	/// still in flight becomes stale.
	pub fn reset(&mut self) {
		self.generation += 1;
		self.submission = None;
		self.graph = None;
		self.phase = self.resting_phase();
	}
}
