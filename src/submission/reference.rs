//! The static project-pair listing every submission is joined against.

use std::collections::HashSet;

use log::info;

use super::table::{parse_id, split_line};
use crate::error::ReferenceError;

/// One `index,project_a,project_b` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceRow {
	/// Value of the first column.
	pub index: u64,
	/// First project of the pair.
	pub project_a: String,
	/// Second project of the pair.
	pub project_b: String,
}

/// Reference rows sorted by index, looked up by 0-based position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable {
	rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
	/// Parse the dataset file. The first line is a header and is skipped,
	/// as are blank lines. Columns past the third are ignored.
	pub fn parse(text: &str) -> Result<Self, ReferenceError> {
		let mut rows = Vec::new();
		for (i, line) in text.split('\n').enumerate().skip(1) {
			if line.trim().is_empty() {
				continue;
			}
			let line_no = i + 1;
			let cells = split_line(line);
			let [index, project_a, project_b, ..] = cells.as_slice() else {
				return Err(ReferenceError::Columns {
					line: line_no,
					found: cells.len(),
				});
			};
			let index = parse_id(index).ok_or_else(|| ReferenceError::InvalidIndex {
				line: line_no,
				value: index.clone(),
			})?;
			rows.push(ReferenceRow {
				index,
				project_a: project_a.clone(),
				project_b: project_b.clone(),
			});
		}
		let table = Self::from_rows(rows)?;
		info!("reference table loaded: {} rows", table.len());
		Ok(table)
	}

	/// Sort rows by index and reject duplicates.
	pub fn from_rows(mut rows: Vec<ReferenceRow>) -> Result<Self, ReferenceError> {
		rows.sort_by_key(|r| r.index);
		let mut seen = HashSet::with_capacity(rows.len());
		if let Some(dup) = rows.iter().find(|r| !seen.insert(r.index)) {
			return Err(ReferenceError::DuplicateIndex(dup.index));
		}
		Ok(Self { rows })
	}

	/// Row at a 0-based position in index order.
	pub fn get(&self, position: u64) -> Option<&ReferenceRow> {
		usize::try_from(position).ok().and_then(|p| self.rows.get(p))
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// True when the dataset had no data lines.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Rows in index order.
	pub fn rows(&self) -> &[ReferenceRow] {
		&self.rows
	}
}
