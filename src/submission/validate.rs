//! Strict upload gate for `id,pred` submission files.

use log::debug;

use super::table::{parse_id, split_line};
use crate::error::ValidationError;

/// MIME type a dropped file must report.
pub const CSV_MIME: &str = "text/csv";

/// One validated prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubmissionRow {
	/// Row id into the reference table.
	pub id: u64,
	/// Predicted weight in `[0, 1]`.
	pub pred: f64,
}

/// Validate a whole submission. The first bad line rejects the file.
///
/// Line numbers in errors are 1-based positions in the original text, so
/// leading blank lines and the header both count.
pub fn validate_csv(text: &str) -> Result<Vec<SubmissionRow>, ValidationError> {
	let mut lines = text
		.trim_end()
		.split('\n')
		.enumerate()
		.skip_while(|(_, line)| line.trim().is_empty())
		.map(|(i, line)| (i, split_line(line)));

	let Some((first_index, first)) = lines.next() else {
		return Err(ValidationError::Header);
	};

	let mut rows = Vec::new();
	if first.len() != 2 || first[0].parse::<f64>().is_err() {
		if first != ["id", "pred"] {
			return Err(ValidationError::Header);
		}
	} else {
		// No header: the first line is already data.
		rows.push(validate_row(&first, first_index + 1)?);
	}

	for (i, cells) in lines {
		rows.push(validate_row(&cells, i + 1)?);
	}

	debug!("validated {} submission rows", rows.len());
	Ok(rows)
}

fn validate_row(cells: &[String], line: usize) -> Result<SubmissionRow, ValidationError> {
	if cells.len() > 2 {
		return Err(ValidationError::RowWidth {
			line,
			found: cells.len(),
		});
	}
	let id = cells
		.first()
		.and_then(|c| parse_id(c))
		.ok_or(ValidationError::InvalidId { line })?;
	let pred = cells
		.get(1)
		.and_then(|c| c.parse::<f64>().ok())
		.filter(|p| (0.0..=1.0).contains(p))
		.ok_or(ValidationError::InvalidPred { line })?;
	Ok(SubmissionRow { id, pred })
}

/// Gate applied to drag-and-drop before the content is read.
pub fn check_mime(mime: &str) -> Result<(), ValidationError> {
	if mime == CSV_MIME {
		Ok(())
	} else {
		Err(ValidationError::NotCsv)
	}
}
