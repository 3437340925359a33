//! Error types for every stage between file bytes and pixels.
//!
//! Each stage owns its enum; [`SessionError`] folds them together for the
//! state container, which only ever surfaces the `Display` text to the user.

use thiserror::Error;

/// Structural problems with an uploaded submission CSV.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// First line is neither `id,pred` nor a two-column data row.
	#[error("CSV must have exactly two columns: 'id' and 'pred'.")]
	Header,
	/// A data row carries more than two cells.
	#[error("Invalid row at line {line}: expected 2 columns, found {found}.")]
	RowWidth {
		/// 1-based line number, header included.
		line: usize,
		/// Number of cells on that line.
		found: usize,
	},
	/// Id is negative, fractional or not a number.
	#[error("Invalid id at line {line}: must be a non-negative integer.")]
	InvalidId {
		/// 1-based line number, header included.
		line: usize,
	},
	/// Pred is not a number in `[0, 1]`.
	#[error("Invalid pred at line {line}: must be a float between 0 and 1.")]
	InvalidPred {
		/// 1-based line number, header included.
		line: usize,
	},
	/// A dropped file whose MIME type is not CSV.
	#[error("Only CSV files are allowed.")]
	NotCsv,
}

/// Problems with the static reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
	/// A data line with fewer than `index,project_a,project_b`.
	#[error("reference line {line}: expected at least 3 columns, found {found}")]
	Columns {
		/// 1-based line number, header included.
		line: usize,
		/// Number of cells on that line.
		found: usize,
	},
	/// The index column is not a non-negative integer.
	#[error("reference line {line}: invalid index {value:?}")]
	InvalidIndex {
		/// 1-based line number, header included.
		line: usize,
		/// Raw cell content.
		value: String,
	},
	/// Two rows share an index.
	#[error("reference index {0} appears more than once")]
	DuplicateIndex(u64),
}

/// Failures joining a submission against the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
	/// The id cell could not be read as a row id.
	#[error("submission row {row}: id {value:?} is not a non-negative integer")]
	InvalidId {
		/// 1-based row number within the submission table.
		row: usize,
		/// Raw cell content.
		value: String,
	},
	/// The id points past the end of the reference table.
	#[error("submission id {id} is out of range: the reference table has {len} rows")]
	UnknownId {
		/// Parsed id.
		id: u64,
		/// Number of reference rows.
		len: usize,
	},
}

/// Fetching or reading text from outside the app.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// Transport-level failure.
	#[error("network error fetching {url}: {message}")]
	Network {
		/// Requested URL.
		url: String,
		/// Underlying error text.
		message: String,
	},
	/// Server answered with a non-success status.
	#[error("{url} answered with HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// A local file could not be read as text.
	#[error("could not read {name}: {message}")]
	File {
		/// File name as reported by the browser.
		name: String,
		/// Underlying error text.
		message: String,
	},
}

/// PNG export failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
	/// No canvas is mounted.
	#[error("no graph surface to export")]
	NoSurface,
	/// The browser refused to encode or download the canvas.
	#[error("export failed: {0}")]
	Browser(String),
}

/// Anything that can stop a session from reaching a rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
	/// See [`ValidationError`].
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// See [`ReferenceError`].
	#[error(transparent)]
	Reference(#[from] ReferenceError),
	/// See [`JoinError`].
	#[error(transparent)]
	Join(#[from] JoinError),
	/// See [`LoadError`].
	#[error(transparent)]
	Load(#[from] LoadError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validation_messages() {
		assert_eq!(
			ValidationError::Header.to_string(),
			"CSV must have exactly two columns: 'id' and 'pred'."
		);
		assert_eq!(
			ValidationError::InvalidId { line: 3 }.to_string(),
			"Invalid id at line 3: must be a non-negative integer."
		);
		assert_eq!(
			ValidationError::InvalidPred { line: 7 }.to_string(),
			"Invalid pred at line 7: must be a float between 0 and 1."
		);
		assert_eq!(ValidationError::NotCsv.to_string(), "Only CSV files are allowed.");
	}

	#[test]
	fn test_session_error_is_transparent() {
		let err: SessionError = JoinError::UnknownId { id: 9, len: 2 }.into();
		assert_eq!(
			err.to_string(),
			"submission id 9 is out of range: the reference table has 2 rows"
		);
	}
}
