//! Flat CSV splitting shared by every reader in this crate.
//!
//! No quoting or escaping: a comma always separates cells.

/// Split text into trimmed lines of trimmed cells.
///
/// A trailing `\r` on each line is dropped so files saved on Windows parse
/// the same as Unix ones. Empty lines are kept; callers decide what they mean.
pub fn parse_table(text: &str) -> Vec<Vec<String>> {
	text.split('\n').map(split_line).collect()
}

/// Split one line on commas.
pub fn split_line(line: &str) -> Vec<String> {
	line.trim_end_matches('\r')
		.split(',')
		.map(|cell| cell.trim().to_string())
		.collect()
}

/// Read a row id: a finite, non-negative number with no fractional part.
///
/// `"3.0"` is accepted as `3`, `"3.5"`, `"-1"` and `""` are not.
pub fn parse_id(cell: &str) -> Option<u64> {
	let value: f64 = cell.trim().parse().ok()?;
	if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
		return None;
	}
	Some(value as u64)
}

/// Read a prediction weight. Any finite number passes; range is not checked.
pub fn parse_weight(cell: &str) -> Option<f64> {
	cell.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

/// True when the first cell of a row names the `id` column.
pub fn is_header(row: &[String]) -> bool {
	row.first()
		.is_some_and(|cell| cell.trim().eq_ignore_ascii_case("id"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_table_strips_carriage_returns() {
		let table = parse_table("id,pred\r\n0, 0.5\r\n");
		assert_eq!(table.len(), 3);
		assert_eq!(table[0], vec!["id", "pred"]);
		assert_eq!(table[1], vec!["0", "0.5"]);
		assert_eq!(table[2], vec![""]);
	}

	#[test]
	fn test_parse_id() {
		assert_eq!(parse_id("0"), Some(0));
		assert_eq!(parse_id(" 42 "), Some(42));
		assert_eq!(parse_id("3.0"), Some(3));
		assert_eq!(parse_id("3.5"), None);
		assert_eq!(parse_id("-1"), None);
		assert_eq!(parse_id("abc"), None);
		assert_eq!(parse_id(""), None);
		assert_eq!(parse_id("NaN"), None);
		assert_eq!(parse_id("inf"), None);
	}

	#[test]
	fn test_parse_weight_rejects_non_finite() {
		assert_eq!(parse_weight("0.25"), Some(0.25));
		assert_eq!(parse_weight("1.5"), Some(1.5));
		assert_eq!(parse_weight("NaN"), None);
		assert_eq!(parse_weight("inf"), None);
		assert_eq!(parse_weight("high"), None);
	}

	#[test]
	fn test_is_header() {
		assert!(is_header(&["ID".to_string(), "pred".to_string()]));
		assert!(!is_header(&["0".to_string(), "0.1".to_string()]));
		assert!(!is_header(&[]));
	}
}
