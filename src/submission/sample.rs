//! Random `id,pred` submissions for demos and fixtures.

use log::warn;
use rand::Rng;

/// Row count used when none (or nonsense) is requested.
pub const DEFAULT_SAMPLE_AMOUNT: usize = 500;

/// Ids `0..amount`, each with a uniform prediction in `[0, 1)`.
pub fn generate_rows<R: Rng>(amount: usize, rng: &mut R) -> Vec<(u64, f64)> {
	(0..amount as u64).map(|id| (id, rng.gen_range(0.0..1.0))).collect()
}

/// Render rows as a CSV with an `id,pred` header, newline separated.
pub fn to_csv(rows: &[(u64, f64)]) -> String {
	let mut lines = Vec::with_capacity(rows.len() + 1);
	lines.push("id,pred".to_string());
	lines.extend(rows.iter().map(|(id, pred)| format!("{id},{pred}")));
	lines.join("\n")
}

/// Generate a complete sample CSV.
pub fn generate_csv<R: Rng>(amount: usize, rng: &mut R) -> String {
	to_csv(&generate_rows(amount, rng))
}

/// Largest sample generated in the browser.
pub const MAX_SAMPLE_AMOUNT: usize = 100_000;

/// Interpret a requested amount. Missing, zero and unparseable values
/// fall back to [`DEFAULT_SAMPLE_AMOUNT`]; larger requests are capped at
/// [`MAX_SAMPLE_AMOUNT`].
pub fn amount_from_param(param: Option<&str>) -> usize {
	let requested = param.and_then(|p| p.trim().parse::<u64>().ok());
	match requested {
		Some(0) | None => DEFAULT_SAMPLE_AMOUNT,
		Some(n) if n > MAX_SAMPLE_AMOUNT as u64 => {
			warn!("sample of {n} rows requested, capping at {MAX_SAMPLE_AMOUNT}");
			MAX_SAMPLE_AMOUNT
		}
		Some(n) => n as usize,
	}
}
