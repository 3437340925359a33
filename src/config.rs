//! Viewer settings: compiled-in defaults, overridden by URL query parameters.

use log::warn;

use crate::submission::sample::amount_from_param;
use crate::submission::{GraphOptions, Topology};

/// Where the reference dataset is served from.
pub const DEFAULT_DATASET_PATH: &str = "/dataset.csv";
/// Zoom control bounds and starting level.
pub const MIN_ZOOM: u8 = 1;
/// See [`MIN_ZOOM`].
pub const MAX_ZOOM: u8 = 6;
/// See [`MIN_ZOOM`].
pub const DEFAULT_ZOOM: u8 = 1;
/// File name offered by the "Save" button.
pub const EXPORT_FILE_NAME: &str = "submission-graph.png";

/// Everything the home page needs to know before the first fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
	/// URL of the reference dataset.
	pub dataset_path: String,
	/// Graph construction options.
	pub graph: GraphOptions,
	/// Remote submission to load on start (`?url=`).
	pub submission_url: Option<String>,
	/// Generate a sample of this many rows on start (`?sample=`).
	pub sample_amount: Option<usize>,
	/// Starting zoom level (`?zoom=`), clamped to the control bounds.
	pub zoom: u8,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			dataset_path: DEFAULT_DATASET_PATH.to_string(),
			graph: GraphOptions::default(),
			submission_url: None,
			sample_amount: None,
			zoom: DEFAULT_ZOOM,
		}
	}
}

impl ViewerConfig {
	/// Apply query parameters on top of the defaults. `lookup` returns the
	/// value of a parameter by name. Values that fail to parse are logged
	/// and ignored.
	pub fn from_query(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::default();

		if let Some(raw) = lookup("topology") {
			match raw.parse::<Topology>() {
				Ok(topology) => config.graph = GraphOptions::new(topology),
				Err(e) => warn!("ignoring topology parameter: {e}"),
			}
		}
		if let Some(raw) = lookup("scale") {
			match raw.trim().parse::<f64>() {
				Ok(scale) if scale.is_finite() && scale > 0.0 => {
					config.graph = config.graph.with_scale(scale)
				}
				_ => warn!("ignoring scale parameter {raw:?}: expected a positive number"),
			}
		}
		if let Some(raw) = lookup("zoom") {
			match raw.trim().parse::<u8>() {
				Ok(zoom) => config.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM),
				Err(_) => warn!("ignoring zoom parameter {raw:?}"),
			}
		}
		if let Some(path) = lookup("dataset").filter(|p| !p.trim().is_empty()) {
			config.dataset_path = path;
		}
		config.submission_url = lookup("url").filter(|u| !u.trim().is_empty());
		config.sample_amount = lookup("sample").map(|raw| amount_from_param(Some(&raw)));
		config
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn config(pairs: &[(&str, &str)]) -> ViewerConfig {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		ViewerConfig::from_query(|k| map.get(k).cloned())
	}

	#[test]
	fn test_defaults_without_parameters() {
		assert_eq!(config(&[]), ViewerConfig::default());
	}

	#[test]
	fn test_topology_sets_its_default_scale() {
		let c = config(&[("topology", "hub")]);
		assert_eq!(c.graph.topology, Topology::HubAndSpoke);
		assert_eq!(c.graph.size_scale, 1.0);
	}

	#[test]
	fn test_scale_overrides_topology_default() {
		let c = config(&[("topology", "pair"), ("scale", "4")]);
		assert_eq!(c.graph, GraphOptions::new(Topology::PerPair).with_scale(4.0));
	}

	#[test]
	fn test_bad_values_are_ignored() {
		let c = config(&[("topology", "ring"), ("scale", "-3"), ("zoom", "big")]);
		assert_eq!(c.graph, GraphOptions::default());
		assert_eq!(c.zoom, DEFAULT_ZOOM);
	}

	#[test]
	fn test_zoom_is_clamped() {
		assert_eq!(config(&[("zoom", "40")]).zoom, MAX_ZOOM);
		assert_eq!(config(&[("zoom", "0")]).zoom, MIN_ZOOM);
	}

	#[test]
	fn test_sources() {
		let c = config(&[("url", "https://x.test/a.csv"), ("sample", "0")]);
		assert_eq!(c.submission_url.as_deref(), Some("https://x.test/a.csv"));
		assert_eq!(c.sample_amount, Some(500));
		assert_eq!(config(&[("url", " ")]).submission_url, None);
	}
}
