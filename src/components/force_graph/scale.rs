//! Mappings from graph values to pixels and colors.

/// Smallest drawn node radius, in world units.
pub const MIN_NODE_RADIUS: f64 = 3.0;
/// Largest drawn node radius, in world units.
pub const MAX_NODE_RADIUS: f64 = 16.0;

/// Position of `size` within `[0, max]`, clamped to `[0, 1]`.
pub fn normalize(size: f64, max: f64) -> f64 {
	if max <= f64::EPSILON || !size.is_finite() {
		return 0.0;
	}
	(size / max).clamp(0.0, 1.0)
}

/// Cornflower blue at 0 shading towards crimson at 1.
pub fn node_color(value: f64) -> String {
	let v = value.clamp(0.0, 1.0);
	let (r, g, b) = (
		(100.0 + 70.0 * v).round(),
		(149.0 - 100.0 * v).round(),
		(237.0 - 100.0 * v).round(),
	);
	format!("rgb({r}, {g}, {b})")
}

/// Node radius grows linearly with size and is capped.
pub fn node_radius(size: f64) -> f64 {
	(MIN_NODE_RADIUS + size.max(0.0)).min(MAX_NODE_RADIUS)
}

/// Link stroke width from the raw prediction.
pub fn link_width(value: f64) -> f64 {
	0.5 + 2.5 * value.clamp(0.0, 1.0)
}
