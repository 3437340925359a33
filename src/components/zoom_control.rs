use leptos::prelude::*;

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// Integer zoom step shown by [`ZoomControl`], bounded on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomLevel {
	value: u8,
	min: u8,
	max: u8,
}

impl ZoomLevel {
	/// `value` is clamped into `[min, max]`.
	pub fn new(value: u8, min: u8, max: u8) -> Self {
		let (min, max) = (min.min(max), max.max(min));
		Self {
			value: value.clamp(min, max),
			min,
			max,
		}
	}

	/// Current step.
	pub fn value(self) -> u8 {
		self.value
	}

	/// True unless already at the upper bound.
	pub fn can_zoom_in(self) -> bool {
		self.value < self.max
	}

	/// True unless already at the lower bound.
	pub fn can_zoom_out(self) -> bool {
		self.value > self.min
	}

	/// One step up, saturating at the bound.
	pub fn zoom_in(self) -> Self {
		Self::new(self.value.saturating_add(1), self.min, self.max)
	}

	/// One step down, saturating at the bound.
	pub fn zoom_out(self) -> Self {
		Self::new(self.value.saturating_sub(1), self.min, self.max)
	}

	/// View scale the canvas should use for this step.
	pub fn scale(self) -> f64 {
		f64::from(self.value)
	}
}

impl Default for ZoomLevel {
	fn default() -> Self {
		Self::new(DEFAULT_ZOOM, MIN_ZOOM, MAX_ZOOM)
	}
}

/// `-` / `+` buttons around the current zoom step.
#[component]
pub fn ZoomControl(level: RwSignal<ZoomLevel>) -> impl IntoView {
	view! {
		<div class="zoom-control">
			<span class="zoom-label">"Zoom Level:"</span>
			<button
				class="zoom-button"
				disabled=move || !level.get().can_zoom_out()
				on:click=move |_| level.update(|z| *z = z.zoom_out())
			>
				"-"
			</button>
			<span class="zoom-value">{move || format!("{}x", level.get().value())}</span>
			<button
				class="zoom-button"
				disabled=move || !level.get().can_zoom_in()
				on:click=move |_| level.update(|z| *z = z.zoom_in())
			>
				"+"
			</button>
		</div>
	}
}
