use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::force_graph::{ForceGraphCanvas, GraphData};
use super::zoom_control::{ZoomControl, ZoomLevel};
use crate::config::EXPORT_FILE_NAME;
use crate::export;

/// The graph card: canvas, zoom buttons, a caption and the save action.
#[component]
pub fn GraphContainer(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] caption: Signal<String>,
	zoom: RwSignal<ZoomLevel>,
	#[prop(default = None)] focus: Option<String>,
	on_reset: Callback<()>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let scale = Signal::derive(move || zoom.get().scale());

	let on_save = move |_| {
		let canvas: Option<HtmlCanvasElement> = canvas_ref.get_untracked();
		if let Err(e) = export::save_png(canvas, EXPORT_FILE_NAME) {
			warn!("save skipped: {e}");
		}
	};

	view! {
		<div class="graph-card">
			<h2>"Predicted Weights"</h2>
			<p class="subtitle">{move || caption.get()}</p>
			<div class="graph-frame">
				<ForceGraphCanvas data=data zoom=scale focus=focus canvas_ref=canvas_ref />
			</div>
			<div class="graph-actions">
				<ZoomControl level=zoom />
				<button class="secondary" on:click=move |_| on_reset.run(())>
					"Upload another"
				</button>
				<button class="primary" on:click=on_save>
					"Save"
				</button>
			</div>
		</div>
	}
}
