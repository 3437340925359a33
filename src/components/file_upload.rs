use leptos::prelude::*;
use log::warn;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::submission::check_mime;

/// Click-to-pick or drag-and-drop area for a single CSV file.
///
/// Dropped files must report a CSV MIME type; content checks happen once
/// `on_file` has read the file. `error` shows a message from the caller.
#[component]
pub fn FileUpload(
	on_file: Callback<File>,
	#[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
	let (dragging, set_dragging) = signal(false);
	let (local_error, set_local_error) = signal(None::<String>);

	let on_change = move |ev: Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		if let Some(file) = input.files().and_then(|files| files.get(0)) {
			set_local_error.set(None);
			on_file.run(file);
		}
		// Allow re-selecting the same file after a rejection.
		input.set_value("");
	};

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		set_dragging.set(false);
		let Some(file) = ev
			.data_transfer()
			.and_then(|dt| dt.files())
			.and_then(|files| files.get(0))
		else {
			return;
		};
		match check_mime(&file.type_()) {
			Ok(()) => {
				set_local_error.set(None);
				on_file.run(file);
			}
			Err(e) => {
				warn!("dropped {:?} with type {:?}", file.name(), file.type_());
				set_local_error.set(Some(e.to_string()));
			}
		}
	};

	let message = move || local_error.get().or_else(|| error.get());

	view! {
		<div>
			<div
				class=move || if dragging.get() { "dropzone dragging" } else { "dropzone" }
				on:dragover=move |ev: DragEvent| {
					ev.prevent_default();
					set_dragging.set(true);
				}
				on:dragleave=move |_| set_dragging.set(false)
				on:drop=on_drop
			>
				<label class="dropzone-label">
					<p>
						<strong>"Click to upload"</strong>
						" or drag and drop"
					</p>
					<p class="hint">"CSV files only, with columns id,pred"</p>
					<input type="file" class="hidden" accept=".csv" on:change=on_change />
				</label>
			</div>
			{move || message().map(|msg| view! { <p class="upload-error">{msg}</p> })}
		</div>
	}
}
