use leptos::prelude::*;

/// Indeterminate progress indicator.
#[component]
pub fn LoadingSpinner() -> impl IntoView {
	view! {
		<div class="spinner-wrap" role="status" aria-label="Loading">
			<div class="spinner" />
		</div>
	}
}
