use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page">
			<h1>"404 - Page Not Found"</h1>
			<p>"There is no graph here."</p>
			<a href="/">"Back to upload"</a>
		</main>
	}
}
