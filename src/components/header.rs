use leptos::prelude::*;

/// Page title block.
#[component]
pub fn Header() -> impl IntoView {
	view! {
		<header class="page-header">
			<h1>"Share It"</h1>
			<p class="tagline">
				"Visualize your submission as a graph of project pairs and share it with the world."
			</p>
		</header>
	}
}
