use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::info;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::components::file_upload::FileUpload;
use crate::components::graph_container::GraphContainer;
use crate::components::header::Header;
use crate::components::spinner::LoadingSpinner;
use crate::components::zoom_control::ZoomLevel;
use crate::config::{MAX_ZOOM, MIN_ZOOM, ViewerConfig};
use crate::loader;
use crate::session::{Phase, ReferenceStatus, Session};
use crate::submission::sample;

/// A session failure surfaced through the error boundary.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
struct PageError(String);

/// Generate a random submission and feed it through the normal upload path.
fn load_sample(session: RwSignal<Session>, amount: usize) {
	let csv = sample::generate_csv(amount, &mut rand::thread_rng());
	info!("generated a sample submission of {amount} rows");
	session.update(|s| {
		let ticket = s.begin_submission();
		s.submission_received(ticket, &format!("sample of {amount} rows"), &csv);
	});
}

/// Fetch a remote submission. A newer upload that lands first wins.
fn load_remote(session: RwSignal<Session>, url: String) {
	let Some(ticket) = session.try_update(|s| s.begin_submission()) else {
		return;
	};
	spawn_local(async move {
		match loader::fetch_text(&url).await {
			Ok(text) => session.update(|s| {
				s.submission_received(ticket, &url, &text);
			}),
			Err(e) => session.update(|s| {
				s.submission_failed(ticket, e.to_string());
			}),
		}
	});
}

/// Upload page that turns into the graph view once a submission joins.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_query_map().with_untracked(|q| ViewerConfig::from_query(|key| q.get(key)));
	info!("viewer config: {config:?}");

	let session = RwSignal::new(Session::new(config.graph));
	let zoom = RwSignal::new(ZoomLevel::new(config.zoom, MIN_ZOOM, MAX_ZOOM));
	let focus = config.graph.focus().map(str::to_string);

	let dataset_path = config.dataset_path.clone();
	spawn_local(async move {
		match loader::fetch_text(&dataset_path).await {
			Ok(text) => session.update(|s| s.reference_loaded(&text)),
			Err(e) => session.update(|s| s.reference_failed(e.to_string())),
		}
	});

	if let Some(url) = config.submission_url.clone() {
		load_remote(session, url);
	} else if let Some(amount) = config.sample_amount {
		load_sample(session, amount);
	}

	let on_file = Callback::new(move |file: File| {
		let Some(ticket) = session.try_update(|s| s.begin_submission()) else {
			return;
		};
		spawn_local(async move {
			match loader::read_file(&file).await {
				Ok(text) => session.update(|s| {
					s.submission_received(ticket, &file.name(), &text);
				}),
				Err(e) => session.update(|s| {
					s.submission_failed(ticket, e.to_string());
				}),
			}
		});
	});
	let on_reset = Callback::new(move |()| session.update(Session::reset));

	let retry = move |_| {
		let reference_down =
			session.with_untracked(|s| matches!(s.reference(), ReferenceStatus::Failed(_)));
		if !reference_down {
			session.update(Session::reset);
		} else if let Some(window) = web_sys::window() {
			let _ = window.location().reload();
		}
	};

	let failure = move || {
		session.with(|s| match s.phase() {
			Phase::Failed(msg) => Err(PageError(msg.clone())),
			_ => Ok(()),
		})
	};
	let upload_error = Signal::derive(move || {
		session.with(|s| match s.phase() {
			Phase::Rejected(msg) => Some(msg.clone()),
			_ => None,
		})
	});
	let graph = Signal::derive(move || session.with(|s| s.graph().cloned().unwrap_or_default()));
	let caption = Signal::derive(move || {
		session.with(|s| match (s.submission(), s.graph()) {
			(Some(sub), Some(g)) => format!(
				"{}: {} nodes, {} links",
				sub.name,
				g.nodes.len(),
				g.links.len()
			),
			_ => String::new(),
		})
	});

	view! {
		<main class="page">
			<Header />
			<ErrorBoundary fallback=move |errors| {
				view! {
					<div class="error-banner">
						<h2>"Uh oh! Something went wrong!"</h2>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
						<button class="primary" on:click=retry>
							"Try again"
						</button>
					</div>
				}
			}>
				{failure}
				<Show when=move || session.with(|s| s.is_busy())>
					<LoadingSpinner />
				</Show>
				<Show
					when=move || session.with(|s| s.graph().is_none())
					fallback=move || {
						view! {
							<GraphContainer
								data=graph
								caption=caption
								zoom=zoom
								focus=focus.clone()
								on_reset=on_reset
							/>
						}
					}
				>
					<FileUpload on_file=on_file error=upload_error />
					<button
						class="link"
						on:click=move |_| load_sample(session, sample::DEFAULT_SAMPLE_AMOUNT)
					>
						"No file at hand? Try a sample"
					</button>
				</Show>
			</ErrorBoundary>
		</main>
	}
}
