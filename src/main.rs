//! WASM entry point: mounts [`App`] on the document body.

use leptos::prelude::*;
use share_graph::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(|| view! { <App /> })
}
