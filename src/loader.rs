//! Getting CSV text into the app: HTTP fetches and local files.

use log::debug;
use wasm_bindgen_futures::JsFuture;

use crate::error::LoadError;

/// GET a URL and return its body as text. Non-2xx answers are errors.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let network = |e: gloo_net::Error| LoadError::Network {
		url: url.to_string(),
		message: e.to_string(),
	};
	let response = gloo_net::http::Request::get(url)
		.send()
		.await
		.map_err(network)?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	let text = response.text().await.map_err(network)?;
	debug!("fetched {url}: {} bytes", text.len());
	Ok(text)
}

/// Read a user-selected file as UTF-8 text.
pub async fn read_file(file: &web_sys::File) -> Result<String, LoadError> {
	let failed = |message: String| LoadError::File {
		name: file.name(),
		message,
	};
	let value = JsFuture::from(file.text())
		.await
		.map_err(|e| failed(format!("{e:?}")))?;
	value
		.as_string()
		.ok_or_else(|| failed("file content is not text".to_string()))
}
