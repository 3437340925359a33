//! Saving the rendered graph as a PNG.

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlCanvasElement};

use crate::error::ExportError;

/// Encode the canvas as PNG and hand it to the browser as a download.
///
/// With no mounted canvas this is [`ExportError::NoSurface`]; callers log
/// it and carry on.
pub fn save_png(canvas: Option<HtmlCanvasElement>, file_name: &str) -> Result<(), ExportError> {
	let canvas = canvas.ok_or(ExportError::NoSurface)?;
	let browser = |e: wasm_bindgen::JsValue| ExportError::Browser(format!("{e:?}"));

	let data_url = canvas.to_data_url_with_type("image/png").map_err(browser)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Browser("no document".to_string()))?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(browser)?
		.dyn_into()
		.map_err(|_| ExportError::Browser("anchor element has the wrong type".to_string()))?;
	anchor.set_href(&data_url);
	anchor.set_download(file_name);
	anchor.click();
	info!("exported graph as {file_name} ({} bytes)", data_url.len());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_canvas_is_no_surface() {
		assert_eq!(save_png(None, "x.png"), Err(ExportError::NoSurface));
	}
}
