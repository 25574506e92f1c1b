//! DOM helpers: 2D context lookup, blitting the raster and file download.
//!
//! Everything here calls into JS, so nothing in this module runs on native
//! targets.

use kolam_core::Rect;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Find a `<canvas>` element by id.
pub fn canvas_by_id(id: &str) -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// The element's 2D context, if the browser hands one out.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Bounding client rect of the element in viewport coordinates.
pub fn client_rect(canvas: &HtmlCanvasElement) -> Rect {
    let r = canvas.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.left() + r.width(), r.top() + r.height())
}

/// Copy straight-alpha RGBA bytes onto the context at the origin.
pub fn put_rgba(
    ctx: &CanvasRenderingContext2d,
    rgba: &[u8],
    width: u32,
    height: u32,
) -> Result<(), JsValue> {
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width, height)?;
    ctx.put_image_data(&image, 0.0, 0.0)
}

/// Offer `data` as a file download through a temporary object URL.
pub fn download_bytes(filename: &str, data: &[u8], mime_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))?;

    let bytes = js_sys::Uint8Array::from(data);
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("Failed to cast to anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
