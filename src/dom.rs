use torus_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Look up an element by id, or create it as a `tag` appended to `<body>`.
pub fn element_or_create(
    document: &web::Document,
    id: &str,
    tag: &str,
) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    el.set_id(id);
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append #{}: {:?}", id, e))?;
    Ok(el)
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Window size in CSS pixels plus the device pixel ratio.
pub fn window_viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(css(window.inner_width()), css(window.inner_height()))
        .with_pixel_ratio(window.device_pixel_ratio() as f32)
}

/// Match the canvas backing store to the viewport's device-pixel size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let (w_px, h_px) = viewport.pixel_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
}
