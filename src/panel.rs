//! Settings panel: one `<details>` folder per parameter group, one range
//! input per parameter. Inputs only enqueue changes; the Parameter Store
//! applies them on the next frame.

use crate::constants::SLIDER_STEP;
use crate::dom;
use crate::events::{listen, EventQueue};
use torus_core::{InputEvent, ParamName, Params};
use wasm_bindgen::JsCast;
use web_sys as web;

fn create(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))
}

fn folder(document: &web::Document, title: &str) -> anyhow::Result<web::Element> {
    let details = create(document, "details")?
        .dyn_into::<web::HtmlDetailsElement>()
        .map_err(|e| anyhow::anyhow!("details: {:?}", e))?;
    details.set_open(true);
    let summary = create(document, "summary")?;
    summary.set_text_content(Some(title));
    append(&details, &summary)?;
    Ok(details.into())
}

fn slider(
    document: &web::Document,
    name: ParamName,
    value: f32,
    queue: &EventQueue,
) -> anyhow::Result<web::Element> {
    let label = create(document, "label")?;
    label.set_text_content(Some(name.key()));
    let input = create(document, "input")?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("input: {:?}", e))?;
    let (min, max) = name.range();
    input.set_type("range");
    input.set_min(&min.to_string());
    input.set_max(&max.to_string());
    input.set_step(&SLIDER_STEP.to_string());
    input.set_value(&value.to_string());

    let queue = queue.clone();
    let source = input.clone();
    listen(&input, "input", move |_: web::Event| {
        match source.value().parse::<f32>() {
            Ok(v) => queue.push(InputEvent::ParamChanged(name, v)),
            Err(e) => log::warn!("[panel] {}: {:?}", name.key(), e),
        }
    });
    append(&label, &input)?;
    Ok(label)
}

pub fn build(document: &web::Document, values: &Params, queue: &EventQueue) -> anyhow::Result<()> {
    let root = dom::element_or_create(document, crate::constants::PANEL_ID, "div")?;
    let mut current: Option<(&'static str, web::Element)> = None;
    for name in ParamName::ALL {
        let title = name.folder();
        if current.as_ref().map_or(true, |(t, _)| *t != title) {
            let el = folder(document, title)?;
            append(&root, &el)?;
            current = Some((title, el));
        }
        if let Some((_, parent)) = &current {
            append(parent, &slider(document, name, values.get(name), queue)?)?;
        }
    }
    log::info!("[panel] {} controls", ParamName::ALL.len());
    Ok(())
}
