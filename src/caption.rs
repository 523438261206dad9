use torus_core::CaptionSink;
use web_sys as web;

/// Writes captions into the text content of one element.
pub struct DomCaption {
    el: web::Element,
}

impl DomCaption {
    pub fn new(el: web::Element) -> Self {
        Self { el }
    }
}

impl CaptionSink for DomCaption {
    fn set_text(&mut self, text: &str) {
        self.el.set_text_content(Some(text));
    }
}
