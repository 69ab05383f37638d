use blog_core::{Anchor, PageSurface};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// `PageSurface` поверх живого DOM. Отсутствующие элементы пропускаются.
pub(crate) struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    fn find(&self, anchor: Anchor) -> Option<Element> {
        self.document
            .query_selector(&anchor.selector())
            .ok()
            .flatten()
    }
}

/// Сетка карточек раскладывается гридом, остальные регионы блоками.
fn display_value(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::BlogGrid => "grid",
        _ => "block",
    }
}

impl PageSurface for DomSurface {
    fn has_anchor(&self, anchor: Anchor) -> bool {
        self.find(anchor).is_some()
    }

    fn set_visible(&mut self, anchor: Anchor, visible: bool) {
        let Some(element) = self.find(anchor).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        let display = if visible { display_value(anchor) } else { "none" };
        let _ = element.style().set_property("display", display);
    }

    fn set_text(&mut self, anchor: Anchor, text: &str) {
        if let Some(element) = self.find(anchor) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, anchor: Anchor, html: &str) {
        if let Some(element) = self.find(anchor) {
            element.set_inner_html(html);
        }
    }

    fn set_attribute(&mut self, anchor: Anchor, name: &str, value: &str) {
        if let Some(element) = self.find(anchor) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn add_class(&mut self, anchor: Anchor, class: &str) {
        if let Some(element) = self.find(anchor) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn set_document_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn set_meta_description(&mut self, description: &str) {
        if let Ok(Some(meta)) = self.document.query_selector(r#"meta[name="description"]"#) {
            let _ = meta.set_attribute("content", description);
        }
    }
}
