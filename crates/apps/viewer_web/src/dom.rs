use viewer::{Controls, Nav, NavState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlSelectElement};

pub const DATE_LABEL_ID: &str = "date";
pub const RESOLUTION_ID: &str = "resolution";
pub const MULTIPLIER_ID: &str = "multiplier";

/// Looks up `#id` and casts it to `T`.
pub fn element<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

/// Nav buttons plus the date label; buttons use the `Nav` names as ids.
#[derive(Debug)]
pub struct DomControls {
    buttons: [(Nav, HtmlButtonElement); 4],
    label: Element,
}

impl DomControls {
    pub fn from_document(doc: &Document) -> Result<Self, JsValue> {
        let button = |nav: Nav| element::<HtmlButtonElement>(doc, nav.as_str()).map(|b| (nav, b));
        Ok(Self {
            buttons: [
                button(Nav::First)?,
                button(Nav::Prev)?,
                button(Nav::Next)?,
                button(Nav::Last)?,
            ],
            label: element(doc, DATE_LABEL_ID)?,
        })
    }

    pub fn buttons(&self) -> impl Iterator<Item = &(Nav, HtmlButtonElement)> {
        self.buttons.iter()
    }
}

impl Controls for DomControls {
    fn set_nav_state(&mut self, nav: NavState) {
        for (which, button) in &self.buttons {
            button.set_disabled(!nav.is_enabled(*which));
        }
    }

    fn set_date_label(&mut self, label: &str) {
        self.label.set_text_content(Some(label));
    }
}

/// Current values of the resolution and multiplier selectors.
pub fn selector_values(doc: &Document) -> Result<(String, String), JsValue> {
    let resolution: HtmlSelectElement = element(doc, RESOLUTION_ID)?;
    let multiplier: HtmlSelectElement = element(doc, MULTIPLIER_ID)?;
    Ok((resolution.value(), multiplier.value()))
}
