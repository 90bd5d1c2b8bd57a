use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, EventTarget, HtmlElement, NodeList, Storage};

use crate::error::{SiteError, SiteResult};
use crate::fireworks::Viewport;

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn root_element() -> Option<Element> {
    document()?.document_element()
}

pub fn body() -> SiteResult<HtmlElement> {
    document()
        .and_then(|d| d.body())
        .ok_or(SiteError::MissingElement("body"))
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    document()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(collect)
        .unwrap_or_default()
}

pub fn query_all_in<T: JsCast>(parent: &Element, selector: &str) -> Vec<T> {
    parent
        .query_selector_all(selector)
        .ok()
        .map(collect)
        .unwrap_or_default()
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn create<T: JsCast>(tag: &str) -> SiteResult<T> {
    let document = document().ok_or(SiteError::Unsupported("document"))?;
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| SiteError::Dom(format!("<{tag}> has an unexpected type")))
}

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub fn matches_media(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    matches_media("(prefers-reduced-motion: reduce)")
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn data(element: &HtmlElement, key: &str) -> Option<String> {
    element.dataset().get(key)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// High-resolution timestamp on the same clock as animation frames.
pub fn now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn viewport() -> Viewport {
    let Some(win) = window() else {
        return Viewport::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1, 1.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    Viewport::new(width, height, win.device_pixel_ratio())
}

/// Milliseconds since the epoch for a `data-date` value, `None` when the
/// browser cannot parse it.
pub fn parse_date(value: Option<String>) -> Option<f64> {
    let parsed = js_sys::Date::parse(&value?);
    parsed.is_finite().then_some(parsed)
}
