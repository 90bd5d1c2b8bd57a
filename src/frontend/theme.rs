use gloo_events::EventListener;
use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::HtmlElement;

use super::dom;
use crate::theme::{resolve_theme, Theme, THEME_ATTRIBUTE, THEME_KEY};

const TOGGLE_ID: &str = "themeToggle";

fn read_stored_theme() -> Option<String> {
    dom::local_storage()?.get_item(THEME_KEY).ok().flatten()
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = dom::local_storage() {
        if storage.set_item(THEME_KEY, theme.as_str()).is_err() {
            log::debug!("theme: storage rejected write");
        }
    }
}

fn system_prefers_light() -> bool {
    dom::matches_media("(prefers-color-scheme: light)")
}

fn current_theme() -> Theme {
    dom::root_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
        .and_then(|value| Theme::from_str(&value))
        .unwrap_or_else(|| resolve_theme(read_stored_theme().as_deref(), system_prefers_light()))
}

fn apply_theme(theme: Theme) {
    if let Some(root) = dom::root_element() {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

fn apply_theme_with_transition(theme: Theme) {
    if dom::prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = dom::document() else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser calls back after this function returns.
    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn sync_toggle(button: &HtmlElement, theme: Theme) {
    let _ = button.set_attribute("aria-pressed", &theme.pressed().to_string());
    let _ = button.set_attribute("aria-label", &theme.toggle_label());
}

/// Resolves, applies and persists the theme. Runs before anything else is
/// wired so the page never flashes the wrong palette for long.
pub fn init_theme() -> Theme {
    let theme = resolve_theme(read_stored_theme().as_deref(), system_prefers_light());
    apply_theme(theme);
    persist_theme(theme);
    log::debug!("theme: resolved {}", theme.as_str());
    theme
}

pub struct ThemeToggle {
    _click: EventListener,
}

impl ThemeToggle {
    pub fn attach(initial: Theme) -> Option<Self> {
        let button: HtmlElement = dom::by_id(TOGGLE_ID)?;
        sync_toggle(&button, initial);

        let target = button.clone();
        let click = EventListener::new(&button, "click", move |_| {
            let next = current_theme().toggled();
            persist_theme(next);
            apply_theme_with_transition(next);
            sync_toggle(&target, next);
            log::debug!("theme: switched to {}", next.as_str());
        });

        Some(Self { _click: click })
    }
}
