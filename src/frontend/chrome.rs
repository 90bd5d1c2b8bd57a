//! Page furniture present on every page: header controls, active nav link,
//! the fade-out page transition and the scroll indicators.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlAnchorElement, HtmlElement, MouseEvent, PageTransitionEvent};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::navigation::{current_page, is_active_link, should_intercept, LinkClick};
use crate::scroll::{back_to_top_visible, progress_transform, scroll_progress};

const ACTIVE_LINK_CLASS: &str = "is-active";
const OVERLAY_CLASS: &str = "page-transition";
const PROGRESS_BAR_CLASS: &str = "progress-bar";

/// Class flag that lets the stylesheet hide `.reveal` content only when this
/// code actually runs.
pub fn mark_scripted() {
    if let Some(root) = dom::root_element() {
        let _ = root.class_list().add_1("js");
    }
}

pub fn fill_footer_year() {
    if let Some(year) = dom::by_id::<Element>("year") {
        let current = js_sys::Date::new_0().get_full_year();
        year.set_text_content(Some(&current.to_string()));
    }
}

pub fn make_main_focusable() {
    if let Some(main) = dom::query::<Element>("main") {
        let _ = main.set_attribute("tabindex", "-1");
    }
}

pub fn highlight_nav() {
    let Some(nav) = dom::by_id::<Element>("nav") else {
        return;
    };
    let Some(pathname) = window().and_then(|w| w.location().pathname().ok()) else {
        return;
    };

    let page = current_page(&pathname);
    for anchor in dom::query_all_in::<Element>(&nav, "a") {
        let href = anchor.get_attribute("href").unwrap_or_default();
        if is_active_link(&href, &page) {
            let _ = anchor.class_list().add_1(ACTIVE_LINK_CLASS);
            let _ = anchor.set_attribute("aria-current", "page");
        }
    }
}

pub struct MenuToggle {
    _click: EventListener,
}

impl MenuToggle {
    pub fn attach() -> Option<Self> {
        let button: HtmlElement = dom::by_id("menuToggle")?;
        let nav: Element = dom::by_id("nav")?;

        let target = button.clone();
        let click = EventListener::new(&button, "click", move |_| {
            let open = nav.class_list().toggle("open").unwrap_or(false);
            let _ = target.set_attribute("aria-expanded", &open.to_string());
        });

        Some(Self { _click: click })
    }
}

pub struct PageTransitions {
    _click: EventListener,
    _pageshow: EventListener,
}

impl PageTransitions {
    pub fn attach(config: &SiteConfig) -> SiteResult<Self> {
        let document = dom::document().ok_or(SiteError::Unsupported("document"))?;
        let win = window().ok_or(SiteError::Unsupported("window"))?;

        let overlay: HtmlElement = dom::create("div")?;
        overlay.set_class_name(OVERLAY_CLASS);
        dom::body()?.append_child(&overlay)?;
        let overlay = Rc::new(overlay);

        let delay_ms = config.transition_delay_ms;
        let click = {
            let overlay = Rc::clone(&overlay);
            EventListener::new_with_options(
                &document,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let Some(anchor) = dom::closest(event.target(), "a[href]") else {
                        return;
                    };
                    let Some(page_url) = window()
                        .and_then(|w| w.location().href().ok())
                        .and_then(|href| Url::parse(&href).ok())
                    else {
                        return;
                    };

                    let href = anchor.get_attribute("href").unwrap_or_default();
                    let target = anchor.get_attribute("target");
                    let click = LinkClick {
                        href: &href,
                        target: target.as_deref(),
                        download: anchor.has_attribute("download"),
                        modified: mouse.ctrl_key()
                            || mouse.meta_key()
                            || mouse.shift_key()
                            || mouse.alt_key()
                            || mouse.button() != 0,
                        default_prevented: event.default_prevented(),
                    };
                    if !should_intercept(&click, &page_url) {
                        return;
                    }

                    let destination = anchor
                        .dyn_ref::<HtmlAnchorElement>()
                        .map(HtmlAnchorElement::href)
                        .or_else(|| page_url.join(&href).ok().map(|url| url.to_string()));
                    let Some(destination) = destination else {
                        return;
                    };

                    event.prevent_default();
                    let _ = overlay.class_list().add_1("active");
                    log::debug!("transition: leaving for {destination}");
                    Timeout::new(delay_ms, move || {
                        if let Some(win) = window() {
                            let _ = win.location().set_href(&destination);
                        }
                    })
                    .forget();
                },
            )
        };

        // Back/forward cache restores the page with the overlay still shown.
        let pageshow = EventListener::new(&win, "pageshow", move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .map(PageTransitionEvent::persisted)
                .unwrap_or(false);
            if persisted {
                let _ = overlay.class_list().remove_1("active");
            }
        });

        Ok(Self {
            _click: click,
            _pageshow: pageshow,
        })
    }
}

pub struct ScrollIndicators {
    _listeners: Vec<EventListener>,
}

impl ScrollIndicators {
    pub fn attach(config: &SiteConfig) -> SiteResult<Self> {
        let win = window().ok_or(SiteError::Unsupported("window"))?;
        let root = dom::root_element().ok_or(SiteError::MissingElement("html"))?;

        let bar = match dom::query::<HtmlElement>(&format!(".{PROGRESS_BAR_CLASS}")) {
            Some(bar) => bar,
            None => {
                let bar: HtmlElement = dom::create("div")?;
                bar.set_class_name(PROGRESS_BAR_CLASS);
                dom::body()?.append_child(&bar)?;
                bar
            }
        };
        let back_to_top = dom::query::<Element>(".back-to-top");
        let threshold = config.back_to_top_threshold;

        let update = Rc::new(move || {
            let progress = scroll_progress(
                f64::from(root.scroll_top()),
                f64::from(root.scroll_height()),
                f64::from(root.client_height()),
            );
            dom::set_style(&bar, "transform", &progress_transform(progress));

            if let Some(button) = back_to_top.as_ref() {
                let visible = back_to_top_visible(dom::scroll_y(), threshold);
                let _ = button.class_list().toggle_with_force("show", visible);
            }
        });
        update();

        let on_scroll = {
            let update = Rc::clone(&update);
            EventListener::new(&win, "scroll", move |_| update())
        };
        let on_resize = EventListener::new(&win, "resize", move |_| update());

        Ok(Self {
            _listeners: vec![on_scroll, on_resize],
        })
    }
}
