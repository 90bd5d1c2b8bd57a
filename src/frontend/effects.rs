use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent,
};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::pointer::{
    magnetic_offset, ripple_origin, tilt_angles, tilt_transform, translate_transform, Rect,
};
use crate::reveal::{
    reveal_mode, stagger_class, RevealMode, AUTO_TARGET_SELECTOR, CARD_SELECTOR,
    OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD, REVEALED_CLASS, REVEAL_CLASS,
};
use crate::scroll::{parallax_offset, parallax_transform};

const RIPPLE_LIFETIME_MS: u32 = 650;

fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct RevealAnimator {
    _observer: Option<(IntersectionObserver, ObserverCallback)>,
}

impl RevealAnimator {
    pub fn attach(reduced_motion: bool) -> Self {
        let auto_targets = dom::query_all::<Element>(AUTO_TARGET_SELECTOR)
            .into_iter()
            .chain(dom::query_all::<Element>(CARD_SELECTOR));
        for (index, element) in auto_targets.enumerate() {
            let classes = element.class_list();
            if classes.contains(REVEAL_CLASS) {
                continue;
            }
            let _ = classes.add_1(REVEAL_CLASS);
            if let Some(delay) = stagger_class(index) {
                let _ = classes.add_1(delay);
            }
        }

        let targets = dom::query_all::<Element>(&format!(".{REVEAL_CLASS}"));
        let observer = if reduced_motion {
            None
        } else {
            match Self::observer() {
                Ok(observer) => Some(observer),
                Err(error) => {
                    log::debug!("reveal: {error}");
                    None
                }
            }
        };

        match reveal_mode(reduced_motion, observer.is_some()) {
            RevealMode::Immediate => {
                for element in &targets {
                    let _ = element.class_list().add_1(REVEALED_CLASS);
                }
            }
            RevealMode::OnIntersect => {
                if let Some((observer, _)) = observer.as_ref() {
                    for element in &targets {
                        observer.observe(element);
                    }
                }
            }
        }

        Self {
            _observer: observer,
        }
    }

    fn observer() -> SiteResult<(IntersectionObserver, ObserverCallback)> {
        let callback = ObserverCallback::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                    observer.unobserve(&target);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
        options.set_root_margin(OBSERVER_ROOT_MARGIN);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|_| SiteError::Unsupported("IntersectionObserver"))?;
        Ok((observer, callback))
    }
}

pub fn attach_ripples() -> SiteResult<EventListener> {
    let document = dom::document().ok_or(SiteError::Unsupported("document"))?;

    Ok(EventListener::new(&document, "click", |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let Some(button) = dom::closest(event.target(), ".btn, .btn-ico") else {
            return;
        };
        let Ok(ripple) = dom::create::<HtmlElement>("span") else {
            return;
        };

        let (x, y) = ripple_origin(
            &rect_of(&button),
            f64::from(mouse.client_x()),
            f64::from(mouse.client_y()),
        );
        ripple.set_class_name("ripple");
        dom::set_style(&ripple, "left", &format!("{x}px"));
        dom::set_style(&ripple, "top", &format!("{y}px"));
        if button.append_child(&ripple).is_err() {
            return;
        }

        Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
    }))
}

/// Hover effect that computes a transform from the pointer and writes it on
/// the next animation frame. A newer pointer move replaces the pending write.
fn attach_hover_transform(
    element: HtmlElement,
    transform: impl Fn(&Rect, f64, f64) -> String + 'static,
    listeners: &mut Vec<EventListener>,
) {
    let pending: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));

    let on_move = {
        let target = element.clone();
        let pending = Rc::clone(&pending);
        EventListener::new(&element, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let value = transform(
                &rect_of(&target),
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            );

            let target = target.clone();
            let frame = request_animation_frame(move |_| {
                dom::set_style(&target, "transform", &value);
            });
            *pending.borrow_mut() = Some(frame);
        })
    };

    let on_leave = {
        let target = element.clone();
        EventListener::new(&element, "mouseleave", move |_| {
            pending.borrow_mut().take();
            dom::clear_style(&target, "transform");
        })
    };

    listeners.push(on_move);
    listeners.push(on_leave);
}

pub fn attach_tilt(config: &SiteConfig, listeners: &mut Vec<EventListener>) {
    let max_degrees = config.tilt_degrees;

    for card in dom::query_all::<HtmlElement>(CARD_SELECTOR) {
        let target = card.clone();
        listeners.push(EventListener::new(&card, "touchstart", move |_| {
            dom::clear_style(&target, "transform");
        }));

        attach_hover_transform(
            card,
            move |rect, x, y| {
                let (rotate_x, rotate_y) = tilt_angles(rect, x, y, max_degrees);
                tilt_transform(rotate_x, rotate_y)
            },
            listeners,
        );
    }
}

pub fn attach_magnetic(config: &SiteConfig, listeners: &mut Vec<EventListener>) {
    let strength = config.magnetic_strength;

    for element in dom::query_all::<HtmlElement>("nav .magnetic, .nav .magnetic") {
        attach_hover_transform(
            element,
            move |rect, x, y| {
                let (dx, dy) = magnetic_offset(rect, x, y, strength);
                translate_transform(dx, dy)
            },
            listeners,
        );
    }
}

pub fn attach_parallax(reduced_motion: bool) -> Option<EventListener> {
    if reduced_motion {
        return None;
    }

    let elements = dom::query_all::<HtmlElement>(".parallax");
    if elements.is_empty() {
        return None;
    }

    let update = move || {
        let scroll_y = dom::scroll_y();
        for (index, element) in elements.iter().enumerate() {
            let offset = parallax_offset(scroll_y, index);
            dom::set_style(element, "transform", &parallax_transform(offset));
        }
    };
    update();

    let win = window()?;
    Some(EventListener::new(&win, "scroll", move |_| update()))
}
