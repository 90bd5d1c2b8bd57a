//! Browser side of the fireworks: canvas surface, animation-frame scheduler,
//! the key and double-click triggers and the status toast.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent};

use super::dom;
use crate::config::FireworksConfig;
use crate::error::{SiteError, SiteResult};
use crate::fireworks::{
    FrameCallback, FrameScheduler, Fireworks, FireworksHandle, KeyTarget, Particle,
    SecretSequence, Surface, SurfaceHost, Viewport,
};

const CANVAS_ID: &str = "fx-canvas";
const TOAST_ID: &str = "eggToast";
const TOAST_VISIBLE_MS: u32 = 1_200;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl CanvasSurface {
    fn create(viewport: Viewport) -> SiteResult<Self> {
        let canvas: HtmlCanvasElement = dom::create("canvas")?;
        canvas.set_id(CANVAS_ID);

        let context = canvas
            .get_context("2d")?
            .ok_or(SiteError::Unsupported("2d canvas context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::Unsupported("2d canvas context"))?;

        dom::body()?.append_child(&canvas)?;
        Ok(Self {
            canvas,
            context,
            viewport,
        })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (width, height) = viewport.device_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        dom::set_style(&self.canvas, "width", "100vw");
        dom::set_style(&self.canvas, "height", "100vh");

        let ratio = viewport.pixel_ratio;
        let _ = self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn fade(&mut self, opacity: f64) {
        let context = &self.context;
        let _ = context.set_global_composite_operation("source-over");
        context.set_global_alpha(1.0);
        context.set_fill_style_str(&format!("rgba(0,0,0,{opacity})"));
        context.fill_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        let _ = context.set_global_composite_operation("lighter");
    }

    fn draw_particle(&mut self, particle: &Particle) {
        let context = &self.context;
        context.set_fill_style_str(particle.color);
        context.set_global_alpha(particle.alpha);
        context.begin_path();
        if context
            .arc(particle.x, particle.y, particle.size, 0.0, TAU)
            .is_ok()
        {
            context.fill();
        }
    }

    fn release(&mut self) {
        self.canvas.remove();
    }
}

pub struct CanvasHost;

impl SurfaceHost for CanvasHost {
    type Surface = CanvasSurface;

    fn acquire(&mut self, viewport: Viewport) -> Option<CanvasSurface> {
        CanvasSurface::create(viewport)
            .map_err(|error| log::debug!("fireworks: {error}"))
            .ok()
    }
}

/// `requestAnimationFrame` through gloo. Dropping the stored handle cancels
/// the frame.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    frame: Option<AnimationFrame>,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule_next(&mut self, callback: FrameCallback) {
        self.frame = Some(request_animation_frame(callback));
    }

    fn cancel(&mut self) {
        self.frame.take();
    }

    fn is_pending(&self) -> bool {
        self.frame.is_some()
    }
}

/// Short status message in the corner. A newer message cancels the pending
/// hide of the previous one.
#[derive(Default)]
struct Toast {
    hide: Option<Timeout>,
}

impl Toast {
    fn element() -> SiteResult<HtmlElement> {
        if let Some(existing) = dom::by_id::<HtmlElement>(TOAST_ID) {
            return Ok(existing);
        }

        let toast: HtmlElement = dom::create("div")?;
        toast.set_id(TOAST_ID);
        toast.set_class_name("egg-toast");
        dom::body()?.append_child(&toast)?;
        Ok(toast)
    }

    fn show(&mut self, text: &str) {
        let toast = match Self::element() {
            Ok(toast) => toast,
            Err(error) => {
                log::debug!("toast: {error}");
                return;
            }
        };

        toast.set_text_content(Some(text));
        let _ = toast.class_list().add_1("show");
        self.hide = Some(Timeout::new(TOAST_VISIBLE_MS, move || {
            let _ = toast.class_list().remove_1("show");
        }));
    }
}

fn key_target() -> KeyTarget {
    let Some(active) = dom::document().and_then(|d| d.active_element()) else {
        return KeyTarget::Page;
    };

    let tag = active.tag_name();
    let editable = active
        .dyn_ref::<HtmlElement>()
        .map(HtmlElement::is_content_editable)
        .unwrap_or(false);
    if tag == "INPUT" || tag == "TEXTAREA" || editable {
        KeyTarget::Editable
    } else {
        KeyTarget::Page
    }
}

type Handle = FireworksHandle<CanvasHost, AnimationFrameScheduler>;

struct Toggle {
    handle: Handle,
    secret: String,
    resize: Option<EventListener>,
    toast: Toast,
}

impl Toggle {
    fn flip(&mut self) {
        let running = self.handle.toggle(dom::now(), dom::viewport());

        if running {
            let handle = self.handle.clone();
            self.resize = window().map(|win| {
                EventListener::new(&win, "resize", move |_| handle.resize(dom::viewport()))
            });
            self.toast
                .show(&format!("\u{1F386} Fireworks on: type {} again", self.secret));
        } else {
            let was_on = self.resize.take().is_some();
            if was_on {
                self.toast.show("\u{1F386} Fireworks off");
            }
        }
    }
}

/// Keyboard and logo double-click triggers for the fireworks.
pub struct FireworksEgg {
    _listeners: Vec<EventListener>,
}

impl FireworksEgg {
    pub fn attach(config: &FireworksConfig) -> SiteResult<Self> {
        let win = window().ok_or(SiteError::Unsupported("window"))?;

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let fireworks = Fireworks::new(
            config.clone(),
            CanvasHost,
            AnimationFrameScheduler::default(),
            fastrand::Rng::with_seed(seed),
        );
        let toggle = Rc::new(RefCell::new(Toggle {
            handle: FireworksHandle::new(fireworks),
            secret: config.secret.clone(),
            resize: None,
            toast: Toast::default(),
        }));

        let mut sequence = SecretSequence::new(&config.secret);
        let keydown = {
            let toggle = Rc::clone(&toggle);
            EventListener::new(&win, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                if sequence.feed(&key, key_target()) {
                    toggle.borrow_mut().flip();
                }
            })
        };

        let mut listeners = vec![keydown];
        if let Some(logo) = dom::query::<Element>(".logo") {
            listeners.push(EventListener::new(&logo, "dblclick", move |_| {
                toggle.borrow_mut().flip();
            }));
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
