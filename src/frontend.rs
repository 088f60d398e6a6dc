mod creatures;
mod sections;

use crate::{
    chase::FrameSource,
    config::RuntimeConfig,
    content::SiteContent,
    motion::{Reveal, REVEAL_ROOT_MARGIN},
    telemetry::{self, log_event, LogLevel},
};
use creatures::CreatureLayer;
use js_sys::{Array, Function, Promise};
use sections::{
    AboutSection, BlogSection, ContactSection, HeroSection, Navigation, ProjectsSection,
    ScrollProgress, SkillsSection,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, AddEventListenerOptions, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
};
use yew::prelude::*;

const MOUNT_POINT_ID: &str = "app";
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
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

    (width, height)
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_motion_preference(reduced: bool) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let value = if reduced { "reduced" } else { "full" };
            let _ = root.set_attribute("data-motion", value);
        }
    }
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn document_height() -> f64 {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0)
}

fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

async fn sleep_ms(ms: u32) {
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        let scheduled = window().is_some_and(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
                .is_ok()
        });

        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });

    let _ = JsFuture::from(promise).await;
}

/// Passive window listener, removed again on drop.
struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    fn new(event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let win = window()?;
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        win.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .ok()?;

        Some(Self { event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(win) = window() {
            let _ = win.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

type RevealCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches one element until it first intersects the viewport.
struct RevealObserver {
    observer: IntersectionObserver,
    _callback: RevealCallback,
}

impl RevealObserver {
    fn new(target: &Element, mut on_reveal: impl FnMut() + 'static) -> Option<Self> {
        let mut reveal = Reveal::default();
        let callback = RevealCallback::new(move |entries: Array, observer: IntersectionObserver| {
            let intersecting = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| entry.is_intersecting());

            if reveal.observe(intersecting) {
                observer.disconnect();
                on_reveal();
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;
        observer.observe(target);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Node ref plus whether its section has scrolled into view yet.
/// Reduced motion reveals everything up front.
#[hook]
fn use_reveal() -> (NodeRef, bool) {
    let node = use_node_ref();
    let visible = use_state_eq(prefers_reduced_motion);

    {
        let node = node.clone();
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let mut observer = None;
            if !*visible {
                let on_reveal = {
                    let visible = visible.clone();
                    move || visible.set(true)
                };
                observer = node
                    .cast::<Element>()
                    .and_then(|element| RevealObserver::new(&element, on_reveal));

                if observer.is_none() {
                    visible.set(true);
                }
            }

            move || drop(observer)
        });
    }

    (node, *visible)
}

type FrameCallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` loop. Dropping it cancels the pending frame.
#[derive(Default)]
struct AnimationFrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallbackSlot,
}

/// Restarts a paused [`AnimationFrameLoop`] from an event handler.
#[derive(Clone)]
struct FrameWaker {
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallbackSlot,
}

impl FrameWaker {
    fn wake(&self) {
        if self.handle.get().is_none() {
            self.handle.set(request_frame(&self.callback));
        }
    }
}

fn request_frame(slot: &FrameCallbackSlot) -> Option<i32> {
    let win = window()?;
    let callback = slot.borrow();
    let callback = callback.as_ref()?;
    win.request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

impl AnimationFrameLoop {
    /// Runs `on_frame` every frame until it returns `false`, then idles until
    /// woken.
    fn start_while(&mut self, mut on_frame: impl FnMut(f64) -> bool + 'static) {
        self.stop();

        let handle = self.handle.clone();
        let slot = self.callback.clone();
        *self.callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
            let next = if on_frame(now_ms) {
                request_frame(&slot)
            } else {
                None
            };
            handle.set(next);
        }));

        self.handle.set(request_frame(&self.callback));
    }

    fn waker(&self) -> FrameWaker {
        FrameWaker {
            handle: self.handle.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl FrameSource for AnimationFrameLoop {
    fn start(&mut self, mut on_frame: Box<dyn FnMut(f64)>) {
        self.start_while(move |now_ms| {
            on_frame(now_ms);
            true
        });
    }

    fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(win) = window() {
                let _ = win.cancel_animation_frame(id);
            }
        }

        self.callback.borrow_mut().take();
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    content: Rc<SiteContent>,
    config: RuntimeConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let content = props.content.clone();

    html! {
        <>
            <a class="skip-link" href="#about">{"Skip to main content"}</a>
            <ScrollProgress />
            <Navigation name={AttrValue::from(content.profile.name.clone())} />
            <CreatureLayer tuning={props.config.chase} />
            <div class="backdrop-gradient" aria-hidden="true"></div>

            <main id="content" class="page">
                <HeroSection content={content.clone()} />
                <AboutSection content={content.clone()} />
                <SkillsSection content={content.clone()} />
                <ProjectsSection content={content.clone()} />
                <BlogSection content={content.clone()} />
                <ContactSection
                    content={content}
                    submit_delay_ms={props.config.contact_submit_delay_ms}
                />
            </main>

            <div class="floating-shape shape-left" aria-hidden="true"></div>
            <div class="floating-shape shape-right" aria-hidden="true"></div>
        </>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_POINT_ID))
        .expect("missing #app mount point");

    let config = RuntimeConfig::from_lookup(|key| root.get_attribute(&format!("data-{key}")));
    telemetry::set_min_level(config.log_level);
    log_event(LogLevel::Debug, "config_loaded", config.as_json());

    apply_motion_preference(prefers_reduced_motion());

    let content = SiteContent::embedded().unwrap_or_else(|error| {
        log_event(
            LogLevel::Warn,
            "content_parse_failed",
            serde_json::json!({ "error": error.to_string() }),
        );
        SiteContent::default()
    });

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            content: Rc::new(content),
            config,
        },
    )
    .render();
}
