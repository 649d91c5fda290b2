//! Browser event wiring for one carousel track.
//!
//! [`Carousel`] looks up the track element, restores its persisted state,
//! and registers the event listeners that feed the controller:
//!
//! | Event                                   | Target   | Controller call        |
//! |-----------------------------------------|----------|------------------------|
//! | `mousedown` / `touchstart`              | window   | `on_drag_start`        |
//! | `mousemove` / `touchmove`               | window   | `on_drag_move`         |
//! | `mouseup` / `touchend`                  | window   | `on_drag_end`          |
//! | `wheel` (non-passive)                   | window   | `on_wheel`             |
//! | `keydown`                               | window   | `on_key_down`          |
//! | `pointerenter` / `pointerleave`         | track    | hover flag             |
//!
//! Touch events are reduced to their first contact point. Listeners are
//! removed when the carousel is detached or freed.

use crate::dom_host::DomHost;
use crate::error::BindError;
use carousel_core::{
    CarouselConfig, Controller, DragPhase, EventOutcome, Host, Key, TrackState, WheelInput,
};
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent};

type SharedController = Rc<RefCell<Controller<DomHost>>>;

/// Run `f` against the controller unless it is already borrowed.
///
/// Browser callbacks never nest, so a failed borrow only happens if a
/// handler is re-entered from inside the controller; dropping that event is
/// the safe choice.
fn with_controller<R>(
    controller: &SharedController,
    f: impl FnOnce(&mut Controller<DomHost>) -> R,
) -> Option<R> {
    match controller.try_borrow_mut() {
        Ok(mut controller) => Some(f(&mut controller)),
        Err(_) => {
            log::warn!("carousel controller busy, dropping event");
            None
        }
    }
}

fn apply_outcome(event: &Event, outcome: Option<EventOutcome>) {
    if outcome.is_some_and(|outcome| outcome.prevent_default) {
        event.prevent_default();
    }
}

/// Horizontal position of a mouse event, or of a touch event's first contact.
fn pointer_x(event: &Event) -> Option<f64> {
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        return touch.touches().item(0).map(|t| f64::from(t.client_x()));
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| f64::from(mouse.client_x()))
}

/// Parse an optional JS config object, filling gaps from the defaults.
fn parse_config(config: JsValue) -> Result<CarouselConfig, BindError> {
    if config.is_undefined() || config.is_null() {
        return Ok(CarouselConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| BindError::InvalidConfig(e.to_string()))
}

/// An elastic image carousel bound to one track element.
///
/// # Example (TypeScript)
/// ```typescript
/// import init, { Carousel } from '@carousel/wasm';
///
/// await init();
/// const carousel = new Carousel('image-track', { elasticity: 0.25 });
///
/// // Later, e.g. on route change:
/// carousel.detach();
/// ```
#[wasm_bindgen]
pub struct Carousel {
    controller: SharedController,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl Carousel {
    /// Attach a carousel to the element with id `track_id`.
    ///
    /// `config` is an optional partial config object; missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns an error if the element is missing or the config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(track_id: &str, config: JsValue) -> Result<Carousel, JsValue> {
        Ok(Self::attach(track_id, parse_config(config)?)?)
    }

    /// Current logical offset in percent.
    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.controller.borrow().offset()
    }

    /// Whether a pointer or touch drag is in progress.
    #[wasm_bindgen(getter = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controller.borrow().phase() == DragPhase::Dragging
    }

    /// Whether the pointer is over the track (wheel and keys are live).
    #[wasm_bindgen(getter = isHovering)]
    pub fn is_hovering(&self) -> bool {
        self.controller.borrow().is_hovering()
    }

    /// Where the strip visually is right now, following the easing curve of
    /// the transition in flight. Equals `offset` once motion has settled.
    #[wasm_bindgen(getter = renderedOffset)]
    pub fn rendered_offset(&self) -> f64 {
        let controller = self.controller.borrow();
        controller.rendered_offset(controller.host().now_ms())
    }

    /// Whether the strip or an image is still moving.
    #[wasm_bindgen(getter = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.controller.borrow().host().is_animating()
    }

    /// Snapshot of the state record as a plain JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.controller.borrow().state())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Remove all listeners and cancel the pending snap.
    ///
    /// The element keeps its last offset.
    pub fn detach(self) {
        // Dropping self releases the listeners
    }
}

impl Carousel {
    fn attach(track_id: &str, config: CarouselConfig) -> Result<Carousel, BindError> {
        config.validate()?;

        let window = web_sys::window().ok_or(BindError::NoWindow)?;
        let document = window.document().ok_or(BindError::NoDocument)?;
        let track = document
            .get_element_by_id(track_id)
            .ok_or_else(|| BindError::TrackNotFound(track_id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| BindError::NotHtmlElement(track_id.to_string()))?;

        let host = DomHost::new(window.clone(), track.clone(), config.image_class.clone());
        let state = host.restore_state();
        log::debug!(
            "attaching carousel to #{track_id} at {:.3}%",
            state.percentage
        );

        let controller = Rc::new(RefCell::new(Controller::with_state(config, state, host)?));
        controller
            .borrow_mut()
            .host_mut()
            .bind(Rc::downgrade(&controller));
        {
            // Write normalized attributes back so the page can inspect them,
            // then pull a restored out-of-range offset back into bounds
            let mut controller = controller.borrow_mut();
            let state: TrackState = *controller.state();
            controller.host_mut().persist(&state);
            controller.snap_if_out_of_bounds();
        }

        let listeners = register_listeners(&window, &track, &controller);
        Ok(Carousel {
            controller,
            listeners,
        })
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    fn controller(&self) -> &SharedController {
        &self.controller
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.host_mut().clear_snap_timer();
        }
    }
}

fn register_listeners(
    window: &web_sys::Window,
    track: &HtmlElement,
    controller: &SharedController,
) -> Vec<EventListener> {
    let window: &EventTarget = window.as_ref();
    let track: &EventTarget = track.as_ref();
    let mut listeners = Vec::with_capacity(10);

    for kind in ["mousedown", "touchstart"] {
        let controller = controller.clone();
        listeners.push(EventListener::new(window, kind, move |event| {
            if let Some(x) = pointer_x(event) {
                with_controller(&controller, |c| c.on_drag_start(x));
            }
        }));
    }

    for kind in ["mousemove", "touchmove"] {
        let controller = controller.clone();
        listeners.push(EventListener::new(window, kind, move |event| {
            if let Some(x) = pointer_x(event) {
                with_controller(&controller, |c| c.on_drag_move(x));
            }
        }));
    }

    for kind in ["mouseup", "touchend"] {
        let controller = controller.clone();
        listeners.push(EventListener::new(window, kind, move |_| {
            with_controller(&controller, |c| c.on_drag_end());
        }));
    }

    // Non-passive so preventDefault can stop page scroll
    {
        let controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            window,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let input = WheelInput::new(wheel.delta_x(), wheel.delta_y());
                let outcome = with_controller(&controller, |c| c.on_wheel(input));
                apply_outcome(event, outcome);
            },
        ));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            window,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = Key::from_dom_key(&keyboard.key());
                let outcome = with_controller(&controller, |c| c.on_key_down(key));
                apply_outcome(event, outcome);
            },
        ));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(track, "pointerenter", move |_| {
            with_controller(&controller, |c| c.on_pointer_enter());
        }));
    }
    {
        let controller = controller.clone();
        listeners.push(EventListener::new(track, "pointerleave", move |_| {
            with_controller(&controller, |c| c.on_pointer_leave());
        }));
    }

    listeners
}

/// Browser tests. Run with `wasm-pack test --headless --chrome`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use js_sys::{Array, Reflect};
    use wasm_bindgen_test::*;
    use web_sys::{KeyboardEventInit, Touch, TouchEventInit, TouchInit, WheelEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    /// Create a detached-from-layout track with `images` image children.
    fn mount_track(id: &str, images: usize) -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let track = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        track.set_id(id);
        for _ in 0..images {
            let image = document.create_element("img").unwrap();
            image.set_class_name("image");
            track.append_child(&image).unwrap();
        }
        document.body().unwrap().append_child(&track).unwrap();
        track
    }

    fn dispatch(target: &EventTarget, kind: &str) {
        let event = Event::new(kind).unwrap();
        target.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_attach_missing_track_fails() {
        let result = Carousel::attach("does-not-exist", CarouselConfig::default());
        assert!(matches!(result, Err(BindError::TrackNotFound(_))));
    }

    #[wasm_bindgen_test]
    fn test_attach_rejects_invalid_config() {
        mount_track("track-bad-config", 0);
        let mut config = CarouselConfig::default();
        config.elasticity = 0.0;
        let result = Carousel::attach("track-bad-config", config);
        assert!(matches!(result, Err(BindError::Config(_))));
    }

    #[wasm_bindgen_test]
    fn test_attach_restores_and_normalizes_dataset() {
        let track = mount_track("track-restore", 2);
        track.dataset().set("percentage", "-30").unwrap();
        track.dataset().set("prevPercentage", "junk").unwrap();

        let carousel = Carousel::attach("track-restore", CarouselConfig::default()).unwrap();
        assert_eq!(carousel.offset(), -30.0);
        assert_eq!(track.dataset().get("prevPercentage").as_deref(), Some("0"));
        assert_eq!(track.dataset().get("mouseDownAt").as_deref(), Some("0"));
    }

    #[wasm_bindgen_test]
    fn test_drag_updates_dataset() {
        let track = mount_track("track-drag", 3);
        let carousel = Carousel::attach("track-drag", CarouselConfig::default()).unwrap();

        carousel.controller().borrow_mut().on_drag_start(500.0);
        assert!(carousel.is_dragging());
        assert_eq!(track.dataset().get("mouseDownAt").as_deref(), Some("500"));

        carousel.controller().borrow_mut().on_drag_move(450.0);
        let offset = carousel.offset();
        assert!(offset < 0.0);
        assert_eq!(
            track.dataset().get("percentage"),
            Some(offset.to_string())
        );

        carousel.controller().borrow_mut().on_drag_end();
        assert!(!carousel.is_dragging());
    }

    #[wasm_bindgen_test]
    fn test_pointer_enter_and_leave_toggle_hover() {
        let track = mount_track("track-hover", 1);
        let carousel = Carousel::attach("track-hover", CarouselConfig::default()).unwrap();
        assert!(!carousel.is_hovering());

        dispatch(track.as_ref(), "pointerenter");
        assert!(carousel.is_hovering());

        dispatch(track.as_ref(), "pointerleave");
        assert!(!carousel.is_hovering());
    }

    #[wasm_bindgen_test]
    fn test_mousedown_on_window_starts_drag() {
        mount_track("track-mousedown", 1);
        let carousel = Carousel::attach("track-mousedown", CarouselConfig::default()).unwrap();

        let window = web_sys::window().unwrap();
        let event = MouseEvent::new("mousedown").unwrap();
        window.dispatch_event(&event).unwrap();
        assert!(carousel.is_dragging());

        dispatch(window.as_ref(), "mouseup");
        assert!(!carousel.is_dragging());
        carousel.detach();
    }

    #[wasm_bindgen_test]
    fn test_detach_removes_listeners() {
        let track = mount_track("track-detach", 1);
        let carousel = Carousel::attach("track-detach", CarouselConfig::default()).unwrap();
        let controller = carousel.controller().clone();
        carousel.detach();

        dispatch(track.as_ref(), "pointerenter");
        assert!(!controller.borrow().is_hovering());
    }

    #[wasm_bindgen_test]
    fn test_partial_config_from_js() {
        let value = js_sys::Object::new();
        Reflect::set(&value, &"elasticity".into(), &0.5.into()).unwrap();
        let config = parse_config(value.into()).unwrap();
        assert_eq!(config.elasticity, 0.5);
        assert_eq!(config.min_percent, -75.0);

        assert_eq!(
            parse_config(JsValue::UNDEFINED).unwrap(),
            CarouselConfig::default()
        );
    }

    /// Dispatch a cancelable wheel event on the window; returns whether the
    /// page scroll was suppressed.
    fn wheel_prevented(delta_y: f64) -> bool {
        let init = WheelEventInit::new();
        init.set_cancelable(true);
        init.set_delta_y(delta_y);
        let event = WheelEvent::new_with_wheel_event_init_dict("wheel", &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    /// Dispatch a cancelable keydown on the window; returns whether the
    /// default action was suppressed.
    fn key_prevented(key: &str) -> bool {
        let init = KeyboardEventInit::new();
        init.set_cancelable(true);
        init.set_key(key);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    fn touch_event(kind: &str, target: &EventTarget, client_x: f64) -> TouchEvent {
        let touch_init = TouchInit::new(1, target);
        touch_init.set_client_x(client_x);
        let touch = Touch::new(&touch_init).unwrap();

        let init = TouchEventInit::new();
        init.set_touches(&Array::of1(&touch));
        TouchEvent::new_with_event_init_dict(kind, &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_wheel_without_hover_keeps_page_scroll() {
        mount_track("track-wheel-idle", 1);
        let carousel = Carousel::attach("track-wheel-idle", CarouselConfig::default()).unwrap();

        assert!(!wheel_prevented(10.0));
        assert_eq!(carousel.offset(), 0.0);
    }

    #[wasm_bindgen_test]
    fn test_wheel_in_range_suppresses_page_scroll() {
        let track = mount_track("track-wheel-range", 1);
        let carousel = Carousel::attach("track-wheel-range", CarouselConfig::default()).unwrap();
        dispatch(track.as_ref(), "pointerenter");

        assert!(wheel_prevented(10.0));
        assert!(carousel.offset() < 0.0);
    }

    #[wasm_bindgen_test]
    fn test_wheel_past_edge_keeps_page_scroll() {
        let track = mount_track("track-wheel-edge", 1);
        let carousel = Carousel::attach("track-wheel-edge", CarouselConfig::default()).unwrap();
        dispatch(track.as_ref(), "pointerenter");

        // From home, scrolling up pushes past the right bound
        assert!(!wheel_prevented(-100.0));
        assert!(carousel.offset() > 0.0);
    }

    #[wasm_bindgen_test]
    fn test_wheel_rearms_single_snap_timeout() {
        let track = mount_track("track-wheel-timer", 1);
        let carousel = Carousel::attach("track-wheel-timer", CarouselConfig::default()).unwrap();
        dispatch(track.as_ref(), "pointerenter");

        wheel_prevented(10.0);
        let first = carousel.controller().borrow().host().armed_snap();
        assert!(first.is_some());

        wheel_prevented(10.0);
        let second = carousel.controller().borrow().host().armed_snap();
        assert!(second.is_some());
        assert_ne!(first, second);

        carousel.controller().borrow_mut().host_mut().clear_snap_timer();
        assert_eq!(carousel.controller().borrow().host().armed_snap(), None);
    }

    #[wasm_bindgen_test]
    fn test_recognised_keys_suppress_default() {
        let track = mount_track("track-keys", 1);
        let carousel = Carousel::attach("track-keys", CarouselConfig::default()).unwrap();
        dispatch(track.as_ref(), "pointerenter");

        assert!(key_prevented(" "));
        assert_eq!(carousel.offset(), -6.0);

        assert!(!key_prevented("a"));
        assert_eq!(carousel.offset(), -6.0);
    }

    #[wasm_bindgen_test]
    fn test_touch_drag_uses_first_contact() {
        let track = mount_track("track-touch", 1);
        let carousel = Carousel::attach("track-touch", CarouselConfig::default()).unwrap();
        let window = web_sys::window().unwrap();

        let start = touch_event("touchstart", track.as_ref(), 500.0);
        window.dispatch_event(&start).unwrap();
        assert!(carousel.is_dragging());
        assert_eq!(track.dataset().get("mouseDownAt").as_deref(), Some("500"));

        let moved = touch_event("touchmove", track.as_ref(), 450.0);
        window.dispatch_event(&moved).unwrap();
        assert!(carousel.offset() < 0.0);

        dispatch(window.as_ref(), "touchend");
        assert!(!carousel.is_dragging());
    }

    #[wasm_bindgen_test]
    fn test_attach_snaps_restored_offset_into_bounds() {
        let track = mount_track("track-restore-far", 1);
        track.dataset().set("percentage", "-500").unwrap();

        let carousel = Carousel::attach("track-restore-far", CarouselConfig::default()).unwrap();
        assert_eq!(carousel.offset(), -75.0);
        assert_eq!(track.dataset().get("percentage").as_deref(), Some("-75"));
    }

    #[wasm_bindgen_test]
    fn test_rendered_offset_settles_on_offset() {
        mount_track("track-rendered", 1);
        let carousel = Carousel::attach("track-rendered", CarouselConfig::default()).unwrap();
        assert_eq!(carousel.rendered_offset(), 0.0);

        carousel.controller().borrow_mut().on_drag_start(500.0);
        carousel.controller().borrow_mut().on_drag_move(450.0);
        let rendered = carousel.rendered_offset();
        assert!(rendered <= 0.0 && rendered >= carousel.offset());
    }
}
