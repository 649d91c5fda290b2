//! [`Host`] implementation backed by the DOM.
//!
//! - Transitions become Web Animations (`Element.animate`) with fill mode
//!   "forwards", so each element stays at its end value.
//! - The snap timer is a [`Timeout`] whose callback holds only a weak
//!   reference to the controller. Dropping it clears the browser timeout.
//! - State is mirrored into the track's `data-*` attributes.

use crate::error::js_message;
use carousel_core::state::{ATTR_PERCENTAGE, ATTR_PREV_PERCENTAGE};
use carousel_core::{Controller, Host, TimerToken, TrackState, Transition, TransitionTarget};
use gloo::timers::callback::Timeout;
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use wasm_bindgen::prelude::*;
use web_sys::{
    Animation, AnimationPlayState, Element, HtmlCollection, HtmlElement, KeyframeAnimationOptions,
    Window,
};

/// Weak handle the snap timer uses to reach its controller.
pub(crate) type ControllerRef = Weak<RefCell<Controller<DomHost>>>;

pub(crate) struct DomHost {
    window: Window,
    track: HtmlElement,
    image_class: String,
    animations: HashMap<TransitionTarget, Animation>,
    snap_timer: Option<(TimerToken, Timeout)>,
    controller: ControllerRef,
}

impl DomHost {
    pub(crate) fn new(window: Window, track: HtmlElement, image_class: String) -> Self {
        Self {
            window,
            track,
            image_class,
            animations: HashMap::new(),
            snap_timer: None,
            controller: Weak::new(),
        }
    }

    /// Give the host a way back to its controller for timer callbacks.
    pub(crate) fn bind(&mut self, controller: ControllerRef) {
        self.controller = controller;
    }

    pub(crate) fn track(&self) -> &HtmlElement {
        &self.track
    }

    /// Read the persisted state attributes off the track element.
    pub(crate) fn restore_state(&self) -> TrackState {
        let dataset = self.track.dataset();
        TrackState::from_attributes(
            dataset.get(ATTR_PERCENTAGE).as_deref(),
            dataset.get(ATTR_PREV_PERCENTAGE).as_deref(),
        )
    }

    fn images(&self) -> HtmlCollection {
        self.track.get_elements_by_class_name(&self.image_class)
    }

    fn element_for(&self, target: TransitionTarget) -> Option<Element> {
        match target {
            TransitionTarget::Track => Some(self.track.clone().into()),
            TransitionTarget::Image(index) => {
                let index = u32::try_from(index).ok()?;
                self.images().item(index)
            }
        }
    }

    /// Whether any strip or image animation is still running.
    pub(crate) fn is_animating(&self) -> bool {
        self.animations
            .values()
            .any(|animation| animation.play_state() == AnimationPlayState::Running)
    }

    /// Clear any armed timeout. Used when the carousel is detached.
    pub(crate) fn clear_snap_timer(&mut self) {
        self.snap_timer = None;
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub(crate) fn armed_snap(&self) -> Option<TimerToken> {
        self.snap_timer.as_ref().map(|(token, _)| *token)
    }
}

/// Start a single-keyframe animation towards the transition's end value.
fn start_animation(element: &Element, transition: &Transition) -> Result<Animation, JsValue> {
    let keyframe = Object::new();
    Reflect::set(
        &keyframe,
        &JsValue::from_str(transition.property.css_property()),
        &JsValue::from_str(&transition.property.css_value()),
    )?;

    let options = KeyframeAnimationOptions::new();
    Reflect::set(
        &options,
        &JsValue::from_str("duration"),
        &JsValue::from_f64(f64::from(transition.duration_ms)),
    )?;
    Reflect::set(
        &options,
        &JsValue::from_str("easing"),
        &JsValue::from_str(&transition.easing.to_css()),
    )?;
    Reflect::set(
        &options,
        &JsValue::from_str("fill"),
        &JsValue::from_str("forwards"),
    )?;

    Ok(element.animate_with_keyframe_animation_options(Some(&keyframe), &options))
}

impl Host for DomHost {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn image_count(&self) -> usize {
        self.images().length() as usize
    }

    fn animate(&mut self, transition: &Transition) {
        let Some(element) = self.element_for(transition.target) else {
            log::warn!("no element for {:?}", transition.target);
            return;
        };
        match start_animation(&element, transition) {
            // The newest animation wins the composite order. Dropping the old
            // handle does not cancel it; the browser auto-removes a replaced
            // fill-forwards animation once a newer one fully covers it.
            Ok(animation) => {
                self.animations.insert(transition.target, animation);
            }
            Err(err) => log::warn!("failed to animate {:?}: {}", transition.target, js_message(&err)),
        }
    }

    fn schedule_snap(&mut self, delay_ms: u32, token: TimerToken) {
        let controller = self.controller.clone();
        let timeout = Timeout::new(delay_ms, move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let borrowed = controller.try_borrow_mut();
            if let Ok(mut controller) = borrowed {
                controller.on_snap_timer(token);
            }
        });
        // Replacing the slot drops (and clears) any previous timeout
        self.snap_timer = Some((token, timeout));
    }

    fn cancel_snap(&mut self, token: TimerToken) {
        if matches!(&self.snap_timer, Some((armed, _)) if *armed == token) {
            self.snap_timer = None;
        }
    }

    fn persist(&mut self, state: &TrackState) {
        let dataset = self.track.dataset();
        for (key, value) in state.to_attributes() {
            if let Err(err) = dataset.set(key, &value) {
                log::warn!("failed to persist data-{key}: {}", js_message(&err));
            }
        }
    }
}
