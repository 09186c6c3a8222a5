use std::sync::{Arc, Mutex};
use std::time::Duration;

use leptos::{ev, prelude::*};
use leptos_use::{use_event_listener, use_window};

use crate::tracker::{
    ActiveSectionTracker, HeaderOffsets, ScrollRequest, Section, SectionBounds, SectionRegistry,
    TrackerConfig, Viewport, ViewportSampler,
};

/// Reads layout straight from the live document.
struct DomSampler;

impl ViewportSampler for DomSampler {
    fn viewport(&self) -> Viewport {
        let window = window();
        let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            scroll_y: window.scroll_y().unwrap_or(0.0),
            width: px(window.inner_width()),
            height: px(window.inner_height()),
        }
    }

    fn section_bounds(&self, id: &str) -> Option<SectionBounds> {
        let el = document().get_element_by_id(id)?;
        let rect = el.get_bounding_client_rect();
        let scroll_y = window().scroll_y().unwrap_or(0.0);
        Some(SectionBounds {
            top: rect.top() + scroll_y,
            height: rect.height(),
        })
    }
}

/// Monotonic page clock. Falls back to wall time only if the Performance API
/// is missing.
fn now() -> Duration {
    let ms = window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

fn smooth_scroll(top: f64) {
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&opts);
}

/// Shared handle to the active-section state. Cheap to copy into event
/// handlers.
#[derive(Clone, Copy)]
pub struct NavigationContext {
    active: ReadSignal<String>,
    set_active: WriteSignal<String>,
    tracker: StoredValue<Option<Arc<Mutex<ActiveSectionTracker>>>>,
    sections: StoredValue<Vec<Section>>,
    offsets: StoredValue<HeaderOffsets>,
    wake: StoredValue<Option<TimeoutHandle>>,
}

impl NavigationContext {
    pub fn active_section(&self) -> ReadSignal<String> {
        self.active
    }

    /// Every tracked section in page order, hidden ones included.
    pub fn sections(&self) -> Vec<Section> {
        self.sections.get_value()
    }

    /// Smooth-scrolls to the section and marks it active right away.
    pub fn navigate_to(&self, id: &str) {
        let sampler = DomSampler;
        let request = match self.committed(|t| {
            let request = t.navigate_to(id, now(), &sampler);
            (request, t.active_section_id().to_string())
        }) {
            Some(request) => request,
            // nothing to track, but links still have to work
            None => sampler.section_bounds(id).map(|bounds| ScrollRequest {
                section_id: id.to_string(),
                top: bounds.top
                    - self
                        .offsets
                        .with_value(|o| o.offset_for(sampler.viewport().width)),
            }),
        };
        match request {
            Some(request) => smooth_scroll(request.top),
            None => log::debug!("no element for section {id}"),
        }
        self.arm_wake();
    }

    fn mount(&self) {
        self.committed(|t| {
            t.mount(now(), &DomSampler);
            ((), t.active_section_id().to_string())
        });
        self.arm_wake();
    }

    fn on_scroll(&self) {
        if self
            .with_tracker(|t| t.on_scroll(now(), &DomSampler))
            .is_some()
        {
            self.arm_wake();
        }
    }

    fn wake_up(&self) {
        _ = self.wake.try_set_value(None);
        let committed = self
            .with_tracker(|t| t.advance(now(), &DomSampler))
            .flatten();
        if let Some(id) = committed {
            self.set_active.set(id);
        }
        self.arm_wake();
    }

    fn teardown(&self) {
        self.clear_wake();
        self.with_tracker(|t| t.teardown());
    }

    /// Runs `f`, then publishes the active id it reports if it changed.
    fn committed<R>(&self, f: impl FnOnce(&mut ActiveSectionTracker) -> (R, String)) -> Option<R> {
        let (out, active) = self.with_tracker(f)?;
        if self.active.get_untracked() != active {
            self.set_active.set(active);
        }
        Some(out)
    }

    fn with_tracker<R>(&self, f: impl FnOnce(&mut ActiveSectionTracker) -> R) -> Option<R> {
        let tracker = self.tracker.try_get_value().flatten()?;
        let mut tracker = tracker.lock().expect("should be able to lock tracker");
        Some(f(&mut tracker))
    }

    fn clear_wake(&self) {
        if let Some(handle) = self.wake.try_get_value().flatten() {
            handle.clear();
        }
        _ = self.wake.try_set_value(None);
    }

    /// Keeps exactly one browser timeout armed for the tracker's earliest
    /// deadline.
    fn arm_wake(&self) {
        self.clear_wake();
        let Some(deadline) = self.with_tracker(|t| t.next_deadline()).flatten() else {
            return;
        };
        let delay = deadline.saturating_sub(now());
        let ctx = *self;
        match set_timeout_with_handle(move || ctx.wake_up(), delay) {
            Ok(handle) => {
                _ = self.wake.try_set_value(Some(handle));
            }
            Err(e) => log::warn!("couldn't schedule section tracking: {e:?}"),
        }
    }
}

/// Starts tracking `registry` against the page and makes the result available
/// through [`use_navigation`]. Listeners and timers go away with the calling
/// component.
pub fn provide_navigation(registry: SectionRegistry, config: TrackerConfig) -> NavigationContext {
    let sections = registry.iter().cloned().collect::<Vec<_>>();
    let offsets = config.header_offsets.clone();
    let initial = config.home_section_id.clone();
    let tracker = match ActiveSectionTracker::new(registry, config) {
        Ok(tracker) => Some(tracker),
        Err(e) => {
            log::warn!("section tracking disabled: {e}");
            None
        }
    };
    let initial = tracker
        .as_ref()
        .map(|t| t.active_section_id().to_string())
        .unwrap_or(initial);
    let (active, set_active) = signal(initial);

    let ctx = NavigationContext {
        active,
        set_active,
        tracker: StoredValue::new(tracker.map(|t| Arc::new(Mutex::new(t)))),
        sections: StoredValue::new(sections),
        offsets: StoredValue::new(offsets),
        wake: StoredValue::new(None),
    };
    provide_context(ctx);

    // effects only run in the browser, after the sections are in the DOM
    Effect::new(move |_| ctx.mount());
    let _ = use_event_listener(use_window(), ev::scroll, move |_| ctx.on_scroll());
    on_cleanup(move || ctx.teardown());

    ctx
}

pub fn use_navigation() -> NavigationContext {
    expect_context::<NavigationContext>()
}
