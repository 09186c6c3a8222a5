//! Decides which page section is "active" while the visitor scrolls.
//!
//! [`ActiveSectionTracker`] is a plain state machine: it never touches the DOM
//! or a real clock. Callers feed it the current time and a [`ViewportSampler`],
//! then ask [`ActiveSectionTracker::next_deadline`] when it next wants to be
//! woken up. Three single-slot deadlines live inside it:
//!
//! * the trailing run of the scroll rate limiter,
//! * the debounced commit of a newly detected section,
//! * the end of a manual-navigation override.

mod config;
mod geometry;
mod registry;
mod timing;

pub use config::{Breakpoint, ConfigError, HeaderOffsets, TrackerConfig};
pub use geometry::{
    most_visible, sample_sections, visible_fraction, SectionBounds, SectionVisibility, Viewport,
    ViewportSampler,
};
pub use registry::{Section, SectionRegistry};

use std::time::Duration;

use thiserror::Error;

use timing::{Admission, DeadlineSlot, RateLimiter};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("no sections to track")]
    EmptyRegistry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Idle,
    /// An explicit navigation is in flight; automatic detection is off until
    /// `until`.
    ManualOverride { until: Duration },
}

/// Where the page should smooth-scroll to after a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub section_id: String,
    pub top: f64,
}

#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    registry: SectionRegistry,
    config: TrackerConfig,
    active: String,
    mode: NavigationMode,
    limiter: RateLimiter,
    pending_commit: DeadlineSlot<String>,
}

impl ActiveSectionTracker {
    pub fn new(registry: SectionRegistry, config: TrackerConfig) -> Result<Self, TrackerError> {
        let first = registry.first().ok_or(TrackerError::EmptyRegistry)?;
        let active = if registry.contains(&config.home_section_id) {
            config.home_section_id.clone()
        } else {
            first.id.clone()
        };
        Ok(Self {
            limiter: RateLimiter::new(config.sample_interval()),
            registry,
            config,
            active,
            mode: NavigationMode::Idle,
            pending_commit: DeadlineSlot::default(),
        })
    }

    pub fn active_section_id(&self) -> &str {
        &self.active
    }

    pub fn sections(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// First computation after the page renders. Skips the rate limiter.
    pub fn mount<S: ViewportSampler + ?Sized>(&mut self, now: Duration, sampler: &S) {
        self.recompute(now, sampler);
    }

    /// Jumps to `id`. The active section changes right away and automatic
    /// detection is suspended for the suppression window.
    ///
    /// Ids that are not registered still scroll but leave the active section
    /// alone. Returns `None` when there is nothing on the page to scroll to.
    pub fn navigate_to<S: ViewportSampler + ?Sized>(
        &mut self,
        id: &str,
        now: Duration,
        sampler: &S,
    ) -> Option<ScrollRequest> {
        self.mode = NavigationMode::ManualOverride {
            until: now + self.config.suppression(),
        };
        // anything decided before the jump is stale
        self.pending_commit.cancel();
        self.limiter.cancel();

        if self.registry.contains(id) {
            self.active = id.to_string();
        } else {
            log::debug!("navigating to unregistered section {id}");
        }

        let bounds = sampler.section_bounds(id)?;
        let viewport = sampler.viewport();
        let offset = self.config.header_offsets.offset_for(viewport.width);
        Some(ScrollRequest {
            section_id: id.to_string(),
            top: bounds.top - offset,
        })
    }

    /// Scroll event entry point.
    pub fn on_scroll<S: ViewportSampler + ?Sized>(&mut self, now: Duration, sampler: &S) {
        self.expire_override(now);
        if let Admission::RunNow = self.limiter.admit(now) {
            self.recompute(now, sampler);
        }
    }

    /// Fires every deadline that is due at `now`. Returns the newly committed
    /// section id when the active section changed.
    pub fn advance<S: ViewportSampler + ?Sized>(
        &mut self,
        now: Duration,
        sampler: &S,
    ) -> Option<String> {
        self.expire_override(now);
        if self.limiter.take_due(now) {
            self.recompute(now, sampler);
        }
        let id = self.pending_commit.take_due(now)?;
        if id == self.active {
            return None;
        }
        log::debug!("active section {} -> {id}", self.active);
        self.active.clone_from(&id);
        Some(id)
    }

    /// Earliest time at which [`Self::advance`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        let override_end = match self.mode {
            NavigationMode::ManualOverride { until } => Some(until),
            NavigationMode::Idle => None,
        };
        [
            self.limiter.deadline(),
            self.pending_commit.deadline(),
            override_end,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Drops every pending deadline. Nothing fires after this.
    pub fn teardown(&mut self) {
        self.limiter.cancel();
        self.pending_commit.cancel();
        self.mode = NavigationMode::Idle;
    }

    fn expire_override(&mut self, now: Duration) {
        if let NavigationMode::ManualOverride { until } = self.mode {
            if now >= until {
                self.mode = NavigationMode::Idle;
            }
        }
    }

    fn recompute<S: ViewportSampler + ?Sized>(&mut self, now: Duration, sampler: &S) {
        if self.mode != NavigationMode::Idle {
            return;
        }
        let samples = sample_sections(&self.registry, sampler);
        let Some(best) = most_visible(&samples) else {
            return;
        };
        if best.fraction > self.config.visibility_threshold {
            self.pending_commit
                .arm(now + self.config.debounce(), best.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;

    const VIEWPORT_HEIGHT: f64 = 1000.0;

    /// Lays each section out so exactly `fraction` of it pokes into the
    /// bottom of a fixed viewport.
    struct FixtureSampler {
        width: f64,
        bounds: HashMap<String, SectionBounds>,
        samples_taken: Cell<usize>,
    }

    impl FixtureSampler {
        fn with_fractions(fractions: &[(&str, f64)]) -> Self {
            let mut sampler = Self {
                width: 1280.0,
                bounds: HashMap::new(),
                samples_taken: Cell::new(0),
            };
            sampler.set_fractions(fractions);
            sampler
        }

        fn set_fractions(&mut self, fractions: &[(&str, f64)]) {
            self.bounds = fractions
                .iter()
                .map(|(id, fraction)| {
                    let bounds = SectionBounds {
                        top: VIEWPORT_HEIGHT - (fraction * 100.0).round(),
                        height: 100.0,
                    };
                    (id.to_string(), bounds)
                })
                .collect();
        }

        fn at(mut self, id: &str, top: f64) -> Self {
            self.bounds.insert(
                id.to_string(),
                SectionBounds {
                    top,
                    height: 600.0,
                },
            );
            self
        }
    }

    impl ViewportSampler for FixtureSampler {
        fn viewport(&self) -> Viewport {
            self.samples_taken.set(self.samples_taken.get() + 1);
            Viewport {
                scroll_y: 0.0,
                width: self.width,
                height: VIEWPORT_HEIGHT,
            }
        }

        fn section_bounds(&self, id: &str) -> Option<SectionBounds> {
            self.bounds.get(id).copied()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn registry(ids: &[&str]) -> SectionRegistry {
        SectionRegistry::new(ids.iter().map(|id| Section::new(*id, id.to_uppercase())))
    }

    fn tracker(ids: &[&str]) -> ActiveSectionTracker {
        ActiveSectionTracker::new(registry(ids), TrackerConfig::default())
            .expect("registry is not empty")
    }

    #[test]
    fn test_empty_registry_rejected() {
        let res = ActiveSectionTracker::new(SectionRegistry::default(), TrackerConfig::default());
        assert_eq!(res.unwrap_err(), TrackerError::EmptyRegistry);
    }

    #[test]
    fn test_initial_section() {
        assert_eq!(
            tracker(&["about", "home", "contact"]).active_section_id(),
            "home"
        );
        assert_eq!(tracker(&["about", "contact"]).active_section_id(), "about");
    }

    #[test]
    fn test_commit_after_debounce() {
        let mut t = tracker(&["home", "about", "skills", "experience", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[("skills", 0.45), ("experience", 0.2)]);

        t.on_scroll(ms(0), &sampler);
        assert_eq!(t.next_deadline(), Some(ms(300)));
        assert_eq!(t.advance(ms(299), &sampler), None);
        assert_eq!(t.active_section_id(), "home");
        assert_eq!(t.advance(ms(300), &sampler), Some("skills".to_string()));
        assert_eq!(t.active_section_id(), "skills");
        assert_eq!(t.next_deadline(), None);
    }

    #[test]
    fn test_below_threshold_keeps_previous() {
        let mut t = tracker(&["home", "about", "contact"]);
        let mut sampler = FixtureSampler::with_fractions(&[("about", 0.8)]);
        t.mount(ms(0), &sampler);
        t.advance(ms(300), &sampler);
        assert_eq!(t.active_section_id(), "about");

        // threshold is strict: exactly 30% is not enough
        sampler.set_fractions(&[("home", 0.3), ("contact", 0.1)]);
        t.on_scroll(ms(1000), &sampler);
        assert_eq!(t.next_deadline(), None);
        assert_eq!(t.advance(ms(2000), &sampler), None);
        assert_eq!(t.active_section_id(), "about");
    }

    #[test]
    fn test_debounce_superseded_by_newer_sample() {
        let mut t = tracker(&["home", "a", "b"]);
        let mut sampler = FixtureSampler::with_fractions(&[("a", 0.6)]);
        t.on_scroll(ms(0), &sampler);

        sampler.set_fractions(&[("a", 0.1), ("b", 0.7)]);
        t.on_scroll(ms(150), &sampler);
        assert_eq!(t.next_deadline(), Some(ms(450)));

        // the commit for "a" would have landed at 300
        assert_eq!(t.advance(ms(300), &sampler), None);
        assert_eq!(t.active_section_id(), "home");
        assert_eq!(t.advance(ms(450), &sampler), Some("b".to_string()));
    }

    #[test]
    fn test_tie_goes_to_earlier_section() {
        let mut t = tracker(&["home", "about", "skills"]);
        let sampler = FixtureSampler::with_fractions(&[("skills", 0.5), ("about", 0.5)]);
        t.mount(ms(0), &sampler);
        assert_eq!(t.advance(ms(300), &sampler), Some("about".to_string()));
    }

    #[test]
    fn test_mount_runs_without_scroll() {
        let mut t = tracker(&["home", "about"]);
        let sampler = FixtureSampler::with_fractions(&[("about", 0.9)]);
        t.mount(ms(5), &sampler);
        assert_eq!(sampler.samples_taken.get(), 1);
        assert_eq!(t.advance(ms(305), &sampler), Some("about".to_string()));
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut t = tracker(&["home", "about", "contact"]);
        // only contact is rendered
        let sampler = FixtureSampler::with_fractions(&[("contact", 0.4)]);
        t.mount(ms(0), &sampler);
        assert_eq!(t.advance(ms(300), &sampler), Some("contact".to_string()));
    }

    #[test]
    fn test_scroll_burst_samples_at_most_once_per_interval() {
        let mut t = tracker(&["home", "about"]);
        let sampler = FixtureSampler::with_fractions(&[("about", 0.9)]);
        for n in 0..10 {
            t.on_scroll(ms(n * 9), &sampler);
        }
        assert_eq!(sampler.samples_taken.get(), 1);

        // the trailing run is still owed
        assert_eq!(t.next_deadline(), Some(ms(100)));
        t.advance(ms(100), &sampler);
        assert_eq!(sampler.samples_taken.get(), 2);

        // and nothing more once scrolling has stopped
        t.advance(ms(400), &sampler);
        assert_eq!(sampler.samples_taken.get(), 2);
        assert_eq!(t.active_section_id(), "about");
    }

    #[test]
    fn test_navigate_updates_immediately() {
        let mut t = tracker(&["home", "about", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[]).at("about", 1200.0);
        let req = t.navigate_to("about", ms(0), &sampler);
        assert_eq!(t.active_section_id(), "about");
        assert_eq!(
            req,
            Some(ScrollRequest {
                section_id: "about".to_string(),
                top: 1110.0,
            })
        );
        assert_eq!(t.mode(), NavigationMode::ManualOverride { until: ms(1000) });
    }

    #[test]
    fn test_navigate_offset_follows_viewport_width() {
        let mut t = tracker(&["home", "about"]);
        let mut sampler = FixtureSampler::with_fractions(&[]).at("about", 1000.0);

        sampler.width = 400.0;
        let req = t.navigate_to("about", ms(0), &sampler).expect("about is rendered");
        assert_eq!(req.top, 935.0);

        sampler.width = 700.0;
        let req = t.navigate_to("about", ms(0), &sampler).expect("about is rendered");
        assert_eq!(req.top, 930.0);
    }

    #[test]
    fn test_navigate_without_element_still_updates_state() {
        let mut t = tracker(&["home", "about", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[]);
        assert_eq!(t.navigate_to("contact", ms(0), &sampler), None);
        assert_eq!(t.active_section_id(), "contact");
        // the override still ends on time
        assert_eq!(t.next_deadline(), Some(ms(1000)));
        t.advance(ms(1000), &sampler);
        assert_eq!(t.mode(), NavigationMode::Idle);
    }

    #[test]
    fn test_navigate_unregistered_id_keeps_active() {
        let mut t = tracker(&["home", "about"]);
        let sampler = FixtureSampler::with_fractions(&[]).at("footer", 3000.0);
        let req = t.navigate_to("footer", ms(0), &sampler);
        assert!(req.is_some());
        assert_eq!(t.active_section_id(), "home");
    }

    #[test]
    fn test_scroll_during_override_is_ignored() {
        let mut t = tracker(&["home", "about", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[("home", 0.9)]);
        t.navigate_to("about", ms(0), &sampler);
        assert_eq!(t.active_section_id(), "about");

        t.on_scroll(ms(50), &sampler);
        for n in 1..=9 {
            t.on_scroll(ms(50 + n * 100), &sampler);
            t.advance(ms(50 + n * 100), &sampler);
        }
        assert_eq!(t.active_section_id(), "about");
    }

    #[test]
    fn test_navigate_cancels_pending_commit() {
        let mut t = tracker(&["home", "about", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[("home", 0.2), ("contact", 0.9)]);
        t.on_scroll(ms(0), &sampler);
        t.navigate_to("about", ms(100), &sampler);
        // the commit armed for "contact" at 300 must not land
        assert_eq!(t.advance(ms(300), &sampler), None);
        assert_eq!(t.active_section_id(), "about");
    }

    #[test]
    fn test_detection_resumes_after_override() {
        let mut t = tracker(&["home", "about", "contact"]);
        let sampler = FixtureSampler::with_fractions(&[("contact", 0.9)]);
        t.navigate_to("about", ms(0), &sampler);
        t.advance(ms(1000), &sampler);
        assert_eq!(t.mode(), NavigationMode::Idle);

        t.on_scroll(ms(1100), &sampler);
        assert_eq!(t.advance(ms(1400), &sampler), Some("contact".to_string()));
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut t = tracker(&["home", "about"]);
        let sampler = FixtureSampler::with_fractions(&[("about", 0.9)]);
        t.on_scroll(ms(0), &sampler);
        t.on_scroll(ms(10), &sampler);
        assert!(t.next_deadline().is_some());
        t.teardown();
        assert_eq!(t.next_deadline(), None);
        assert_eq!(t.advance(ms(5000), &sampler), None);
        assert_eq!(t.active_section_id(), "home");
    }
}
