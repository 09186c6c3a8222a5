use std::time::Duration;

/// A timer with room for exactly one pending callback. Arming it again
/// replaces whatever was pending.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineSlot<T> {
    pending: Option<(Duration, T)>,
}

impl<T> Default for DeadlineSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeadlineSlot<T> {
    pub fn arm(&mut self, at: Duration, value: T) {
        self.pending = Some((at, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Takes the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> Option<T> {
        match self.pending {
            Some((at, _)) if at <= now => self.cancel(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The interval has elapsed since the last run; run now.
    RunNow,
    /// Coalesced into a trailing run at the given time.
    Deferred(Duration),
}

/// Lets a call through at most once per interval. Calls arriving inside the
/// interval collapse into a single trailing run at the end of it, so the last
/// call of a burst always gets its turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimiter {
    interval: Duration,
    last_run: Option<Duration>,
    trailing: DeadlineSlot<()>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            trailing: DeadlineSlot::default(),
        }
    }

    pub fn admit(&mut self, now: Duration) -> Admission {
        self.trailing.cancel();
        match self.last_run {
            // a clock that went backwards counts as elapsed
            Some(last) if now >= last && now < last + self.interval => {
                let at = last + self.interval;
                self.trailing.arm(at, ());
                Admission::Deferred(at)
            }
            _ => {
                self.last_run = Some(now);
                Admission::RunNow
            }
        }
    }

    /// True when the trailing run is due; marks it as run.
    pub fn take_due(&mut self, now: Duration) -> bool {
        if self.trailing.take_due(now).is_some() {
            self.last_run = Some(now);
            true
        } else {
            false
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.trailing.deadline()
    }

    pub fn cancel(&mut self) {
        self.trailing.cancel();
    }
}
