//! `TickScheduler` — fixed-interval callbacks driven by elapsed time.
//!
//! The host feeds wall or game time through [`TickScheduler::advance`];
//! each registration accumulates it and fires once per whole interval,
//! always receiving its interval as the delta.  Callbacks run sequentially
//! on the caller's thread, so two invocations never overlap.
//!
//! A single `advance` fires each registration at most
//! [`TickScheduler::max_catch_up`] times; any backlog past that is dropped
//! with a warning instead of replayed.

use tracing::{debug, info, warn};

use crate::{SimError, SimResult};

/// Opaque registration handle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TickHandle(u64);

type Callback<C> = Box<dyn FnMut(&mut C, f64)>;

/// Default cap on invocations per registration per `advance`.
pub const DEFAULT_MAX_CATCH_UP: usize = 1_000;

struct Registration<C> {
    handle:      TickHandle,
    interval:    f64,
    accumulated: f64,
    callback:    Callback<C>,
}

/// Interval callbacks over a context `C` passed in at each `advance`.
pub struct TickScheduler<C> {
    next_handle:  u64,
    max_catch_up: usize,
    entries:      Vec<Registration<C>>,
}

impl<C> Default for TickScheduler<C> {
    fn default() -> Self {
        Self { next_handle: 0, max_catch_up: DEFAULT_MAX_CATCH_UP, entries: Vec::new() }
    }
}

impl<C> TickScheduler<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap invocations per registration per `advance` at `max` (at least 1).
    pub fn with_max_catch_up(mut self, max: usize) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    pub fn max_catch_up(&self) -> usize {
        self.max_catch_up
    }

    /// Call `callback(ctx, interval_secs)` every `interval_secs` of
    /// advanced time.
    pub fn register<F>(&mut self, interval_secs: f64, callback: F) -> SimResult<TickHandle>
    where
        F: FnMut(&mut C, f64) + 'static,
    {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(SimError::InvalidInterval(interval_secs));
        }
        let handle = TickHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Registration {
            handle,
            interval: interval_secs,
            accumulated: 0.0,
            callback: Box::new(callback),
        });
        info!(?handle, interval_secs, "tick registered");
        Ok(handle)
    }

    /// Remove a registration.  Returns `false` if it was already gone.
    pub fn unregister(&mut self, handle: TickHandle) -> bool {
        match self.entries.iter().position(|r| r.handle == handle) {
            Some(i) => {
                self.entries.remove(i);
                debug!(?handle, "tick unregistered");
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, handle: TickHandle) -> bool {
        self.entries.iter().any(|r| r.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance time by `elapsed_secs` and run every callback that came due,
    /// in registration order.  Returns the number of invocations.
    ///
    /// Non-finite or negative `elapsed_secs` is ignored.  A registration
    /// that reaches the catch-up cap loses the rest of its whole intervals
    /// and keeps only the fractional remainder.
    pub fn advance(&mut self, ctx: &mut C, elapsed_secs: f64) -> usize {
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            warn!(elapsed_secs, "ignoring invalid elapsed time");
            return 0;
        }
        let cap = self.max_catch_up;
        let mut fired = 0;
        for entry in &mut self.entries {
            entry.accumulated += elapsed_secs;
            let mut runs = 0;
            while entry.accumulated >= entry.interval {
                if runs == cap {
                    let skipped = (entry.accumulated / entry.interval).floor();
                    warn!(handle = ?entry.handle, runs, skipped, "catch-up cap reached; dropping backlog");
                    entry.accumulated %= entry.interval;
                    break;
                }
                entry.accumulated -= entry.interval;
                (entry.callback)(ctx, entry.interval);
                runs += 1;
            }
            fired += runs;
        }
        fired
    }
}
