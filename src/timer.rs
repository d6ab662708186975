//! Active play-time tracking
//!
//! Counts wall-clock milliseconds of actual play, independent of the
//! simulation tick counter. Pausing suspends accumulation without resetting;
//! stopping finalizes the total. The session defers `start()` until the first
//! movement input of a run, so idle time on the start screen never counts.

use std::time::Instant;

/// Source of wall-clock milliseconds. Abstracted so tests can drive time
/// by hand.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic system clock, measured from construction
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Play timer with pause/resume semantics
///
/// Elapsed time is `now - start - total_paused`, where `total_paused`
/// includes an in-progress pause. `elapsed_ms()` is a pure query that is
/// correct while running, paused, or stopped.
#[derive(Debug)]
pub struct GameTimer<C: Clock = SystemClock> {
    clock: C,
    start: Option<f64>,
    pause_started: Option<f64>,
    total_paused: f64,
    stopped_at: Option<f64>,
}

impl GameTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for GameTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GameTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            start: None,
            pause_started: None,
            total_paused: 0.0,
            stopped_at: None,
        }
    }

    /// Begin counting from zero. Idempotent while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.start = Some(self.clock.now_ms());
        self.pause_started = None;
        self.total_paused = 0.0;
        self.stopped_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.stopped_at.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started.is_some()
    }

    /// Suspend accumulation. No-op unless running and not already paused.
    pub fn pause(&mut self) {
        if self.is_running() && self.pause_started.is_none() {
            self.pause_started = Some(self.clock.now_ms());
        }
    }

    /// Resume after a pause. No-op unless currently paused.
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.pause_started.take() {
            self.total_paused += self.clock.now_ms() - paused_at;
        }
    }

    /// Finalize and return total elapsed milliseconds. Accounts for being
    /// mid-pause at stop time.
    pub fn stop(&mut self) -> f64 {
        if let Some(paused_at) = self.pause_started.take() {
            self.total_paused += self.clock.now_ms() - paused_at;
        }
        if self.stopped_at.is_none() && self.start.is_some() {
            self.stopped_at = Some(self.clock.now_ms());
        }
        self.elapsed_ms()
    }

    /// Zero every field
    pub fn reset(&mut self) {
        self.start = None;
        self.pause_started = None;
        self.total_paused = 0.0;
        self.stopped_at = None;
    }

    /// Elapsed active milliseconds, valid in every state
    pub fn elapsed_ms(&self) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        let end = match (self.stopped_at, self.pause_started) {
            (Some(stopped), _) => stopped,
            // Mid-pause: the clock froze at pause time, so the in-progress
            // pause interval is excluded without touching total_paused
            (None, Some(paused_at)) => paused_at,
            (None, None) => self.clock.now_ms(),
        };
        (end - start - self.total_paused).max(0.0)
    }
}

/// Render milliseconds as `MM:SS.CC` (minutes, seconds, centiseconds)
pub fn format_elapsed(ms: f64) -> String {
    let total_cs = (ms / 10.0).floor().max(0.0) as u64;
    let minutes = total_cs / 6000;
    let seconds = (total_cs / 100) % 60;
    let centis = total_cs % 100;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
