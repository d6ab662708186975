//! Cancellable frame loop
//!
//! The host environment delivers display-synchronized frame callbacks; this
//! loop decides whether a simulation tick actually runs. At most one tick is
//! pending at a time, a tick reschedules itself only while the world is still
//! `Playing`, and `cancel()` is synchronous and idempotent so a state change
//! mid-frame can never leave two tick chains alive.

use crate::sim::{GamePhase, StepEvents, TickInput, World, tick};

/// Owns the pending-tick slot for the simulation
#[derive(Debug, Default)]
pub struct FrameLoop {
    /// Bumped on every cancel; a pending tick from an older generation is dead
    generation: u64,
    /// Generation of the scheduled tick, if any
    pending: Option<u64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick. No-op if one is already pending.
    pub fn request(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.generation);
        }
    }

    /// Cancel any pending tick. Synchronous and idempotent.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Is a tick currently scheduled?
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Run one frame callback: executes the pending tick if it is still
    /// valid, then reschedules while the world remains in `Playing`.
    /// Returns the tick's events, or None if nothing ran.
    pub fn frame(&mut self, world: &mut World, input: &TickInput) -> Option<StepEvents> {
        match self.pending.take() {
            Some(generation) if generation == self.generation => {
                let events = tick(world, input);
                if world.phase == GamePhase::Playing {
                    self.request();
                }
                Some(events)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_world() -> World {
        let mut world = World::new(Vec2::new(1280.0, 720.0), 3);
        world.enter_phase(GamePhase::Playing);
        world.start_run();
        world
    }

    #[test]
    fn test_frame_runs_and_reschedules_while_playing() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();

        frame_loop.request();
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_some());
        assert_eq!(world.time_ticks, 1);
        // Rescheduled automatically
        assert!(frame_loop.is_scheduled());
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_some());
        assert_eq!(world.time_ticks, 2);
    }

    #[test]
    fn test_no_tick_without_request() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();

        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_none());
        assert_eq!(world.time_ticks, 0);
    }

    #[test]
    fn test_cancel_kills_pending_tick() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();

        frame_loop.request();
        frame_loop.cancel();
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_none());
        assert_eq!(world.time_ticks, 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();

        frame_loop.cancel();
        frame_loop.cancel();
        frame_loop.request();
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_some());
    }

    #[test]
    fn test_cancel_then_request_yields_single_chain() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();

        // A stale request followed by cancel + fresh request must produce
        // exactly one tick per frame, never two
        frame_loop.request();
        frame_loop.cancel();
        frame_loop.request();

        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_some());
        assert_eq!(world.time_ticks, 1);
        // Only the self-rescheduled tick remains
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_some());
        assert_eq!(world.time_ticks, 2);
    }

    #[test]
    fn test_loop_stops_when_phase_leaves_playing() {
        let mut world = playing_world();
        let mut frame_loop = FrameLoop::new();
        world.lives = 1;
        world.platforms.clear();
        world.player.pos = Vec2::new(300.0, 900.0);

        frame_loop.request();
        let events = frame_loop.frame(&mut world, &TickInput::default()).unwrap();
        assert!(events.outcome.is_some());
        assert_eq!(world.phase, GamePhase::GameOver);
        // Not rescheduled after the run ended
        assert!(!frame_loop.is_scheduled());
        assert!(frame_loop.frame(&mut world, &TickInput::default()).is_none());
    }
}
