//! Axis-aligned collision detection and response
//!
//! One shared rectangle overlap test plus directional penetration resolution,
//! used for player-vs-platform, enemy-vs-platform, player-vs-enemy and
//! player-vs-coin checks.

use glam::Vec2;

use crate::consts::CONTACT_TOLERANCE;

/// An axis-aligned rectangle. `pos` is the top-left corner; Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict intersection test: touching edges do not count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// How an overlap between a moving rect and a static obstacle was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Fell onto the obstacle: bottom snapped to its top, vertical velocity zeroed
    Landed,
    /// Rose into the obstacle: top snapped to its bottom, vertical velocity zeroed
    CeilingHit,
    /// Pushed out horizontally against the direction of travel
    SideHit,
    /// Overlap could not be attributed to any direction of travel
    Unresolved,
}

/// Resolve a moving rectangle out of a static obstacle it overlaps.
///
/// `vel` must be the velocity that produced this step's displacement, so the
/// pre-step edge positions can be reconstructed. Vertical resolution takes
/// priority over horizontal as a deliberate tie-break: landing first, then
/// ceiling, then side push-out. The tolerance absorbs sub-pixel velocity
/// error at the moment of contact.
pub fn resolve_moving(rect: &mut Rect, vel: &mut Vec2, obstacle: &Rect) -> Resolution {
    if vel.y > 0.0 && rect.bottom() - vel.y <= obstacle.top() + CONTACT_TOLERANCE {
        // Falling and the bottom edge was at or above the obstacle before
        // this step's vertical displacement: landing.
        rect.pos.y = obstacle.top() - rect.size.y;
        vel.y = 0.0;
        Resolution::Landed
    } else if vel.y < 0.0 && rect.top() - vel.y >= obstacle.bottom() - CONTACT_TOLERANCE {
        // Rising and the top edge was at or below the obstacle's underside.
        rect.pos.y = obstacle.bottom();
        vel.y = 0.0;
        Resolution::CeilingHit
    } else if vel.x != 0.0 {
        if vel.x > 0.0 {
            rect.pos.x = obstacle.left() - rect.size.x;
        } else {
            rect.pos.x = obstacle.right();
        }
        vel.x = 0.0;
        Resolution::SideHit
    } else {
        Resolution::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 10.0, 10.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);

        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_landing_snaps_bottom_to_top() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        // Bottom was at 98 before a 10px fall, now at 108: overlapping
        let mut rect = Rect::new(50.0, 108.0 - 35.0, 35.0, 35.0);
        let mut vel = Vec2::new(0.0, 10.0);
        assert!(rect.overlaps(&platform));

        let res = resolve_moving(&mut rect, &mut vel, &platform);
        assert_eq!(res, Resolution::Landed);
        assert_eq!(rect.bottom(), platform.top());
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_landing_tolerance_boundary() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);

        // Pre-step bottom exactly at top + tolerance: still a landing
        let mut rect = Rect::new(50.0, 105.0 + 2.0 - 35.0, 35.0, 35.0);
        let mut vel = Vec2::new(0.0, 2.0);
        let res = resolve_moving(&mut rect, &mut vel, &platform);
        assert_eq!(res, Resolution::Landed);

        // Pre-step bottom already below the tolerance band: not a landing
        let mut rect = Rect::new(50.0, 110.0 - 35.0, 35.0, 35.0);
        let mut vel = Vec2::new(3.0, 2.0);
        let res = resolve_moving(&mut rect, &mut vel, &platform);
        assert_eq!(res, Resolution::SideHit);
    }

    #[test]
    fn test_ceiling_hit_snaps_top_to_bottom() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        // Top was at 121 before rising 8px, now at 113: overlapping from below
        let mut rect = Rect::new(50.0, 113.0, 35.0, 35.0);
        let mut vel = Vec2::new(0.0, -8.0);

        let res = resolve_moving(&mut rect, &mut vel, &platform);
        assert_eq!(res, Resolution::CeilingHit);
        assert_eq!(rect.top(), platform.bottom());
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_side_push_out() {
        let wall = Rect::new(100.0, 0.0, 20.0, 200.0);

        // Moving right into the wall, deep enough that neither vertical
        // condition holds
        let mut rect = Rect::new(70.0, 50.0, 35.0, 35.0);
        let mut vel = Vec2::new(6.0, 0.0);
        let res = resolve_moving(&mut rect, &mut vel, &wall);
        assert_eq!(res, Resolution::SideHit);
        assert_eq!(rect.right(), wall.left());
        assert_eq!(vel.x, 0.0);

        // Moving left
        let mut rect = Rect::new(115.0, 50.0, 35.0, 35.0);
        let mut vel = Vec2::new(-6.0, 0.0);
        let res = resolve_moving(&mut rect, &mut vel, &wall);
        assert_eq!(res, Resolution::SideHit);
        assert_eq!(rect.left(), wall.right());
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_vertical_takes_priority_over_horizontal() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        // Falling and moving right, landing condition satisfied: must land,
        // not push out sideways
        let mut rect = Rect::new(50.0, 104.0 - 35.0, 35.0, 35.0);
        let mut vel = Vec2::new(6.0, 9.0);

        let res = resolve_moving(&mut rect, &mut vel, &platform);
        assert_eq!(res, Resolution::Landed);
        assert_eq!(vel.x, 6.0);
    }

    proptest! {
        #[test]
        fn prop_falling_onto_platform_always_lands_flush(
            vy in 0.1f32..20.0,
            pre_gap in -15.0f32..4.5,
        ) {
            let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
            // Place the rect so its pre-step bottom sat at top + pre_gap,
            // then displace it by this step's fall
            let mut rect = Rect::new(50.0, platform.top() + pre_gap + vy - 35.0, 35.0, 35.0);
            let mut vel = Vec2::new(0.0, vy);
            prop_assume!(rect.overlaps(&platform));

            let res = resolve_moving(&mut rect, &mut vel, &platform);
            prop_assert_eq!(res, Resolution::Landed);
            prop_assert_eq!(rect.bottom(), platform.top());
            prop_assert_eq!(vel.y, 0.0);
        }
    }
}
