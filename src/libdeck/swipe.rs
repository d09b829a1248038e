use crate::libdeck::motion::{drag_transform, CardTransform, MAX_TILT_DEG};
use log::debug;

pub const SWIPE_THRESHOLD_RATIO: f32 = 0.25;
pub const COMMIT_TARGET_RATIO: f32 = 1.5;
pub const COMMIT_DURATION_SECS: f32 = 0.2;

// Spring constants for the snap-back, tuned to settle in about a third of
// a second. Matches the feel of the source app's friction-5 spring.
const SPRING_STIFFNESS: f32 = 170.0;
const SPRING_DAMPING: f32 = 22.0;
const REST_OFFSET: f32 = 0.5;
const REST_VELOCITY: f32 = 5.0;

/// A committed swipe crossed this fraction of the viewport width on release.
pub fn should_commit(dx: f32, viewport_width: f32) -> bool {
    dx.is_finite() && dx.abs() > SWIPE_THRESHOLD_RATIO * viewport_width
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging {
        dx: f32,
        dy: f32,
    },
    Committing {
        elapsed: f32,
        from: CardTransform,
        target_x: f32,
        consumed: bool,
    },
    Returning {
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEvent {
    None,
    CardConsumed,
}

/// Drives the topmost card through Dragging -> Committing | Returning.
///
/// The controller is owned by whichever card is on top and thrown away once
/// that card leaves: a commit reports `CardConsumed` from `tick` exactly
/// once, and dropping the controller mid-animation reports nothing, so an
/// unmounted screen can never advance the deck.
#[derive(Debug)]
pub struct SwipeController {
    viewport_width: f32,
    phase: Phase,
}

impl SwipeController {
    pub fn new(viewport_width: f32) -> SwipeController {
        SwipeController {
            viewport_width,
            phase: Phase::Idle,
        }
    }

    /// The controller can outlive a window resize while its card sits
    /// idle; the threshold and motion mapping follow the current width.
    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        if viewport_width.is_finite() && viewport_width > 0.0 {
            self.viewport_width = viewport_width;
        }
    }

    /// Feeds one gesture sample (delta since the previous one). Starts a
    /// drag from rest, continues an active one, or grabs a card that is
    /// still springing back, picking up at its current offset. A card that
    /// is already committing is on its way out and no longer grabbable.
    pub fn drag_by(&mut self, ddx: f32, ddy: f32) {
        if !ddx.is_finite() || !ddy.is_finite() {
            return;
        }
        self.phase = match self.phase {
            Phase::Idle => Phase::Dragging { dx: ddx, dy: ddy },
            Phase::Dragging { dx, dy } => Phase::Dragging {
                dx: dx + ddx,
                dy: dy + ddy,
            },
            Phase::Returning { x, y, .. } => Phase::Dragging {
                dx: x + ddx,
                dy: y + ddy,
            },
            committing @ Phase::Committing { .. } => committing,
        };
    }

    /// Gesture ended. The threshold is evaluated here and only here, once:
    /// duplicate release events find the controller out of the dragging
    /// phase and fall through.
    pub fn release(&mut self) {
        let Phase::Dragging { dx, dy } = self.phase else {
            return;
        };
        if should_commit(dx, self.viewport_width) {
            let target_x = dx.signum() * COMMIT_TARGET_RATIO * self.viewport_width;
            debug!("[Swipe] Committing toward {:.0}", target_x);
            self.phase = Phase::Committing {
                elapsed: 0.0,
                from: drag_transform(dx, dy, self.viewport_width),
                target_x,
                consumed: false,
            };
        } else {
            debug!("[Swipe] Below threshold, springing back");
            self.phase = Phase::Returning {
                x: dx,
                y: dy,
                vx: 0.0,
                vy: 0.0,
            };
        }
    }

    /// Advances the commit or return animation by `dt` seconds. Returns
    /// `CardConsumed` on the tick where a commit finishes, never again.
    pub fn tick(&mut self, dt: f32) -> SwipeEvent {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        match &mut self.phase {
            Phase::Committing {
                elapsed, consumed, ..
            } => {
                *elapsed += dt;
                if *elapsed >= COMMIT_DURATION_SECS && !*consumed {
                    *consumed = true;
                    debug!("[Swipe] Card consumed");
                    return SwipeEvent::CardConsumed;
                }
                SwipeEvent::None
            }
            Phase::Returning { x, y, vx, vy } => {
                // Semi-implicit Euler on each axis.
                *vx += (-SPRING_STIFFNESS * *x - SPRING_DAMPING * *vx) * dt;
                *vy += (-SPRING_STIFFNESS * *y - SPRING_DAMPING * *vy) * dt;
                *x += *vx * dt;
                *y += *vy * dt;
                let settled = x.abs() < REST_OFFSET
                    && y.abs() < REST_OFFSET
                    && vx.abs() < REST_VELOCITY
                    && vy.abs() < REST_VELOCITY;
                if settled {
                    self.phase = Phase::Idle;
                }
                SwipeEvent::None
            }
            Phase::Idle | Phase::Dragging { .. } => SwipeEvent::None,
        }
    }

    /// True while an animation is in flight and the frontend should keep
    /// ticking. Dragging is driven by input, not by the clock.
    pub fn is_animating(&self) -> bool {
        match self.phase {
            Phase::Committing { consumed, .. } => !consumed,
            Phase::Returning { .. } => true,
            Phase::Idle | Phase::Dragging { .. } => false,
        }
    }

    /// Current visual transform of the card this controller owns.
    pub fn transform(&self) -> CardTransform {
        match self.phase {
            Phase::Idle => CardTransform::resting(),
            Phase::Dragging { dx, dy } => drag_transform(dx, dy, self.viewport_width),
            Phase::Returning { x, y, .. } => drag_transform(x, y, self.viewport_width),
            Phase::Committing {
                elapsed,
                from,
                target_x,
                ..
            } => {
                let p = (elapsed / COMMIT_DURATION_SECS).min(1.0);
                let x = from.translate_x + (target_x - from.translate_x) * p;
                let tilt = (x / (self.viewport_width / 2.0)).clamp(-1.0, 1.0);
                CardTransform {
                    translate_x: x,
                    translate_y: from.translate_y,
                    rotation_deg: tilt * MAX_TILT_DEG,
                    opacity: from.opacity * (1.0 - p),
                    scale: from.scale + (0.8 - from.scale) * p,
                }
            }
        }
    }
}
