//! Two-frame animation clock.
//!
//! Runs every tick, independent of sensor, weather and mood activity.
//! Toggles the frame iff a full `frame_time_ms` has elapsed since the
//! last change; within the interval repeated calls are no-ops.

use super::FrameIndex;
use super::context::PetState;
use crate::app::ports::Millis;

#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    frame_time_ms: Millis,
}

impl AnimationClock {
    pub fn new(frame_time_ms: u32) -> Self {
        Self {
            frame_time_ms: Millis::from(frame_time_ms),
        }
    }

    /// Advance the animation and return the frame to draw.
    pub fn update(&self, pet: &mut PetState, now: Millis) -> FrameIndex {
        if now.saturating_sub(pet.last_frame_change_ms) >= self.frame_time_ms {
            pet.frame = pet.frame.toggled();
            pet.last_frame_change_ms = now;
        }
        pet.frame
    }
}
