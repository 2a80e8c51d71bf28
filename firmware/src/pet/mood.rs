//! Mood state machine.
//!
//! Evaluated at most once per `mood_change_interval_ms`.  The decision
//! itself ([`select_mood`]) is a pure function of the thresholds, the
//! indoor temperature and the RNG; [`MoodEngine`] adds the timing and the
//! animation restart on a real transition.

use log::{debug, info};
use rand::{Rng, RngCore};

use super::MoodKind;
use super::context::{EnvironmentState, PetState};
use crate::app::ports::Millis;
use crate::config::PetConfig;

/// Temperature thresholds that drive the deterministic moods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodThresholds {
    /// Strictly above this → `Sad`.
    pub hot_c: f32,
    /// Inclusive comfort band → `Happy`.
    pub comfort_min_c: f32,
    pub comfort_max_c: f32,
}

impl From<&PetConfig> for MoodThresholds {
    fn from(config: &PetConfig) -> Self {
        Self {
            hot_c: config.hot_threshold_c,
            comfort_min_c: config.comfort_min_c,
            comfort_max_c: config.comfort_max_c,
        }
    }
}

/// Pick the next mood.  The RNG is only consumed on the fallback branch.
pub fn select_mood(
    thresholds: &MoodThresholds,
    indoor_temp_c: Option<f32>,
    rng: &mut impl RngCore,
) -> MoodKind {
    match indoor_temp_c {
        Some(t) if t > thresholds.hot_c => MoodKind::Sad,
        Some(t) if t >= thresholds.comfort_min_c && t <= thresholds.comfort_max_c => {
            MoodKind::Happy
        }
        _ => {
            let idx = rng.gen_range(0..MoodKind::IDLE_MOODS.len());
            MoodKind::IDLE_MOODS[idx]
        }
    }
}

/// A mood transition produced by [`MoodEngine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodChange {
    pub from: MoodKind,
    pub to: MoodKind,
}

/// Timed mood evaluator.  Generic over the RNG so tests can seed it.
pub struct MoodEngine<R> {
    interval_ms: Millis,
    thresholds: MoodThresholds,
    rng: R,
}

impl<R: RngCore> MoodEngine<R> {
    pub fn new(config: &PetConfig, rng: R) -> Self {
        Self {
            interval_ms: Millis::from(config.mood_change_interval_ms),
            thresholds: MoodThresholds::from(config),
            rng,
        }
    }

    /// Whether an evaluation is due at `now`.
    pub fn is_due(&self, pet: &PetState, now: Millis) -> bool {
        now.saturating_sub(pet.last_mood_change_ms) >= self.interval_ms
    }

    /// Evaluate the mood if due.
    ///
    /// Every evaluation restarts the mood interval.  Only an actual change
    /// of mood resets the animation to its first frame at `now`; the
    /// return value is `Some` exactly in that case.
    pub fn update(
        &mut self,
        now: Millis,
        env: &EnvironmentState,
        pet: &mut PetState,
    ) -> Option<MoodChange> {
        if !self.is_due(pet, now) {
            return None;
        }

        let next = select_mood(&self.thresholds, env.indoor_temp_c, &mut self.rng);
        pet.last_mood_change_ms = now;

        if next == pet.mood {
            debug!("Mood: evaluated, staying {}", next.name());
            return None;
        }

        let change = MoodChange {
            from: pet.mood,
            to: next,
        };
        info!("Mood: {} -> {}", change.from.name(), change.to.name());
        pet.mood = next;
        pet.frame = super::FrameIndex::First;
        pet.last_frame_change_ms = now;
        Some(change)
    }
}
