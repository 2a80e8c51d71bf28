//! The pet itself: its mood set, its two-frame animation, and the state
//! machine that moves between moods.
//!
//! ```text
//!            ┌──────────── hot ────────────▶ Sad
//!  evaluate ─┼──────────── comfortable ────▶ Happy
//!            └──── unknown / in between ───▶ {Bored, Love, Pouting} (seeded pick)
//! ```
//!
//! There is no terminal mood; evaluation repeats every
//! `mood_change_interval_ms` for the life of the process.

pub mod animation;
pub mod context;
pub mod mood;

// ---------------------------------------------------------------------------
// Mood identity
// ---------------------------------------------------------------------------

/// The five fixed moods.  Discriminants index the sprite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoodKind {
    Happy = 0,
    Sad = 1,
    Bored = 2,
    Love = 3,
    Pouting = 4,
}

impl MoodKind {
    /// Total number of moods, used to size the sprite table.
    pub const COUNT: usize = 5;

    /// Every mood, in sprite-table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Happy,
        Self::Sad,
        Self::Bored,
        Self::Love,
        Self::Pouting,
    ];

    /// Moods picked at random when the temperature says nothing.
    pub const IDLE_MOODS: [Self; 3] = [Self::Bored, Self::Love, Self::Pouting];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Bored => "bored",
            Self::Love => "love",
            Self::Pouting => "pouting",
        }
    }
}

// ---------------------------------------------------------------------------
// Frame identity
// ---------------------------------------------------------------------------

/// Which of a mood's two frames is showing.  Only two values exist, so the
/// `frameIndex ∈ {0,1}` invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FrameIndex {
    #[default]
    First = 0,
    Second = 1,
}

impl FrameIndex {
    /// Frames per mood.
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}
