//! Compile-time sprite table.
//!
//! Each sprite is a 64×64 text grid (`#` lit, `.` unlit) under
//! `assets/sprites/`, parsed into packed rows by a `const fn`.  A malformed
//! file is a build error, not a runtime lookup failure.

use crate::pet::{FrameIndex, MoodKind};

/// Sprite edge length in pixels.
pub const SPRITE_SIZE: usize = 64;

/// One 64×64 monochrome bitmap.  Bit 63 of each row is the leftmost pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    rows: [u64; SPRITE_SIZE],
}

impl Bitmap {
    pub const fn pixel(&self, x: usize, y: usize) -> bool {
        x < SPRITE_SIZE && y < SPRITE_SIZE && self.rows[y] & (1 << (SPRITE_SIZE - 1 - x)) != 0
    }

    pub const fn row(&self, y: usize) -> u64 {
        self.rows[y]
    }

    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }
}

const fn parse(src: &str) -> Bitmap {
    let bytes = src.as_bytes();
    let mut rows = [0u64; SPRITE_SIZE];
    let mut row = 0;
    let mut col = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'#' | b'.' => {
                assert!(row < SPRITE_SIZE, "sprite has more than 64 rows");
                assert!(col < SPRITE_SIZE, "sprite row wider than 64 pixels");
                if bytes[i] == b'#' {
                    rows[row] |= 1 << (SPRITE_SIZE - 1 - col);
                }
                col += 1;
            }
            b'\n' => {
                assert!(col == SPRITE_SIZE, "sprite row narrower than 64 pixels");
                row += 1;
                col = 0;
            }
            b'\r' => {}
            _ => panic!("sprite glyphs are '#' and '.' only"),
        }
        i += 1;
    }
    // Final newline is optional.
    if col != 0 {
        assert!(col == SPRITE_SIZE, "sprite row narrower than 64 pixels");
        row += 1;
    }
    assert!(row == SPRITE_SIZE, "sprite must have exactly 64 rows");
    Bitmap { rows }
}

macro_rules! sprite_pair {
    ($name:literal) => {
        [
            parse(include_str!(concat!("../../assets/sprites/", $name, "_0.txt"))),
            parse(include_str!(concat!("../../assets/sprites/", $name, "_1.txt"))),
        ]
    };
}

/// `[mood][frame]`, in [`MoodKind::ALL`] order.
pub static SPRITES: [[Bitmap; FrameIndex::COUNT]; MoodKind::COUNT] = [
    sprite_pair!("happy"),
    sprite_pair!("sad"),
    sprite_pair!("bored"),
    sprite_pair!("love"),
    sprite_pair!("pouting"),
];

pub fn sprite(mood: MoodKind, frame: FrameIndex) -> &'static Bitmap {
    &SPRITES[mood.index()][frame.index()]
}
