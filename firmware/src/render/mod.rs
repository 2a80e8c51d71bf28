//! Frame composition.
//!
//! ```text
//!  x: 0          32                      96         127
//!     ┌──────────┬────────────────────────┬──────────┐ y=0
//!     │          │                        │          │
//!     │          │     mood sprite        │          │
//!     │          │       64 × 64          │          │
//!     │ 72F      │                        │      48F │ y=48
//!     │ 45%      │                        │      81% │ y=56
//!     └──────────┴────────────────────────┴──────────┘
//!       indoor                               outdoor
//! ```
//!
//! [`draw`] is pure: the same [`Scene`] always yields the same buffer.  The
//! rain overlay is derived from a PRNG seeded with the frame index, so it
//! animates with the sprite without breaking that property.

pub mod buffer;
pub mod sprites;

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub use buffer::{HEIGHT, PixelBuffer, WIDTH};
pub use sprites::{Bitmap, SPRITE_SIZE};

use crate::pet::context::{EnvironmentState, PetState};
use crate::pet::{FrameIndex, MoodKind};

/// Left edge of the centred sprite.
pub const SPRITE_X: usize = (WIDTH - SPRITE_SIZE) / 2;
pub const TEMP_ROW_Y: i32 = 48;
pub const HUMIDITY_ROW_Y: i32 = 56;

const GLYPH_W: usize = 5;
const LINE_H: usize = 9;
const RAIN_DROPS: usize = 19;
const RAIN_STREAK_LEN: usize = 4;
const MAX_SPLASH_LINES: usize = 4;

type Label = heapless::String<16>;

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub mood: MoodKind,
    pub frame: FrameIndex,
    pub indoor_temp_c: Option<f32>,
    pub indoor_humidity: Option<f32>,
    pub outdoor_temp_f: Option<f32>,
    pub outdoor_humidity: Option<f32>,
    pub raining: bool,
}

impl Scene {
    /// Sprite and temperatures only; humidity rows show placeholders.
    pub fn new(
        mood: MoodKind,
        frame: FrameIndex,
        indoor_temp_c: Option<f32>,
        outdoor_temp_f: Option<f32>,
    ) -> Self {
        Self {
            mood,
            frame,
            indoor_temp_c,
            indoor_humidity: None,
            outdoor_temp_f,
            outdoor_humidity: None,
            raining: false,
        }
    }

    pub fn from_state(pet: &PetState, env: &EnvironmentState) -> Self {
        Self {
            mood: pet.mood,
            frame: pet.frame,
            indoor_temp_c: env.indoor_temp_c,
            indoor_humidity: env.indoor_humidity,
            outdoor_temp_f: env.outdoor_temp_f,
            outdoor_humidity: env.outdoor_humidity,
            raining: env.is_raining(),
        }
    }
}

pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// `72F`, or `--F` when unknown.  Truncates toward zero like the panel always has.
pub fn format_temp_f(temp_f: Option<f32>) -> Label {
    let mut s = Label::new();
    match temp_f {
        Some(f) => {
            let _ = write!(s, "{}F", f as i32);
        }
        None => {
            let _ = s.push_str("--F");
        }
    }
    s
}

/// `45%`, or `--%` when unknown.
pub fn format_humidity(humidity: Option<f32>) -> Label {
    let mut s = Label::new();
    match humidity {
        Some(h) => {
            let _ = write!(s, "{}%", h as i32);
        }
        None => {
            let _ = s.push_str("--%");
        }
    }
    s
}

/// Compose one frame.  Total: every input produces a full buffer.
pub fn draw(scene: &Scene) -> PixelBuffer {
    let mut buf = PixelBuffer::new();

    blit(&mut buf, sprites::sprite(scene.mood, scene.frame), SPRITE_X, 0);

    if scene.raining {
        rain(&mut buf, scene.frame);
    }

    let indoor_f = scene.indoor_temp_c.map(celsius_to_fahrenheit);
    text_left(&mut buf, &format_temp_f(indoor_f), TEMP_ROW_Y);
    text_left(&mut buf, &format_humidity(scene.indoor_humidity), HUMIDITY_ROW_Y);
    text_right(&mut buf, &format_temp_f(scene.outdoor_temp_f), TEMP_ROW_Y);
    text_right(&mut buf, &format_humidity(scene.outdoor_humidity), HUMIDITY_ROW_Y);

    buf
}

/// Centred boot/status text, at most four lines.
pub fn splash(lines: &[&str]) -> PixelBuffer {
    let mut buf = PixelBuffer::new();
    let lines = &lines[..lines.len().min(MAX_SPLASH_LINES)];
    let top = HEIGHT.saturating_sub(lines.len() * LINE_H) / 2;
    for (i, line) in lines.iter().enumerate() {
        let x = WIDTH.saturating_sub(line.len() * GLYPH_W) / 2;
        text_at(&mut buf, line, x as i32, (top + i * LINE_H) as i32);
    }
    buf
}

fn blit(buf: &mut PixelBuffer, bitmap: &Bitmap, x0: usize, y0: usize) {
    for y in 0..SPRITE_SIZE {
        for x in 0..SPRITE_SIZE {
            if bitmap.pixel(x, y) {
                buf.set(x0 + x, y0 + y, true);
            }
        }
    }
}

fn rain(buf: &mut PixelBuffer, frame: FrameIndex) {
    let mut rng = SmallRng::seed_from_u64(frame.index() as u64);
    for _ in 0..RAIN_DROPS {
        let x = rng.gen_range(0..WIDTH);
        let y = rng.gen_range(0..HEIGHT);
        for i in 0..RAIN_STREAK_LEN {
            buf.set(x + i, y + i, true);
        }
    }
}

fn text_at(buf: &mut PixelBuffer, s: &str, x: i32, y: i32) {
    let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    let Ok(_) = Text::with_baseline(s, Point::new(x, y), style, Baseline::Top).draw(buf);
}

fn text_left(buf: &mut PixelBuffer, s: &str, y: i32) {
    text_at(buf, s, 0, y);
}

fn text_right(buf: &mut PixelBuffer, s: &str, y: i32) {
    let x = WIDTH.saturating_sub(s.len() * GLYPH_W);
    text_at(buf, s, x as i32, y);
}
