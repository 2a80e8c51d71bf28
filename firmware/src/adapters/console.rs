//! Serial console display for the device build.
//!
//! The console is a 115200-baud UART, so the full ASCII frame (over 8 KB)
//! would hold the loop for most of a second.  This adapter writes one
//! short status line per changed frame instead:
//!
//! ```text
//! FRAME 42 lit=917 sum=3c1a09f2
//! ```
//!
//! `sum` is a checksum of [`PixelBuffer::as_bytes`], enough to tell
//! frames apart in a capture.

use core::fmt::Write as _;
use std::io::Write;

use crate::app::ports::DisplayPort;
use crate::error::ErrorKind;
use crate::render::PixelBuffer;

/// Upper bound on the bytes written for one frame, newline included.
pub const STATUS_LINE_MAX: usize = 48;

pub struct ConsoleStatus<O = std::io::Stdout> {
    out: O,
    last: Option<PixelBuffer>,
    frames_shown: u32,
}

impl ConsoleStatus {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<O: Write> ConsoleStatus<O> {
    pub fn new(out: O) -> Self {
        Self {
            out,
            last: None,
            frames_shown: 0,
        }
    }

    pub fn frames_shown(&self) -> u32 {
        self.frames_shown
    }

    pub fn into_inner(self) -> O {
        self.out
    }
}

/// FNV-1a over the page bytes.
fn checksum(frame: &PixelBuffer) -> u32 {
    frame
        .as_bytes()
        .iter()
        .fold(0x811c_9dc5u32, |h, b| (h ^ u32::from(*b)).wrapping_mul(0x0100_0193))
}

fn status_line(seq: u32, frame: &PixelBuffer) -> heapless::String<STATUS_LINE_MAX> {
    let mut line = heapless::String::new();
    // u32 fields keep this well under capacity.
    let _ = writeln!(
        line,
        "FRAME {} lit={} sum={:08x}",
        seq,
        frame.lit_count(),
        checksum(frame)
    );
    line
}

impl<O: Write> DisplayPort for ConsoleStatus<O> {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), ErrorKind> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        let line = status_line(self.frames_shown, frame);
        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| {
                log::debug!("Display: console write failed: {}", e);
                ErrorKind::DisplayWriteFailed
            })?;
        self.last = Some(frame.clone());
        self.frames_shown = self.frames_shown.wrapping_add(1);
        Ok(())
    }
}
