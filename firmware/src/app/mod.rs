//! Application boundary: the types that cross between the domain core and
//! the outside world.
//!
//! The port traits in [`ports`] keep the scheduler, mood engine and
//! renderer testable without real peripherals; [`events`] is what the
//! core reports back out.

pub mod events;
pub mod ports;
