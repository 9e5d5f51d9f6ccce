//! Hardware-independent core library for halo-rs
//!
//! This crate contains all platform-agnostic logic for the halo badge
//! clock: the time-acquisition state machine, the analog face renderer,
//! the seconds indicator on the LED ring, and the advisory ring-ownership
//! handshake with the badge's ambient lighting.
//!
//! Every hardware-facing concern (wall clock, wifi, NTP, accelerometer,
//! LED ring, buttons) is consumed through a trait defined here, so the
//! host firmware injects its drivers and the desktop simulator and tests
//! inject fakes.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app;
pub mod face;
pub mod framebuffer;
pub mod input;
pub mod orientation;
pub mod ring;
pub mod state;
pub mod time_source;
