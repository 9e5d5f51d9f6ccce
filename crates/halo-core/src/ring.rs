//! LED ring: seconds indicator and ownership handshake.
//!
//! The 12 indicator LEDs around the display are a shared resource. An
//! ambient pattern subsystem elsewhere in the host owns them by default;
//! this module mediates the advisory handoff. [`RingOwnership`] wraps the
//! two signals ("pattern display disable" / "enable") behind an internal
//! flag so repeated claims or releases emit each signal exactly once.
//! There is no lock under the handshake — correctness rests entirely on
//! this claim/release discipline.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use log::info;

/// Number of ring slots this app addresses (indices 1..=12; slot 0 is
/// reserved by the host).
pub const RING_SLOTS: usize = 12;

/// Grayscale brightness steps for seconds 0-4 within a 5-second slot.
const SECONDS_LEVELS: [Rgb888; 5] = [
    Rgb888::new(5, 5, 5),
    Rgb888::new(10, 10, 10),
    Rgb888::new(15, 15, 15),
    Rgb888::new(20, 20, 20),
    Rgb888::new(25, 25, 25),
];

/// Addressable LED ring collaborator contract.
pub trait LedRing {
    /// Write one ring slot. `index` is the host's slot numbering, so
    /// this app passes 1..=12.
    fn set_slot(&mut self, index: usize, color: Rgb888);
}

/// Ambient lighting collaborator contract.
///
/// Both signals are idempotent from the subsystem's perspective, but the
/// guard in [`RingOwnership`] keeps this core from spamming them anyway.
pub trait AmbientPatterns {
    /// Ask the ambient subsystem to stop driving the ring.
    fn disable(&mut self);

    /// Hand the ring back to the ambient subsystem.
    fn enable(&mut self);
}

/// Derived per-tick seconds indicator: which slot lights, and how bright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondsIndicator {
    /// Ring slot 1..=12.
    pub position: usize,
    /// Brightness step 0..=4 within the slot's 5-second window.
    pub level: usize,
}

impl SecondsIndicator {
    /// Map a second (0-59) onto its ring slot and brightness step.
    pub fn from_second(second: u8) -> Self {
        Self {
            position: (second / 5) as usize + 1,
            level: (second % 5) as usize,
        }
    }

    /// Grayscale color for this indicator's brightness step.
    pub fn color(&self) -> Rgb888 {
        SECONDS_LEVELS[self.level]
    }
}

/// Advisory ownership flag for the ring, guarding the ambient handshake.
///
/// Starts unclaimed; claimed the first time an active clock face is
/// drawn; released when the app is dismissed.
#[derive(Debug, Default)]
pub struct RingOwnership {
    claimed: bool,
}

impl RingOwnership {
    pub fn new() -> Self {
        Self { claimed: false }
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Take the ring from the ambient subsystem. Emits one `disable`
    /// signal; a no-op if already claimed.
    pub fn claim<P: AmbientPatterns>(&mut self, patterns: &mut P) {
        if self.claimed {
            return;
        }
        info!("claiming LED ring from ambient patterns");
        patterns.disable();
        self.claimed = true;
    }

    /// Hand the ring back. Emits one `enable` signal; a no-op if not
    /// claimed.
    pub fn release<P: AmbientPatterns>(&mut self, patterns: &mut P) {
        if !self.claimed {
            return;
        }
        info!("releasing LED ring to ambient patterns");
        patterns.enable();
        self.claimed = false;
    }
}
