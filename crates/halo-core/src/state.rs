//! Time-acquisition state machine.
//!
//! Four forward-only phases take the badge from a cold boot to a running
//! clock:
//!
//! 1. **`Init`** — read the clock once. A sentinel year means no trusted
//!    time is known, so start wifi association (or skip straight to the
//!    sync phase if already associated). A real year goes straight to
//!    `Clock`.
//! 2. **`ConnectingWifi`** — poll association every tick. There is no
//!    timeout; the machine will poll forever if the network never
//!    appears (known gap; dismissal is the only way out).
//! 3. **`SyncingTime`** — fire one NTP sync. Success moves to `Clock`;
//!    failure propagates out of the tick untouched, with no retry here.
//! 4. **`Clock`** — steady state: re-read the wall clock every tick.
//!
//! Orientation is sampled only in `Init` and `Clock`, the phases where a
//! face is actually drawn.

use log::debug;

use crate::orientation::{OrientationSensor, is_flipped};
use crate::time_source::{SENTINEL_YEAR, SyncError, TimeSource, WallTime};

/// Discrete stage of time acquisition. Transitions are forward-only;
/// `Clock` is never left except by dismissing the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Init,
    ConnectingWifi,
    SyncingTime,
    Clock,
}

/// Per-tick derived state: current phase, latest time snapshot, and face
/// orientation.
#[derive(Debug)]
pub struct ClockState {
    phase: AppPhase,
    time: Option<WallTime>,
    flip: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::Init,
            time: None,
            flip: false,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    /// Latest wall-time snapshot; `None` until acquisition completes.
    pub fn time(&self) -> Option<WallTime> {
        self.time
    }

    /// Whether the face should draw rotated 180°.
    pub fn flip(&self) -> bool {
        self.flip
    }

    /// Advance the machine by one frame.
    ///
    /// At most one phase transition happens per tick, so a scripted
    /// collaborator observes the full `Init → ConnectingWifi →
    /// SyncingTime → Clock` sequence. A sync failure returns early via
    /// `?` and leaves the phase in `SyncingTime`.
    pub fn tick<T, O>(&mut self, time_source: &mut T, imu: &mut O) -> Result<(), SyncError>
    where
        T: TimeSource,
        O: OrientationSensor,
    {
        // No face is drawn while connecting or syncing, so skip the
        // accelerometer in those phases.
        if matches!(self.phase, AppPhase::Init | AppPhase::Clock) {
            let sample = imu.acceleration();
            self.flip = is_flipped(&sample);
        }

        match self.phase {
            AppPhase::Init => {
                let now = time_source.now();
                if now.year == SENTINEL_YEAR {
                    if time_source.wifi_associated() {
                        self.set_phase(AppPhase::SyncingTime);
                    } else {
                        time_source.connect_wifi();
                        self.set_phase(AppPhase::ConnectingWifi);
                    }
                } else {
                    self.time = Some(now);
                    self.set_phase(AppPhase::Clock);
                }
            }
            AppPhase::ConnectingWifi => {
                if time_source.wifi_associated() {
                    self.set_phase(AppPhase::SyncingTime);
                }
            }
            AppPhase::SyncingTime => {
                time_source.sync_time()?;
                self.set_phase(AppPhase::Clock);
            }
            AppPhase::Clock => {
                self.time = Some(time_source.now());
            }
        }

        Ok(())
    }

    fn set_phase(&mut self, next: AppPhase) {
        debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
