//! Desktop simulator for the halo-rs badge clock.
//!
//! Wires scripted fake collaborators (wifi that associates after a few
//! seconds, an NTP sync that sets the clock, a slowly tumbling
//! accelerometer, an in-memory LED ring) into `halo-core` and steps the
//! frame loop against a headless `SimulatorDisplay`, logging phase
//! transitions and ring-ownership changes.
//!
//! Run with `RUST_LOG=debug` to watch every ring write.

use std::cell::Cell;
use std::thread;
use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;
use log::{debug, error, info};

use halo_core::app::{ClockApp, UpdateOutcome};
use halo_core::face::DISPLAY_SIZE_PX;
use halo_core::input::CancelInput;
use halo_core::orientation::{AccelSample, OrientationSensor};
use halo_core::ring::{AmbientPatterns, LedRing, RING_SLOTS};
use halo_core::time_source::{SENTINEL_YEAR, SyncError, TimeSource, WallTime};

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Frames per simulated second at the target rate.
const FRAMES_PER_SECOND: u32 = 30;

/// Association completes after this many status polls (~3 s).
const WIFI_ASSOCIATION_FRAMES: u32 = 90;

/// A cancel press is injected after this many frames (~20 s).
const CANCEL_AT_FRAME: u32 = 600;

// ---------------------------------------------------------------------------
// Scripted collaborators
// ---------------------------------------------------------------------------

/// Wall clock that boots unset and starts running once synced.
struct SimTimeSource {
    synced: bool,
    associating: bool,
    /// Status polls since association was requested; `wifi_associated`
    /// takes `&self`, so the counter lives in a `Cell`.
    association_polls: Cell<u32>,
    ticks: u32,
}

impl SimTimeSource {
    fn new() -> Self {
        Self {
            synced: false,
            associating: false,
            association_polls: Cell::new(0),
            ticks: 0,
        }
    }
}

impl TimeSource for SimTimeSource {
    fn now(&mut self) -> WallTime {
        self.ticks += 1;
        if !self.synced {
            // Platform default epoch: clock never set.
            return WallTime {
                year: SENTINEL_YEAR,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
                weekday: 5,
            };
        }

        let seconds = self.ticks / FRAMES_PER_SECOND;
        WallTime {
            year: 2024,
            month: 5,
            day: 31,
            hour: 2,
            minute: 30 + (seconds / 60) as u8,
            second: (seconds % 60) as u8,
            weekday: 4,
        }
    }

    fn wifi_associated(&self) -> bool {
        if !self.associating {
            return false;
        }
        let polls = self.association_polls.get() + 1;
        self.association_polls.set(polls);
        polls >= WIFI_ASSOCIATION_FRAMES
    }

    fn connect_wifi(&mut self) {
        info!("wifi association requested");
        self.associating = true;
    }

    fn sync_time(&mut self) -> Result<(), SyncError> {
        info!("NTP sync");
        self.synced = true;
        Ok(())
    }
}

/// Accelerometer that slowly tumbles the badge so the face flips.
struct SimImu {
    ticks: u32,
}

impl OrientationSensor for SimImu {
    fn acceleration(&mut self) -> AccelSample {
        self.ticks += 1;
        let t = self.ticks as f32 / FRAMES_PER_SECOND as f32;
        AccelSample {
            x: 9.8 * (t / 5.0).cos(),
            y: 0.0,
            z: 9.8 * (t / 5.0).sin(),
        }
    }
}

/// Button source that fires one cancel press at a scheduled frame.
struct SimButtons {
    ticks: u32,
    pending: bool,
}

impl CancelInput for SimButtons {
    fn cancel_pressed(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks == CANCEL_AT_FRAME {
            self.pending = true;
        }
        self.pending
    }

    fn clear(&mut self) {
        self.pending = false;
    }
}

/// In-memory LED ring (slot 0 unused by the clock).
struct SimRing {
    slots: [Rgb888; RING_SLOTS + 1],
}

impl LedRing for SimRing {
    fn set_slot(&mut self, index: usize, color: Rgb888) {
        if color != self.slots[index] {
            debug!("ring[{index}] = ({}, {}, {})", color.r(), color.g(), color.b());
        }
        self.slots[index] = color;
    }
}

/// Ambient lighting stand-in; just logs the handshake.
struct SimPatterns;

impl AmbientPatterns for SimPatterns {
    fn disable(&mut self) {
        info!("ambient patterns disabled");
    }

    fn enable(&mut self) {
        info!("ambient patterns enabled");
    }
}

// ---------------------------------------------------------------------------
// Frame loop
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_SIZE_PX, DISPLAY_SIZE_PX));

    let mut app = ClockApp::new(
        SimTimeSource::new(),
        SimImu { ticks: 0 },
        SimButtons {
            ticks: 0,
            pending: false,
        },
        SimRing {
            slots: [Rgb888::BLACK; RING_SLOTS + 1],
        },
        SimPatterns,
    );

    info!("starting frame loop ({} FPS)", FRAMES_PER_SECOND);
    let mut last_phase = app.phase();

    loop {
        match app.update() {
            Ok(UpdateOutcome::Continue) => {
                // SimulatorDisplay draws are infallible.
                app.draw(&mut display).unwrap();
            }
            Ok(UpdateOutcome::Minimise) => {
                info!("app dismissed, exiting");
                break;
            }
            Err(err) => {
                error!("time sync failed: {err}");
                break;
            }
        }

        if app.phase() != last_phase {
            info!("phase {:?} -> {:?}", last_phase, app.phase());
            last_phase = app.phase();
        }

        thread::sleep(FRAME_DURATION);
    }
}
