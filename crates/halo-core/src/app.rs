//! Composition root: one badge clock app over five injected collaborators.
//!
//! The host frame scheduler drives one [`ClockApp::update`] →
//! [`ClockApp::draw`] pass per frame on a single thread. `update`
//! advances the acquisition state machine (or consumes a dismissal);
//! `draw` renders the face and performs all ring writes, claiming ring
//! ownership the first time an active face goes up.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::face::ClockFace;
use crate::input::{CancelInput, InputController};
use crate::orientation::OrientationSensor;
use crate::ring::{AmbientPatterns, LedRing, RingOwnership};
use crate::state::{AppPhase, ClockState};
use crate::time_source::{SyncError, TimeSource};

/// What the host should do after an `update` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Keep running; call `draw` for this frame.
    Continue,
    /// The wearer dismissed the app; suspend it and skip `draw`.
    Minimise,
}

/// The badge clock application.
pub struct ClockApp<T, O, B, R, P>
where
    T: TimeSource,
    O: OrientationSensor,
    B: CancelInput,
    R: LedRing,
    P: AmbientPatterns,
{
    time_source: T,
    imu: O,
    input: InputController<B>,
    ring: R,
    patterns: P,
    state: ClockState,
    ownership: RingOwnership,
    face: ClockFace,
}

impl<T, O, B, R, P> ClockApp<T, O, B, R, P>
where
    T: TimeSource,
    O: OrientationSensor,
    B: CancelInput,
    R: LedRing,
    P: AmbientPatterns,
{
    pub fn new(time_source: T, imu: O, buttons: B, ring: R, patterns: P) -> Self {
        Self {
            time_source,
            imu,
            input: InputController::new(buttons),
            ring,
            patterns,
            state: ClockState::new(),
            ownership: RingOwnership::new(),
            face: ClockFace::new(),
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.state.phase()
    }

    pub fn ring_claimed(&self) -> bool {
        self.ownership.is_claimed()
    }

    /// Advance one frame: dismissal first, then the acquisition tick.
    ///
    /// A sync failure propagates out unchanged; the host's supervisor
    /// decides what to do with it.
    pub fn update(&mut self) -> Result<UpdateOutcome, SyncError> {
        if self
            .input
            .handle_cancel(&mut self.ownership, &mut self.patterns)
        {
            return Ok(UpdateOutcome::Minimise);
        }

        self.state.tick(&mut self.time_source, &mut self.imu)?;
        Ok(UpdateOutcome::Continue)
    }

    /// Render the current frame and drive the ring.
    pub fn draw<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let flip = self.state.flip();
        self.face.draw_dial(display, &mut self.ring, flip)?;

        match self.state.phase() {
            AppPhase::ConnectingWifi => self.face.draw_connecting(display, flip)?,
            AppPhase::Clock => {
                if let Some(time) = self.state.time() {
                    self.ownership.claim(&mut self.patterns);
                    self.face.draw_time(display, &mut self.ring, &time, flip)?;
                }
            }
            AppPhase::Init | AppPhase::SyncingTime => {}
        }

        Ok(())
    }
}
