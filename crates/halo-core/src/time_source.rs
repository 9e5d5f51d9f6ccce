//! Wall-clock and network-time collaborator contract.
//!
//! The badge's RTC boots at a fixed default date until something sets it,
//! so a freshly powered device reports [`SENTINEL_YEAR`]. The state
//! machine treats that year as "no trusted time known" and walks through
//! wifi association and an NTP sync to fix it. All three concerns (clock
//! read, wifi association, sync trigger) live on one trait because the
//! host platform exposes them as one time-acquisition surface.

use thiserror_no_std::Error;

/// Year the platform clock reports before it has ever been set.
pub const SENTINEL_YEAR: u16 = 2000;

/// Calendar snapshot read from the platform clock.
///
/// Produced fresh every tick and consumed within that tick; never stored
/// across frames except as the state machine's latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// 0-6, Monday = 0
    pub weekday: u8,
}

/// Failure reported by the network time sync collaborator.
///
/// The core never catches or retries these; they propagate out of
/// [`ClockApp::update`](crate::app::ClockApp::update) to whatever
/// supervisor the host runs the frame loop under.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    #[error("time server unreachable")]
    ServerUnreachable,
    #[error("malformed time server response")]
    ProtocolError,
}

/// Time-acquisition collaborator: wall clock, wifi association, NTP sync.
///
/// Association and sync are non-blocking triggers. `connect_wifi` starts
/// an association attempt whose completion is observed by polling
/// `wifi_associated` on later ticks; `sync_time` fires one sync attempt
/// and reports whether the trigger itself failed.
pub trait TimeSource {
    /// Read the current wall-clock time.
    fn now(&mut self) -> WallTime;

    /// Whether the wifi radio is currently associated with a network.
    fn wifi_associated(&self) -> bool;

    /// Begin associating with the configured network. Non-blocking.
    fn connect_wifi(&mut self);

    /// Trigger one network time sync, setting the platform clock on
    /// success. Non-blocking; the core does not retry on failure.
    fn sync_time(&mut self) -> Result<(), SyncError>;
}
