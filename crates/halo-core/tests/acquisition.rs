//! End-to-end frame-loop tests with scripted collaborators.
//!
//! Exercises the whole update → draw pass the way a host frame scheduler
//! would: cold boot with an unset clock, wifi association, NTP sync,
//! steady-state rendering, and dismissal.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

use halo_core::app::{ClockApp, UpdateOutcome};
use halo_core::framebuffer::FrameBuffer;
use halo_core::orientation::{AccelSample, OrientationSensor};
use halo_core::ring::{AmbientPatterns, LedRing};
use halo_core::state::AppPhase;
use halo_core::time_source::{SENTINEL_YEAR, SyncError, TimeSource, WallTime};

/// Shared world observed by every fake collaborator and by assertions.
#[derive(Default)]
struct World {
    year: u16,
    second: u8,
    associated: bool,
    connect_requests: u32,
    sync_calls: u32,
    sync_result: Option<SyncError>,
    accel_x: f32,
    cancel_pending: bool,
    pattern_disables: u32,
    pattern_enables: u32,
    ring_writes: Vec<(usize, Rgb888)>,
}

type Shared = Rc<RefCell<World>>;

struct FakeTimeSource(Shared);

impl TimeSource for FakeTimeSource {
    fn now(&mut self) -> WallTime {
        let world = self.0.borrow();
        WallTime {
            year: world.year,
            month: 5,
            day: 31,
            hour: 2,
            minute: 30,
            second: world.second,
            weekday: 5,
        }
    }

    fn wifi_associated(&self) -> bool {
        self.0.borrow().associated
    }

    fn connect_wifi(&mut self) {
        self.0.borrow_mut().connect_requests += 1;
    }

    fn sync_time(&mut self) -> Result<(), SyncError> {
        let mut world = self.0.borrow_mut();
        world.sync_calls += 1;
        if let Some(err) = world.sync_result {
            return Err(err);
        }
        world.year = 2024;
        Ok(())
    }
}

struct FakeImu(Shared);

impl OrientationSensor for FakeImu {
    fn acceleration(&mut self) -> AccelSample {
        AccelSample {
            x: self.0.borrow().accel_x,
            y: 0.0,
            z: 9.8,
        }
    }
}

struct FakeButtons(Shared);

impl halo_core::input::CancelInput for FakeButtons {
    fn cancel_pressed(&mut self) -> bool {
        self.0.borrow().cancel_pending
    }

    fn clear(&mut self) {
        self.0.borrow_mut().cancel_pending = false;
    }
}

struct FakeRing(Shared);

impl LedRing for FakeRing {
    fn set_slot(&mut self, index: usize, color: Rgb888) {
        self.0.borrow_mut().ring_writes.push((index, color));
    }
}

struct FakePatterns(Shared);

impl AmbientPatterns for FakePatterns {
    fn disable(&mut self) {
        self.0.borrow_mut().pattern_disables += 1;
    }

    fn enable(&mut self) {
        self.0.borrow_mut().pattern_enables += 1;
    }
}

fn make_app(
    world: &Shared,
) -> ClockApp<FakeTimeSource, FakeImu, FakeButtons, FakeRing, FakePatterns> {
    ClockApp::new(
        FakeTimeSource(world.clone()),
        FakeImu(world.clone()),
        FakeButtons(world.clone()),
        FakeRing(world.clone()),
        FakePatterns(world.clone()),
    )
}

fn cold_boot_world() -> Shared {
    Rc::new(RefCell::new(World {
        year: SENTINEL_YEAR,
        second: 17,
        accel_x: 9.8,
        ..World::default()
    }))
}

/// One full frame: update, then draw unless dismissed.
fn frame(
    app: &mut ClockApp<FakeTimeSource, FakeImu, FakeButtons, FakeRing, FakePatterns>,
    display: &mut FrameBuffer,
) -> UpdateOutcome {
    let outcome = app.update().expect("sync not scripted to fail");
    if outcome == UpdateOutcome::Continue {
        app.draw(display).unwrap();
    }
    outcome
}

#[test]
fn test_cold_boot_walks_all_phases() {
    let world = cold_boot_world();
    let mut app = make_app(&world);
    let mut display = FrameBuffer::new();

    frame(&mut app, &mut display);
    assert_eq!(app.phase(), AppPhase::ConnectingWifi);
    assert_eq!(world.borrow().connect_requests, 1);

    // Association takes a while; the machine just keeps polling.
    for _ in 0..10 {
        frame(&mut app, &mut display);
        assert_eq!(app.phase(), AppPhase::ConnectingWifi);
    }
    assert!(!app.ring_claimed());

    world.borrow_mut().associated = true;
    frame(&mut app, &mut display);
    assert_eq!(app.phase(), AppPhase::SyncingTime);

    frame(&mut app, &mut display);
    assert_eq!(app.phase(), AppPhase::Clock);
    assert_eq!(world.borrow().sync_calls, 1);
    assert_eq!(world.borrow().year, 2024);

    // The first active face claimed the ring exactly once.
    assert!(app.ring_claimed());
    assert_eq!(world.borrow().pattern_disables, 1);

    // Several more frames must not re-claim.
    for _ in 0..3 {
        frame(&mut app, &mut display);
    }
    assert_eq!(world.borrow().pattern_disables, 1);
}

#[test]
fn test_set_clock_skips_network_entirely() {
    let world = cold_boot_world();
    world.borrow_mut().year = 2024;
    let mut app = make_app(&world);
    let mut display = FrameBuffer::new();

    frame(&mut app, &mut display);

    assert_eq!(app.phase(), AppPhase::Clock);
    assert_eq!(world.borrow().connect_requests, 0);
    assert_eq!(world.borrow().sync_calls, 0);
}

#[test]
fn test_frame_clears_ring_before_setting_active_slot() {
    let world = cold_boot_world();
    world.borrow_mut().year = 2024;
    let mut app = make_app(&world);
    let mut display = FrameBuffer::new();

    frame(&mut app, &mut display);
    world.borrow_mut().ring_writes.clear();
    world.borrow_mut().second = 59;
    frame(&mut app, &mut display);

    let writes = world.borrow().ring_writes.clone();
    assert_eq!(writes.len(), 13);
    // All 12 slots cleared first...
    for (i, (index, color)) in writes.iter().take(12).enumerate() {
        assert_eq!(*index, i + 1);
        assert_eq!(*color, Rgb888::BLACK);
    }
    // ...then the one active slot lit: second 59 = slot 12, max level.
    assert_eq!(writes[12], (12, Rgb888::new(25, 25, 25)));
}

#[test]
fn test_sync_failure_propagates_from_update() {
    let world = cold_boot_world();
    world.borrow_mut().associated = true;
    world.borrow_mut().sync_result = Some(SyncError::ServerUnreachable);
    let mut app = make_app(&world);

    app.update().unwrap();
    assert_eq!(app.phase(), AppPhase::SyncingTime);

    let err = app.update().unwrap_err();
    assert_eq!(err, SyncError::ServerUnreachable);
    assert_eq!(app.phase(), AppPhase::SyncingTime);
}

#[test]
fn test_cancel_releases_ring_and_requests_exit() {
    let world = cold_boot_world();
    world.borrow_mut().year = 2024;
    let mut app = make_app(&world);
    let mut display = FrameBuffer::new();

    frame(&mut app, &mut display);
    assert!(app.ring_claimed());

    world.borrow_mut().cancel_pending = true;
    let outcome = frame(&mut app, &mut display);

    assert_eq!(outcome, UpdateOutcome::Minimise);
    assert!(!app.ring_claimed());
    assert!(!world.borrow().cancel_pending, "input must be consumed");
    assert_eq!(world.borrow().pattern_enables, 1);

    // A second cancel after dismissal emits nothing further.
    world.borrow_mut().cancel_pending = true;
    let outcome = frame(&mut app, &mut display);
    assert_eq!(outcome, UpdateOutcome::Minimise);
    assert_eq!(world.borrow().pattern_enables, 1);
}

#[test]
fn test_inverted_badge_flips_face_layout() {
    let world = cold_boot_world();
    world.borrow_mut().year = 2024;
    world.borrow_mut().second = 0;
    let mut app = make_app(&world);
    let mut display = FrameBuffer::new();

    // Minute 30 points the minute hand straight down when upright.
    frame(&mut app, &mut display);
    assert_eq!(display.pixel(120, 160), Rgb565::WHITE);

    // Lifted toward the wearer, the layout reflects through the center.
    world.borrow_mut().accel_x = -9.8;
    frame(&mut app, &mut display);
    assert_eq!(display.pixel(120, 80), Rgb565::WHITE);
}
