//! Analog clock face renderer.
//!
//! Draws into any `DrawTarget<Color = Rgb565>`: the firmware's real
//! display, the simulator window, or an in-memory framebuffer in tests.
//! Every frame is a full redraw from current state; there is no dirty
//! tracking at this layer.
//!
//! The face uses a polar coordinate frame with the origin at the display
//! center, angle 0 at 12 o'clock, increasing clockwise. When the badge
//! is worn inverted the whole layout is reflected through the center
//! (the 180° rotation of the original coordinate frame; glyphs
//! themselves stay upright since mono fonts cannot be rotated).

use core::f32::consts::TAU;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_10X20},
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::ring::{LedRing, RING_SLOTS, SecondsIndicator};
use crate::time_source::WallTime;

/// Square display edge in pixels (circular panel inscribed in it).
pub const DISPLAY_SIZE_PX: u32 = 240;

/// Outer radius of the hour tick marks.
const FACE_RADIUS: f32 = 120.0;

/// Inner radius of the hour tick marks.
const TICK_INNER_RADIUS: f32 = 115.0;

/// Radius of the numeral ring.
const NUMERAL_RADIUS: f32 = 98.0;

const HOUR_HAND_LEN: f32 = 60.0;
const MINUTE_HAND_LEN: f32 = 85.0;
const HAND_STROKE_PX: u32 = 3;

/// Horizontal offset of the weekday box center from the face center.
const WEEKDAY_OFFSET_X: i32 = 50;
const WEEKDAY_BOX_HEIGHT: u32 = 24;

/// Manual +1 hour daylight-saving correction, applied year-round because
/// the NTP collaborator only ever sets UTC. Wrong for half the year;
/// kept until the platform grows real timezone handling.
const DST_HOUR_OFFSET: u8 = 1;

const NUMERALS: [&str; 12] = [
    "12", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11",
];

const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Fraction of a full turn for the hour hand, minute-blended.
///
/// Includes the fixed [`DST_HOUR_OFFSET`], so 02:30 renders as 3.5/12 of
/// a turn.
pub fn hour_hand_turns(hour: u8, minute: u8) -> f32 {
    let hour = (hour % 12) + DST_HOUR_OFFSET;
    (hour as f32 + minute as f32 / 60.0) / 12.0
}

/// Fraction of a full turn for the minute hand.
pub fn minute_hand_turns(minute: u8) -> f32 {
    minute as f32 / 60.0
}

/// Stateless face renderer; holds only the display geometry.
pub struct ClockFace {
    center: Point,
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockFace {
    pub fn new() -> Self {
        Self {
            center: Point::new(
                DISPLAY_SIZE_PX as i32 / 2,
                DISPLAY_SIZE_PX as i32 / 2,
            ),
        }
    }

    /// Point at `turns` of a full clockwise turn from 12 o'clock,
    /// `radius` pixels from the center, reflected when `flip` is set.
    fn dial_point(&self, turns: f32, radius: f32, flip: bool) -> Point {
        let rad = turns * TAU;
        let mut dx = libm::sinf(rad) * radius;
        let mut dy = -libm::cosf(rad) * radius;
        if flip {
            dx = -dx;
            dy = -dy;
        }
        Point::new(
            self.center.x + libm::roundf(dx) as i32,
            self.center.y + libm::roundf(dy) as i32,
        )
    }

    /// Point offset from the center in screen pixels, reflected when
    /// `flip` is set.
    fn offset_point(&self, dx: i32, dy: i32, flip: bool) -> Point {
        if flip {
            Point::new(self.center.x - dx, self.center.y - dy)
        } else {
            Point::new(self.center.x + dx, self.center.y + dy)
        }
    }

    /// Background, tick marks, and numerals — drawn in every phase.
    ///
    /// Side effect: clears all 12 ring slots to off, so a stale seconds
    /// highlight never outlives its frame.
    pub fn draw_dial<D, R>(&self, display: &mut D, ring: &mut R, flip: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        R: LedRing,
    {
        display.clear(Rgb565::BLACK)?;

        let tick_style = PrimitiveStyle::with_stroke(Rgb565::WHITE, 1);
        for slot in 0..RING_SLOTS {
            let turns = slot as f32 / 12.0;
            Line::new(
                self.dial_point(turns, FACE_RADIUS, flip),
                self.dial_point(turns, TICK_INNER_RADIUS, flip),
            )
            .into_styled(tick_style)
            .draw(display)?;

            ring.set_slot(slot + 1, Rgb888::BLACK);
        }

        let numeral_style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        for (i, numeral) in NUMERALS.iter().enumerate() {
            let position = self.dial_point(i as f32 / 12.0, NUMERAL_RADIUS, flip);
            Text::with_text_style(numeral, position, numeral_style, centered).draw(display)?;
        }

        Ok(())
    }

    /// Two-line association status message shown while wifi connects.
    pub fn draw_connecting<D>(&self, display: &mut D, flip: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(
            "Connecting",
            self.offset_point(0, -10, flip),
            style,
            centered,
        )
        .draw(display)?;
        Text::with_text_style(
            "to wifi...",
            self.offset_point(0, 10, flip),
            style,
            centered,
        )
        .draw(display)?;

        Ok(())
    }

    /// Hands, weekday box, and the active seconds slot.
    pub fn draw_time<D, R>(
        &self,
        display: &mut D,
        ring: &mut R,
        time: &WallTime,
        flip: bool,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        R: LedRing,
    {
        self.draw_weekday(display, time.weekday, flip)?;

        let hand_style = PrimitiveStyle::with_stroke(Rgb565::WHITE, HAND_STROKE_PX);
        let center = self.offset_point(0, 0, flip);
        Line::new(
            center,
            self.dial_point(hour_hand_turns(time.hour, time.minute), HOUR_HAND_LEN, flip),
        )
        .into_styled(hand_style)
        .draw(display)?;
        Line::new(
            center,
            self.dial_point(minute_hand_turns(time.minute), MINUTE_HAND_LEN, flip),
        )
        .into_styled(hand_style)
        .draw(display)?;

        let indicator = SecondsIndicator::from_second(time.second);
        ring.set_slot(indicator.position, indicator.color());

        Ok(())
    }

    /// Bordered weekday abbreviation offset to the 3 o'clock side.
    fn draw_weekday<D>(&self, display: &mut D, weekday: u8, flip: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let label = WEEKDAYS[usize::from(weekday) % WEEKDAYS.len()];
        let gray = Rgb565::CSS_GRAY;
        let style = MonoTextStyle::new(&FONT_10X20, gray);
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        let anchor = self.offset_point(WEEKDAY_OFFSET_X, 0, flip);
        Text::with_text_style(label, anchor, style, centered).draw(display)?;

        let box_width = FONT_10X20.character_size.width * label.len() as u32 + 4;
        let top_left = Point::new(
            anchor.x - box_width as i32 / 2,
            anchor.y - WEEKDAY_BOX_HEIGHT as i32 / 2,
        );
        Rectangle::new(top_left, Size::new(box_width, WEEKDAY_BOX_HEIGHT))
            .into_styled(PrimitiveStyle::with_stroke(gray, 1))
            .draw(display)?;

        Ok(())
    }
}
