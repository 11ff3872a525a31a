use std::time::Duration;

use quartz_engine::coords::Vec2;
use quartz_engine::paint::Color;

/// Default face colors as packed `0xAARRGGBB` values.
const PAPER_ARGB: u32 = 0xFFFFFFFF;
const INK_ARGB: u32 = 0xFF000000;

/// Stroke used for one clock hand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandStyle {
    pub color: Color,
    /// Distance from the center to the tip.
    pub length: f32,
    pub thickness: f32,
}

impl HandStyle {
    pub const fn new(color: Color, length: f32, thickness: f32) -> Self {
        Self { color, length, thickness }
    }
}

/// Appearance of a [`ClockView`](super::ClockView), fixed at construction.
///
/// All lengths are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    /// Outer radius of the face.
    pub radius: f32,
    pub background: Color,

    pub border_width: f32,
    pub border_color: Color,

    pub dot_radius: f32,
    pub dot_color: Color,

    pub numeral_color: Color,
    pub numeral_size: f32,
    /// How far numerals sit inside the rim.
    pub numeral_padding: f32,
    /// Added to each numeral's anchor to get its baseline origin.
    pub numeral_offset: Vec2,

    pub hour_hand: HandStyle,
    pub minute_hand: HandStyle,
    pub second_hand: HandStyle,

    pub refresh_interval: Duration,
}

impl Default for ClockFace {
    fn default() -> Self {
        let paper = Color::from_argb(PAPER_ARGB);
        let ink = Color::from_argb(INK_ARGB);
        Self {
            radius: 200.0,
            background: paper,
            border_width: 20.0,
            border_color: ink,
            dot_radius: 5.0,
            dot_color: ink,
            numeral_color: ink,
            numeral_size: 30.0,
            numeral_padding: 50.0,
            numeral_offset: Vec2::new(-10.0, 10.0),
            hour_hand: HandStyle::new(ink, 70.0, 20.0),
            minute_hand: HandStyle::new(ink, 100.0, 15.0),
            second_hand: HandStyle::new(ink, 130.0, 10.0),
            refresh_interval: Duration::from_millis(1000),
        }
    }
}

impl ClockFace {
    /// Radius of the border stroke's centerline.
    pub fn border_radius(&self) -> f32 {
        self.radius - self.border_width * 0.5
    }

    /// Distance from the center to each tick dot.
    pub fn dot_ring_radius(&self) -> f32 {
        self.radius - self.border_width - self.dot_radius
    }

    /// Distance from the center to each numeral anchor.
    pub fn numeral_ring_radius(&self) -> f32 {
        self.radius - self.numeral_padding
    }
}
