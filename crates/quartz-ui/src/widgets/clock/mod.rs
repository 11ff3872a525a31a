//! Analog clock face.
//!
//! [`ClockView`] paints a round face with numerals, a border, sixty tick dots
//! and hour/minute/second hands, then asks the host to redraw it after
//! [`ClockFace::refresh_interval`]. Each frame reads the time afresh from its
//! [`TimeSource`].

mod face;
mod geometry;
mod snapshot;
mod time;

pub use face::{ClockFace, HandStyle};
pub use geometry::{hand_tip, numeral_anchor, tick_position, ViewGeometry};
pub use snapshot::{ClockSnapshot, CLOCK_STATE_TAG};
pub use time::{FixedTime, LocalTime, TimeSample, TimeSource};

use quartz_engine::coords::{Rect, Vec2};
use quartz_engine::text::FontId;
use quartz_engine::time::TimerHandle;

use crate::constraints::Constraints;
use crate::painter::Painter;
use crate::state::SavedState;
use crate::widget::Widget;

const TICK_COUNT: u32 = 60;

pub struct ClockView<S: TimeSource = LocalTime> {
    face: ClockFace,
    /// Numerals are skipped without one.
    font: Option<FontId>,
    source: S,
    geometry: ViewGeometry,
    last_shown: Option<TimeSample>,
    redraw: Option<TimerHandle>,
}

impl ClockView<LocalTime> {
    /// A clock showing local time.
    pub fn new(face: ClockFace, font: Option<FontId>) -> Self {
        Self::with_source(face, font, LocalTime)
    }
}

impl<S: TimeSource> ClockView<S> {
    pub fn with_source(face: ClockFace, font: Option<FontId>, source: S) -> Self {
        if font.is_none() {
            log::warn!("clock has no numeral font; numerals will not be drawn");
        }
        Self {
            face,
            font,
            source,
            geometry: ViewGeometry::default(),
            last_shown: None,
            redraw: None,
        }
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    /// Geometry from the most recent measure pass.
    pub fn geometry(&self) -> ViewGeometry {
        self.geometry
    }

    /// Time drawn by the last paint, or restored from saved state.
    pub fn last_shown(&self) -> Option<TimeSample> {
        self.last_shown
    }

    pub fn has_pending_redraw(&self) -> bool {
        self.redraw.as_ref().is_some_and(TimerHandle::is_pending)
    }

    fn paint_face(&self, painter: &mut Painter<'_>, center: Vec2, t: TimeSample) {
        let face = &self.face;

        painter.fill_circle(center, face.radius, face.background);

        if let Some(font) = self.font {
            let ring = face.numeral_ring_radius();
            for n in 1..=12u32 {
                let baseline = numeral_anchor(center, ring, n) + face.numeral_offset;
                painter.text(n.to_string(), font, face.numeral_size, face.numeral_color, baseline);
            }
        }

        painter.stroke_circle(center, face.border_radius(), face.border_width, face.border_color);

        let ring = face.dot_ring_radius();
        for i in 0..TICK_COUNT {
            painter.fill_circle(tick_position(center, ring, i), face.dot_radius, face.dot_color);
        }

        for (hand, angle) in [
            (face.hour_hand, t.hour_angle()),
            (face.minute_hand, t.minute_angle()),
            (face.second_hand, t.second_angle()),
        ] {
            painter.line(center, hand_tip(center, angle, hand.length), hand.thickness, hand.color);
        }
    }
}

impl<S: TimeSource> Widget for ClockView<S> {
    fn measure(&mut self, constraints: Constraints) -> Vec2 {
        self.geometry = ViewGeometry::measure(constraints, self.face.radius);
        self.geometry.size()
    }

    fn paint(&mut self, painter: &mut Painter<'_>, rect: Rect) {
        if !self.geometry.is_empty() {
            let t = self.source.now();
            self.paint_face(painter, rect.origin + self.geometry.center, t);
            self.last_shown = Some(t);
        }

        // Replacing the handle withdraws the previous request.
        self.redraw = Some(painter.invalidate_after(self.face.refresh_interval));
    }

    fn save_state(&self) -> Option<SavedState> {
        let snapshot = ClockSnapshot::from(self.last_shown?);
        match snapshot.save() {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("clock: {e}");
                None
            }
        }
    }

    fn restore_state(&mut self, state: &SavedState) {
        match ClockSnapshot::restore(state) {
            Ok(snapshot) => match snapshot.sample() {
                Some(t) => self.last_shown = Some(t),
                None => log::warn!("clock: ignoring out-of-range saved time {snapshot:?}"),
            },
            Err(e) => log::warn!("clock: ignoring saved state: {e}"),
        }
    }

    fn detach(&mut self) {
        if let Some(handle) = self.redraw.take() {
            handle.cancel();
        }
        log::debug!("clock detached");
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use quartz_engine::scene::{DrawCmd, DrawList};
    use quartz_engine::time::Scheduler;

    const EPS: f32 = 1e-3;

    fn at(h: u8, m: u8, s: u8) -> FixedTime {
        FixedTime(TimeSample::new(h, m, s).unwrap())
    }

    fn clock(time: FixedTime, font: Option<FontId>) -> ClockView<FixedTime> {
        ClockView::with_source(ClockFace::default(), font, time)
    }

    fn paint(view: &mut ClockView<FixedTime>, origin: Vec2, sched: &Scheduler) -> DrawList {
        let size = view.measure(Constraints::loose(Vec2::new(400.0, 400.0)));
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list, sched);
            view.paint(&mut painter, Rect::from_origin_size(origin, size));
        }
        list
    }

    fn kinds(list: &mut DrawList) -> Vec<&'static str> {
        list.iter_in_paint_order().map(|i| i.cmd.kind()).collect()
    }

    fn lines(list: &DrawList) -> Vec<(Vec2, Vec2, f32)> {
        list.items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Line(l) => Some((l.from, l.to, l.stroke.width)),
                _ => None,
            })
            .collect()
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn paint_order_and_counts() {
        let sched = Scheduler::new();
        let mut view = clock(at(10, 9, 30), Some(FontId::from_index(0)));
        let mut list = paint(&mut view, Vec2::zero(), &sched);

        let mut expected = vec!["circle"];
        expected.extend(std::iter::repeat_n("text", 12));
        expected.push("circle");
        expected.extend(std::iter::repeat_n("circle", 60));
        expected.extend(std::iter::repeat_n("line", 3));
        assert_eq!(kinds(&mut list), expected);
    }

    #[test]
    fn no_font_means_no_numerals() {
        let sched = Scheduler::new();
        let mut view = clock(at(10, 9, 30), None);
        let mut list = paint(&mut view, Vec2::zero(), &sched);

        let k = kinds(&mut list);
        assert_eq!(k.len(), 1 + 1 + 60 + 3);
        assert!(!k.contains(&"text"));
    }

    #[test]
    fn background_and_border_circles() {
        let sched = Scheduler::new();
        let mut view = clock(at(0, 0, 0), None);
        let list = paint(&mut view, Vec2::zero(), &sched);

        let DrawCmd::Circle(bg) = &list.items()[0].cmd else { panic!("background is not a circle") };
        assert_eq!(bg.center, Vec2::new(200.0, 200.0));
        assert_eq!(bg.radius, 200.0);
        assert!(bg.fill.is_some() && bg.stroke.is_none());

        let DrawCmd::Circle(border) = &list.items()[1].cmd else { panic!("border is not a circle") };
        assert_eq!(border.radius, 190.0);
        assert_eq!(border.stroke.map(|s| s.width), Some(20.0));
        assert!(border.fill.is_none());
    }

    #[test]
    fn numerals_are_labelled_and_offset() {
        let sched = Scheduler::new();
        let mut view = clock(at(0, 0, 0), Some(FontId::from_index(0)));
        let list = paint(&mut view, Vec2::zero(), &sched);

        let texts: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect();
        let labels: Vec<&str> = texts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]);

        // "12" sits at the top: anchor (200, 50), baseline origin shifted by (-10, +10).
        assert!(approx(texts[11].baseline, Vec2::new(190.0, 60.0)));
        assert!(approx(texts[2].baseline, Vec2::new(340.0, 210.0)));
        assert!(texts.iter().all(|t| t.size == 30.0));
    }

    #[test]
    fn dots_sit_inside_the_border() {
        let sched = Scheduler::new();
        let mut view = clock(at(0, 0, 0), None);
        let list = paint(&mut view, Vec2::zero(), &sched);
        let center = Vec2::new(200.0, 200.0);

        let dots: Vec<_> = list.items()[2..62]
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Circle(c) => Some(c.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 60);
        assert!(approx(dots[0].center, Vec2::new(200.0, 25.0)));
        for d in &dots {
            assert_eq!(d.radius, 5.0);
            assert!((d.center.distance(center) - 175.0).abs() < EPS);
        }
    }

    #[test]
    fn hands_at_three_oclock() {
        let sched = Scheduler::new();
        let mut view = clock(at(3, 0, 0), None);
        let list = paint(&mut view, Vec2::zero(), &sched);
        let center = Vec2::new(200.0, 200.0);

        let hands = lines(&list);
        assert_eq!(hands.len(), 3);
        // hour, minute, second
        assert!(approx(hands[0].1, Vec2::new(270.0, 200.0)));
        assert!(approx(hands[1].1, Vec2::new(200.0, 100.0)));
        assert!(approx(hands[2].1, Vec2::new(200.0, 70.0)));
        assert_eq!(hands.iter().map(|h| h.2).collect::<Vec<_>>(), vec![20.0, 15.0, 10.0]);
        assert!(hands.iter().all(|h| h.0 == center));
    }

    #[test]
    fn rect_origin_moves_the_face() {
        let sched = Scheduler::new();
        let mut view = clock(at(12, 0, 0), None);
        let list = paint(&mut view, Vec2::new(50.0, 20.0), &sched);

        let DrawCmd::Circle(bg) = &list.items()[0].cmd else { panic!("background is not a circle") };
        assert_eq!(bg.center, Vec2::new(250.0, 220.0));
        assert!(lines(&list).iter().all(|h| h.0 == Vec2::new(250.0, 220.0)));
    }

    #[test]
    fn layout_is_square() {
        let mut view = clock(at(0, 0, 0), None);
        let size = view.measure(Constraints::loose(Vec2::new(500.0, 320.0)));
        assert_eq!(size, Vec2::splat(320.0));
        assert_eq!(view.geometry().center, Vec2::splat(160.0));

        let size = view.measure(Constraints::unbounded());
        assert_eq!(size, Vec2::splat(400.0));
    }

    #[test]
    fn each_paint_leaves_one_pending_redraw() {
        let sched = Scheduler::new();
        let mut view = clock(at(1, 2, 3), None);

        let before = Instant::now();
        for _ in 0..3 {
            let _ = paint(&mut view, Vec2::zero(), &sched);
            assert_eq!(sched.pending(), 1);
        }
        assert!(view.has_pending_redraw());

        let deadline = sched.next_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(1000));
        assert!(deadline <= Instant::now() + Duration::from_millis(1000));
    }

    #[test]
    fn detach_cancels_redraw() {
        let sched = Scheduler::new();
        let mut view = clock(at(1, 2, 3), None);
        let _ = paint(&mut view, Vec2::zero(), &sched);

        view.detach();
        assert_eq!(sched.pending(), 0);
        assert!(!view.has_pending_redraw());
    }

    #[test]
    fn dropping_the_view_cancels_redraw() {
        let sched = Scheduler::new();
        let mut view = clock(at(1, 2, 3), None);
        let _ = paint(&mut view, Vec2::zero(), &sched);
        drop(view);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn unmeasured_view_draws_nothing_but_reschedules() {
        let sched = Scheduler::new();
        let mut view = clock(at(1, 2, 3), Some(FontId::from_index(0)));
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list, &sched);
            view.paint(&mut painter, Rect::new(0.0, 0.0, 400.0, 400.0));
        }
        assert!(list.is_empty());
        assert_eq!(sched.pending(), 1);
        assert_eq!(view.last_shown(), None);
    }

    #[test]
    fn state_round_trips_into_fresh_instance() {
        let sched = Scheduler::new();
        let mut view = clock(at(10, 9, 30), None);
        let _ = paint(&mut view, Vec2::zero(), &sched);

        let saved = view.save_state().unwrap();
        let json = saved.to_json().unwrap();

        let mut fresh = clock(at(0, 0, 0), None);
        fresh.restore_state(&SavedState::from_json(&json).unwrap());
        assert_eq!(fresh.last_shown(), TimeSample::new(10, 9, 30));
    }

    #[test]
    fn nothing_to_save_before_first_paint() {
        let view = clock(at(10, 9, 30), None);
        assert!(view.save_state().is_none());
    }

    #[test]
    fn foreign_or_invalid_state_is_ignored() {
        let mut view = clock(at(0, 0, 0), None);

        let foreign = SavedState::from_record("slider", &0.5f32).unwrap();
        view.restore_state(&foreign);
        assert_eq!(view.last_shown(), None);

        let bad = SavedState::from_record(CLOCK_STATE_TAG, &ClockSnapshot { hour: 30, minute: 0, second: 0 })
            .unwrap();
        view.restore_state(&bad);
        assert_eq!(view.last_shown(), None);
    }

    #[test]
    fn restored_time_is_replaced_by_next_paint() {
        let sched = Scheduler::new();
        let mut view = clock(at(8, 0, 0), None);
        let saved = ClockSnapshot { hour: 1, minute: 1, second: 1 }.save().unwrap();
        view.restore_state(&saved);
        assert_eq!(view.last_shown(), TimeSample::new(1, 1, 1));

        let _ = paint(&mut view, Vec2::zero(), &sched);
        assert_eq!(view.last_shown(), TimeSample::new(8, 0, 0));
    }
}
