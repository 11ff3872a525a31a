use chrono::Timelike;

/// Wall-clock time of day as shown on the face.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeSample {
    /// `hour` is 0–23, `minute` and `second` are 0–59. Anything else is rejected.
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self { hour, minute, second })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn second(self) -> u8 {
        self.second
    }

    /// Hour hand angle in degrees from 3 o'clock, clockwise.
    ///
    /// The hand advances between hours with the minutes.
    pub fn hour_angle(self) -> f32 {
        (f32::from(self.hour) + f32::from(self.minute) / 60.0) * 30.0 - 90.0
    }

    pub fn minute_angle(self) -> f32 {
        f32::from(self.minute) * 6.0 - 90.0
    }

    pub fn second_angle(self) -> f32 {
        f32::from(self.second) * 6.0 - 90.0
    }
}

/// Where the clock gets "now" from.
pub trait TimeSource: 'static {
    fn now(&self) -> TimeSample;
}

/// The system's local time.
#[derive(Debug, Copy, Clone, Default)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> TimeSample {
        let t = chrono::Local::now();
        // chrono keeps these in range; the leap second shows as :59.
        TimeSample {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second().min(59) as u8,
        }
    }
}

/// Always reports the same time.
#[derive(Debug, Copy, Clone)]
pub struct FixedTime(pub TimeSample);

impl TimeSource for FixedTime {
    fn now(&self) -> TimeSample {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(deg: f32) -> f32 {
        deg.rem_euclid(360.0)
    }

    fn sample(h: u8, m: u8, s: u8) -> TimeSample {
        TimeSample::new(h, m, s).unwrap()
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert!(TimeSample::new(24, 0, 0).is_none());
        assert!(TimeSample::new(0, 60, 0).is_none());
        assert!(TimeSample::new(0, 0, 60).is_none());
        assert!(TimeSample::new(23, 59, 59).is_some());
    }

    #[test]
    fn noon_points_every_hand_up() {
        let t = sample(12, 0, 0);
        assert_eq!(norm(t.hour_angle()), norm(-90.0));
        assert_eq!(norm(t.minute_angle()), norm(-90.0));
        assert_eq!(norm(t.second_angle()), norm(-90.0));

        let midnight = sample(0, 0, 0);
        assert_eq!(norm(midnight.hour_angle()), norm(-90.0));
    }

    #[test]
    fn three_oclock() {
        let t = sample(3, 0, 0);
        assert_eq!(t.hour_angle(), 0.0);
        assert_eq!(t.minute_angle(), -90.0);
    }

    #[test]
    fn hour_hand_follows_minutes() {
        let t = sample(3, 30, 0);
        assert_eq!(t.hour_angle(), 15.0);
    }

    #[test]
    fn angles_match_formulas_for_every_minute_and_second() {
        for h in 0..24u8 {
            for m in 0..60u8 {
                let s = (h + m) % 60;
                let t = sample(h, m, s);
                let expected_hour = (h as f32 + m as f32 / 60.0) * 30.0 - 90.0;
                assert!((norm(t.hour_angle()) - norm(expected_hour)).abs() < 1e-3);
                assert_eq!(norm(t.minute_angle()), norm(m as f32 * 6.0 - 90.0));
                assert_eq!(norm(t.second_angle()), norm(s as f32 * 6.0 - 90.0));
            }
        }
    }

    #[test]
    fn fixed_time_is_fixed() {
        let src = FixedTime(sample(9, 41, 7));
        assert_eq!(src.now(), src.now());
        assert_eq!(src.now().minute(), 41);
    }

    #[test]
    fn local_time_is_in_range() {
        let t = LocalTime.now();
        assert!(t.hour() < 24 && t.minute() < 60 && t.second() < 60);
    }
}
