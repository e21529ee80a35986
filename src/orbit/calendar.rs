//! Calendar ↔ epoch conversions.
//!
//! The scene clock counts Julian centuries since J2000.0, which is the time
//! argument the JPL element rates are expressed against.

use serde::Deserialize;

use crate::types::{DAYS_PER_CENTURY, J2000_JD};

/// A Gregorian calendar date and UT time of day.
///
/// Month and day default to 1 and the clock fields to 0, so a bare year
/// deserializes to midnight on January 1st.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalendarInstant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Default for CalendarInstant {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl CalendarInstant {
    /// The J2000.0 reference instant.
    pub const J2000: CalendarInstant = CalendarInstant {
        year: 2000,
        month: 1,
        day: 1,
        hours: 12.0,
        minutes: 0.0,
        seconds: 0.0,
    };

    /// Midnight on the first of January of `year`.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            month: 1,
            day: 1,
            hours: 0.0,
            minutes: 0.0,
            seconds: 0.0,
        }
    }

    pub fn with_date(mut self, month: u32, day: u32) -> Self {
        self.month = month;
        self.day = day;
        self
    }

    pub fn with_time(mut self, hours: f64, minutes: f64, seconds: f64) -> Self {
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        self
    }

    /// Fraction of a day contributed by the clock fields.
    pub fn day_fraction(&self) -> f64 {
        self.hours / 24.0 + self.minutes / 1440.0 + self.seconds / 86400.0
    }

    /// Julian Date (days) of this instant.
    pub fn julian_date(&self) -> f64 {
        let jdn = julian_day_number(self.year, self.month as i32, self.day as i32);
        // The JDN starts at noon, the calendar day at midnight.
        jdn as f64 - 0.5 + self.day_fraction()
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_epoch(&self) -> f64 {
        (self.julian_date() - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Inverse of [`CalendarInstant::centuries_since_epoch`].
    pub fn from_centuries(centuries: f64) -> Self {
        const MS_PER_DAY: f64 = 86_400_000.0;
        // Snap to whole milliseconds so round-tripped midnights land on the right day.
        let jd = ((centuries * DAYS_PER_CENTURY + J2000_JD + 0.5) * MS_PER_DAY).round() / MS_PER_DAY;
        let jdn = jd.floor();
        let (year, month, day) = calendar_date(jdn as i64);

        let mut rem = (jd - jdn) * 24.0;
        let hours = rem.floor();
        rem = (rem - hours) * 60.0;
        let minutes = rem.floor();
        let seconds = (rem - minutes) * 60.0;

        Self {
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
        }
    }

    /// Format as `YYYY-MM-DD HH:MM UT`.
    pub fn to_display_string(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02} UT",
            self.year, self.month, self.day, self.hours as u32, self.minutes as u32
        )
    }
}

/// Julian centuries since J2000.0 for a Gregorian date and UT clock time.
pub fn centuries_since_epoch(
    year: i32,
    month: u32,
    day: u32,
    hours: f64,
    minutes: f64,
    seconds: f64,
) -> f64 {
    CalendarInstant::new(year)
        .with_date(month, day)
        .with_time(hours, minutes, seconds)
        .centuries_since_epoch()
}

/// Julian Day Number of a proleptic Gregorian date (integer arithmetic).
pub fn julian_day_number(year: i32, month: i32, day: i32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

/// Gregorian (year, month, day) of a Julian Day Number.
///
/// See the Explanatory Supplement to the Astronomical Almanac 15.11.
fn calendar_date(jdn: i64) -> (i32, u32, u32) {
    let f = jdn + 1401 + ((4 * jdn + 274277) / 146097 * 3 / 4 - 38);
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
    (year as i32, month as u32, day as u32)
}
