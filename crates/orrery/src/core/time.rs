//! Simulation instants and their calendar rendering.
//!
//! Time is kept as f64 seconds since J2000 (2000-01-01 12:00). The TT/UTC
//! offset (about a minute) is ignored; this is a visualisation clock.

use std::fmt;
use std::ops;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Julian Day number of the J2000 epoch.
pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;
/// Unix timestamp of the J2000 epoch.
pub const J2000_UNIX_SECONDS: f64 = 946_728_000.0;
/// Calendar dates are rendered within this many days of J2000 (about a million years).
pub const MAX_CALENDAR_DAYS: f64 = 365.25e6;

/// An instant on the simulation timeline.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationTime(f64);

impl SimulationTime {
    pub const J2000: Self = Self(0.0);

    pub fn from_seconds_since_j2000(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn from_days_since_j2000(days: f64) -> Self {
        Self(days * SECONDS_PER_DAY)
    }

    pub fn from_unix_seconds(unix: f64) -> Self {
        Self(unix - J2000_UNIX_SECONDS)
    }

    /// Current wall-clock instant.
    ///
    /// Uses `std::time::SystemTime`, which is unavailable on
    /// `wasm32-unknown-unknown`; browser hosts supply their own wall clock.
    pub fn now() -> Self {
        let unix = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs_f64(),
            Err(e) => -e.duration().as_secs_f64(),
        };
        Self::from_unix_seconds(unix)
    }

    pub fn seconds_since_j2000(self) -> f64 {
        self.0
    }

    pub fn days_since_j2000(self) -> f64 {
        self.0 / SECONDS_PER_DAY
    }

    /// Julian centuries since J2000, the unit most element tables use.
    pub fn centuries_since_j2000(self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    /// Convert to a proleptic Gregorian calendar timestamp.
    ///
    /// `None` for non-finite instants and those beyond [`MAX_CALENDAR_DAYS`].
    pub fn calendar(self) -> Option<CalendarTime> {
        // Shift the origin to midnight so whole days and time-of-day split cleanly.
        let from_midnight = self.0 + SECONDS_PER_DAY / 2.0;
        let whole_days = (from_midnight / SECONDS_PER_DAY).floor();
        if !(whole_days.abs() <= MAX_CALENDAR_DAYS) {
            return None;
        }
        let second_of_day = (from_midnight - whole_days * SECONDS_PER_DAY).floor().clamp(0.0, 86_399.0) as u32;

        let (year, month, day) = civil_from_julian_day(J2000_JULIAN_DAY as i64 + whole_days as i64);
        Some(CalendarTime {
            year,
            month,
            day,
            hour: second_of_day / 3600,
            minute: (second_of_day / 60) % 60,
            second: second_of_day % 60,
        })
    }
}

impl ops::Add<f64> for SimulationTime {
    type Output = SimulationTime;

    fn add(self, seconds: f64) -> Self::Output {
        SimulationTime(self.0 + seconds)
    }
}

impl ops::AddAssign<f64> for SimulationTime {
    fn add_assign(&mut self, seconds: f64) {
        self.0 += seconds;
    }
}

impl ops::Sub<SimulationTime> for SimulationTime {
    type Output = f64;

    fn sub(self, rhs: SimulationTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimulationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.calendar() {
            Some(cal) => cal.fmt(f),
            None if self.0 > 0.0 => f.write_str("beyond calendar range (future)"),
            None if self.0 < 0.0 => f.write_str("beyond calendar range (past)"),
            None => f.write_str("undefined time"),
        }
    }
}

/// Human-readable broken-down timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for CalendarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Meeus' algorithm: integer Julian Day (noon-based) -> (year, month, day).
fn civil_from_julian_day(jd: i64) -> (i32, u32, u32) {
    let z = jd;
    let a = if z < 2_299_161 {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
    let month = if e < 14 { (e - 1) as u32 } else { (e - 13) as u32 };
    let year = if month > 2 { (c - 4716) as i32 } else { (c - 4715) as i32 };
    (year, month, day)
}
