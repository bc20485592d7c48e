//! Calendar time value type and the RTC collaborator trait.
//!
//! [`DateTime`] is a plain civil date/time with enough arithmetic for the
//! date/time editor: validity checks, Unix-seconds conversion (Howard
//! Hinnant's civil-calendar algorithms) and per-field stepping. The RTC
//! chip itself sits behind [`Clock`].

/// A civil wall-clock reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Real-time clock collaborator.
pub trait Clock {
    fn now(&mut self) -> DateTime;
    fn adjust(&mut self, t: DateTime);
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` of `year`; 0 for an invalid month.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days since 1970-01-01 for a civil date.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = i64::from(if month > 2 { month - 3 } else { month + 9 });
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Civil date for days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    (if month <= 2 { y + 1 } else { y }, month, day)
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    /// Calendar validity: month/day in range for the year, time fields in
    /// range. Years outside 1970..=2199 are rejected (the RTC cannot hold
    /// them anyway).
    pub fn is_valid(&self) -> bool {
        (1970..=2199).contains(&self.year)
            && self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Seconds since the Unix epoch.
    pub fn to_unix(&self) -> i64 {
        days_from_civil(i64::from(self.year), self.month, self.day) * 86400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Build from seconds since the Unix epoch.
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86400);
        let tod = secs.rem_euclid(86400);
        let (year, month, day) = civil_from_days(days);
        Self {
            year: year as u16,
            month,
            day,
            hour: (tod / 3600) as u8,
            minute: (tod % 3600 / 60) as u8,
            second: (tod % 60) as u8,
        }
    }

    /// Shift by a signed number of seconds, normalizing through the
    /// calendar.
    pub fn add_seconds(&self, delta: i64) -> Self {
        Self::from_unix(self.to_unix() + delta)
    }

    /// Step the year by one, clamping the day into the target month
    /// (Feb 29 -> Feb 28 on non-leap years). Time of day is preserved.
    pub fn step_year(&self, delta: i8) -> Self {
        let year = (i32::from(self.year) + i32::from(delta)).clamp(1970, 2199) as u16;
        let mut out = *self;
        out.year = year;
        out.day = out.day.min(days_in_month(year, out.month));
        out
    }

    /// Step the month by one with year carry, clamping the day into the
    /// target month (Jan 31 -> Feb 28/29). Time of day is preserved.
    pub fn step_month(&self, delta: i8) -> Self {
        let mut month = i32::from(self.month) + i32::from(delta);
        let mut year = i32::from(self.year);
        if month < 1 {
            month += 12;
            year -= 1;
        } else if month > 12 {
            month -= 12;
            year += 1;
        }
        let year = year.clamp(1970, 2199) as u16;
        let month = month as u8;
        let mut out = *self;
        out.year = year;
        out.month = month;
        out.day = out.day.min(days_in_month(year, month));
        out
    }
}
