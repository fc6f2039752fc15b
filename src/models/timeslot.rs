//! Timeslot model.
//!
//! Timeslots are totally ordered by (day, start time). Two slots are
//! contiguous when they are adjacent in that order and share a day.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TimeslotId;

/// A teaching period on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    /// Unique timeslot identifier.
    pub id: TimeslotId,
    /// Day of the week.
    pub day: Weekday,
    /// Start time.
    #[serde(alias = "startTime")]
    pub start_time: ClockTime,
    /// End time.
    #[serde(alias = "endTime")]
    pub end_time: ClockTime,
}

impl Timeslot {
    /// Creates a new timeslot.
    pub fn new(id: TimeslotId, day: Weekday, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            id,
            day,
            start_time,
            end_time,
        }
    }

    /// Ordering key: day first, then start time, then id.
    #[inline]
    pub fn sort_key(&self) -> (u8, ClockTime, TimeslotId) {
        (self.day.ordinal(), self.start_time, self.id)
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "DayRepr", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Zero-based ordinal (Monday = 0).
    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Day from a zero-based ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        WEEKDAYS.get(ordinal as usize).copied()
    }

    /// Parses an English or French day name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let day = match name.trim().to_lowercase().as_str() {
            "monday" | "mon" | "lundi" => Self::Monday,
            "tuesday" | "tue" | "mardi" => Self::Tuesday,
            "wednesday" | "wed" | "mercredi" => Self::Wednesday,
            "thursday" | "thu" | "jeudi" => Self::Thursday,
            "friday" | "fri" | "vendredi" => Self::Friday,
            "saturday" | "sat" | "samedi" => Self::Saturday,
            "sunday" | "sun" | "dimanche" => Self::Sunday,
            _ => return None,
        };
        Some(day)
    }

    /// English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire representation of a day: an ordinal or a name.
#[derive(Deserialize)]
#[serde(untagged)]
enum DayRepr {
    Ordinal(u8),
    Name(String),
}

impl TryFrom<DayRepr> for Weekday {
    type Error = String;

    fn try_from(repr: DayRepr) -> Result<Self, Self::Error> {
        match repr {
            DayRepr::Ordinal(n) => {
                Weekday::from_ordinal(n).ok_or_else(|| format!("day ordinal {n} out of range 0..=6"))
            }
            DayRepr::Name(name) => {
                Weekday::from_name(&name).ok_or_else(|| format!("unknown day name '{name}'"))
            }
        }
    }
}

impl From<Weekday> for String {
    fn from(day: Weekday) -> Self {
        day.name().to_string()
    }
}

/// Time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(pub(super) u16);

impl ClockTime {
    /// Creates a time from hours and minutes. Returns `None` when out of range.
    pub fn hm(hours: u16, minutes: u16) -> Option<Self> {
        (hours < 24 && minutes < 60).then_some(Self(hours * 60 + minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Parses `"HH:MM"` (an optional `":SS"` suffix is ignored).
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split(':');
        let hours = parts.next()?.parse::<u16>().ok()?;
        let minutes = parts.next()?.parse::<u16>().ok()?;
        if let Some(seconds) = parts.next() {
            seconds.parse::<u16>().ok().filter(|s| *s < 60)?;
        }
        if parts.next().is_some() {
            return None;
        }
        Self::hm(hours, minutes)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&text).ok_or_else(|| format!("invalid time '{text}', expected HH:MM"))
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}
