use crate::error::InvalidInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Day {
    Saturday,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// Week order, starting on Saturday.
    pub const ALL: [Day; 7] = [
        Day::Saturday,
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Day {
    type Err = InvalidInput;

    /// Accepts full English names and three letter abbreviations, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                name == needle || (needle.len() == 3 && name.starts_with(&needle))
            })
            .ok_or_else(|| InvalidInput::UnknownDay(s.to_string()))
    }
}

impl TryFrom<String> for Day {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.name().to_string()
    }
}

/// Minutes since midnight.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time(pub u16);

impl Time {
    pub const MINUTES_PER_DAY: u16 = 1440;

    pub const fn hm(hours: u16, minutes: u16) -> Time {
        Time(hours * 60 + minutes)
    }

    pub fn hours(&self) -> u16 {
        self.0 / 60
    }

    pub fn minutes(&self) -> u16 {
        self.0 % 60
    }

    /// Half-open overlap of `[from, to)` ranges: touching ranges do not overlap.
    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for Time {
    type Err = InvalidInput;

    /// Parses `H`, `HH`, `H:M` or `HH:MM`. `24:00` is accepted as the end of the day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed.split_once(':').unwrap_or((trimmed, "0"));
        let valid_digits = |part: &str| {
            !part.is_empty() && part.len() <= 2 && part.chars().all(|c| c.is_ascii_digit())
        };
        if !valid_digits(h) || !valid_digits(m) {
            return Err(InvalidInput::InvalidTime(s.to_string()));
        }
        let hours: u16 = h
            .parse()
            .map_err(|_| InvalidInput::InvalidTime(s.to_string()))?;
        let minutes: u16 = m
            .parse()
            .map_err(|_| InvalidInput::InvalidTime(s.to_string()))?;

        match (hours, minutes) {
            (24, 0) => Ok(Time(Self::MINUTES_PER_DAY)),
            (0..=23, 0..=59) => Ok(Time::hm(hours, minutes)),
            _ => Err(InvalidInput::TimeOutOfRange(s.to_string())),
        }
    }
}

impl TryFrom<String> for Time {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}

/// One weekly occurrence of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Day,
    pub start: Time,
    pub end: Time,
}

impl TimeSlot {
    pub fn new(day: Day, start: Time, end: Time) -> Result<TimeSlot, InvalidInput> {
        let slot = TimeSlot { day, start, end };
        if slot.is_valid() {
            Ok(slot)
        } else {
            Err(InvalidInput::InvalidSlot(slot.to_string()))
        }
    }

    /// `start < end`, both within a single day.
    pub fn is_valid(&self) -> bool {
        self.start < self.end && self.end.0 <= Time::MINUTES_PER_DAY
    }

    pub fn duration(&self) -> u16 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day
            && Time::is_overlapping(&(self.start, self.end), &(other.start, other.end))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}
