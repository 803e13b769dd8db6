//! Weekdays and wall-clock times.
//!
//! Meeting times arrive as `"HH:MM"` strings and weekday letter strings
//! (`"MWF"`, `"TR"`). Both are parsed once at the catalog boundary into
//! compact value types.
//!
//! # Time Model
//! A `ClockTime` is a minute of the day in `[0, 1440]`. `24:00` is allowed
//! as the end of an operating window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Minutes in a day; `24:00` is the largest representable time.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A teaching weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in grid order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Parses a schedule letter (`M T W R F`, upper case only).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// The schedule letter for this day.
    pub fn letter(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        };
        f.write_str(name)
    }
}

/// A set of weekdays, serialized as a letter string such as `"MWF"`.
///
/// Letters outside `MTWRF` (weekend markers, padding) are ignored when
/// parsing; those meetings never fall on the teaching grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from a list of days.
    pub fn of(days: &[Weekday]) -> Self {
        days.iter().fold(Self::empty(), |set, &d| set.with(d))
    }

    /// Parses a letter string, keeping only `MTWRF`.
    pub fn parse(letters: &str) -> Self {
        letters
            .chars()
            .filter_map(Weekday::from_letter)
            .fold(Self::empty(), |set, d| set.with(d))
    }

    /// Returns the set with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | day.bit())
    }

    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates member days in week order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl From<String> for WeekdaySet {
    fn from(letters: String) -> Self {
        Self::parse(&letters)
    }
}

impl From<WeekdaySet> for String {
    fn from(set: WeekdaySet) -> Self {
        set.iter().map(Weekday::letter).collect()
    }
}

/// A wall-clock time at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    /// Midnight at the end of the day (`24:00`).
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Creates a time from hours and minutes.
    ///
    /// Returns `None` past `24:00` or for minutes above 59.
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if minute > 59 {
            return None;
        }
        let total = hour.checked_mul(60)?.checked_add(minute)?;
        (total <= MINUTES_PER_DAY).then_some(Self(total))
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for ClockTime {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidTime(s.to_string());
        let (hh, mm) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hh.is_empty() || mm.len() != 2 || !digits(hh) || !digits(mm) {
            return Err(invalid());
        }
        let hour: u16 = hh.parse().map_err(|_| invalid())?;
        let minute: u16 = mm.parse().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CatalogError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
