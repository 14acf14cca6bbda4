// ABOUTME: Weekly availability grid (7 days x morning/afternoon/evening)
// Copy-on-write single-cell toggles and the "slot matches availability" query

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Day keys of the availability grid, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in grid order
    pub const fn all() -> &'static [Self; 7] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Lowercase key used in serialized profiles and CLI arguments
    pub const fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Short column label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Part of the day a grid cell covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl DayPart {
    pub const fn all() -> &'static [Self; 3] {
        &[Self::Morning, Self::Afternoon, Self::Evening]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    /// Classify an hour of the day: before noon is morning, before 17:00 afternoon
    pub const fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 17 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error parsing a day, day part or `day:part` cell key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellKeyError {
    #[error("Unknown day '{0}' (expected monday..sunday)")]
    UnknownDay(String),
    #[error("Unknown time of day '{0}' (expected morning, afternoon or evening)")]
    UnknownPart(String),
    #[error("Invalid availability cell '{0}' (expected day:part, e.g. monday:evening)")]
    Malformed(String),
}

impl FromStr for Weekday {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|day| day.key() == lower || day.label().to_lowercase() == lower)
            .ok_or_else(|| CellKeyError::UnknownDay(s.to_string()))
    }
}

impl FromStr for DayPart {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|part| part.key() == lower)
            .ok_or_else(|| CellKeyError::UnknownPart(s.to_string()))
    }
}

/// One cell address in the grid, written `day:part` on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilityCell {
    pub day: Weekday,
    pub part: DayPart,
}

impl FromStr for AvailabilityCell {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, part) = s
            .split_once(':')
            .ok_or_else(|| CellKeyError::Malformed(s.to_string()))?;
        Ok(Self {
            day: day.parse()?,
            part: part.parse()?,
        })
    }
}

/// Flags for a single day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub afternoon: bool,
    #[serde(default)]
    pub evening: bool,
}

impl DayAvailability {
    pub const fn get(&self, part: DayPart) -> bool {
        match part {
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Evening => self.evening,
        }
    }

    fn flip(&mut self, part: DayPart) {
        match part {
            DayPart::Morning => self.morning = !self.morning,
            DayPart::Afternoon => self.afternoon = !self.afternoon,
            DayPart::Evening => self.evening = !self.evening,
        }
    }
}

/// The full weekly grid. Every day is a named field, so the shape can never
/// be partial; cells change only through [`AvailabilityMatrix::toggled`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMatrix {
    #[serde(default)]
    monday: DayAvailability,
    #[serde(default)]
    tuesday: DayAvailability,
    #[serde(default)]
    wednesday: DayAvailability,
    #[serde(default)]
    thursday: DayAvailability,
    #[serde(default)]
    friday: DayAvailability,
    #[serde(default)]
    saturday: DayAvailability,
    #[serde(default)]
    sunday: DayAvailability,
}

impl AvailabilityMatrix {
    /// Grid with every cell unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid with exactly the given cells set. Duplicate cells are set once.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = AvailabilityCell>,
    {
        cells.into_iter().fold(Self::new(), |matrix, cell| {
            if matrix.is_available(cell.day, cell.part) {
                matrix
            } else {
                matrix.toggled(cell.day, cell.part)
            }
        })
    }

    pub const fn day(&self, day: Weekday) -> &DayAvailability {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    fn day_mut(&mut self, day: Weekday) -> &mut DayAvailability {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    pub const fn is_available(&self, day: Weekday, part: DayPart) -> bool {
        self.day(day).get(part)
    }

    /// Return a copy with exactly one cell flipped; `self` is left untouched
    #[must_use]
    pub fn toggled(&self, day: Weekday, part: DayPart) -> Self {
        let mut next = *self;
        next.day_mut(day).flip(part);
        next
    }

    /// Whether a concrete date-time falls into a set cell
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        self.is_available(at.weekday().into(), DayPart::from_hour(at.hour()))
    }

    /// Set cells in grid order
    pub fn cells(&self) -> impl Iterator<Item = AvailabilityCell> + '_ {
        Weekday::all().iter().flat_map(move |&day| {
            DayPart::all()
                .iter()
                .filter(move |&&part| self.is_available(day, part))
                .map(move |&part| AvailabilityCell { day, part })
        })
    }

    pub fn selected_count(&self) -> usize {
        self.cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Plain-text rendering: one row per day part, one column per day
    pub fn render_grid(&self) -> String {
        let mut out = format!("{:<10}", "");
        for day in Weekday::all() {
            out.push_str(&format!(" {:^5}", day.label()));
        }
        out.push('\n');
        for &part in DayPart::all() {
            out.push_str(&format!("{:<10}", part.label()));
            for &day in Weekday::all() {
                let mark = if self.is_available(day, part) { "x" } else { "." };
                out.push_str(&format!(" {mark:^5}"));
            }
            out.push('\n');
        }
        out
    }
}
