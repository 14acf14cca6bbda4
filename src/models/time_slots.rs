// ABOUTME: Ordered, duplicate-free selection of proposed game start times
// Plus the Monday-based week view used to lay out candidate slots

use chrono::{Datelike, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Source of "now" for past-time checks
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Outcome of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotToggle {
    Added,
    Removed,
}

/// Slot lies before the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastSlot(pub NaiveDateTime);

/// Chosen start times, ascending, unique by exact timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotSelection {
    slots: Vec<NaiveDateTime>,
}

impl TimeSlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `at` if selected, otherwise insert it in order.
    /// Times before `clock.now()` are refused and the selection is unchanged.
    pub fn toggle(&mut self, at: NaiveDateTime, clock: &dyn Clock) -> Result<SlotToggle, PastSlot> {
        if at < clock.now() {
            return Err(PastSlot(at));
        }

        match self.slots.binary_search(&at) {
            Ok(index) => {
                self.slots.remove(index);
                Ok(SlotToggle::Removed)
            }
            Err(index) => {
                self.slots.insert(index, at);
                Ok(SlotToggle::Added)
            }
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.slots.binary_search(&at).is_ok()
    }

    pub fn slots(&self) -> &[NaiveDateTime] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Grid layout for a week of bookable start times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub first_slot: NaiveTime,
    pub step_minutes: u32,
    pub slot_count: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            first_slot: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            step_minutes: 30,
            slot_count: 24,
        }
    }
}

impl SlotGrid {
    /// Start times of one day
    pub fn times(&self) -> Vec<NaiveTime> {
        (0..self.slot_count)
            .map(|i| self.first_slot + Duration::minutes(i64::from(i * self.step_minutes)))
            .collect()
    }
}

/// A Monday-to-Sunday week the user pages through when picking slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekView {
    start: NaiveDate,
}

impl WeekView {
    /// Week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        Self {
            start: date - Duration::days(offset),
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The week `weeks` after this one, or `None` past the end of the calendar
    pub fn weeks_after(&self, weeks: u32) -> Option<Self> {
        let start = self
            .start
            .checked_add_days(Days::new(u64::from(weeks) * 7))?;
        Self::whole_week(start)
    }

    pub fn next(&self) -> Option<Self> {
        self.weeks_after(1)
    }

    pub fn previous(&self) -> Option<Self> {
        let start = self.start.checked_sub_days(Days::new(7))?;
        Self::whole_week(start)
    }

    // Every day of the week must be a representable date
    fn whole_week(start: NaiveDate) -> Option<Self> {
        start.checked_add_days(Days::new(6))?;
        Some(Self { start })
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..7).map(|i| self.start + Duration::days(i)).collect()
    }

    /// Every cell of the week in day-major order
    pub fn slots(&self, grid: &SlotGrid) -> Vec<NaiveDateTime> {
        let times = grid.times();
        self.days()
            .into_iter()
            .flat_map(|day| times.iter().map(move |&time| day.and_time(time)))
            .collect()
    }

    /// "Oct 19 - Oct 25, 2026"
    pub fn label(&self) -> String {
        let end = self.start + Duration::days(6);
        format!("{} - {}", self.start.format("%b %-d"), end.format("%b %-d, %Y"))
    }
}
