//! The seven-day schedule mapping

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::day::Weekday;
use super::task::ScheduleItem;

/// Schedule items grouped by weekday
///
/// All seven keys are always present; order within a day is insertion order
/// and is not re-sorted by time. This is the calendar's native shape and the
/// target of the generated-schedule projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    days: BTreeMap<Weekday, Vec<ScheduleItem>>,
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekSchedule {
    /// An empty week with all seven day slots
    pub fn new() -> Self {
        let days = Weekday::ALL.iter().map(|day| (*day, Vec::new())).collect();
        Self { days }
    }

    /// Re-insert any day slots a hand-edited or older record dropped
    pub fn normalize(&mut self) {
        for day in Weekday::ALL {
            self.days.entry(day).or_default();
        }
    }

    /// Items for one day, in insertion order
    pub fn day(&self, day: Weekday) -> &[ScheduleItem] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mutable items for one day
    pub fn day_mut(&mut self, day: Weekday) -> &mut Vec<ScheduleItem> {
        self.days.entry(day).or_default()
    }

    /// Append an item to a day slot
    pub fn push(&mut self, day: Weekday, item: ScheduleItem) {
        self.day_mut(day).push(item);
    }

    /// Iterate days in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[ScheduleItem])> {
        Weekday::ALL.iter().map(|day| (*day, self.day(*day)))
    }

    /// Total item count across all days
    pub fn total_items(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Toggle the completion flag for one item
    ///
    /// Returns false when no item with that id exists on the given day.
    pub fn toggle_completion(&mut self, day: Weekday, id: u32) -> bool {
        match self.day_mut(day).iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.toggle_completed();
                true
            }
            None => false,
        }
    }

    /// Percentage of items completed, rounded to the nearest whole number
    ///
    /// An empty week reports 0 rather than dividing by zero.
    pub fn completion_percentage(&self) -> u32 {
        let total = self.total_items();
        if total == 0 {
            return 0;
        }
        let completed = self
            .days
            .values()
            .flatten()
            .filter(|item| item.completed)
            .count();
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}
