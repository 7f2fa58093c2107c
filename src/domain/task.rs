//! Calendar entries and the manual task entry form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::time::format_time_24_to_12;

use super::priority::Priority;

/// One calendar entry
///
/// Ids are assigned from the schedule slice's monotonic counter and are never
/// reused while that slice lives. The `time` field, when present, is the
/// 12-hour display range (`"H:MM AM/PM - H:MM AM/PM"`); the due date pins the
/// item to a concrete calendar day, while undated items are legacy entries
/// that belong to no particular week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Unique id within the whole schedule, monotonically assigned
    pub id: u32,

    /// Display title, 1..=100 characters
    pub title: String,

    /// Optional 12-hour display time range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Concrete calendar date the item belongs to (`YYYY-MM-DD` on disk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Scheduling priority
    pub priority: Priority,

    /// Completion flag, toggled in place
    pub completed: bool,
}

impl ScheduleItem {
    /// Build an item from a validated form and a freshly allocated id
    ///
    /// The caller must have taken `id` from the schedule slice's counter in
    /// the same logical operation that inserts the result.
    pub fn from_form(form: &TaskForm, id: u32) -> Self {
        let time = format!(
            "{} - {}",
            format_time_24_to_12(&form.start_time),
            format_time_24_to_12(&form.end_time)
        );
        Self {
            id,
            title: form.name.clone(),
            time: Some(time),
            due_date: form.due_date,
            priority: form.priority,
            completed: false,
        }
    }

    /// Toggle the completion flag, returning the new value
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Manual task entry form
///
/// Times are 24-hour `HH:MM` strings as typed into the editor; they are
/// rendered to the 12-hour display format when the item is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    /// Task name, 1..=100 characters
    pub name: String,

    /// Start time, 24-hour `HH:MM`
    pub start_time: String,

    /// End time, 24-hour `HH:MM`, strictly after the start
    pub end_time: String,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Priority for the new item
    pub priority: Priority,
}
