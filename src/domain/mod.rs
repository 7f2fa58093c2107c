//! Domain types for the weekly calendar, chat transcript, and survey
//!
//! Every persisted entity lives here; the constraint checks that turn
//! untrusted JSON into these types live in [`crate::schema`].

pub mod ai;
pub mod day;
pub mod message;
pub mod preferences;
pub mod priority;
pub mod task;
pub mod week;

pub use ai::{BlockType, DayPlan, GeneratedSchedule, ScheduleBlock, ScheduleSummary};
pub use day::Weekday;
pub use message::{ChatMessage, MAX_MESSAGE_LEN, Sender};
pub use preferences::{
    NOTES_SEPARATOR, ReminderType, SURVEY_QUESTIONS, SurveyQuestion, TaskBreakdown, UserPreferences,
};
pub use priority::Priority;
pub use task::{ScheduleItem, TaskForm};
pub use week::WeekSchedule;
