//! Persistence-backed state containers
//!
//! One container per concern: survey, schedule, chat, navigation. Each owns
//! its slice of persisted state and writes through to [`crate::storage`] on
//! every mutation, so the stored copy and the in-memory copy never diverge.
//! The four slices are independent: a corrupt record in one never blocks
//! loading another.

mod chat;
mod navigation;
mod schedule;
mod survey;

pub use chat::{ChatState, ChatStore};
pub use navigation::{NavigationState, NavigationStore, View};
pub use schedule::{ScheduleState, ScheduleStore};
pub use survey::{SurveyState, SurveyStore};
