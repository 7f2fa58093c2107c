//! StudyWeek - Persisted state and schedule reconciliation core
//!
//! StudyWeek is the state layer for a student scheduling companion: a set of
//! file-persisted state slices (survey, schedule, chat, navigation) plus the
//! projection that turns an AI-generated weekly schedule into calendar items
//! and splices them into the live schedule one week at a time.
//!
//! # Core Concepts
//!
//! - **Self-Healing Loads**: A missing, corrupt, or invalid record degrades
//!   to a default instead of erroring, so one bad slice never blocks startup
//! - **Write-Through Slices**: Every mutation persists synchronously; the
//!   stored copy and the in-memory copy never diverge
//! - **Validated Boundaries**: Everything crossing the storage or AI boundary
//!   passes explicit field-by-field validation that reports every violation
//! - **Week-Scoped Merge**: Regenerating a week replaces only that week's
//!   dated items and is idempotent
//!
//! # Modules
//!
//! - [`domain`] - Calendar, chat, preference, and generated-schedule types
//! - [`schema`] - Versioned validation and migration of persisted records
//! - [`storage`] - File-backed key-value storage for the slices
//! - [`state`] - Persistence-backed state containers
//! - [`transform`] - Generated-schedule projection and weekly merge
//! - [`config`] - Configuration types and loading

pub mod config;
pub mod domain;
pub mod schema;
pub mod state;
pub mod storage;
pub mod transform;

// Re-export commonly used types
pub use config::{ChatConfig, Config, StorageConfig};
pub use domain::{
    BlockType, ChatMessage, DayPlan, GeneratedSchedule, Priority, ScheduleBlock, ScheduleItem,
    ScheduleSummary, Sender, SurveyQuestion, TaskForm, UserPreferences, WeekSchedule, Weekday,
    MAX_MESSAGE_LEN, SURVEY_QUESTIONS,
};
pub use schema::{SCHEMA_VERSION, ValidationErrors, validate_generated_schedule};
pub use state::{
    ChatState, ChatStore, NavigationState, NavigationStore, ScheduleState, ScheduleStore,
    SurveyState, SurveyStore, View,
};
pub use storage::{Storage, default_data_dir};
pub use transform::{merge_week, schedule_from_generated, week_dates_for};
