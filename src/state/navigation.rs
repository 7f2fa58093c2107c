//! Navigation slice: which week, day, and screen the user is looking at

use chrono::{DateTime, Datelike, Duration, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{SCHEMA_VERSION, validate_navigation_state};
use crate::storage::{Storage, keys};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Main,
    Chat,
    TaskEditor,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Chat => write!(f, "chat"),
            Self::TaskEditor => write!(f, "task-editor"),
        }
    }
}

/// Persisted navigation slice
///
/// `current_date` anchors the displayed week; any instant inside a week
/// selects that whole Monday-to-Sunday span. `selected_day` is the
/// Monday-based index of the focused day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub version: String,

    /// Anchor instant for the displayed week
    pub current_date: DateTime<Utc>,

    /// Focused day, 0 = Monday .. 6 = Sunday
    pub selected_day: u8,

    /// Screen being shown
    #[serde(rename = "currentView")]
    pub view: View,
}

impl Default for NavigationState {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: SCHEMA_VERSION.to_string(),
            current_date: now,
            selected_day: now.date_naive().weekday().num_days_from_monday() as u8,
            view: View::default(),
        }
    }
}

/// Write-through container for the navigation slice
#[derive(Debug)]
pub struct NavigationStore {
    storage: Storage,
    state: NavigationState,
}

impl NavigationStore {
    /// Load the stored slice, or focus today
    pub fn load(storage: &Storage) -> Self {
        let state = storage.load(
            keys::NAVIGATION_STATE,
            NavigationState::default(),
            validate_navigation_state,
        );
        Self {
            storage: storage.clone(),
            state,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(keys::NAVIGATION_STATE, &self.state)
    }

    /// Re-anchor the displayed week
    pub fn set_current_date(&mut self, date: DateTime<Utc>) -> Result<()> {
        self.state.current_date = date;
        self.persist()
    }

    /// Focus one day of the displayed week
    ///
    /// Errors on an index past Sunday; the slice is left unchanged.
    pub fn set_selected_day(&mut self, day: u8) -> Result<()> {
        if day > 6 {
            eyre::bail!("Invalid day index {}: must be in 0..=6", day);
        }
        self.state.selected_day = day;
        self.persist()
    }

    /// Switch screens
    pub fn set_view(&mut self, view: View) -> Result<()> {
        debug!(%view, "NavigationStore::set_view: called");
        self.state.view = view;
        self.persist()
    }

    /// Move the anchor forward or back by whole weeks
    pub fn shift_week(&mut self, weeks: i64) -> Result<()> {
        self.state.current_date += Duration::weeks(weeks);
        debug!(
            weeks,
            current_date = %self.state.current_date,
            "NavigationStore::shift_week: re-anchored"
        );
        self.persist()
    }
}
