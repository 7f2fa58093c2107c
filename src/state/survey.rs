//! Survey slice: onboarding progress and the captured preference profile

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{SURVEY_QUESTIONS, UserPreferences};
use crate::schema::{SCHEMA_VERSION, validate_survey_state};
use crate::storage::{Storage, keys};

/// Persisted survey slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyState {
    pub version: String,

    /// Whether the onboarding survey is still being shown
    pub show_survey: bool,

    /// Index of the question currently being asked
    pub current_question_index: usize,

    /// One answer per question answered so far, in question order
    #[serde(rename = "surveyAnswers")]
    pub answers: Vec<String>,

    /// Captured profile; `None` until the survey completes
    #[serde(rename = "userPreferences")]
    pub preferences: Option<UserPreferences>,
}

impl Default for SurveyState {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            show_survey: true,
            current_question_index: 0,
            answers: Vec::new(),
            preferences: None,
        }
    }
}

/// Write-through container for the survey slice
#[derive(Debug)]
pub struct SurveyStore {
    storage: Storage,
    state: SurveyState,
}

impl SurveyStore {
    /// Load the stored slice, or start a fresh survey
    pub fn load(storage: &Storage) -> Self {
        let state = storage.load(keys::SURVEY_STATE, SurveyState::default(), validate_survey_state);
        Self {
            storage: storage.clone(),
            state,
        }
    }

    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    pub fn preferences(&self) -> Option<&UserPreferences> {
        self.state.preferences.as_ref()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(keys::SURVEY_STATE, &self.state)
    }

    /// Record one answer and advance to the next question
    pub fn record_answer(&mut self, answer: impl Into<String>) -> Result<()> {
        let answer = answer.into();
        debug!(
            index = self.state.current_question_index,
            "SurveyStore::record_answer: called"
        );
        self.state.answers.push(answer);
        self.state.current_question_index += 1;
        self.persist()
    }

    /// Step back one question, dropping its answer
    ///
    /// A no-op at the first question; the index never goes below zero.
    pub fn go_back(&mut self) -> Result<()> {
        if self.state.current_question_index == 0 {
            return Ok(());
        }
        self.state.answers.pop();
        self.state.current_question_index -= 1;
        self.persist()
    }

    /// Whether every question has an answer
    pub fn is_answered(&self) -> bool {
        self.state.answers.len() == SURVEY_QUESTIONS.len()
    }

    /// Validate the accumulated answers into a profile and close the survey
    ///
    /// Errors when the answers do not form a valid profile; the survey flow
    /// controls answer order, so that is a caller bug and the slice is left
    /// unchanged.
    pub fn complete(&mut self) -> Result<()> {
        let preferences = UserPreferences::from_answers(&self.state.answers)?;
        debug!("SurveyStore::complete: survey completed");
        self.state.preferences = Some(preferences);
        self.state.show_survey = false;
        self.persist()
    }

    /// Discard everything and start the survey over
    pub fn reset(&mut self) -> Result<()> {
        debug!("SurveyStore::reset: called");
        self.state = SurveyState::default();
        self.persist()
    }
}
