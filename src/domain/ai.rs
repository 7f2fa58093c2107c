//! Wire contract of the schedule-generation endpoint
//!
//! The generation service returns exactly one of these objects per request.
//! It is untrusted model output: callers must run it through
//! [`crate::schema::validate_generated_schedule`] before handing it to the
//! transformer. The object has no identity of its own; it is consumed once
//! and projected into the weekly calendar.

use serde::{Deserialize, Serialize};

use super::priority::Priority;

/// Activity category of a generated block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Class,
    Study,
    Work,
    Athletic,
    Extracurricular,
    Personal,
}

impl BlockType {
    /// Fixed priority lookup used when projecting blocks into calendar items
    pub fn priority(self) -> Priority {
        match self {
            Self::Class | Self::Work => Priority::High,
            Self::Study | Self::Athletic | Self::Extracurricular => Priority::Medium,
            Self::Personal => Priority::Low,
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Study => "study",
            Self::Work => "work",
            Self::Athletic => "athletic",
            Self::Extracurricular => "extracurricular",
            Self::Personal => "personal",
        };
        write!(f, "{}", name)
    }
}

/// One time-boxed activity inside a generated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    /// 24-hour `HH:MM` start
    pub start_time: String,

    /// 24-hour `HH:MM` end
    pub end_time: String,

    /// Activity category
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Activity title as the model phrased it
    pub title: String,

    /// Optional location, appended to the display title when novel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Credit count for class blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
}

/// One day's worth of generated blocks
///
/// The day is a full weekday name ("Monday"). It stays a free string here
/// because the transformer skips names it does not recognize instead of
/// rejecting the whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Full weekday name
    pub day: String,

    /// Blocks in the order the model emitted them
    pub blocks: Vec<ScheduleBlock>,
}

/// Aggregate totals the model reports alongside the weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_credits: f64,
    pub study_hours: f64,
    pub class_hours: f64,
    pub work_hours: f64,
    pub other_hours: f64,
    pub committed_hours: f64,
    pub available_hours: f64,
    pub buffer_hours: f64,
}

/// The complete generation result: summary plus per-day block lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    /// Aggregate hour and credit totals
    pub summary: ScheduleSummary,

    /// Per-day blocks; days may appear in any order and may be missing
    pub weekly_schedule: Vec<DayPlan>,
}

impl GeneratedSchedule {
    /// Total block count across all days
    ///
    /// This is exactly how many task ids a projection will consume.
    pub fn total_blocks(&self) -> usize {
        self.weekly_schedule.iter().map(|day| day.blocks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_priority_lookup() {
        assert_eq!(BlockType::Class.priority(), Priority::High);
        assert_eq!(BlockType::Work.priority(), Priority::High);
        assert_eq!(BlockType::Study.priority(), Priority::Medium);
        assert_eq!(BlockType::Athletic.priority(), Priority::Medium);
        assert_eq!(BlockType::Extracurricular.priority(), Priority::Medium);
        assert_eq!(BlockType::Personal.priority(), Priority::Low);
    }

    #[test]
    fn test_block_type_serde_tag() {
        let block: ScheduleBlock = serde_json::from_value(serde_json::json!({
            "start_time": "09:00",
            "end_time": "10:00",
            "type": "class",
            "title": "Calc",
        }))
        .unwrap();
        assert_eq!(block.block_type, BlockType::Class);
        assert_eq!(block.location, None);

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "class");
    }

    #[test]
    fn test_total_blocks() {
        let schedule = GeneratedSchedule {
            summary: ScheduleSummary {
                total_credits: 12.0,
                study_hours: 10.0,
                class_hours: 12.0,
                work_hours: 0.0,
                other_hours: 5.0,
                committed_hours: 27.0,
                available_hours: 88.0,
                buffer_hours: 61.0,
            },
            weekly_schedule: vec![
                DayPlan {
                    day: "Monday".to_string(),
                    blocks: vec![],
                },
                DayPlan {
                    day: "Tuesday".to_string(),
                    blocks: vec![
                        ScheduleBlock {
                            start_time: "09:00".to_string(),
                            end_time: "10:00".to_string(),
                            block_type: BlockType::Study,
                            title: "Review".to_string(),
                            location: None,
                            credits: None,
                        };
                        3
                    ],
                },
            ],
        };
        assert_eq!(schedule.total_blocks(), 3);
    }
}
