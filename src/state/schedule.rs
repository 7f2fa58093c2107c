//! Schedule slice: the weekly calendar and its id counter

use chrono::NaiveDate;
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{GeneratedSchedule, ScheduleItem, TaskForm, Weekday, WeekSchedule};
use crate::schema::{SCHEMA_VERSION, validate_schedule_state};
use crate::storage::{Storage, keys};
use crate::transform::{merge_week, schedule_from_generated};

/// Persisted schedule slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub version: String,

    /// The weekly calendar, all seven day slots present
    #[serde(rename = "scheduleItems")]
    pub items: WeekSchedule,

    /// Next id to hand out; strictly increases, never reused
    pub next_task_id: u32,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            items: WeekSchedule::new(),
            next_task_id: 1,
        }
    }
}

/// Write-through container for the schedule slice
///
/// Every id handed out comes from `next_task_id`, and the counter only moves
/// forward in the same persisted operation that uses the ids. Callers must
/// not mix in ids from anywhere else.
#[derive(Debug)]
pub struct ScheduleStore {
    storage: Storage,
    state: ScheduleState,
}

impl ScheduleStore {
    /// Load the stored slice, or start an empty calendar
    pub fn load(storage: &Storage) -> Self {
        let mut state = storage.load(
            keys::SCHEDULE_STATE,
            ScheduleState::default(),
            validate_schedule_state,
        );
        state.items.normalize();
        Self {
            storage: storage.clone(),
            state,
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn items(&self) -> &WeekSchedule {
        &self.state.items
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(keys::SCHEDULE_STATE, &self.state)
    }

    /// Hand out the next task id and advance the counter
    pub fn allocate_task_id(&mut self) -> Result<u32> {
        let id = self.state.next_task_id;
        self.state.next_task_id += 1;
        self.persist()?;
        Ok(id)
    }

    /// Apply an arbitrary edit to the calendar and persist the result
    pub fn update_items(&mut self, edit: impl FnOnce(&mut WeekSchedule)) -> Result<()> {
        edit(&mut self.state.items);
        self.state.items.normalize();
        self.persist()
    }

    /// Create an item from the task form on the given day
    ///
    /// Returns the id assigned to the new item. The id allocation and the
    /// insertion persist together.
    pub fn add_task(&mut self, day: Weekday, form: &TaskForm) -> Result<u32> {
        let id = self.state.next_task_id;
        self.state.next_task_id += 1;
        let item = ScheduleItem::from_form(form, id);
        debug!(%day, id, title = %item.title, "ScheduleStore::add_task: adding item");
        self.state.items.push(day, item);
        self.persist()?;
        Ok(id)
    }

    /// Toggle one item's completion flag
    ///
    /// Returns false, without persisting, when no such item exists.
    pub fn toggle_completion(&mut self, day: Weekday, id: u32) -> Result<bool> {
        if !self.state.items.toggle_completion(day, id) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Splice a generated schedule into one week of the calendar
    ///
    /// Items outside the seven `week_dates`, and undated items, survive;
    /// this week's dated items are replaced by the projection. Consumes one
    /// id per block, so regenerating produces fresh ids every time even
    /// though the merge itself is idempotent.
    pub fn apply_generated(
        &mut self,
        generated: &GeneratedSchedule,
        week_dates: &[NaiveDate; 7],
    ) -> Result<()> {
        let incoming = schedule_from_generated(generated, week_dates, self.state.next_task_id);
        self.state.items = merge_week(&self.state.items, &incoming, week_dates);
        self.state.next_task_id += generated.total_blocks() as u32;
        debug!(
            blocks = generated.total_blocks(),
            next_task_id = self.state.next_task_id,
            "ScheduleStore::apply_generated: merged generated week"
        );
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockType, DayPlan, Priority, ScheduleBlock, ScheduleSummary};
    use crate::transform::week_dates_for;
    use tempfile::TempDir;

    fn store() -> (TempDir, ScheduleStore) {
        let dir = TempDir::new().expect("temp dir");
        let storage = Storage::open(dir.path()).unwrap();
        let store = ScheduleStore::load(&storage);
        (dir, store)
    }

    fn form(name: &str) -> TaskForm {
        TaskForm {
            name: name.to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            due_date: None,
            priority: Priority::Medium,
        }
    }

    fn generated(day: &str, titles: &[&str]) -> GeneratedSchedule {
        GeneratedSchedule {
            summary: ScheduleSummary {
                total_credits: 0.0,
                study_hours: 0.0,
                class_hours: 0.0,
                work_hours: 0.0,
                other_hours: 0.0,
                committed_hours: 0.0,
                available_hours: 0.0,
                buffer_hours: 0.0,
            },
            weekly_schedule: vec![DayPlan {
                day: day.to_string(),
                blocks: titles
                    .iter()
                    .map(|title| ScheduleBlock {
                        start_time: "09:00".to_string(),
                        end_time: "10:00".to_string(),
                        block_type: BlockType::Study,
                        title: title.to_string(),
                        location: None,
                        credits: None,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_ids_start_at_one_and_never_repeat() {
        let (_dir, mut store) = store();
        let a = store.add_task(Weekday::Mon, &form("a")).unwrap();
        let b = store.add_task(Weekday::Mon, &form("b")).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.state().next_task_id, 3);
    }

    #[test]
    fn test_allocate_task_id_persists_counter() {
        let (dir, mut store) = store();
        assert_eq!(store.allocate_task_id().unwrap(), 1);
        assert_eq!(store.allocate_task_id().unwrap(), 2);

        let storage = Storage::open(dir.path()).unwrap();
        let reloaded = ScheduleStore::load(&storage);
        assert_eq!(reloaded.state().next_task_id, 3);
    }

    #[test]
    fn test_toggle_completion_round_trips() {
        let (dir, mut store) = store();
        let id = store.add_task(Weekday::Wed, &form("lab")).unwrap();

        assert!(store.toggle_completion(Weekday::Wed, id).unwrap());
        assert!(!store.toggle_completion(Weekday::Thu, id).unwrap());

        let storage = Storage::open(dir.path()).unwrap();
        let reloaded = ScheduleStore::load(&storage);
        assert!(reloaded.items().day(Weekday::Wed)[0].completed);
    }

    #[test]
    fn test_apply_generated_assigns_and_advances_ids() {
        let (_dir, mut store) = store();
        store.add_task(Weekday::Mon, &form("existing")).unwrap();

        let week_dates = week_dates_for(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        store
            .apply_generated(&generated("Tuesday", &["Read", "Review"]), &week_dates)
            .unwrap();

        let ids: Vec<u32> = store
            .items()
            .day(Weekday::Tue)
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(store.state().next_task_id, 4);
    }

    #[test]
    fn test_apply_generated_twice_keeps_one_copy() {
        let (_dir, mut store) = store();
        let week_dates = week_dates_for(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let schedule = generated("Friday", &["Gym"]);

        store.apply_generated(&schedule, &week_dates).unwrap();
        store.apply_generated(&schedule, &week_dates).unwrap();

        // One item survives, under the second application's fresh id
        let items = store.items().day(Weekday::Fri);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
        assert_eq!(store.state().next_task_id, 3);
    }

    #[test]
    fn test_apply_generated_keeps_undated_items() {
        let (_dir, mut store) = store();
        store.add_task(Weekday::Mon, &form("undated legacy")).unwrap();

        let week_dates = week_dates_for(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        store
            .apply_generated(&generated("Monday", &["Calc"]), &week_dates)
            .unwrap();

        let titles: Vec<&str> = store
            .items()
            .day(Weekday::Mon)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["undated legacy", "Calc"]);
    }

    #[test]
    fn test_state_survives_reload() {
        let (dir, mut store) = store();
        store.add_task(Weekday::Sun, &form("review")).unwrap();

        let storage = Storage::open(dir.path()).unwrap();
        let reloaded = ScheduleStore::load(&storage);
        assert_eq!(reloaded.state(), store.state());
    }
}
