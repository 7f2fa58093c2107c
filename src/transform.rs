//! Projection of generated schedules into the weekly calendar
//!
//! Two pure functions do all the work: `schedule_from_generated` turns a
//! validated generation result into calendar items pinned to concrete dates,
//! and `merge_week` splices those items into the live schedule for exactly
//! the seven dates in question. Regenerating a week is idempotent and never
//! reaches across a week boundary or evicts an undated legacy item.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::domain::{GeneratedSchedule, ScheduleBlock, ScheduleItem, Weekday, WeekSchedule};
use crate::schema::MAX_TITLE_LEN;
use crate::schema::time::format_time_24_to_12;

/// The Monday-start week of dates containing `date`
pub fn week_dates_for(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Days::new(date.weekday().num_days_from_monday() as u64);
    std::array::from_fn(|i| monday + Days::new(i as u64))
}

/// Project a generated schedule onto the seven dates of one week
///
/// Day entries with unrecognized names are skipped rather than failing the
/// projection. Ids are assigned as a contiguous increasing run starting at
/// `starting_id`, consuming exactly one id per block; the caller advances
/// its counter by [`GeneratedSchedule::total_blocks`] in the same operation.
pub fn schedule_from_generated(
    generated: &GeneratedSchedule,
    week_dates: &[NaiveDate; 7],
    starting_id: u32,
) -> WeekSchedule {
    let mut week = WeekSchedule::new();
    let mut next_id = starting_id;

    for day_plan in &generated.weekly_schedule {
        let Some(day) = Weekday::from_full_name(&day_plan.day) else {
            debug!(day = %day_plan.day, "schedule_from_generated: skipping unknown day name");
            continue;
        };
        let due_date = week_dates[day.index()];

        for block in &day_plan.blocks {
            week.push(day, item_from_block(block, next_id, due_date));
            next_id += 1;
        }
    }

    debug!(
        items = week.total_items(),
        starting_id, "schedule_from_generated: projected schedule"
    );
    week
}

fn item_from_block(block: &ScheduleBlock, id: u32, due_date: NaiveDate) -> ScheduleItem {
    let time = format!(
        "{} - {}",
        format_time_24_to_12(&block.start_time),
        format_time_24_to_12(&block.end_time)
    );
    ScheduleItem {
        id,
        title: display_title(block),
        time: Some(time),
        due_date: Some(due_date),
        priority: block.block_type.priority(),
        completed: false,
    }
}

/// Title with the location appended when it adds information
///
/// The location is skipped when it already appears in the title
/// (case-insensitive), and the result is clipped to the stored title bound
/// so a wordy model cannot produce an item that fails its own schema.
fn display_title(block: &ScheduleBlock) -> String {
    let mut title = block.title.clone();
    if let Some(location) = &block.location
        && !title.to_lowercase().contains(&location.to_lowercase())
    {
        title.push_str(" @ ");
        title.push_str(location);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        title = title.chars().take(MAX_TITLE_LEN).collect();
    }
    title
}

/// Replace one week's items, keeping everything outside it
///
/// Per day: existing items survive when they are undated or dated outside
/// the seven `week_dates`; incoming items are appended after the survivors.
/// Applying the same incoming schedule twice yields the same result as
/// applying it once.
pub fn merge_week(
    existing: &WeekSchedule,
    incoming: &WeekSchedule,
    week_dates: &[NaiveDate; 7],
) -> WeekSchedule {
    let mut merged = WeekSchedule::new();

    for day in Weekday::ALL {
        let slot = merged.day_mut(day);
        for item in existing.day(day) {
            let keep = match item.due_date {
                // Undated legacy items are never evicted
                None => true,
                Some(date) => !week_dates.contains(&date),
            };
            if keep {
                slot.push(item.clone());
            }
        }
        slot.extend(incoming.day(day).iter().cloned());
    }

    debug!(
        kept = merged.total_items() - incoming.total_items(),
        incoming = incoming.total_items(),
        "merge_week: merged week"
    );
    merged
}
