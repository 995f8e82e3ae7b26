//! Day-plan generation.
//!
//! Fills the requested minutes with 45-minute work blocks separated by
//! 10-minute breaks, starting at the next quarter hour:
//!
//! ```text
//! [exam 45][break 10][task 45][break 10][exam <=45] ...
//! ```
//!
//! The last work block is shortened to whatever is left. A break is only
//! placed when it fits entirely, so the blocks always add up to exactly
//! the requested total.

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::debug;

use super::{BlockKind, Schedule, ScheduleBlock, ScheduleRequest, EXAM_TOPIC};
use crate::clock::Clock;

/// Default length of a work block.
pub const WORK_BLOCK_MINUTES: u32 = 45;
/// Fixed length of a break block.
pub const BREAK_MINUTES: u32 = 10;
/// Plans start on a multiple of this many minutes past the hour.
pub const START_ROUNDING_MINUTES: u32 = 15;

/// Generate a plan starting from the clock's current time.
///
/// The clock is read exactly once.
pub fn generate(request: &ScheduleRequest, clock: &impl Clock) -> Schedule {
    generate_at(request, clock.now())
}

/// Generate a plan as if the current time were `now`.
pub fn generate_at(request: &ScheduleRequest, now: NaiveDateTime) -> Schedule {
    let total = request.total_minutes;
    let mut blocks = Vec::new();
    let mut cursor = first_slot(now);
    let mut used = 0u32;
    let mut work_index = 0usize;

    while used < total {
        let duration = WORK_BLOCK_MINUTES.min(total - used);
        let kind = request.intensity.kind_for(work_index);
        let (subject, topic) = match kind {
            BlockKind::Task => (request.task.subject.clone(), request.task.title.clone()),
            _ => (request.exam_subject.clone(), EXAM_TOPIC.to_string()),
        };

        blocks.push(ScheduleBlock {
            sequence_index: blocks.len(),
            start_time: cursor,
            duration_minutes: duration,
            kind,
            subject,
            topic,
        });
        cursor += Duration::minutes(i64::from(duration));
        used += duration;
        work_index += 1;

        if used < total && used + BREAK_MINUTES <= total {
            blocks.push(ScheduleBlock::rest(blocks.len(), cursor));
            cursor += Duration::minutes(i64::from(BREAK_MINUTES));
            used += BREAK_MINUTES;
        }
    }

    debug!(
        total_minutes = total,
        intensity = %request.intensity,
        blocks = blocks.len(),
        work_blocks = work_index,
        "generated day plan"
    );

    Schedule {
        intensity: request.intensity,
        total_minutes: total,
        blocks,
    }
}

/// Start of the first block for a plan requested at `now`.
///
/// Always moves forward by `15 - (minute % 15)` minutes, so a request made
/// exactly on a quarter hour starts at the *next* quarter hour. Seconds are
/// carried over unchanged.
pub fn first_slot(now: NaiveDateTime) -> NaiveDateTime {
    let past = now.minute() % START_ROUNDING_MINUTES;
    now + Duration::minutes(i64::from(START_ROUNDING_MINUTES - past))
}
