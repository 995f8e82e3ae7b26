//! Day planner: turns "I have N hours" into a sequence of study and break blocks.
//!
//! The types here are plain data. [`generate`] does the work; it reads the
//! clock once and never touches storage. Callers decide whether to keep the
//! resulting [`Schedule`].

mod generator;

pub use generator::{
    first_slot, generate, generate_at, BREAK_MINUTES, START_ROUNDING_MINUTES, WORK_BLOCK_MINUTES,
};

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_HOURS: f64 = 1.0;
pub const MAX_HOURS: f64 = 8.0;
pub const HOURS_STEP: f64 = 0.5;

pub const DEFAULT_EXAM_SUBJECT: &str = "Exam";
pub const DEFAULT_TASK_SUBJECT: &str = "Task";
pub const DEFAULT_TASK_TITLE: &str = "Assignment";

pub const EXAM_TOPIC: &str = "Deep Focus Study";
pub const BREAK_SUBJECT: &str = "Break";
pub const BREAK_TOPIC: &str = "Recharge Brain";

/// How work blocks are shared between the exam and the current task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Alternate exam and task blocks, exam first.
    #[default]
    Balanced,
    /// Every work block goes to the exam.
    Panic,
}

impl Intensity {
    /// Kind of the `work_index`-th work block (breaks not counted).
    pub fn kind_for(self, work_index: usize) -> BlockKind {
        match self {
            Intensity::Balanced if work_index % 2 == 1 => BlockKind::Task,
            _ => BlockKind::Exam,
        }
    }

    /// Human-facing label shown above a generated plan.
    pub fn label(self) -> &'static str {
        match self {
            Intensity::Balanced => "Balanced Flow",
            Intensity::Panic => "High Intensity",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Intensity::Balanced => "balanced",
            Intensity::Panic => "panic",
        })
    }
}

impl FromStr for Intensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Intensity::Balanced),
            "panic" => Ok(Intensity::Panic),
            other => Err(ValidationError::InvalidValue {
                field: "intensity".into(),
                message: format!("expected 'balanced' or 'panic', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Exam,
    Task,
    Break,
}

impl BlockKind {
    pub fn is_work(self) -> bool {
        !matches!(self, BlockKind::Break)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::Exam => "exam",
            BlockKind::Task => "task",
            BlockKind::Break => "break",
        })
    }
}

/// The task the student is currently working on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRef {
    pub subject: String,
    pub title: String,
}

impl TaskRef {
    pub fn new(subject: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
        }
    }
}

impl Default for TaskRef {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_SUBJECT, DEFAULT_TASK_TITLE)
    }
}

/// Input to one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub total_minutes: u32,
    pub intensity: Intensity,
    pub exam_subject: String,
    pub task: TaskRef,
}

impl ScheduleRequest {
    /// Request with the placeholder subjects.
    pub fn new(total_minutes: u32, intensity: Intensity) -> Self {
        Self {
            total_minutes,
            intensity,
            exam_subject: DEFAULT_EXAM_SUBJECT.to_string(),
            task: TaskRef::default(),
        }
    }

    /// Build a request from the hours slider value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `hours` is outside `[1, 8]` or not a
    /// multiple of `0.5`.
    pub fn from_hours(hours: f64, intensity: Intensity) -> Result<Self, ValidationError> {
        Ok(Self::new(hours_to_minutes(hours)?, intensity))
    }

    /// Use `subject` for exam blocks. Blank input keeps the placeholder.
    pub fn with_exam_subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        if !subject.trim().is_empty() {
            self.exam_subject = subject;
        }
        self
    }

    pub fn with_task(mut self, task: TaskRef) -> Self {
        self.task = task;
        self
    }
}

/// Convert a slider value in hours to whole minutes.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `hours` is outside `[1, 8]` or not a
/// multiple of `0.5`.
pub fn hours_to_minutes(hours: f64) -> Result<u32, ValidationError> {
    if !hours.is_finite() || !(MIN_HOURS..=MAX_HOURS).contains(&hours) {
        return Err(ValidationError::out_of_range(
            "hours", MIN_HOURS, MAX_HOURS, hours,
        ));
    }
    let steps = hours / HOURS_STEP;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(ValidationError::InvalidStep {
            field: "hours".into(),
            step: HOURS_STEP,
            value: hours,
        });
    }
    Ok((hours * 60.0).round() as u32)
}

/// One entry of a generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub sequence_index: usize,
    pub start_time: NaiveDateTime,
    pub duration_minutes: u32,
    pub kind: BlockKind,
    pub subject: String,
    pub topic: String,
}

impl ScheduleBlock {
    pub(crate) fn rest(sequence_index: usize, start_time: NaiveDateTime) -> Self {
        Self {
            sequence_index,
            start_time,
            duration_minutes: BREAK_MINUTES,
            kind: BlockKind::Break,
            subject: BREAK_SUBJECT.to_string(),
            topic: BREAK_TOPIC.to_string(),
        }
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn is_break(&self) -> bool {
        self.kind == BlockKind::Break
    }

    /// Start time as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }
}

/// Ordered output of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub intensity: Intensity,
    /// Minutes that were requested.
    pub total_minutes: u32,
    pub blocks: Vec<ScheduleBlock>,
}

impl Schedule {
    /// Sum of all block durations.
    pub fn total_minutes_scheduled(&self) -> u32 {
        self.blocks.iter().map(|b| b.duration_minutes).sum()
    }

    pub fn work_blocks(&self) -> impl Iterator<Item = &ScheduleBlock> {
        self.blocks.iter().filter(|b| b.kind.is_work())
    }

    pub fn break_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_break()).count()
    }

    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.blocks.first().map(|b| b.start_time)
    }

    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        self.blocks.last().map(ScheduleBlock::end_time)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleBlock> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleBlock;
    type IntoIter = std::slice::Iter<'a, ScheduleBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
