//! Exam pulse: how ready am I, and how long until the exam?

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::plan::{Intensity, DEFAULT_EXAM_SUBJECT};
use crate::storage::ExamConfig;

/// Below this prep level the pulse shows panic.
pub const PANIC_BELOW: u8 = 30;
/// From this prep level on the student is ready.
pub const READY_FROM: u8 = 70;

/// Self-assessed preparation in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrepLevel(u8);

impl PrepLevel {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `value` is above 100.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "prep",
                0.0,
                100.0,
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn zone(self) -> PrepZone {
        if self.0 < PANIC_BELOW {
            PrepZone::Panic
        } else if self.0 < READY_FROM {
            PrepZone::PushHarder
        } else {
            PrepZone::Ready
        }
    }
}

impl Default for PrepLevel {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for PrepLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrepLevel> for u8 {
    fn from(level: PrepLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepZone {
    Panic,
    PushHarder,
    Ready,
}

impl PrepZone {
    pub fn message(self) -> &'static str {
        match self {
            PrepZone::Panic => "Panic Mode",
            PrepZone::PushHarder => "Push Harder",
            PrepZone::Ready => "You're Ready",
        }
    }

    /// Planner intensity that fits this zone.
    pub fn suggested_intensity(self) -> Intensity {
        match self {
            PrepZone::Panic => Intensity::Panic,
            PrepZone::PushHarder | PrepZone::Ready => Intensity::Balanced,
        }
    }
}

/// Whole days from `today` to `exam_date`; negative once the exam is past.
pub fn days_until(exam_date: chrono::NaiveDate, today: chrono::NaiveDate) -> i64 {
    (exam_date - today).num_days()
}

/// Everything the pulse view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamStatus {
    pub subject: String,
    pub date: Option<chrono::NaiveDate>,
    pub days_left: Option<i64>,
    pub prep: u8,
    pub zone: PrepZone,
    pub message: String,
    pub suggested_intensity: Intensity,
}

impl ExamStatus {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the stored prep level is above 100.
    pub fn from_config(exam: &ExamConfig, today: chrono::NaiveDate) -> Result<Self, ValidationError> {
        let prep = PrepLevel::new(exam.prep)?;
        let zone = prep.zone();
        Ok(Self {
            subject: exam
                .subject
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXAM_SUBJECT.to_string()),
            date: exam.date,
            days_left: exam.date.map(|d| days_until(d, today)),
            prep: prep.value(),
            zone,
            message: zone.message().to_string(),
            suggested_intensity: zone.suggested_intensity(),
        })
    }

    /// Countdown line for text output. Past exams are reported in the past
    /// tense rather than as a negative count.
    pub fn countdown(&self) -> String {
        match self.days_left {
            None => "No exam date set".to_string(),
            Some(0) => "Exam is today".to_string(),
            Some(1) => "Exam tomorrow".to_string(),
            Some(-1) => "Exam was yesterday".to_string(),
            Some(d) if d > 0 => format!("Exam in {d} days"),
            Some(d) => format!("Exam was {} days ago", -d),
        }
    }
}
