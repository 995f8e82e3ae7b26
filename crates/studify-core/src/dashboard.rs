//! Home screen summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceReport;
use crate::error::ValidationError;
use crate::exam::ExamStatus;
use crate::plan::TaskRef;
use crate::storage::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub name: String,
    pub major: String,
    pub active_task: TaskRef,
    pub exam: ExamStatus,
    pub attendance: AttendanceReport,
}

impl Dashboard {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the stored exam prep level is invalid.
    pub fn build(config: &Config, today: NaiveDate) -> Result<Self, ValidationError> {
        Ok(Self {
            name: config.profile.name.clone(),
            major: config.profile.major.clone(),
            active_task: config.task.clone(),
            exam: ExamStatus::from_config(&config.exam, today)?,
            attendance: AttendanceReport::from(config.attendance),
        })
    }

    /// First word of the student's name, for the greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("Student")
    }
}
