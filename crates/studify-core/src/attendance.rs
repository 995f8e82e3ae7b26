//! Attendance budget ("how many more classes can I skip?").

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_TOTAL_CLASSES: u32 = 1;
pub const MAX_TOTAL_CLASSES: u32 = 50;
/// Requirement buttons offered by the attendance page.
pub const REQUIREMENT_PRESETS: [u32; 4] = [70, 75, 80, 85];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceStats {
    /// Classes held so far.
    pub total: u32,
    pub attended: u32,
    /// Minimum attendance in percent.
    pub required: u32,
}

impl Default for AttendanceStats {
    fn default() -> Self {
        Self {
            total: 20,
            attended: 18,
            required: 70,
        }
    }
}

impl AttendanceStats {
    /// Validated constructor. `attended` is clamped to `total`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `total` is outside `[1, 50]` or
    /// `required` outside `[1, 100]`.
    pub fn new(total: u32, attended: u32, required: u32) -> Result<Self, ValidationError> {
        if !(MIN_TOTAL_CLASSES..=MAX_TOTAL_CLASSES).contains(&total) {
            return Err(ValidationError::out_of_range(
                "total",
                f64::from(MIN_TOTAL_CLASSES),
                f64::from(MAX_TOTAL_CLASSES),
                f64::from(total),
            ));
        }
        if !(1..=100).contains(&required) {
            return Err(ValidationError::out_of_range(
                "required",
                1.0,
                100.0,
                f64::from(required),
            ));
        }
        Ok(Self {
            total,
            attended: attended.min(total),
            required,
        })
    }

    /// Change the number of classes held, pulling `attended` down with it.
    pub fn set_total(&mut self, total: u32) {
        self.total = total;
        self.attended = self.attended.min(total);
    }

    /// Attendance rounded to the nearest whole percent.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.attended) / f64::from(self.total) * 100.0).round() as u32
    }

    /// Classes that can still be missed while staying at the requirement.
    ///
    /// Negative when already below it.
    pub fn safe_skips(&self) -> i64 {
        let ratio = f64::from(self.required.max(1)) / 100.0;
        (f64::from(self.attended) / ratio - f64::from(self.total)).floor() as i64
    }

    pub fn is_safe(&self) -> bool {
        self.percentage() >= self.required
    }

    pub fn verdict(&self) -> AttendanceVerdict {
        if self.is_safe() {
            AttendanceVerdict::Safe {
                skips_left: self.safe_skips().max(0) as u32,
            }
        } else {
            AttendanceVerdict::Danger
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AttendanceVerdict {
    Safe { skips_left: u32 },
    Danger,
}

impl fmt::Display for AttendanceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceVerdict::Safe { skips_left } => {
                write!(f, "Safe! You can skip {skips_left} more.")
            }
            AttendanceVerdict::Danger => f.write_str("DANGER! Go to class!"),
        }
    }
}

/// Serializable snapshot for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    #[serde(flatten)]
    pub stats: AttendanceStats,
    pub percentage: u32,
    pub safe: bool,
    pub verdict: AttendanceVerdict,
    pub message: String,
}

impl From<AttendanceStats> for AttendanceReport {
    fn from(stats: AttendanceStats) -> Self {
        let verdict = stats.verdict();
        Self {
            stats,
            percentage: stats.percentage(),
            safe: stats.is_safe(),
            verdict,
            message: verdict.to_string(),
        }
    }
}
