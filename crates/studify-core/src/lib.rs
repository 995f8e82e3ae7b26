//! # Studify Core Library
//!
//! Business logic for Studify, a student-productivity toolkit. All
//! operations are exposed here and driven by the `studify-cli` binary.
//!
//! ## Architecture
//!
//! - **Planner**: turns available hours into a sequence of study and break
//!   blocks. Pure apart from a single clock read
//! - **Attendance**: percentage and skip budget against a requirement
//! - **Exam pulse**: prep-level zones and days until the exam
//! - **Storage**: TOML-based configuration holding per-device state
//!
//! ## Key Components
//!
//! - [`generate`]: Day-plan generator
//! - [`Clock`]: Injected time source
//! - [`Config`]: Application configuration management
//! - [`Dashboard`]: Home screen summary

pub mod attendance;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod exam;
pub mod plan;
pub mod storage;

pub use attendance::{AttendanceReport, AttendanceStats, AttendanceVerdict};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::Dashboard;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use exam::{ExamStatus, PrepLevel, PrepZone};
pub use plan::{
    generate, generate_at, BlockKind, Intensity, Schedule, ScheduleBlock, ScheduleRequest, TaskRef,
};
pub use storage::Config;
