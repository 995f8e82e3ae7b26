use clap::Subcommand;
use studify_core::attendance::REQUIREMENT_PRESETS;
use studify_core::{AttendanceReport, AttendanceStats, Config};

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Show attendance percentage and skip budget
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Update attendance counters
    Set {
        /// Classes held so far (1-50)
        #[arg(long)]
        total: Option<u32>,
        /// Classes attended
        #[arg(long)]
        attended: Option<u32>,
        /// Minimum attendance in percent (presets: 70, 75, 80, 85)
        #[arg(long)]
        required: Option<u32>,
    },
}

pub fn run(action: AttendanceAction) -> studify_core::Result<()> {
    match action {
        AttendanceAction::Show { json } => {
            let config = Config::load_or_default();
            let report = AttendanceReport::from(config.attendance);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Attendance: {}% ({}/{} classes, {}% required)",
                    report.percentage,
                    report.stats.attended,
                    report.stats.total,
                    report.stats.required
                );
                println!("{}", report.message);
            }
        }
        AttendanceAction::Set {
            total,
            attended,
            required,
        } => {
            let mut config = Config::load()?;
            let current = config.attendance;
            config.attendance = AttendanceStats::new(
                total.unwrap_or(current.total),
                attended.unwrap_or(current.attended),
                required.unwrap_or(current.required),
            )?;
            if !REQUIREMENT_PRESETS.contains(&config.attendance.required) {
                tracing::warn!(
                    required = config.attendance.required,
                    "requirement is not one of the usual presets {:?}",
                    REQUIREMENT_PRESETS
                );
            }
            config.save()?;
            println!("{}", AttendanceReport::from(config.attendance).message);
        }
    }
    Ok(())
}
