//! Day planner commands.

use chrono::NaiveDateTime;
use clap::Subcommand;
use studify_core::{
    generate, BlockKind, Config, FixedClock, Intensity, Schedule, ScheduleRequest, SystemClock,
};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate a plan starting at the next quarter hour
    Generate {
        /// Hours available, 1 to 8 in steps of 0.5 (default: planner.hours)
        #[arg(long)]
        hours: Option<f64>,
        /// balanced or panic (default: planner.intensity)
        #[arg(long)]
        intensity: Option<Intensity>,
        /// Plan as if it were this local time (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long, value_parser = parse_local_time)]
        at: Option<NaiveDateTime>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> studify_core::Result<()> {
    match action {
        PlanAction::Generate {
            hours,
            intensity,
            at,
            json,
        } => {
            let config = Config::load_or_default();
            let hours = hours.unwrap_or(config.planner.hours);
            let intensity = intensity.unwrap_or(config.planner.intensity);
            tracing::debug!(hours, %intensity, fixed_clock = at.is_some(), "plan requested");

            let request = ScheduleRequest::from_hours(hours, intensity)?
                .with_exam_subject(config.exam.subject.clone().unwrap_or_default())
                .with_task(config.task.clone());

            let schedule = match at {
                Some(at) => generate(&request, &FixedClock::new(at)),
                None => generate(&request, &SystemClock),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                print_plan(&schedule, hours);
            }
        }
    }
    Ok(())
}

fn parse_local_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("invalid time '{s}', expected YYYY-MM-DDTHH:MM"))
}

fn print_plan(schedule: &Schedule, hours: f64) {
    println!("Your Plan: {} hours, {}", hours, schedule.intensity.label());
    println!();
    for block in schedule {
        let marker = match block.kind {
            BlockKind::Exam => "EXAM ",
            BlockKind::Task => "TASK ",
            BlockKind::Break => "BREAK",
        };
        println!(
            "  {}  {:>3}m  {}  {} - {}",
            block.time_label(),
            block.duration_minutes,
            marker,
            block.subject,
            block.topic
        );
    }
    if let Some(end) = schedule.ends_at() {
        println!();
        println!(
            "Done at {} ({} work blocks, {} breaks)",
            end.format("%H:%M"),
            schedule.work_blocks().count(),
            schedule.break_count()
        );
    }
}
