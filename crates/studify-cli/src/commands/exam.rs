use chrono::NaiveDate;
use clap::Subcommand;
use studify_core::{Clock, Config, ExamStatus, PrepLevel, SystemClock};

#[derive(Subcommand)]
pub enum ExamAction {
    /// Show prep zone and days until the exam
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Update exam details
    Set {
        /// Exam subject
        #[arg(long)]
        subject: Option<String>,
        /// Exam date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Preparation level in percent (0-100)
        #[arg(long)]
        prep: Option<u8>,
    },
    /// Forget the exam (subject, date, prep level)
    Reset,
}

pub fn run(action: ExamAction) -> studify_core::Result<()> {
    match action {
        ExamAction::Show { json } => {
            let config = Config::load_or_default();
            let status = ExamStatus::from_config(&config.exam, SystemClock.today())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}: {}% prepared, {}", status.subject, status.prep, status.message);
                println!("{}", status.countdown());
                println!("Suggested planner intensity: {}", status.suggested_intensity);
            }
        }
        ExamAction::Set {
            subject,
            date,
            prep,
        } => {
            let mut config = Config::load()?;
            if let Some(subject) = subject {
                config.exam.subject = Some(subject);
            }
            if let Some(date) = date {
                config.exam.date = Some(date);
            }
            if let Some(prep) = prep {
                config.exam.prep = PrepLevel::new(prep)?.value();
            }
            config.save()?;
            println!("exam updated");
        }
        ExamAction::Reset => {
            let mut config = Config::load()?;
            config.reset_exam();
            config.save()?;
            println!("exam reset");
        }
    }
    Ok(())
}
