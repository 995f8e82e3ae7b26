//! Current task commands.

use clap::Subcommand;
use studify_core::Config;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Show the current task
    Show,
    /// Update the current task
    Set {
        /// Task subject (e.g. "Math")
        #[arg(long)]
        subject: Option<String>,
        /// Task title (e.g. "Problem Set 3")
        #[arg(long)]
        title: Option<String>,
    },
}

pub fn run(action: TaskAction) -> studify_core::Result<()> {
    match action {
        TaskAction::Show => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config.task)?);
        }
        TaskAction::Set { subject, title } => {
            let mut config = Config::load()?;
            if let Some(subject) = subject {
                config.task.subject = subject;
            }
            if let Some(title) = title {
                config.task.title = title;
            }
            config.save()?;
            println!("task updated");
        }
    }
    Ok(())
}
