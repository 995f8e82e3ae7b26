use studify_core::{Clock, Config, Dashboard, SystemClock};

pub fn run(json: bool) -> studify_core::Result<()> {
    let config = Config::load_or_default();
    let dash = Dashboard::build(&config, SystemClock.today())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    println!("Hi, {} ({})", dash.first_name(), dash.major);
    println!();
    println!(
        "Current task:  {} - {}",
        dash.active_task.subject, dash.active_task.title
    );
    println!(
        "Exam:          {} ({}% prepared, {}) - {}",
        dash.exam.subject,
        dash.exam.prep,
        dash.exam.message,
        dash.exam.countdown()
    );
    println!(
        "Attendance:    {}% - {}",
        dash.attendance.percentage, dash.attendance.message
    );
    Ok(())
}
