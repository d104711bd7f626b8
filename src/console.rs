use chrono::Local;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

fn timestamp() -> ColoredString {
    format!("[{}]", Local::now().format("%H:%M:%S")).dimmed()
}

pub fn log_info(msg: &str) {
    println!("{} {} {}", timestamp(), "INFO".cyan().bold(), msg);
}

pub fn log_success(msg: &str) {
    println!("{} {} {}", timestamp(), "SUCCESS".green().bold(), msg);
}

pub fn log_warn(msg: &str) {
    println!("{} {} {}", timestamp(), "WARN".yellow().bold(), msg);
}

pub fn log_error(msg: &str) {
    println!("{} {} {}", timestamp(), "ERROR".red().bold(), msg);
}

pub fn step_header(title: &str, subtitle: &str) {
    println!();
    println!(
        "{} {} {}",
        "🔵".blue(),
        title.white().bold(),
        format!("({})", subtitle).cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
}

/// Progress bar over a known number of files. Draws to stderr and stays
/// hidden when stderr is not a terminal.
pub fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => bar.set_style(style.progress_chars("█▓░")),
        Err(error) => tracing::debug!("Falling back to default progress style: {}", error),
    }
    bar
}

pub fn pause() {
    println!("\n按回车键继续... (Press Enter to continue)");
    let _ = std::io::stdin().read_line(&mut String::new());
}

pub fn clear_terminal() {
    print!("\x1B[2J\x1B[1;1H");
}
