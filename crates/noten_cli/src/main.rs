//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `noten_core` linkage against the real data directory.
//! - Print a deterministic one-screen summary of the stored document.

use chrono::Local;
use noten_core::paths::{default_data_dir, log_dir};
use noten_core::{
    core_version, default_log_level, init_logging, JsonProjectRepository, ProjectRepository,
    ScheduleScope,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("noten_core version={}", core_version());

    let data_dir = match default_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("noten_cli data_dir error={err}");
            return ExitCode::FAILURE;
        }
    };
    println!("noten_core data_dir={}", data_dir.display());

    if let Err(err) = init_logging(default_log_level(), &log_dir(&data_dir).to_string_lossy()) {
        eprintln!("noten_cli logging disabled error={err}");
    }

    let repo = JsonProjectRepository::in_dir(&data_dir);
    let data = match repo.load() {
        Ok(data) => data,
        Err(err) => {
            log::error!("event=cli_load module=cli status=error error={}", err);
            eprintln!("noten_cli load error={err}");
            return ExitCode::FAILURE;
        }
    };

    println!("noten_core projects={}", data.projects.len());
    let active = data
        .project(data.active_project_id)
        .or_else(|| data.projects.first());
    if let Some(project) = active {
        let today = Local::now().date_naive();
        let visible =
            noten_core::filter_and_sort(&project.schedule_entries, ScheduleScope::Today, today);
        println!(
            "noten_core active_lists={} today_entries={}",
            project.lists.len(),
            visible.len()
        );
    }

    ExitCode::SUCCESS
}
