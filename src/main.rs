mod config;
mod fixtures;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::load_config_or_default;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use timetable_core::types::{CourseId, GroupId, MaterialiseScope, StudentId, TeacherId};
use timetable_core::{CoreEngine, CoreError};

#[derive(Parser)]
#[command(name = "timetable-core")]
#[command(about = "Timetable generator and attendance capture demonstrator")]
#[command(version)]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full walkthrough against the bundled demo dataset:
    /// feasibility, regeneration, materialisation, and one attendance scan.
    Demo {
        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Only check feasibility of the bundled demo dataset
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config);

    match cli.command {
        Commands::Demo { quiet } => run_demo(quiet, &config),
        Commands::Check => run_check(),
    }
}

fn run_check() -> Result<()> {
    let engine = CoreEngine::new(fixtures::demo_repository());
    match engine.check_feasibility() {
        Ok(()) => {
            println!("{}", "Feasible".green().bold());
            Ok(())
        }
        Err(CoreError::Infeasible { reason, entity_ref }) => {
            println!("{} {} ({})", "Infeasible:".red().bold(), reason, entity_ref);
            Ok(())
        }
        Err(err) => Err(err).context("feasibility check failed"),
    }
}

fn run_demo(quiet: bool, config: &config::EngineConfig) -> Result<()> {
    println!("{}", "Timetable Core Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(4);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let demo_date = NaiveDate::parse_from_str(&config.demo_date, "%Y-%m-%d")
        .context("config demo_date must be YYYY-MM-DD")?;

    let engine = CoreEngine::new(fixtures::demo_repository());

    progress.set_message("Checking feasibility...");
    engine.check_feasibility().context("bundled demo dataset is infeasible")?;
    progress.inc(1);

    progress.set_message("Generating timetable...");
    let deadline = config
        .regenerate_timeout_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let report = engine
        .regenerate(&[GroupId::from("grade10")], deadline)
        .context("regeneration failed")?;
    progress.inc(1);
    println!("  placed {} assignments", report.assignment_count);

    progress.set_message("Materialising class instances...");
    let range_end = demo_date.succ_opt().unwrap().succ_opt().unwrap();
    let instances = engine
        .materialise_instances((demo_date, range_end), MaterialiseScope::All)
        .context("materialisation failed")?;
    progress.inc(1);
    println!("  {} class instance(s) on {}", instances.len(), demo_date);

    progress.set_message("Issuing and scanning an attendance token...");
    let now = Utc.from_utc_datetime(&demo_date.and_time(NaiveTime::from_hms_opt(8, 45, 0).unwrap()));
    let token = engine.issue_attendance_token(&StudentId::from("alice"), now)?;

    let math_instance_today = instances
        .iter()
        .find(|i| i.assignment.course_id == CourseId::from("math101") && i.date == demo_date);

    if let Some(instance) = math_instance_today {
        let scan_time = Utc.from_utc_datetime(&demo_date.and_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()));
        let outcome = engine.scan(&token.nonce, &instance.id, &TeacherId::from("t-math"), scan_time)?;
        println!("  scan outcome: {:?}", outcome);
    }
    progress.inc(1);
    progress.finish_with_message("done");

    println!("{}", "Demo complete.".green().bold());
    Ok(())
}
