use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};

use workout_scheduler::scheduler::WorkoutScheduler;
use workout_scheduler::services::api::HttpScheduleApi;
use workout_scheduler::services::notification::NotificationBus;
use workout_scheduler::services::settings::SettingsService;
use workout_scheduler::utils::date::{day_label, is_current_day, parse_api_date, today};

#[derive(Parser)]
#[command(name = "workout-scheduler", about = "Schedule workout routines on a weekly calendar")]
pub struct Cli {
    /// Settings file (defaults to the per-user scheduler.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Commands {
    /// Show a week of scheduled routines
    Week {
        /// Weeks relative to this week
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// List the routine catalog
    Routines,
    /// Schedule a routine on a day
    Schedule {
        routine_id: String,
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Move a scheduled event to another day
    Move {
        event_id: i64,
        /// Day the event is currently scheduled on
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },
    /// Delete a scheduled event
    Delete {
        event_id: i64,
        /// Day the event is scheduled on
        #[arg(long, value_parser = parse_date)]
        on: NaiveDate,
    },
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_api_date(value).ok_or_else(|| format!("expected a yyyy-mm-dd date, got '{}'", value))
}

/// Day `weeks` weeks away from `today`.
fn offset_day(today: NaiveDate, weeks: i64) -> Result<NaiveDate> {
    Duration::try_weeks(weeks)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or_else(|| anyhow!("Week offset {} is outside the supported calendar", weeks))
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = SettingsService::load(cli.config.as_deref())?;
    let api = HttpScheduleApi::new(&settings.api)?;

    let notifications = NotificationBus::new();
    notifications.subscribe_logger().detach();

    let mut scheduler = WorkoutScheduler::new(Arc::new(api), &settings.calendar, notifications);
    execute(cli.command, &mut scheduler).await?;

    if let Some(message) = scheduler.status().message() {
        eprintln!("warning: {}", message);
    }

    Ok(())
}

async fn execute(command: Commands, scheduler: &mut WorkoutScheduler) -> Result<()> {
    match command {
        Commands::Week { offset } => {
            show_week_of(scheduler, offset_day(today(), offset)?).await?;
            print_week(scheduler);
        }
        Commands::Routines => {
            for routine in scheduler.load_routines().await {
                println!("{:<12} {:<24} {}", routine.id, routine.name, routine.color_hex());
            }
        }
        Commands::Schedule { routine_id, date } => {
            scheduler.load_routines().await;
            show_week_of(scheduler, date).await?;
            if scheduler.begin_drag_routine(&routine_id).is_none() {
                return Err(anyhow!("Unknown routine '{}'", routine_id));
            }
            scheduler.complete_drag(date).await;
            print_week(scheduler);
        }
        Commands::Move { event_id, from, to } => {
            show_week_of(scheduler, from).await?;
            if scheduler.begin_drag_event(event_id).is_none() {
                return Err(anyhow!("Event {} is not scheduled in the week of {}", event_id, from));
            }
            scheduler.complete_drag(to).await;
            if !scheduler.current_range().contains(to) {
                show_week_of(scheduler, to).await?;
            }
            print_week(scheduler);
        }
        Commands::Delete { event_id, on } => {
            show_week_of(scheduler, on).await?;
            if scheduler.begin_drag_event(event_id).is_none() {
                return Err(anyhow!("Event {} is not scheduled in the week of {}", event_id, on));
            }
            scheduler.delete_current_event().await;
            print_week(scheduler);
        }
    }
    Ok(())
}

async fn show_week_of(scheduler: &mut WorkoutScheduler, day: NaiveDate) -> Result<()> {
    if !scheduler.jump_to(day).await.contains(day) {
        return Err(anyhow!("The week of {} is outside the supported calendar", day));
    }
    Ok(())
}

fn print_week(scheduler: &WorkoutScheduler) {
    let range = scheduler.current_range();
    println!("{} - {}", range.start(), range.end());

    let now = today();
    for day in scheduler.week_days() {
        let marker = if is_current_day(day, now) { "•" } else { " " };
        println!("{} {}", marker, day_label(day));
        for event in scheduler.events_on(day) {
            let id = event
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "pending".to_string());
            println!(
                "    [{}] {} ({})",
                id,
                event.routine.name,
                event.routine.color_hex()
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/fixtures/mod.rs"]
mod fixtures;
