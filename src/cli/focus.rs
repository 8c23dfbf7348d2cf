use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;

use crate::{
    error::validation,
    store::document::FocusSession,
    timer::{format_remaining, shutdown::detect_interrupt, Countdown, TimerOutcome},
    tracker::focus,
};

use super::{output::print_boxed, CliContext};

#[derive(Subcommand, Debug)]
pub enum FocusCommand {
    #[command(about = "Add a focus session")]
    Add {
        #[arg(help = "Task name")]
        task: String,
        #[arg(help = "Planned minutes")]
        minutes: u32,
        #[arg(
            long,
            num_args = 0..=1,
            value_name = "MINUTES",
            help = "Run a countdown before logging. Uses the planned minutes unless a value is given. Ctrl+C stops early and logs the elapsed minutes"
        )]
        timer: Option<Option<u32>>,
    },
    #[command(about = "Show focus totals and recent sessions")]
    Summary {
        #[arg(long, help = "Limit to most recent N sessions")]
        limit: Option<usize>,
    },
}

pub async fn process_focus_command(command: FocusCommand, context: &CliContext) -> Result<()> {
    match command {
        FocusCommand::Add {
            task,
            minutes,
            timer,
        } => {
            let task = focus::validate(&task, minutes)?;
            let actual_minutes = match timer {
                Some(timer_minutes) => {
                    let timer_minutes = timer_minutes.unwrap_or(minutes);
                    if timer_minutes == 0 {
                        return Err(validation("Timer minutes must be at least 1").into());
                    }
                    Some(run_timer(timer_minutes, context).await)
                }
                None => None,
            };

            let session = context
                .update(|document, clock| {
                    focus::add(document, &task, minutes, actual_minutes, clock)
                })
                .await?;
            println!(
                "Logged {} minutes on '{}'. Data saved to {}.",
                session.minutes(),
                session.task,
                context.store.path().display()
            );
            Ok(())
        }
        FocusCommand::Summary { limit } => {
            let document = context.read().await;
            if document.focus.is_empty() {
                println!("No focus sessions yet. Add one with 'focus add'.");
                return Ok(());
            }
            let summary = focus::summary(&document, limit);
            print_boxed(&format!("Total focus minutes: {}", summary.total_minutes));
            for session in summary.sessions {
                println!("{}", describe(session));
            }
            Ok(())
        }
    }
}

fn describe(session: &FocusSession) -> String {
    let minutes = match session.actual_minutes {
        Some(actual) => format!("{actual} of {} minutes", session.planned_minutes),
        None => format!("{} minutes", session.planned_minutes),
    };
    format!("{}: {} - {minutes}", session.timestamp, session.task)
}

/// Blocks on the countdown while showing the remaining time. Ctrl+C ends it early.
async fn run_timer(minutes: u32, context: &CliContext) -> u32 {
    println!("Starting timer for {minutes} minutes. Press Ctrl+C to stop early.");
    let shutdown = CancellationToken::new();
    let watcher = tokio::spawn(detect_interrupt(shutdown.clone()));

    let outcome = Countdown::from_minutes(minutes, context.clock.as_ref(), shutdown)
        .run(|remaining| {
            print!("\rTime left: {}", format_remaining(remaining));
            let _ = std::io::stdout().flush();
        })
        .await;
    watcher.abort();

    match outcome {
        TimerOutcome::Completed { .. } => println!("\nTimer finished!"),
        TimerOutcome::Cancelled { elapsed_minutes } => {
            println!("\nTimer stopped early. Logged {elapsed_minutes} minutes.")
        }
    }
    outcome.minutes()
}
