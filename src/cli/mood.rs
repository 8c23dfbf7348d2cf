use anyhow::Result;
use clap::Subcommand;

use crate::tracker::mood;

use super::{
    output::{print_boxed, suffix},
    CliContext,
};

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    #[command(about = "Log a mood entry")]
    Log {
        #[arg(help = "Mood rating 1-10")]
        rating: u8,
        #[arg(long, help = "Optional mood note")]
        note: Option<String>,
    },
    #[command(about = "Show mood trend as bars")]
    Graph {
        #[arg(long, help = "Limit to most recent N entries")]
        limit: Option<usize>,
    },
}

pub async fn process_mood_command(command: MoodCommand, context: &CliContext) -> Result<()> {
    match command {
        MoodCommand::Log { rating, note } => {
            let entry = context
                .update(|document, clock| mood::log(document, rating, note, clock))
                .await?;
            println!(
                "Mood logged: {}/{}{}.",
                entry.rating,
                mood::MAX_RATING,
                suffix(" - ", entry.note.as_deref())
            );
        }
        MoodCommand::Graph { limit } => {
            let document = context.read().await;
            if document.mood.is_empty() {
                println!("No mood entries yet. Add one with 'mood log'.");
                return Ok(());
            }
            print_boxed("Mood trend (latest last)");
            for line in mood::graph(&document, limit) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
