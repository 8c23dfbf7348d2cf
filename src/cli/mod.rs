pub mod focus;
pub mod journal;
pub mod mood;
pub mod output;
pub mod summary;
pub mod vyvanse;
pub mod water;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use focus::{process_focus_command, FocusCommand};
use journal::{process_hemp_command, process_substance_command, HempCommand, SubstanceCommand};
use mood::{process_mood_command, MoodCommand};
use output::report;
use summary::process_summary_command;
use tracing::{info, level_filters::LevelFilter};
use vyvanse::{process_vyvanse_command, VyvanseCommand};
use water::{process_water_command, WaterCommand};

use crate::{
    error,
    store::{
        document::Document,
        json_store::{JsonStore, Loaded},
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_log_path, default_data_path},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "ChaosCatcher", version, long_about = None)]
#[command(about = "Self-care tracker for focus, mood, water, medication and substance use", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        env = "CHAOSCATCHER_DATA",
        help = "Path of the data file. By default ~/.chaoscatcher.json"
    )]
    data: Option<PathBuf>,
    #[arg(long, global = true, help = "Show logs in the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Track focus sessions")]
    Focus {
        #[command(subcommand)]
        command: FocusCommand,
    },
    #[command(about = "Log moods and view a trend graph")]
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },
    #[command(about = "Track water intake in ml")]
    Water {
        #[command(subcommand)]
        command: WaterCommand,
    },
    #[command(about = "Manage the Vyvanse pill counter")]
    Vyvanse {
        #[command(subcommand)]
        command: VyvanseCommand,
    },
    #[command(about = "Log hemp use, or list recent entries when no amount is given")]
    Hemp {
        #[command(flatten)]
        command: HempCommand,
    },
    #[command(about = "Log other substances")]
    Substance {
        #[command(flatten)]
        command: SubstanceCommand,
    },
    #[command(about = "Show a dashboard across every tracker")]
    Summary {},
}

/// What every command works with: where the document lives and what time it is.
pub struct CliContext {
    pub store: JsonStore,
    pub clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(store: JsonStore, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn read(&self) -> Document {
        let Loaded {
            document,
            recovered,
        } = self.store.load().await;
        if let Some(e) = recovered {
            report(&format!("Warning: {e}. Showing an empty document instead"));
        }
        document
    }

    /// Loads the document, applies `change` and writes the result back. Nothing is written when
    /// `change` fails. An unreadable file is moved aside before being replaced.
    pub async fn update<T>(
        &self,
        change: impl FnOnce(&mut Document, &dyn Clock) -> error::Result<T>,
    ) -> Result<T> {
        let Loaded {
            mut document,
            recovered,
        } = self.store.load().await;
        if let Some(e) = &recovered {
            report(&format!("Warning: {e}. Starting from an empty document"));
        }
        let result = change(&mut document, self.clock.as_ref())?;
        if recovered.is_some() {
            let kept = self.store.set_aside().await?;
            report(&format!("The unreadable file was kept at {}", kept.display()));
        }
        self.store.save(&document).await?;
        info!("Saved document into {:?}", self.store.path());
        Ok(result)
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    // File logs are a convenience, a missing state directory shouldn't block tracking.
    let log_dir = create_application_log_path().ok();
    enable_logging(CLI_PREFIX, log_dir.as_deref(), logging_level, args.log)?;

    let data_path = args.data.map_or_else(default_data_path, Ok)?;
    let context = CliContext::new(JsonStore::new(data_path), Box::new(DefaultClock));

    match args.commands {
        Commands::Focus { command } => process_focus_command(command, &context).await,
        Commands::Mood { command } => process_mood_command(command, &context).await,
        Commands::Water { command } => process_water_command(command, &context).await,
        Commands::Vyvanse { command } => process_vyvanse_command(command, &context).await,
        Commands::Hemp { command } => process_hemp_command(command, &context).await,
        Commands::Substance { command } => process_substance_command(command, &context).await,
        Commands::Summary {} => process_summary_command(&context).await,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use clap::CommandFactory;
    use tempfile::tempdir;

    use crate::{
        error::TrackerError,
        store::json_store::JsonStore,
        tracker::{mood, vyvanse},
        utils::clock::DefaultClock,
    };

    use super::{Args, CliContext};

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[tokio::test]
    async fn test_update_persists_successful_change() -> Result<()> {
        let dir = tempdir()?;
        let context = CliContext::new(
            JsonStore::new(dir.path().join("data.json")),
            Box::new(DefaultClock),
        );

        context
            .update(|document, clock| mood::log(document, 8, None, clock))
            .await?;

        assert_eq!(context.read().await.mood.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_skips_write_on_failure() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        let context = CliContext::new(JsonStore::new(path.clone()), Box::new(DefaultClock));
        context
            .update(|document, clock| vyvanse::configure(document, 2, 1, clock))
            .await?;
        let before = std::fs::read(&path)?;

        let result = context
            .update(|document, clock| vyvanse::take(document, 3, clock))
            .await;

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TrackerError>(),
            Some(TrackerError::InsufficientPills { .. })
        ));
        assert_eq!(std::fs::read(&path)?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_moves_unreadable_file_aside() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{\"mood\": [],}")?;
        let context = CliContext::new(JsonStore::new(path.clone()), Box::new(DefaultClock));

        context
            .update(|document, clock| mood::log(document, 8, None, clock))
            .await?;

        let kept = dir.path().join("data.json.corrupt");
        assert_eq!(std::fs::read_to_string(kept)?, "{\"mood\": [],}");
        assert_eq!(context.read().await.mood.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_update_leaves_unreadable_file_in_place() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        std::fs::write(&path, "not json")?;
        let context = CliContext::new(JsonStore::new(path.clone()), Box::new(DefaultClock));

        let result = context
            .update(|document, clock| vyvanse::take(document, 1, clock))
            .await;

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path)?, "not json");
        assert!(!dir.path().join("data.json.corrupt").exists());
        Ok(())
    }
}
