use anyhow::Result;

use crate::tracker::journal::{self, Reflection};

use super::{output::suffix, CliContext};

const DEFAULT_RECENT: usize = 10;

#[derive(clap::Args, Debug)]
pub struct HempCommand {
    #[arg(help = "Amount, for example \"25 mg\". Lists recent entries when omitted")]
    amount: Option<String>,
    #[arg(long, requires = "amount", help = "Immediate feeling")]
    feeling: Option<String>,
    #[arg(long, requires = "amount", help = "Outcome or notes")]
    outcome: Option<String>,
    #[arg(long, conflicts_with = "amount", help = "List the most recent N entries")]
    recent: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct SubstanceCommand {
    #[arg(required_unless_present = "recent", help = "Substance name")]
    name: Option<String>,
    #[arg(required_unless_present = "recent", help = "Amount or units consumed")]
    amount: Option<String>,
    #[arg(long, requires = "name", help = "Feeling after use")]
    feeling: Option<String>,
    #[arg(long, requires = "name", help = "Outcome or notes")]
    outcome: Option<String>,
    #[arg(long, conflicts_with_all = ["name", "amount"], help = "List the most recent N entries")]
    recent: Option<usize>,
}

pub async fn process_hemp_command(
    HempCommand {
        amount,
        feeling,
        outcome,
        recent,
    }: HempCommand,
    context: &CliContext,
) -> Result<()> {
    let Some(amount) = amount else {
        let document = context.read().await;
        let entries = journal::recent_hemp(&document, Some(recent.unwrap_or(DEFAULT_RECENT)));
        if entries.is_empty() {
            println!("No hemp entries yet.");
        }
        for entry in entries {
            println!(
                "{}: {}{}{}",
                entry.timestamp,
                entry.amount,
                suffix(" | feeling: ", entry.feeling.as_deref()),
                suffix(" | outcome: ", entry.outcome.as_deref())
            );
        }
        return Ok(());
    };

    let reflection = Reflection { feeling, outcome };
    let entry = context
        .update(|document, clock| journal::log_hemp(document, &amount, reflection, clock))
        .await?;
    println!(
        "Hemp logged: {}{}{}",
        entry.amount,
        suffix(" | feeling: ", entry.feeling.as_deref()),
        suffix(" | outcome: ", entry.outcome.as_deref())
    );
    Ok(())
}

pub async fn process_substance_command(
    SubstanceCommand {
        name,
        amount,
        feeling,
        outcome,
        recent,
    }: SubstanceCommand,
    context: &CliContext,
) -> Result<()> {
    let (Some(name), Some(amount)) = (name, amount) else {
        let document = context.read().await;
        let entries =
            journal::recent_substance(&document, Some(recent.unwrap_or(DEFAULT_RECENT)));
        if entries.is_empty() {
            println!("No substance entries yet.");
        }
        for entry in entries {
            println!(
                "{}: {} ({}){}{}",
                entry.timestamp,
                entry.name,
                entry.amount,
                suffix(" | feeling: ", entry.feeling.as_deref()),
                suffix(" | outcome: ", entry.outcome.as_deref())
            );
        }
        return Ok(());
    };

    let reflection = Reflection { feeling, outcome };
    let entry = context
        .update(|document, clock| {
            journal::log_substance(document, &name, &amount, reflection, clock)
        })
        .await?;
    println!("Logged {} ({}).", entry.name, entry.amount);
    Ok(())
}
