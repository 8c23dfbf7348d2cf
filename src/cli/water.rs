use anyhow::Result;
use clap::Subcommand;

use crate::tracker::water;

use super::{output::print_boxed, CliContext};

#[derive(Subcommand, Debug)]
pub enum WaterCommand {
    #[command(about = "Log water intake in ml")]
    Log {
        #[arg(help = "Amount in ml")]
        amount: u32,
    },
    #[command(about = "Show today's water total")]
    Today {},
    #[command(about = "Set daily water goal in ml")]
    Goal {
        #[arg(help = "Goal in ml")]
        amount: u32,
    },
    #[command(about = "Show today's water against the goal")]
    Status {},
    #[command(about = "Show the last 7 days of water")]
    Graph {},
    #[command(about = "Remove today's water entries")]
    Reset {},
}

pub async fn process_water_command(command: WaterCommand, context: &CliContext) -> Result<()> {
    match command {
        WaterCommand::Log { amount } => {
            let entry = context
                .update(|document, clock| water::log(document, amount, clock))
                .await?;
            println!("Logged {} ml of water.", entry.milliliters);
        }
        WaterCommand::Today {} => {
            let document = context.read().await;
            let today = water::today(&document, context.clock.as_ref());
            print_boxed(&format!("Today's water: {} ml", today.total_ml));
            for entry in today.entries {
                println!("{}: {} ml", entry.timestamp, entry.milliliters);
            }
        }
        WaterCommand::Goal { amount } => {
            let goal = context
                .update(|document, _| water::set_goal(document, amount))
                .await?;
            println!("Water goal set to {goal} ml per day.");
        }
        WaterCommand::Status {} => {
            let document = context.read().await;
            let status = water::status(&document, context.clock.as_ref());
            print_boxed("Water status");
            println!("Goal:  {} ml", status.goal_ml);
            println!("{}", status.progress_bar());
        }
        WaterCommand::Graph {} => {
            let document = context.read().await;
            if document.water.is_empty() {
                println!("No water entries yet. Log some with 'water log'.");
                return Ok(());
            }
            print_boxed(&format!(
                "Hydration, last {} days (goal: {} ml, one block is {} ml)",
                water::GRAPH_DAYS,
                document.water_goal,
                water::GRAPH_BLOCK_ML
            ));
            for (day, total) in water::graph(&document, context.clock.as_ref()) {
                println!(
                    "{}: {}  ({total} ml)",
                    day.format("%a"),
                    water::graph_bar(total)
                );
            }
        }
        WaterCommand::Reset {} => {
            let removed = context
                .update(|document, clock| Ok(water::reset_today(document, clock)))
                .await?;
            println!("Removed {removed} entries, today's water is back to 0 ml.");
        }
    }
    Ok(())
}
