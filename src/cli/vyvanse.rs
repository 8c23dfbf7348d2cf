use anyhow::Result;
use clap::Subcommand;

use crate::tracker::vyvanse::{self, VyvanseStatus};

use super::{
    output::{print_boxed, warning},
    CliContext,
};

#[derive(Subcommand, Debug)]
pub enum VyvanseCommand {
    #[command(about = "Set pill count and daily dosage. Omitted values are kept")]
    Configure {
        #[arg(long, help = "Current pill count")]
        pill_count: Option<u32>,
        #[arg(long, help = "Pills taken per day")]
        daily_dosage: Option<u32>,
    },
    #[command(about = "Log taking pills")]
    Take {
        #[arg(help = "Number of pills taken")]
        amount: u32,
    },
    #[command(about = "Add a refill to the stock")]
    Refill {
        #[arg(help = "Number of pills added")]
        amount: u32,
    },
    #[command(about = "Show pills left and projected refill date")]
    Status {},
}

pub async fn process_vyvanse_command(
    command: VyvanseCommand,
    context: &CliContext,
) -> Result<()> {
    let status = match command {
        VyvanseCommand::Configure {
            pill_count,
            daily_dosage,
        } => {
            context
                .update(|document, clock| {
                    let current = vyvanse::status(document);
                    vyvanse::configure(
                        document,
                        pill_count.unwrap_or(current.pill_count),
                        daily_dosage.unwrap_or(current.daily_dosage),
                        clock,
                    )
                })
                .await?
        }
        VyvanseCommand::Take { amount } => {
            context
                .update(|document, clock| vyvanse::take(document, amount, clock))
                .await?
        }
        VyvanseCommand::Refill { amount } => {
            context
                .update(|document, clock| vyvanse::refill(document, amount, clock))
                .await?
        }
        VyvanseCommand::Status {} => vyvanse::status(&context.read().await),
    };
    print_status(&status);
    Ok(())
}

pub fn print_status(status: &VyvanseStatus) {
    print_boxed("Vyvanse status");
    println!("Pills remaining: {}", status.pill_count);
    println!("Daily dosage: {}", status.daily_dosage);
    let refill = status
        .refill_date
        .map(|v| v.to_string())
        .unwrap_or_else(|| "not configured yet".into());
    if status.needs_refill() {
        println!(
            "Projected refill date: {refill} {}",
            warning("Refill needed!")
        );
    } else {
        println!("Projected refill date: {refill}");
    }
}
