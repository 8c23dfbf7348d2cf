use anyhow::Result;

use crate::tracker::{dashboard, mood, vyvanse::DosePhase};

use super::{
    output::{print_boxed, suffix, warning},
    CliContext,
};

/// Prints the dashboard: medication, water, mood and today's focus.
pub async fn process_summary_command(context: &CliContext) -> Result<()> {
    let document = context.read().await;
    let dashboard = dashboard::snapshot(&document, context.clock.as_ref());

    print_boxed("ChaosCatcher Summary");

    println!("\n[VYVANSE]");
    let vyvanse = dashboard.vyvanse;
    println!("Pills remaining: {}", vyvanse.pill_count);
    println!("Daily dosage:    {}", vyvanse.daily_dosage);
    match vyvanse.refill_date {
        Some(date) => println!("Refill date:     {date}"),
        None => println!("Refill date:     not configured, use 'vyvanse configure'"),
    }
    match dashboard.last_dose {
        Some(dose) => {
            let phase = match dose.phase {
                DosePhase::ClockAnomaly => warning(dose.phase.describe()),
                phase => phase.describe().to_string(),
            };
            println!("Last dose:       {}", dose.taken_at);
            println!("Estimated phase: {phase}");
        }
        None => println!("Last dose:       none logged yet"),
    }

    println!("\n[WATER]");
    println!("Goal:  {} ml", dashboard.water.goal_ml);
    println!("{}", dashboard.water.progress_bar());

    println!("\n[MOOD]");
    match dashboard.latest_mood {
        Some(entry) => {
            println!(
                "Last mood: {}/{}{}",
                entry.rating,
                mood::MAX_RATING,
                suffix(" - ", entry.note.as_deref())
            );
            println!("Logged at: {}", entry.timestamp);
        }
        None => println!("No mood entries yet. Log one with 'mood log'."),
    }

    println!("\n[FOCUS]");
    println!("Minutes today: {}", dashboard.focus_minutes_today);
    Ok(())
}
