//! `fitpath status` command: configuration, storage and today's progress.

use anyhow::Result;

use fitpath_db::pool;
use fitpath_db::queries::kv;

use crate::config::FitpathConfig;
use crate::session::Session;

/// Show where things live and how today is going.
pub async fn run_status(session: &Session, config: &FitpathConfig) -> Result<()> {
    let flow = &session.flow;
    let (config_path, config_found) = &config.config_file;

    println!(
        "Config:    {}{}",
        config_path.display(),
        if *config_found { "" } else { " (not found)" }
    );
    println!("Database:  {}", config.db_config.database_url);
    match &config.gemini {
        Some(gemini) => println!("AI:        gemini ({})", gemini.model),
        None => println!("AI:        offline (set GEMINI_API_KEY to enable)"),
    }
    println!("Language:  {}", flow.language());
    println!();

    println!("{:<20} {:>8}", "TABLE", "ROWS");
    println!("{}", "-".repeat(29));
    for (table, count) in pool::table_counts(session.pool()).await? {
        println!("{table:<20} {count:>8}");
    }
    println!();

    let keys = kv::list_keys(session.pool()).await?;
    if !keys.is_empty() {
        println!("{:<20} {:>8}", "KEY", "BYTES");
        println!("{}", "-".repeat(29));
        for (key, bytes) in keys {
            println!("{key:<20} {bytes:>8}");
        }
        println!();
    }

    let Some(profile) = flow.profile() else {
        println!("Profile:   none (run `fitpath onboard`)");
        return Ok(());
    };
    println!(
        "Profile:   {} (goal {} kcal/day)",
        profile.profile.name, profile.daily_calorie_goal
    );

    let summary = flow.day_summary().await;
    let plan = flow.plan();
    let completed = plan.iter().filter(|item| item.completed).count();
    println!("Today:     {}", summary.date);
    if plan.is_empty() {
        println!("  plan:    none yet");
    } else {
        println!(
            "  plan:    {completed}/{} done ({}%)",
            plan.len(),
            summary.completion_rate
        );
    }
    println!(
        "  intake:  {:.0} kcal, planned burn {} kcal",
        summary.total_calories_in, summary.planned_calories_out
    );

    let adjustment = flow.store().get_adjustment().await;
    if !adjustment.is_empty() {
        println!("Pending adjustment: {adjustment}");
    }
    Ok(())
}
