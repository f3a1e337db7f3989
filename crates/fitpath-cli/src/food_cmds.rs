//! `fitpath food` commands: log a meal, list entries.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use fitpath_core::i18n;
use fitpath_core::nutrition::DailyTotals;

use crate::FoodCommands;
use crate::render;
use crate::session::Session;

pub async fn run_food_command(session: &mut Session, command: FoodCommands) -> Result<()> {
    match command {
        FoodCommands::Add { description } => run_add(session, &description.join(" ")).await,
        FoodCommands::List { date, all } => run_list(session, date.as_deref(), all).await,
    }
}

/// Estimate a meal with the collaborator and append it to the log.
async fn run_add(session: &mut Session, description: &str) -> Result<()> {
    let flow = &mut session.flow;
    if flow.profile().is_none() {
        bail!("no profile found; run `fitpath onboard` first");
    }

    let today = flow
        .log_food(description)
        .await
        .context("could not analyse that meal; try again or describe it differently")?;
    let strings = i18n::strings(flow.language());

    if let Some(item) = today.last() {
        println!(
            "{}: {:.0} kcal (P {:.1}g / C {:.1}g / F {:.1}g)",
            strings.logged(&item.name),
            item.calories,
            item.protein,
            item.carbs,
            item.fat
        );
    }
    println!();
    let goal = flow.profile().map_or(0, |p| p.daily_calorie_goal);
    render::print_intake(strings, &DailyTotals::of(&today), goal);
    Ok(())
}

async fn run_list(session: &Session, date: Option<&str>, all: bool) -> Result<()> {
    let flow = &session.flow;
    let store = flow.store();
    let strings = i18n::strings(flow.language());

    let logs = if all {
        store.get_food_logs(None).await
    } else {
        let day = match date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?,
            None => store.clock().today().date(),
        };
        println!("{day}");
        store.get_food_logs(Some(day)).await
    };

    render::print_food(strings, &logs);
    if !logs.is_empty() && !all {
        println!();
        let goal = flow.profile().map_or(0, |p| p.daily_calorie_goal);
        render::print_intake(strings, &DailyTotals::of(&logs), goal);
    }
    Ok(())
}
