//! `fitpath today`, `fitpath toggle` and `fitpath retry`.

use anyhow::{Result, bail};

use fitpath_core::day::Clock;
use fitpath_core::flow::DayFlow;
use fitpath_core::i18n;
use fitpath_db::models::PlanItem;

use crate::render;
use crate::session::Session;

/// Show today's dashboard, generating the plan first if there is none.
pub async fn run_today(session: &mut Session) -> Result<()> {
    let flow = &mut session.flow;
    let generated = flow.ensure_plan().await?;
    print_dashboard(flow, generated).await;
    Ok(())
}

/// Flip an item by id or by its 1-based position in the plan.
pub async fn run_toggle(session: &mut Session, target: &str) -> Result<()> {
    let flow = &mut session.flow;
    if flow.plan().is_empty() {
        bail!("no plan for today; run `fitpath today` to generate one");
    }

    let id = resolve_item(flow.plan(), target)?;
    let item = flow.toggle_item(&id).await?;
    let check = if item.completed { "x" } else { " " };
    println!("[{check}] {} {}", item.time, item.title);
    Ok(())
}

/// Regenerate today's plan.
pub async fn run_retry(session: &mut Session, ignore_adjustment: bool) -> Result<()> {
    let flow = &mut session.flow;
    if ignore_adjustment {
        flow.clear_adjustment().await?;
        println!("Pending plan adjustment cleared.");
    }
    flow.retry().await?;
    print_dashboard(flow, true).await;
    Ok(())
}

/// The dashboard's date line, taken from the session clock.
fn heading_date(clock: &dyn Clock) -> String {
    clock.now().format("%A, %Y-%m-%d").to_string()
}

async fn print_dashboard(flow: &DayFlow, generated: bool) {
    let strings = i18n::strings(flow.language());

    println!("{}", heading_date(flow.store().clock().as_ref()));
    if let Some(profile) = flow.profile() {
        render::print_goal(strings, profile);
    }
    println!();

    // The briefing is produced together with the plan and is not stored.
    if generated {
        if let Some(briefing) = flow.briefing() {
            render::print_briefing(strings, briefing);
            println!();
        }
    }

    render::print_plan(strings, flow.plan());
    println!();

    let goal = flow.profile().map_or(0, |p| p.daily_calorie_goal);
    render::print_intake(strings, &flow.today_totals().await, goal);
}

fn resolve_item(plan: &[PlanItem], target: &str) -> Result<String> {
    if let Some(item) = plan.iter().find(|item| item.id == target) {
        return Ok(item.id.clone());
    }
    match target.parse::<usize>() {
        Ok(n) if (1..=plan.len()).contains(&n) => Ok(plan[n - 1].id.clone()),
        Ok(n) => bail!("item {n} out of range; today's plan has {} items", plan.len()),
        Err(_) => bail!("no plan item with id {target:?}"),
    }
}
