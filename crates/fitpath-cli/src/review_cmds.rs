//! `fitpath review` and `fitpath next-day`: the evening check-in.

use anyhow::{Result, bail};

use fitpath_core::flow::View;
use fitpath_core::i18n::{self, Strings};
use fitpath_core::nutrition::apply_tag;

use crate::render;
use crate::session::Session;

/// Review today's plan, store the suggested adjustment, and optionally
/// roll straight into tomorrow.
pub async fn run_review(
    session: &mut Session,
    feedback: &[String],
    tags: &[String],
    next_day: bool,
) -> Result<()> {
    let flow = &mut session.flow;
    let strings = i18n::strings(flow.language());

    let mut text = feedback.join(" ").trim().to_owned();
    for tag in tags {
        text = apply_tag(&text, resolve_tag(strings, tag)?);
    }
    if text.is_empty() {
        println!("Quick tags:");
        for (i, tag) in strings.tags.iter().enumerate() {
            println!("  {}. {tag}", i + 1);
        }
        bail!("tell me how the day went, e.g. `fitpath review --tag 1 \"slept badly\"`");
    }

    let completion = flow.begin_review()?;
    println!("{}", strings.evening_checkin);
    println!(
        "  {}",
        strings.tasks_completed(completion.completed, completion.total, completion.rate)
    );
    println!();

    let review = flow.submit_review(&text).await?;
    println!("{}", strings.day_complete);
    println!("  {}", review.feedback);
    if !review.suggested_adjustment.trim().is_empty() {
        println!("{}", strings.plan_adjustment);
        println!("  {}", review.suggested_adjustment);
    }

    let summary = flow.day_summary().await;
    println!();
    println!("{} ({})", strings.daily_summary, summary.date);
    println!(
        "  in {:.0} kcal, planned burn {} kcal, {}% complete",
        summary.total_calories_in, summary.planned_calories_out, summary.completion_rate
    );

    if next_day {
        println!();
        start_next_day(session).await?;
    }
    Ok(())
}

/// Close out today and generate a fresh plan.
pub async fn run_next_day(session: &mut Session) -> Result<()> {
    start_next_day(session).await
}

async fn start_next_day(session: &mut Session) -> Result<()> {
    let flow = &mut session.flow;
    if flow.plan().is_empty() {
        // Nothing to close out: today's plan already expired or was never made.
        flow.ensure_plan().await?;
    } else {
        if flow.view() != View::Review {
            flow.begin_review()?;
        }
        flow.next_day().await?;
    }

    let strings = i18n::strings(flow.language());
    if let Some(briefing) = flow.briefing() {
        render::print_briefing(strings, briefing);
        println!();
    }
    render::print_plan(strings, flow.plan());
    Ok(())
}

/// A tag is either its 1-based number in the quick-tag list or free text.
fn resolve_tag<'a>(strings: &'a Strings, tag: &'a str) -> Result<&'a str> {
    let tag = tag.trim();
    match tag.parse::<usize>() {
        Ok(n) if (1..=strings.tags.len()).contains(&n) => Ok(strings.tags[n - 1]),
        Ok(n) => bail!("tag {n} out of range; pick 1-{}", strings.tags.len()),
        Err(_) if tag.is_empty() => bail!("empty tag"),
        Err(_) => Ok(tag),
    }
}
