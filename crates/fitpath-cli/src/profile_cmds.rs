//! `fitpath onboard` and `fitpath profile` commands.

use anyhow::{Result, bail};

use fitpath_core::ai::schema::normalize_time;
use fitpath_core::i18n;
use fitpath_db::models::UserProfile;

use crate::render;
use crate::session::Session;
use crate::{OnboardArgs, ProfileCommands, ProfileEditArgs};

/// clap value parser for `HH:MM` wake/sleep times.
pub fn parse_clock_time(value: &str) -> Result<String, String> {
    normalize_time(value).ok_or_else(|| format!("expected a 24h time like 07:00, got {value:?}"))
}

/// Run the onboarding command: save the first profile and show today's plan.
pub async fn run_onboard(session: &mut Session, args: OnboardArgs) -> Result<()> {
    let flow = &mut session.flow;
    if flow.profile().is_some() {
        bail!("a profile already exists; use `fitpath profile edit` to change it");
    }

    let profile = args.into_profile();
    validate(&profile)?;
    let stored = flow.submit_profile(profile).await?;

    let strings = i18n::strings(flow.language());
    println!("{}", strings.welcome(&stored.profile.name));
    render::print_goal(strings, &stored);
    println!();
    if let Some(briefing) = flow.briefing() {
        render::print_briefing(strings, briefing);
        println!();
    }
    render::print_plan(strings, flow.plan());
    Ok(())
}

pub async fn run_profile_command(session: &mut Session, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Show => run_show(session),
        ProfileCommands::Edit(args) => run_edit(session, args).await,
    }
}

fn run_show(session: &Session) -> Result<()> {
    let flow = &session.flow;
    let Some(stored) = flow.profile() else {
        bail!("no profile found; run `fitpath onboard` first");
    };
    let p = &stored.profile;

    println!("Name:        {}", p.name);
    println!("Age:         {}", p.age);
    println!("Gender:      {}", p.gender);
    println!("Height:      {} cm", p.height);
    println!("Weight:      {} kg (target {} kg)", p.current_weight, p.target_weight);
    println!("Profession:  {}", p.profession);
    println!("Wake/sleep:  {} / {}", p.wake_up_time, p.sleep_time);
    println!(
        "Diet:        {}",
        p.dietary_preferences.as_deref().unwrap_or("-")
    );
    println!("Activity:    {}", p.activity_level.unwrap_or_default());
    println!();
    render::print_goal(i18n::strings(flow.language()), stored);
    Ok(())
}

async fn run_edit(session: &mut Session, args: ProfileEditArgs) -> Result<()> {
    let flow = &mut session.flow;
    let Some(current) = flow.profile() else {
        bail!("no profile found; run `fitpath onboard` first");
    };
    if args.is_empty() {
        bail!("nothing to change; pass at least one field, e.g. --weight 78");
    }

    let previous_goal = current.daily_calorie_goal;
    let updated = args.apply(current.profile.clone());
    validate(&updated)?;

    flow.edit_profile()?;
    let stored = flow.submit_profile(updated).await?;

    let strings = i18n::strings(flow.language());
    println!("{}", strings.profile_updated);
    if stored.daily_calorie_goal != previous_goal {
        println!(
            "Daily goal: {} -> {} kcal",
            previous_goal, stored.daily_calorie_goal
        );
    }
    render::print_goal(strings, &stored);
    Ok(())
}

fn validate(profile: &UserProfile) -> Result<()> {
    if profile.name.trim().is_empty() {
        bail!("name must not be empty");
    }
    if profile.age == 0 {
        bail!("age must be positive");
    }
    for (field, value) in [
        ("height", profile.height),
        ("weight", profile.current_weight),
        ("target weight", profile.target_weight),
    ] {
        if !value.is_finite() || value <= 0.0 {
            bail!("{field} must be a positive number, got {value}");
        }
    }
    Ok(())
}
