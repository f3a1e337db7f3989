//! End-to-end day cycle over SQLite storage with a scripted collaborator:
//! onboarding, plan generation, toggling, food logging, review, next day.

use std::sync::Arc;

use chrono::Duration;

use fitpath_core::ai::ReviewResult;
use fitpath_core::day::Clock;
use fitpath_core::error::FlowError;
use fitpath_core::flow::View;
use fitpath_core::nutrition::DailyTotals;
use fitpath_db::models::Language;
use fitpath_test_utils::{
    Call, Reply, ScriptedCollaborator, flow_with, morning_clock, sample_estimate, sample_profile,
};

#[tokio::test]
async fn full_day_cycle() {
    let clock = morning_clock();
    let scripted = Arc::new(ScriptedCollaborator::new());
    let mut flow = flow_with(scripted.clone(), clock.clone()).await;

    assert_eq!(flow.start().await, View::Onboarding);

    // Onboarding enters the dashboard and generates plan + briefing.
    let stored = flow.submit_profile(sample_profile()).await.unwrap();
    assert_eq!(stored.daily_calorie_goal, 1599);
    assert_eq!(flow.view(), View::Dashboard);
    assert_eq!(flow.plan().len(), 4);
    let ms = clock.now_millis();
    assert_eq!(flow.plan()[2].id, format!("task-{ms}-2"));
    assert_eq!(flow.briefing(), Some("Nail that lunchtime walk!"));

    // Toggle two items.
    let first = flow.plan()[0].id.clone();
    let third = flow.plan()[2].id.clone();
    flow.toggle_item(&first).await.unwrap();
    flow.toggle_item(&third).await.unwrap();
    let persisted = flow.store().get_plan().await.unwrap();
    assert_eq!(persisted.iter().filter(|item| item.completed).count(), 2);

    // Log food.
    let logs = flow.log_food("two boiled eggs").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].name, "Boiled eggs");
    assert_eq!(flow.today_totals().await.calories, 155.0);

    // Review.
    let completion = flow.begin_review().unwrap();
    assert_eq!((completion.completed, completion.total, completion.rate), (2, 4, 50));
    let review = flow.submit_review("Feeling Great.").await.unwrap();
    assert_eq!(
        review,
        ReviewResult::new("Solid, consistent day.", "Add a protein snack at 3pm")
    );

    // Next day uses the stored adjustment.
    clock.advance(Duration::hours(24));
    flow.next_day().await.unwrap();
    assert_eq!(flow.view(), View::Dashboard);
    assert_eq!(flow.plan().len(), 4);
    assert!(flow.plan().iter().all(|item| !item.completed));
    assert!(flow.today_food().await.is_empty());
    assert_eq!(flow.store().get_food_logs(None).await.len(), 1);

    let calls = scripted.calls();
    assert_eq!(
        calls[0],
        Call::Plan {
            adjustment: None,
            language: Language::En
        }
    );
    assert_eq!(
        calls[1],
        Call::Briefing {
            highlights: vec!["Greek yogurt and berries".into(), "Lunchtime walk".into()]
        }
    );
    assert!(calls.contains(&Call::Review {
        feedback: "Feeling Great.".into(),
        completed: 2
    }));
    assert_eq!(
        calls[calls.len() - 2],
        Call::Plan {
            adjustment: Some("Add a protein snack at 3pm".into()),
            language: Language::En
        }
    );
}

#[tokio::test]
async fn plan_expires_overnight_and_is_regenerated_on_demand() {
    let clock = morning_clock();
    let scripted = Arc::new(ScriptedCollaborator::new());
    let mut flow = flow_with(scripted.clone(), clock.clone()).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();

    clock.advance(Duration::hours(20));

    let mut tomorrow = fitpath_core::flow::DayFlow::new(flow.store().clone(), flow.coach().clone());
    assert_eq!(tomorrow.start().await, View::Dashboard);
    assert!(tomorrow.plan().is_empty());
    assert!(tomorrow.ensure_plan().await.unwrap());
    assert_eq!(tomorrow.plan().len(), 4);
    assert!(tomorrow.store().get_plan().await.is_some());
}

#[tokio::test]
async fn failing_collaborator_falls_back_everywhere_but_food() {
    let clock = morning_clock();
    let mut flow = flow_with(Arc::new(ScriptedCollaborator::failing()), clock).await;
    flow.start().await;
    flow.set_language(Language::Zh).await.unwrap();
    flow.submit_profile(sample_profile()).await.unwrap();

    assert_eq!(flow.plan().len(), 1);
    assert_eq!(flow.plan()[0].id, "fallback-1");
    assert_eq!(flow.plan()[0].time, "07:00");
    assert_eq!(flow.briefing(), Some("早安！让我们开始这充实的一天。"));

    assert!(matches!(flow.log_food("米饭").await, Err(FlowError::Ai(_))));

    flow.begin_review().unwrap();
    let review = flow.submit_review("很累。").await.unwrap();
    assert_eq!(review, ReviewResult::new("今天很努力！", "保持当前强度。"));
}

#[tokio::test]
async fn empty_replies_use_empty_fallbacks() {
    let clock = morning_clock();
    let scripted =
        ScriptedCollaborator::empty().with_plan(Reply::Value(fitpath_test_utils::sample_drafts()));
    let mut flow = flow_with(Arc::new(scripted), clock).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();

    assert_eq!(flow.briefing(), Some("Rise and shine! Consistency is key today."));
    flow.begin_review().unwrap();
    let review = flow.submit_review("Tired.").await.unwrap();
    assert_eq!(review, ReviewResult::new("Good job today.", "Keep it up."));
    assert_eq!(flow.store().get_adjustment().await, "Keep it up.");
}

#[tokio::test]
async fn briefing_failure_does_not_block_a_scripted_review() {
    let clock = morning_clock();
    let scripted = ScriptedCollaborator::new()
        .with_briefing(Reply::Fail)
        .with_review(Reply::Value(ReviewResult::new(
            "You pushed through a long shift.",
            "Move the walk to 18:00",
        )));
    let mut flow = flow_with(Arc::new(scripted), clock).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();

    assert_eq!(flow.plan().len(), 4);
    assert_eq!(flow.briefing(), Some("Good morning! Let's make today count."));

    flow.begin_review().unwrap();
    let review = flow.submit_review("Long shift.").await.unwrap();
    assert_eq!(review.feedback, "You pushed through a long shift.");
    assert_eq!(flow.store().get_adjustment().await, "Move the walk to 18:00");
}

#[tokio::test]
async fn empty_plan_is_not_persisted() {
    let clock = morning_clock();
    let mut flow = flow_with(Arc::new(ScriptedCollaborator::empty()), clock).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();

    assert!(flow.plan().is_empty());
    assert!(flow.store().get_plan().await.is_none());
    assert!(matches!(flow.begin_review(), Err(FlowError::NoPlan)));
}

#[tokio::test]
async fn retry_replaces_the_plan() {
    let clock = morning_clock();
    let scripted = Arc::new(ScriptedCollaborator::new());
    let mut flow = flow_with(scripted.clone(), clock.clone()).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();
    let first_ids: Vec<String> = flow.plan().iter().map(|item| item.id.clone()).collect();

    clock.advance(Duration::seconds(5));
    flow.retry().await.unwrap();
    let second_ids: Vec<String> = flow.plan().iter().map(|item| item.id.clone()).collect();

    assert_eq!(second_ids.len(), 4);
    assert_ne!(first_ids, second_ids);
    let plan_calls = scripted
        .calls()
        .iter()
        .filter(|call| matches!(call, Call::Plan { .. }))
        .count();
    assert_eq!(plan_calls, 2);
}

#[tokio::test]
async fn food_totals_track_today_only() {
    let clock = morning_clock();
    let scripted =
        ScriptedCollaborator::new().with_food(Reply::Value(sample_estimate("Oat latte", 180.0)));
    let mut flow = flow_with(Arc::new(scripted), clock.clone()).await;
    flow.start().await;
    flow.submit_profile(sample_profile()).await.unwrap();

    flow.log_food("oat latte").await.unwrap();
    flow.log_food("another oat latte").await.unwrap();
    let totals: DailyTotals = flow.today_totals().await;
    assert_eq!(totals.calories, 360.0);
    assert_eq!(totals.protein, 20.0);

    clock.advance(Duration::days(1));
    assert!(flow.today_food().await.is_empty());
    assert_eq!(flow.store().get_food_logs(None).await.len(), 2);
}
