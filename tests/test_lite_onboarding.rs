// ABOUTME: Integration tests for the invite link path: open, accept as a guest, lite onboarding

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use squash_match::app::{Route, UserContext};
use squash_match::flows::{
    candidate_slots, InviteDecision, InviteResponse, LiteOnboardingAction, LiteOnboardingFlow,
    LiteOnboardingStep, MatchingSchedule, RequiredField, ValidationError, Wizard,
};
use squash_match::models::{
    AvailabilityMatrix, DayPart, FixedClock, InviteId, InviteKind, SkillRating, Weekday,
};

// Monday morning
fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn start(ctx: &mut UserContext) -> LiteOnboardingFlow {
    let invite: InviteId = "game_k3x9".parse().unwrap();
    let reply = InviteResponse::open(ctx, invite).respond(ctx, InviteDecision::Accept);
    assert_eq!(
        reply.route,
        Route::LiteOnboarding(LiteOnboardingStep::Availability)
    );
    LiteOnboardingFlow::with_clock(ctx, MatchingSchedule::default(), Box::new(FixedClock(now())))
}

fn finish() -> LiteOnboardingAction {
    LiteOnboardingAction::Finish {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        rating: SkillRating::new(2).unwrap(),
    }
}

#[test]
fn test_guest_accepts_and_picks_times() {
    let mut ctx = UserContext::new();
    let mut flow = start(&mut ctx);
    assert!(ctx.is_lite_onboarding());
    assert_eq!(ctx.landing_route(), Route::LiteOnboarding(LiteOnboardingStep::Availability));

    for (day, part) in [
        (Weekday::Tuesday, DayPart::Evening),
        (Weekday::Wednesday, DayPart::Morning),
    ] {
        flow.apply(&mut ctx, LiteOnboardingAction::ToggleAvailability(day, part))
            .unwrap();
    }
    flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
    assert_eq!(flow.current_step(), LiteOnboardingStep::Matching);
    assert_eq!(
        flow.deck().unwrap().cards(),
        &[at(20, 19), at(21, 10)]
    );

    flow.apply(&mut ctx, LiteOnboardingAction::SwipeLeft).unwrap();
    flow.apply(&mut ctx, LiteOnboardingAction::SwipeRight).unwrap();
    assert_eq!(flow.current_step(), LiteOnboardingStep::Complete);

    let outcome = flow
        .apply(&mut ctx, finish())
        .unwrap()
        .finished()
        .unwrap();

    assert_eq!(outcome.accepted_slots, vec![at(21, 10)]);
    assert_eq!(outcome.invite.unwrap().kind(), InviteKind::Game);
    assert_eq!(outcome.route, Route::Dashboard);
    assert_eq!(outcome.notification.title, "Game response recorded!");
    assert_eq!(outcome.profile.name, "Sam");
    assert!(outcome.profile.is_onboarded);
    assert!(ctx.is_authenticated());
    assert!(!ctx.is_lite_onboarding());
    assert!(ctx.pending_invite().is_none());
}

#[test]
fn test_going_back_rebuilds_deck_only_when_grid_changes() {
    let mut ctx = UserContext::new();
    let mut flow = start(&mut ctx);

    flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
    flow.apply(&mut ctx, LiteOnboardingAction::SwipeRight).unwrap();
    assert_eq!(flow.deck().unwrap().position(), 1);

    // Same grid: the deck keeps its position
    assert_eq!(flow.back(), Some(LiteOnboardingStep::Availability));
    flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
    assert_eq!(flow.deck().unwrap().position(), 1);
    assert_eq!(flow.deck().unwrap().remaining(), 20);

    // Changed grid: a fresh deck
    flow.back();
    flow.apply(
        &mut ctx,
        LiteOnboardingAction::ToggleAvailability(Weekday::Sunday, DayPart::Afternoon),
    )
    .unwrap();
    flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
    assert_eq!(flow.deck().unwrap().position(), 0);
    assert_eq!(flow.deck().unwrap().cards(), &[at(25, 15)]);
    assert!(flow.accepted_slots().is_empty());
}

#[test]
fn test_skip_and_missing_contact() {
    let mut ctx = UserContext::new();
    let mut flow = start(&mut ctx);

    flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
    flow.apply(&mut ctx, LiteOnboardingAction::Skip).unwrap();
    assert_eq!(flow.current_step(), LiteOnboardingStep::Complete);
    assert_eq!(flow.back(), None);

    let err = flow
        .apply(
            &mut ctx,
            LiteOnboardingAction::Finish {
                name: "Sam".to_string(),
                email: String::new(),
                rating: SkillRating::default(),
            },
        )
        .unwrap_err();
    assert_eq!(err, ValidationError::missing(RequiredField::Email));
    assert!(!ctx.is_authenticated());
    assert!(ctx.pending_invite().is_some());

    let outcome = flow.apply(&mut ctx, finish()).unwrap().finished().unwrap();
    assert!(outcome.accepted_slots.is_empty());
}

#[test]
fn test_candidate_slots_default_schedule() {
    let all = candidate_slots(now().date(), &MatchingSchedule::default(), &AvailabilityMatrix::new());
    assert_eq!(all.len(), 21);
    assert_eq!(all.first(), Some(&at(20, 10)));
    assert_eq!(all.last(), Some(&at(26, 19)));

    let custom = MatchingSchedule {
        first_day_offset: 0,
        days: 1,
        times: vec![NaiveTime::from_hms_opt(7, 0, 0).unwrap()],
    };
    assert_eq!(
        candidate_slots(now().date(), &custom, &AvailabilityMatrix::new()),
        vec![at(19, 7)]
    );
}
