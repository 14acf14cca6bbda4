// ABOUTME: CLI invite command - accept or decline an invite link
//
// Accepting without an account runs the lite onboarding flow: availability,
// swipe through candidate times, then name and email.

use super::util::{drive, finished, format_slot, invite_id_from, print_json};
use super::{InviteArgs, OutputFormat};
use crate::app::{Notification, Route, UserContext};
use crate::config::{AppConfig, SwipeConfig};
use crate::flows::swipe::{deliver_after, SwipeDeck};
use crate::flows::{
    InviteDecision, InviteResponse, LiteOnboardingAction, LiteOnboardingFlow,
    LiteOnboardingOutcome, LiteOnboardingStep, MatchingSchedule, SwipeDirection, SwipeGesture,
    Transition, Wizard,
};
use crate::models::{InviteId, ProfileUpdate, UserProfile};
use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// What happened to the invite
#[derive(Debug, Serialize)]
pub struct InviteReport {
    pub invite: InviteId,
    pub headline: String,
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accepted_slots: Vec<NaiveDateTime>,
}

/// Execute the invite command
pub async fn execute(args: InviteArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let mut ctx = UserContext::new();
    let report = run(&mut ctx, &args, config.matching_schedule(), &config.swipe).await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => output_text(&report),
    }
    Ok(())
}

pub async fn run(
    ctx: &mut UserContext,
    args: &InviteArgs,
    schedule: MatchingSchedule,
    swipe: &SwipeConfig,
) -> Result<InviteReport> {
    let raw = invite_id_from(&args.id);
    let invite: InviteId = raw
        .parse()
        .with_context(|| format!("Not a valid invite: '{raw}'"))?;

    if args.signed_in {
        ctx.update(ProfileUpdate {
            name: args.name.clone(),
            email: args.email.clone(),
            rating: Some(args.rating),
            is_onboarded: Some(true),
            ..Default::default()
        });
        ctx.set_authenticated(true);
    }

    let response = InviteResponse::open(ctx, invite.clone());
    let decision = if args.decline {
        InviteDecision::Decline
    } else {
        InviteDecision::Accept
    };
    let reply = response.respond(ctx, decision);

    let mut report = InviteReport {
        invite,
        headline: response.headline(),
        route: reply.route.path(),
        notification: reply.notification,
        profile: None,
        accepted_slots: Vec::new(),
    };

    if matches!(reply.route, Route::LiteOnboarding(_)) {
        let outcome = finished(lite_onboarding(ctx, args, schedule, swipe).await?)?;
        report.route = outcome.route.path();
        report.notification = Some(outcome.notification);
        report.profile = Some(outcome.profile);
        report.accepted_slots = outcome.accepted_slots;
    }
    Ok(report)
}

async fn lite_onboarding(
    ctx: &mut UserContext,
    args: &InviteArgs,
    schedule: MatchingSchedule,
    swipe: &SwipeConfig,
) -> Result<Transition<LiteOnboardingStep, LiteOnboardingOutcome>> {
    let mut flow = LiteOnboardingFlow::new(ctx, schedule);

    for cell in &args.available {
        if !flow.availability().is_available(cell.day, cell.part) {
            drive(
                &mut flow,
                ctx,
                LiteOnboardingAction::ToggleAvailability(cell.day, cell.part),
            )?;
        }
    }
    drive(&mut flow, ctx, LiteOnboardingAction::Continue)?;

    let total = flow.deck().map_or(0, |deck| deck.cards().len());
    if let Some(bad) = args.accept_slots.iter().find(|&&n| n == 0 || n > total) {
        bail!("--accept-slot {bad} is out of range: there are {total} candidate times");
    }

    if total == 0 {
        debug!("No candidate times, skipping the matching step");
        drive(&mut flow, ctx, LiteOnboardingAction::Skip)?;
    } else {
        for position in 1..=total {
            let wanted = if args.accept_slots.contains(&position) {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            if let Some(card) = flow.deck().and_then(SwipeDeck::current) {
                debug!("Card {position}/{total} at {card}: {wanted:?}");
            }
            let action = match play_swipe(wanted, swipe).await? {
                SwipeDirection::Right => LiteOnboardingAction::SwipeRight,
                SwipeDirection::Left => LiteOnboardingAction::SwipeLeft,
            };
            drive(&mut flow, ctx, action)?;
        }
    }
    info!(
        "Lite onboarding reached {:?} with {} accepted times",
        flow.current_step(),
        flow.accepted_slots().len()
    );

    drive(
        &mut flow,
        ctx,
        LiteOnboardingAction::Finish {
            name: args.name.clone().unwrap_or_default(),
            email: args.email.clone().unwrap_or_default(),
            rating: args.rating,
        },
    )
}

/// Replay a decision as a drag past the threshold, then wait out the card animation
async fn play_swipe(direction: SwipeDirection, swipe: &SwipeConfig) -> Result<SwipeDirection> {
    let distance = swipe.threshold_px + 1.0;
    let mut gesture = SwipeGesture::new(swipe.threshold_px);
    gesture.press(0.0);
    gesture.drag(match direction {
        SwipeDirection::Right => distance,
        SwipeDirection::Left => -distance,
    });
    let released = gesture
        .release()
        .context("Swipe did not travel past the threshold")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _pending = deliver_after(released, Duration::from_millis(swipe.delay_ms), tx)
        .context("Swipe animation needs a running tokio runtime")?;
    rx.recv().await.context("Swipe was cancelled before it landed")
}

fn output_text(report: &InviteReport) {
    println!("{}", report.headline);
    if let Some(notification) = &report.notification {
        println!("{notification}");
    }
    if let Some(profile) = &report.profile {
        println!();
        println!("Signed up as {} <{}>", profile.name, profile.email);
    }
    if !report.accepted_slots.is_empty() {
        println!("Times you can play:");
        for slot in &report.accepted_slots {
            println!("  {}", format_slot(*slot));
        }
    }
    println!("Next: {}", report.route);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityCell, SkillRating};
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_play_swipe_keeps_direction() {
        let swipe = SwipeConfig {
            delay_ms: 5,
            ..SwipeConfig::default()
        };
        assert_eq!(
            play_swipe(SwipeDirection::Left, &swipe).await.unwrap(),
            SwipeDirection::Left
        );
        assert_eq!(
            play_swipe(SwipeDirection::Right, &swipe).await.unwrap(),
            SwipeDirection::Right
        );
    }

    fn args(id: &str) -> InviteArgs {
        InviteArgs {
            id: id.to_string(),
            decline: false,
            signed_in: false,
            available: vec![],
            accept_slots: vec![],
            name: Some("Sam".to_string()),
            email: Some("sam@example.com".to_string()),
            rating: SkillRating::default(),
        }
    }

    fn instant() -> SwipeConfig {
        SwipeConfig {
            delay_ms: 0,
            ..SwipeConfig::default()
        }
    }

    fn schedule() -> MatchingSchedule {
        MatchingSchedule {
            first_day_offset: 1,
            days: 2,
            times: vec![NaiveTime::from_hms_opt(19, 0, 0).unwrap()],
        }
    }

    #[tokio::test]
    async fn test_decline_goes_home() {
        let mut ctx = UserContext::new();
        let report = run(
            &mut ctx,
            &InviteArgs {
                decline: true,
                ..args("game_abc123")
            },
            schedule(),
            &instant(),
        )
        .await
        .unwrap();

        assert_eq!(report.route, "/");
        assert_eq!(report.notification.unwrap().title, "Invitation declined");
        assert!(ctx.pending_invite().is_none());
    }

    #[tokio::test]
    async fn test_signed_in_accept_goes_to_dashboard() {
        let mut ctx = UserContext::new();
        let report = run(
            &mut ctx,
            &InviteArgs {
                signed_in: true,
                ..args("https://squashmatch.app/invite/avail_x9")
            },
            schedule(),
            &instant(),
        )
        .await
        .unwrap();

        assert_eq!(report.route, "/app/dashboard");
        assert_eq!(report.notification.unwrap().title, "Game accepted!");
        assert!(report.profile.is_none());
    }

    #[tokio::test]
    async fn test_shared_link_with_tracking_query() {
        let mut ctx = UserContext::new();
        let report = run(
            &mut ctx,
            &InviteArgs {
                decline: true,
                ..args("https://squashmatch.app/invite/game_abc123?utm_source=whatsapp#top")
            },
            schedule(),
            &instant(),
        )
        .await
        .unwrap();

        assert_eq!(report.invite.as_str(), "game_abc123");
        assert_eq!(report.route, "/");
    }

    #[tokio::test]
    async fn test_guest_accept_runs_lite_onboarding() {
        let mut ctx = UserContext::new();
        let report = run(
            &mut ctx,
            &InviteArgs {
                accept_slots: vec![1],
                available: vec!["monday:evening".parse::<AvailabilityCell>().unwrap()],
                ..args("game_abc123")
            },
            MatchingSchedule::default(),
            &instant(),
        )
        .await
        .unwrap();

        assert_eq!(report.route, "/app/dashboard");
        // Exactly one Monday evening falls in the next seven days
        assert_eq!(report.accepted_slots.len(), 1);
        assert_eq!(report.profile.unwrap().name, "Sam");
        assert!(ctx.is_authenticated());
        assert!(!ctx.is_lite_onboarding());
    }

    #[tokio::test]
    async fn test_accept_slot_out_of_range() {
        let mut ctx = UserContext::new();
        let err = run(
            &mut ctx,
            &InviteArgs {
                accept_slots: vec![9],
                ..args("game_abc123")
            },
            schedule(),
            &instant(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[tokio::test]
    async fn test_unknown_prefix_rejected() {
        let mut ctx = UserContext::new();
        assert!(run(&mut ctx, &args("match_abc"), schedule(), &instant())
            .await
            .is_err());
    }
}
