// ABOUTME: CLI offer-game command - open requests and partner invites
//
// Drives the offer-game flow from flags, prints the outcome and the invite
// link, and optionally copies the link to the clipboard.

use super::util::{copy_to_clipboard, drive, finished, format_slot, print_json};
use super::{GameDetailsArgs, OfferGameArgs, OfferTarget, OpenOfferArgs, OutputFormat, SpecificOfferArgs};
use crate::app::{Notification, UserContext};
use crate::config::AppConfig;
use crate::flows::{
    GameDetails, GameDuration, InviteMethod, MatchMethod, MatchType, OfferGameAction,
    OfferGameFlow, OfferOutcome, PartnerDetails,
};
use crate::models::{AvailabilityMatrix, ProfileUpdate};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

/// What gets printed for a finished offer
#[derive(Debug, Serialize)]
pub struct OfferReport {
    pub outcome: OfferOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub notification: Notification,
}

/// Execute the offer-game command
#[allow(clippy::unused_async)] // Async for consistency with other CLI commands
pub async fn execute(args: OfferGameArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let mut ctx = UserContext::new();
    let mut flow = OfferGameFlow::new(config.offer.time_options.clone());

    let (outcome, copy) = match &args.target {
        OfferTarget::Open(open) => (offer_open(&mut flow, &mut ctx, open, config)?, open.copy),
        OfferTarget::Specific(specific) => (
            offer_specific(&mut flow, &mut ctx, specific, config)?,
            specific.copy,
        ),
    };

    let report = report(outcome, config)?;
    if copy {
        match &report.link {
            Some(link) => match copy_to_clipboard(link) {
                Ok(()) => eprintln!("Link copied to clipboard"),
                Err(e) => warn!("Could not copy invite link: {:#}", e),
            },
            None => eprintln!("Nothing to copy: open match requests have no link"),
        }
    }

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => output_text(&report),
    }
    Ok(())
}

/// Open request: best match over proposed slots, or a fixed time
pub fn offer_open(
    flow: &mut OfferGameFlow,
    ctx: &mut UserContext,
    args: &OpenOfferArgs,
    config: &AppConfig,
) -> Result<OfferOutcome> {
    drive(flow, ctx, OfferGameAction::Choose(MatchType::Open))?;
    if args.best_match {
        drive(flow, ctx, OfferGameAction::ChooseMethod(MatchMethod::BestMatch))?;
        for &slot in &args.slots {
            if !flow.slots().contains(slot) {
                drive(flow, ctx, OfferGameAction::ToggleSlot(slot))?;
            }
        }
        drive(flow, ctx, OfferGameAction::SubmitSlots)?;
    } else {
        drive(flow, ctx, OfferGameAction::ChooseMethod(MatchMethod::SpecificTime))?;
        drive(
            flow,
            ctx,
            OfferGameAction::SubmitDetails(game_details(&args.details, config)?),
        )?;
    }
    finished(drive(flow, ctx, OfferGameAction::Finish)?)
}

/// Partner invite: shared availability, or a fixed time
pub fn offer_specific(
    flow: &mut OfferGameFlow,
    ctx: &mut UserContext,
    args: &SpecificOfferArgs,
    config: &AppConfig,
) -> Result<OfferOutcome> {
    if args.share_availability {
        ctx.update(ProfileUpdate::availability(AvailabilityMatrix::from_cells(
            args.available.iter().copied(),
        )));
    }

    drive(flow, ctx, OfferGameAction::Choose(MatchType::Specific))?;
    let method = if args.share_availability {
        InviteMethod::ShareAvailability
    } else {
        InviteMethod::SpecificTime
    };
    drive(
        flow,
        ctx,
        OfferGameAction::SubmitPartner(PartnerDetails {
            name: args.partner.clone(),
            email: args.email.clone(),
            method,
        }),
    )?;
    if method == InviteMethod::SpecificTime {
        drive(
            flow,
            ctx,
            OfferGameAction::SubmitDetails(game_details(&args.details, config)?),
        )?;
    }
    finished(drive(flow, ctx, OfferGameAction::Finish)?)
}

fn game_details(args: &GameDetailsArgs, config: &AppConfig) -> Result<GameDetails> {
    let minutes = args.duration.unwrap_or(config.offer.default_duration);
    Ok(GameDetails {
        date: args.date,
        time: args.time,
        duration: GameDuration::try_from(minutes)?,
        location: args.location.clone(),
    })
}

fn report(outcome: OfferOutcome, config: &AppConfig) -> Result<OfferReport> {
    let link = match outcome.invite() {
        Some(invite) => {
            let base = config.invite_base_url()?;
            Some(
                invite
                    .link(&base)
                    .with_context(|| format!("Failed to build link for {invite}"))?
                    .to_string(),
            )
        }
        None => None,
    };
    Ok(OfferReport {
        notification: outcome.notification(),
        outcome,
        link,
    })
}

fn output_text(report: &OfferReport) {
    println!("{}", report.notification);
    println!();
    match &report.outcome {
        OfferOutcome::MatchRequested { slots } => {
            println!("Proposed times:");
            for slot in slots {
                println!("  {}", format_slot(*slot));
            }
        }
        OfferOutcome::GameOffer { game, partner, .. } => {
            if let Some(partner) = partner {
                println!("Partner:  {}", partner.name);
            }
            println!("When:     {} ({})", format_slot(game.start), game.duration);
            println!("Where:    {}", game.location);
        }
        OfferOutcome::AvailabilityShared {
            partner,
            availability,
            ..
        } => {
            println!("Shared with {}:", partner.name);
            println!("{}", availability.render_grid());
        }
    }
    if let Some(link) = &report.link {
        println!();
        println!("Invite link: {link}");
    }
}
