// ABOUTME: CLI onboard command - run the full onboarding flow from flags
//
// Each flag group feeds one wizard step; the resulting profile is printed.

use super::util::{drive, finished, print_json};
use super::{OnboardArgs, OutputFormat};
use crate::app::UserContext;
use crate::config::AppConfig;
use crate::flows::{BasicInfo, OnboardingAction, OnboardingFlow, OnboardingOutcome, Wizard};
use crate::models::MatchPreferences;
use anyhow::Result;
use tracing::info;

/// Execute the onboard command
#[allow(clippy::unused_async)] // Async for consistency with other CLI commands
pub async fn execute(args: OnboardArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let mut ctx = UserContext::new();
    let outcome = run(&mut ctx, &args, config)?;

    match format {
        OutputFormat::Json => print_json(&outcome.profile)?,
        OutputFormat::Text => output_text(&outcome),
    }
    Ok(())
}

/// Walk every onboarding step with the values from `args`
pub fn run(
    ctx: &mut UserContext,
    args: &OnboardArgs,
    config: &AppConfig,
) -> Result<OnboardingOutcome> {
    let mut flow =
        OnboardingFlow::new(ctx).with_location_options(config.preferences.locations.clone());

    drive(&mut flow, ctx, OnboardingAction::Start)?;
    drive(
        &mut flow,
        ctx,
        OnboardingAction::SubmitBasicInfo(BasicInfo {
            name: args.name.clone(),
            email: args.email.clone(),
            phone_number: args.phone.clone(),
            bio: args.bio.clone(),
        }),
    )?;
    drive(&mut flow, ctx, OnboardingAction::SubmitRating(args.rating))?;

    for cell in &args.available {
        if !flow.availability().is_available(cell.day, cell.part) {
            drive(
                &mut flow,
                ctx,
                OnboardingAction::ToggleAvailability(cell.day, cell.part),
            )?;
        }
    }
    drive(&mut flow, ctx, OnboardingAction::Continue)?;

    let mut preferences = MatchPreferences::default();
    preferences.set_rating_range(args.min_rating, args.max_rating);
    for location in &args.locations {
        preferences.toggle_location(location);
    }
    for gender in &args.genders {
        if !preferences.genders.contains(gender) {
            preferences.toggle_gender(*gender);
        }
    }
    drive(&mut flow, ctx, OnboardingAction::SubmitPreferences(preferences))?;

    let outcome = finished(drive(&mut flow, ctx, OnboardingAction::Finish)?)?;
    info!("Onboarded {} via CLI", outcome.profile.email);
    Ok(outcome)
}

fn output_text(outcome: &OnboardingOutcome) {
    let profile = &outcome.profile;
    println!("{}", outcome.notification);
    println!();
    println!("Name:     {}", profile.name);
    println!("Email:    {}", profile.email);
    if !profile.phone_number.is_empty() {
        println!("Phone:    {}", profile.phone_number);
    }
    if !profile.bio.is_empty() {
        println!("Bio:      {}", profile.bio);
    }
    println!("Rating:   {} ({})", profile.rating.stars(), profile.rating.description());
    println!("Matching: {}", profile.preferences.rating_summary());
    if !profile.preferences.locations.is_empty() {
        let locations: Vec<&str> = profile.preferences.locations.iter().map(String::as_str).collect();
        println!("Where:    {}", locations.join(", "));
    }
    println!();
    println!("{}", profile.availability.render_grid());
    println!("Next: {}", outcome.route);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityCell, SkillRating};
    use pretty_assertions::assert_eq;

    fn args() -> OnboardArgs {
        OnboardArgs {
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            phone: String::new(),
            bio: String::new(),
            rating: SkillRating::new(4).unwrap(),
            available: vec![
                "monday:evening".parse::<AvailabilityCell>().unwrap(),
                "monday:evening".parse::<AvailabilityCell>().unwrap(),
            ],
            min_rating: SkillRating::new(5).unwrap(),
            max_rating: SkillRating::new(3).unwrap(),
            locations: vec!["Downtown".to_string()],
            genders: vec![],
        }
    }

    #[test]
    fn test_run_builds_onboarded_profile() {
        let mut ctx = UserContext::new();
        let outcome = run(&mut ctx, &args(), &AppConfig::default()).unwrap();

        assert!(outcome.profile.is_onboarded);
        assert!(ctx.is_authenticated());
        // Repeated cells are set once
        assert_eq!(outcome.profile.availability.selected_count(), 1);
        assert_eq!(outcome.profile.preferences.min_rating.value(), 3);
        assert_eq!(outcome.profile.preferences.max_rating.value(), 5);
    }

    #[test]
    fn test_missing_email_fails_with_notification_text() {
        let mut ctx = UserContext::new();
        let err = run(
            &mut ctx,
            &OnboardArgs {
                email: " ".to_string(),
                ..args()
            },
            &AppConfig::default(),
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Required fields missing"));
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_location_outside_config_list_fails() {
        let mut ctx = UserContext::new();
        let mut config = AppConfig::default();
        config.preferences.locations = vec!["Court A".to_string()];

        let err = run(&mut ctx, &args(), &config).unwrap_err();
        assert!(err.to_string().starts_with("Location not available"));
        assert!(!ctx.is_authenticated());

        let outcome = run(
            &mut UserContext::new(),
            &OnboardArgs {
                locations: vec!["court a".to_string()],
                ..args()
            },
            &config,
        )
        .unwrap();
        assert!(outcome.profile.preferences.locations.contains("Court A"));
    }
}
