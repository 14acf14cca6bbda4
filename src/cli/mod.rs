// ABOUTME: CLI argument parsing and command routing for squash-match
//
// Provides command-line interface for:
// - Creating a profile through the onboarding flow (onboard)
// - Offering games to anyone or to a named partner (offer-game)
// - Responding to an invite link (invite)
// - Previewing availability and matching times (availability)
// - Showing the effective configuration (config)

pub mod availability;
pub mod config;
pub mod invite;
pub mod offer;
pub mod onboard;
pub mod util;

use crate::models::{AvailabilityCell, GenderPreference, SkillRating};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Find squash partners: onboarding, game offers and invites
#[derive(Parser)]
#[command(name = "squash-match")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a profile by running the full onboarding flow
    Onboard(OnboardArgs),

    /// Offer a game to anyone or to a specific partner
    OfferGame(OfferGameArgs),

    /// Accept or decline an invite link
    Invite(InviteArgs),

    /// Show an availability grid and the upcoming times that match it
    Availability(AvailabilityArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the onboard command
#[derive(clap::Args)]
pub struct OnboardArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub bio: String,

    /// Skill level, 1 to 5
    #[arg(long, default_value = "3", value_parser = util::parse_rating)]
    pub rating: SkillRating,

    /// Free cell as day:part, e.g. monday:evening (repeatable)
    #[arg(long = "available")]
    pub available: Vec<AvailabilityCell>,

    /// Lowest opponent rating
    #[arg(long, default_value = "1", value_parser = util::parse_rating)]
    pub min_rating: SkillRating,

    /// Highest opponent rating
    #[arg(long, default_value = "5", value_parser = util::parse_rating)]
    pub max_rating: SkillRating,

    /// Preferred location, one of the configured locations (repeatable)
    #[arg(long = "location")]
    pub locations: Vec<String>,

    /// Preferred opponent gender: male, female or any (repeatable)
    #[arg(long = "gender")]
    pub genders: Vec<GenderPreference>,
}

/// Arguments for the offer-game command
#[derive(clap::Args)]
pub struct OfferGameArgs {
    #[command(subcommand)]
    pub target: OfferTarget,
}

#[derive(Subcommand)]
pub enum OfferTarget {
    /// Open to anyone matching your preferences
    Open(OpenOfferArgs),

    /// Invite a specific partner
    Specific(SpecificOfferArgs),
}

/// Date, time, duration and place of a fixed game
#[derive(clap::Args, Clone, Default)]
pub struct GameDetailsArgs {
    /// Game date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Start time, HH:MM
    #[arg(long, value_parser = util::parse_time)]
    pub time: Option<chrono::NaiveTime>,

    /// Minutes: 30, 60, 90 or 120 (config default if omitted)
    #[arg(long)]
    pub duration: Option<u32>,

    #[arg(long, default_value = "")]
    pub location: String,
}

/// Arguments for `offer-game open`
#[derive(clap::Args)]
pub struct OpenOfferArgs {
    /// Propose slots and let the system find the best opponent
    #[arg(long)]
    pub best_match: bool,

    /// Proposed start, YYYY-MM-DDTHH:MM (repeatable, with --best-match)
    #[arg(long = "slot", value_parser = util::parse_slot)]
    pub slots: Vec<chrono::NaiveDateTime>,

    #[command(flatten)]
    pub details: GameDetailsArgs,

    /// Copy the invite link to the clipboard
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for `offer-game specific`
#[derive(clap::Args)]
pub struct SpecificOfferArgs {
    /// Partner name
    #[arg(long)]
    pub partner: String,

    /// Partner email
    #[arg(long)]
    pub email: Option<String>,

    /// Send your availability instead of a fixed time
    #[arg(long)]
    pub share_availability: bool,

    /// Your free cells as day:part (repeatable, with --share-availability)
    #[arg(long = "available")]
    pub available: Vec<AvailabilityCell>,

    #[command(flatten)]
    pub details: GameDetailsArgs,

    /// Copy the invite link to the clipboard
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the invite command
#[derive(clap::Args)]
pub struct InviteArgs {
    /// Invite identifier (game_... or avail_...) or a full invite link
    pub id: String,

    /// Decline instead of accepting
    #[arg(long)]
    pub decline: bool,

    /// Respond as an existing, signed-in player
    #[arg(long)]
    pub signed_in: bool,

    /// Your free cells as day:part (repeatable)
    #[arg(long = "available")]
    pub available: Vec<AvailabilityCell>,

    /// Accept the Nth candidate time, starting at 1 (repeatable)
    #[arg(long = "accept-slot")]
    pub accept_slots: Vec<usize>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Skill level, 1 to 5
    #[arg(long, default_value = "3", value_parser = util::parse_rating)]
    pub rating: SkillRating,
}

/// Arguments for the availability command
#[derive(clap::Args)]
pub struct AvailabilityArgs {
    /// Free cell as day:part (repeatable)
    #[arg(long = "available")]
    pub available: Vec<AvailabilityCell>,

    /// Also list bookable start times N weeks from now (0 is this week)
    #[arg(long)]
    pub week: Option<u32>,
}

/// Arguments for the config command
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Print the config file location instead of its contents
    #[arg(long)]
    pub path: bool,

    /// Write the defaults to the config file if it does not exist yet
    #[arg(long)]
    pub init: bool,
}
