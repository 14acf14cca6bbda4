// ABOUTME: Offer-game wizard: open request to anyone, or an invite for a specific partner
// Steps are tagged per variant so the back table never has to guess which branch it is on

use super::validation::{required, RequiredField, SelectionKind, ValidationError};
use super::{Transition, Wizard};
use crate::app::{Notification, UserContext};
use crate::models::{
    AvailabilityMatrix, Clock, InviteId, InviteKind, SystemClock, TimeSlotSelection,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Anyone who fits the player's preferences
    Open,
    /// A named partner
    Specific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Propose several slots and let the system pick an opponent
    BestMatch,
    /// Fix a date, time and place
    SpecificTime,
}

/// How a specific partner is invited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteMethod {
    /// Send a link to the weekly availability, the partner picks a time
    ShareAvailability,
    #[default]
    SpecificTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenStep {
    MatchMethod,
    Slots,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecificStep {
    Partner,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferGameStep {
    Initial,
    Open(OpenStep),
    Specific(SpecificStep),
    Success,
}

impl OfferGameStep {
    /// Predecessor for the back button; the first and last screens have none
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Initial | Self::Success => None,
            Self::Open(OpenStep::MatchMethod) => Some(Self::Initial),
            Self::Open(OpenStep::Slots | OpenStep::Time) => Some(Self::Open(OpenStep::MatchMethod)),
            Self::Specific(SpecificStep::Partner) => Some(Self::Initial),
            Self::Specific(SpecificStep::Time) => Some(Self::Specific(SpecificStep::Partner)),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Initial => "Who do you want to play with?",
            Self::Open(OpenStep::MatchMethod) => "How would you like to be matched?",
            Self::Open(OpenStep::Slots) => "When are you available?",
            Self::Open(OpenStep::Time) | Self::Specific(SpecificStep::Time) => "Game Details",
            Self::Specific(SpecificStep::Partner) => "Who do you want to invite?",
            Self::Success => "Game Offer Created",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unsupported game duration {0} minutes (expected 30, 60, 90 or 120)")]
pub struct UnsupportedDuration(pub u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub enum GameDuration {
    HalfHour,
    #[default]
    Hour,
    HourAndHalf,
    TwoHours,
}

impl GameDuration {
    pub fn all() -> &'static [GameDuration] {
        &[Self::HalfHour, Self::Hour, Self::HourAndHalf, Self::TwoHours]
    }

    pub const fn minutes(self) -> u32 {
        match self {
            Self::HalfHour => 30,
            Self::Hour => 60,
            Self::HourAndHalf => 90,
            Self::TwoHours => 120,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HalfHour => "30 minutes",
            Self::Hour => "1 hour",
            Self::HourAndHalf => "1.5 hours",
            Self::TwoHours => "2 hours",
        }
    }
}

impl TryFrom<u32> for GameDuration {
    type Error = UnsupportedDuration;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.minutes() == minutes)
            .ok_or(UnsupportedDuration(minutes))
    }
}

impl From<GameDuration> for u32 {
    fn from(duration: GameDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for GameDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Game detail form as entered; checked on submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDetails {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: GameDuration,
    pub location: String,
}

/// The partner being invited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartnerDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub method: InviteMethod,
}

/// A validated game: start in the future, known duration, non-blank location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledGame {
    pub start: NaiveDateTime,
    pub duration: GameDuration,
    pub location: String,
}

impl ScheduledGame {
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(i64::from(self.duration.minutes()))
    }
}

/// What the flow produced when it reached the success screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferOutcome {
    /// Open request with proposed slots; no invite link
    MatchRequested { slots: Vec<NaiveDateTime> },
    /// Fixed-time game, optionally addressed to a partner
    GameOffer {
        invite: InviteId,
        game: ScheduledGame,
        #[serde(skip_serializing_if = "Option::is_none")]
        partner: Option<PartnerDetails>,
    },
    /// Link to the sender's weekly availability
    AvailabilityShared {
        invite: InviteId,
        partner: PartnerDetails,
        availability: AvailabilityMatrix,
    },
}

impl OfferOutcome {
    pub fn invite(&self) -> Option<&InviteId> {
        match self {
            Self::MatchRequested { .. } => None,
            Self::GameOffer { invite, .. } | Self::AvailabilityShared { invite, .. } => {
                Some(invite)
            }
        }
    }

    pub fn notification(&self) -> Notification {
        match self {
            Self::MatchRequested { .. } => Notification::info("Availability submitted")
                .with_description("We'll notify you when we find a suitable match."),
            Self::GameOffer { .. } => Notification::info("Game offer created!")
                .with_description("Share this link with your friend to invite them to play."),
            Self::AvailabilityShared { partner, .. } => {
                Notification::info("Availability link generated").with_description(format!(
                    "A link with your availability has been created to share with {}",
                    partner.name
                ))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferGameAction {
    Choose(MatchType),
    ChooseMethod(MatchMethod),
    ToggleSlot(NaiveDateTime),
    SubmitSlots,
    SubmitPartner(PartnerDetails),
    SubmitDetails(GameDetails),
    Finish,
}

pub struct OfferGameFlow {
    current_step: OfferGameStep,
    match_type: Option<MatchType>,
    match_method: Option<MatchMethod>,
    slots: TimeSlotSelection,
    partner: Option<PartnerDetails>,
    details: Option<GameDetails>,
    outcome: Option<OfferOutcome>,
    time_options: Vec<NaiveTime>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for OfferGameFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfferGameFlow")
            .field("current_step", &self.current_step)
            .field("match_type", &self.match_type)
            .field("match_method", &self.match_method)
            .field("slots", &self.slots)
            .field("partner", &self.partner)
            .field("details", &self.details)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Default for OfferGameFlow {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl OfferGameFlow {
    /// `time_options` are the selectable start times; empty allows any time
    pub fn new(time_options: Vec<NaiveTime>) -> Self {
        Self::with_clock(time_options, Box::new(SystemClock))
    }

    pub fn with_clock(time_options: Vec<NaiveTime>, clock: Box<dyn Clock>) -> Self {
        Self {
            current_step: OfferGameStep::Initial,
            match_type: None,
            match_method: None,
            slots: TimeSlotSelection::new(),
            partner: None,
            details: None,
            outcome: None,
            time_options,
            clock,
        }
    }

    pub fn match_type(&self) -> Option<MatchType> {
        self.match_type
    }

    pub fn match_method(&self) -> Option<MatchMethod> {
        self.match_method
    }

    pub fn slots(&self) -> &TimeSlotSelection {
        &self.slots
    }

    pub fn partner(&self) -> Option<&PartnerDetails> {
        self.partner.as_ref()
    }

    pub fn details(&self) -> Option<&GameDetails> {
        self.details.as_ref()
    }

    /// Set once the success screen is reached
    pub fn outcome(&self) -> Option<&OfferOutcome> {
        self.outcome.as_ref()
    }

    fn go_to(&mut self, step: OfferGameStep) -> OfferGameStep {
        info!("Offer game: {:?} -> {:?}", self.current_step, step);
        self.current_step = step;
        step
    }

    fn succeed(&mut self, outcome: OfferOutcome) -> OfferGameStep {
        if let Some(invite) = outcome.invite() {
            info!("Generated invite {}", invite);
        }
        self.outcome = Some(outcome);
        self.go_to(OfferGameStep::Success)
    }

    fn validate_details(&self, details: &GameDetails) -> Result<ScheduledGame, ValidationError> {
        let date = details
            .date
            .ok_or_else(|| ValidationError::missing(RequiredField::Date))?;
        let time = details
            .time
            .ok_or_else(|| ValidationError::missing(RequiredField::Time))?;
        if !self.time_options.is_empty() && !self.time_options.contains(&time) {
            return Err(ValidationError::UnavailableSelection(
                time.format("%H:%M").to_string(),
            ));
        }
        let start = date.and_time(time);
        if start < self.clock.now() {
            return Err(ValidationError::PastSelection(start));
        }
        let mut missing = Vec::new();
        let location = required(&details.location, RequiredField::Location, &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(ScheduledGame {
            start,
            duration: details.duration,
            location,
        })
    }
}

impl Wizard for OfferGameFlow {
    type Step = OfferGameStep;
    type Action = OfferGameAction;
    type Outcome = OfferOutcome;

    fn current_step(&self) -> OfferGameStep {
        self.current_step
    }

    fn apply(
        &mut self,
        ctx: &mut UserContext,
        action: OfferGameAction,
    ) -> Result<Transition<OfferGameStep, OfferOutcome>, ValidationError> {
        use OfferGameAction as A;
        use OfferGameStep as S;

        let step = match (self.current_step, action) {
            (S::Initial, A::Choose(match_type)) => {
                self.match_type = Some(match_type);
                match match_type {
                    MatchType::Open => self.go_to(S::Open(OpenStep::MatchMethod)),
                    MatchType::Specific => self.go_to(S::Specific(SpecificStep::Partner)),
                }
            }
            (S::Open(OpenStep::MatchMethod), A::ChooseMethod(method)) => {
                self.match_method = Some(method);
                match method {
                    MatchMethod::BestMatch => self.go_to(S::Open(OpenStep::Slots)),
                    MatchMethod::SpecificTime => self.go_to(S::Open(OpenStep::Time)),
                }
            }
            (S::Open(OpenStep::Slots), A::ToggleSlot(at)) => {
                let toggle = self
                    .slots
                    .toggle(at, self.clock.as_ref())
                    .map_err(|past| ValidationError::PastSelection(past.0))?;
                debug!("Slot {} {:?}", at, toggle);
                self.current_step
            }
            (S::Open(OpenStep::Slots), A::SubmitSlots) => {
                if self.slots.is_empty() {
                    return Err(ValidationError::EmptySelection(SelectionKind::TimeSlots));
                }
                self.succeed(OfferOutcome::MatchRequested {
                    slots: self.slots.slots().to_vec(),
                })
            }
            (S::Specific(SpecificStep::Partner), A::SubmitPartner(partner)) => {
                let mut missing = Vec::new();
                let name = required(&partner.name, RequiredField::PartnerName, &mut missing);
                if !missing.is_empty() {
                    return Err(ValidationError::MissingFields(missing));
                }
                let partner = PartnerDetails {
                    name,
                    email: partner
                        .email
                        .map(|e| e.trim().to_string())
                        .filter(|e| !e.is_empty()),
                    method: partner.method,
                };
                self.partner = Some(partner.clone());
                match partner.method {
                    InviteMethod::SpecificTime => self.go_to(S::Specific(SpecificStep::Time)),
                    InviteMethod::ShareAvailability => {
                        let availability =
                            ctx.profile().map(|p| p.availability).unwrap_or_default();
                        self.succeed(OfferOutcome::AvailabilityShared {
                            invite: InviteId::generate(InviteKind::Availability),
                            partner,
                            availability,
                        })
                    }
                }
            }
            (S::Open(OpenStep::Time) | S::Specific(SpecificStep::Time), A::SubmitDetails(details)) => {
                let game = self.validate_details(&details)?;
                self.details = Some(details);
                let partner = match self.current_step {
                    S::Specific(_) => self.partner.clone(),
                    _ => None,
                };
                self.succeed(OfferOutcome::GameOffer {
                    invite: InviteId::generate(InviteKind::Game),
                    game,
                    partner,
                })
            }
            (S::Success, A::Finish) => {
                if let Some(outcome) = &self.outcome {
                    return Ok(Transition::Finished(outcome.clone()));
                }
                self.current_step
            }
            (step, action) => {
                debug!("Ignoring {:?} on offer game step {:?}", action, step);
                step
            }
        };
        Ok(Transition::Step(step))
    }

    fn back(&mut self) -> Option<OfferGameStep> {
        let previous = self.current_step.previous()?;
        debug!("Offer game: back {:?} -> {:?}", self.current_step, previous);
        self.current_step = previous;
        Some(previous)
    }
}
