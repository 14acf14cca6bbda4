// ABOUTME: Multi-step wizard controllers (onboarding, lite onboarding, offer game)
// and the smaller profile editor, invite response and swipe deck controllers

pub mod invite_response;
pub mod lite_onboarding;
pub mod offer_game;
pub mod onboarding;
pub mod profile_editor;
pub mod swipe;
pub mod validation;

use crate::app::UserContext;

pub use invite_response::{InviteDecision, InviteReply, InviteResponse};
pub use lite_onboarding::{
    candidate_slots, LiteOnboardingAction, LiteOnboardingFlow, LiteOnboardingOutcome,
    LiteOnboardingStep, MatchingSchedule,
};
pub use offer_game::{
    GameDetails, GameDuration, InviteMethod, MatchMethod, MatchType, OfferGameAction,
    OfferGameFlow, OfferGameStep, OfferOutcome, OpenStep, PartnerDetails, ScheduledGame,
    SpecificStep, UnsupportedDuration,
};
pub use onboarding::{BasicInfo, OnboardingAction, OnboardingFlow, OnboardingOutcome, OnboardingStep};
pub use profile_editor::{ProfileEditor, ProfileEdits};
pub use swipe::{SwipeDeck, SwipeDirection, SwipeGesture};
pub use validation::{RequiredField, SelectionKind, ValidationError, ValidationKind};

/// Result of applying an action to a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S, O> {
    /// The flow is (still) at this step
    Step(S),
    /// The terminal action ran; the flow is over
    Finished(O),
}

impl<S, O> Transition<S, O> {
    pub fn step(&self) -> Option<&S> {
        match self {
            Self::Step(step) => Some(step),
            Self::Finished(_) => None,
        }
    }

    pub fn finished(self) -> Option<O> {
        match self {
            Self::Step(_) => None,
            Self::Finished(outcome) => Some(outcome),
        }
    }
}

/// Shared shape of the step-by-step flows
pub trait Wizard {
    type Step: Copy + Eq + std::fmt::Debug;
    type Action;
    type Outcome;

    fn current_step(&self) -> Self::Step;

    /// Validate and apply one user action. On error the step is unchanged.
    fn apply(
        &mut self,
        ctx: &mut UserContext,
        action: Self::Action,
    ) -> Result<Transition<Self::Step, Self::Outcome>, ValidationError>;

    /// Step back to the predecessor, if the current step has one
    fn back(&mut self) -> Option<Self::Step>;
}
