// ABOUTME: Named navigation routes and their paths
// Invite routes dispatch on the identifier prefix; anything unrecognised is NotFound

use crate::flows::lite_onboarding::LiteOnboardingStep;
use crate::flows::onboarding::OnboardingStep;
use crate::models::InviteId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Onboarding(OnboardingStep),
    LiteOnboarding(LiteOnboardingStep),
    Dashboard,
    OfferGame,
    FindGame,
    Profile,
    Invite(InviteId),
    NotFound(String),
}

impl Route {
    /// Resolve a path. Trailing slashes are ignored, `/app` redirects to the dashboard.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Index,
            ["onboarding"] => Self::Onboarding(OnboardingStep::Welcome),
            ["onboarding", segment] => OnboardingStep::from_segment(segment)
                .filter(|step| *step != OnboardingStep::Welcome)
                .map_or_else(|| Self::NotFound(path.to_string()), Self::Onboarding),
            ["lite-onboarding", segment] => LiteOnboardingStep::from_segment(segment)
                .map_or_else(|| Self::NotFound(path.to_string()), Self::LiteOnboarding),
            ["app"] | ["app", "dashboard"] => Self::Dashboard,
            ["app", "offer-game"] => Self::OfferGame,
            ["app", "find-game"] => Self::FindGame,
            ["app", "profile"] => Self::Profile,
            ["invite", id] => id
                .parse::<InviteId>()
                .map_or_else(|_| Self::NotFound(path.to_string()), Self::Invite),
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Index => "/".to_string(),
            Self::Onboarding(OnboardingStep::Welcome) => "/onboarding".to_string(),
            Self::Onboarding(step) => format!("/onboarding/{}", step.segment()),
            Self::LiteOnboarding(step) => format!("/lite-onboarding/{}", step.segment()),
            Self::Dashboard => "/app/dashboard".to_string(),
            Self::OfferGame => "/app/offer-game".to_string(),
            Self::FindGame => "/app/find-game".to_string(),
            Self::Profile => "/app/profile".to_string(),
            Self::Invite(id) => format!("/invite/{id}"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
