// ABOUTME: Full onboarding wizard for new players
// Welcome -> BasicInfo -> Rating -> Availability -> Preferences -> Complete

use super::validation::{required, RequiredField, ValidationError};
use super::{Transition, Wizard};
use crate::app::{Notification, Route, UserContext};
use crate::models::{
    AvailabilityMatrix, DayPart, MatchPreferences, ProfileUpdate, SkillRating, UserProfile,
    Weekday,
};
use tracing::{debug, info};

/// Steps in the onboarding wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    Welcome,
    BasicInfo,
    Rating,
    Availability,
    Preferences,
    Complete,
}

impl OnboardingStep {
    /// Get all steps in order
    pub fn all() -> &'static [OnboardingStep] {
        &[
            Self::Welcome,
            Self::BasicInfo,
            Self::Rating,
            Self::Availability,
            Self::Preferences,
            Self::Complete,
        ]
    }

    /// Position shown in the progress bar; the completion screen has none
    pub fn number(&self) -> Option<usize> {
        match self {
            Self::Welcome => Some(1),
            Self::BasicInfo => Some(2),
            Self::Rating => Some(3),
            Self::Availability => Some(4),
            Self::Preferences => Some(5),
            Self::Complete => None,
        }
    }

    /// Steps counted by the progress bar
    pub fn total() -> usize {
        5
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to SquashMatch",
            Self::BasicInfo => "Your Basic Info",
            Self::Rating => "Rate Your Skill Level",
            Self::Availability => "When Can You Play?",
            Self::Preferences => "Match Preferences",
            Self::Complete => "You're All Set!",
        }
    }

    /// Path segment under `/onboarding`
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Welcome => "",
            Self::BasicInfo => "basic-info",
            Self::Rating => "rating",
            Self::Availability => "availability",
            Self::Preferences => "preferences",
            Self::Complete => "complete",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.segment() == segment)
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Welcome => Some(Self::BasicInfo),
            Self::BasicInfo => Some(Self::Rating),
            Self::Rating => Some(Self::Availability),
            Self::Availability => Some(Self::Preferences),
            Self::Preferences => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// The completion screen commits the profile and has no way back
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Welcome | Self::Complete => None,
            Self::BasicInfo => Some(Self::Welcome),
            Self::Rating => Some(Self::BasicInfo),
            Self::Availability => Some(Self::Rating),
            Self::Preferences => Some(Self::Availability),
        }
    }
}

/// Identity fields entered on the basic info step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
}

impl BasicInfo {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            bio: profile.bio.clone(),
        }
    }

    /// Trim every field; name and email must be non-blank
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();
        let name = required(&self.name, RequiredField::Name, &mut missing);
        let email = required(&self.email, RequiredField::Email, &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(Self {
            name,
            email,
            phone_number: self.phone_number.trim().to_string(),
            bio: self.bio.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingAction {
    Start,
    SubmitBasicInfo(BasicInfo),
    SubmitRating(SkillRating),
    ToggleAvailability(Weekday, DayPart),
    Continue,
    SubmitPreferences(MatchPreferences),
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingOutcome {
    pub profile: UserProfile,
    pub route: Route,
    pub notification: Notification,
}

/// Wizard state: current step plus the form values, pre-filled from any existing profile
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    current_step: OnboardingStep,
    basic_info: BasicInfo,
    rating: SkillRating,
    availability: AvailabilityMatrix,
    preferences: MatchPreferences,
    /// Locations the preferences step offers; empty accepts any
    location_options: Vec<String>,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self {
            current_step: OnboardingStep::Welcome,
            basic_info: BasicInfo::default(),
            rating: SkillRating::default(),
            availability: AvailabilityMatrix::new(),
            preferences: MatchPreferences::default(),
            location_options: Vec::new(),
        }
    }
}

impl OnboardingFlow {
    pub fn new(ctx: &UserContext) -> Self {
        match ctx.profile() {
            Some(profile) => Self {
                current_step: OnboardingStep::Welcome,
                basic_info: BasicInfo::from_profile(profile),
                rating: profile.rating,
                availability: profile.availability,
                preferences: profile.preferences.clone(),
                location_options: Vec::new(),
            },
            None => Self::default(),
        }
    }

    /// Restrict preferred locations to a fixed list
    #[must_use]
    pub fn with_location_options(mut self, options: Vec<String>) -> Self {
        self.location_options = options;
        self
    }

    pub fn location_options(&self) -> &[String] {
        &self.location_options
    }

    pub fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    pub fn rating(&self) -> SkillRating {
        self.rating
    }

    pub fn availability(&self) -> &AvailabilityMatrix {
        &self.availability
    }

    pub fn preferences(&self) -> &MatchPreferences {
        &self.preferences
    }

    /// Order the rating bounds and map each location onto its listed spelling
    fn checked_preferences(
        &self,
        preferences: MatchPreferences,
    ) -> Result<MatchPreferences, ValidationError> {
        let mut preferences = preferences.normalized();
        if self.location_options.is_empty() {
            return Ok(preferences);
        }
        preferences.locations = preferences
            .locations
            .iter()
            .map(|location| {
                self.location_options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(location))
                    .cloned()
                    .ok_or_else(|| ValidationError::UnknownLocation(location.clone()))
            })
            .collect::<Result<_, _>>()?;
        Ok(preferences)
    }

    fn advance(&mut self) -> OnboardingStep {
        if let Some(next) = self.current_step.next() {
            info!("Onboarding: {:?} -> {:?}", self.current_step, next);
            self.current_step = next;
        }
        self.current_step
    }
}

impl Wizard for OnboardingFlow {
    type Step = OnboardingStep;
    type Action = OnboardingAction;
    type Outcome = OnboardingOutcome;

    fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    fn apply(
        &mut self,
        ctx: &mut UserContext,
        action: OnboardingAction,
    ) -> Result<Transition<OnboardingStep, OnboardingOutcome>, ValidationError> {
        use OnboardingAction as A;
        use OnboardingStep as S;

        let step = match (self.current_step, action) {
            (S::Welcome, A::Start) => self.advance(),
            (S::BasicInfo, A::SubmitBasicInfo(info)) => {
                let info = info.validated()?;
                ctx.update(ProfileUpdate {
                    name: Some(info.name.clone()),
                    email: Some(info.email.clone()),
                    phone_number: Some(info.phone_number.clone()),
                    bio: Some(info.bio.clone()),
                    ..Default::default()
                });
                self.basic_info = info;
                self.advance()
            }
            (S::Rating, A::SubmitRating(rating)) => {
                ctx.update(ProfileUpdate {
                    rating: Some(rating),
                    ..Default::default()
                });
                self.rating = rating;
                self.advance()
            }
            (S::Availability, A::ToggleAvailability(day, part)) => {
                self.availability = self.availability.toggled(day, part);
                ctx.update(ProfileUpdate::availability(self.availability));
                self.current_step
            }
            (S::Availability, A::Continue) => {
                ctx.update(ProfileUpdate::availability(self.availability));
                self.advance()
            }
            (S::Preferences, A::SubmitPreferences(preferences)) => {
                let preferences = self.checked_preferences(preferences)?;
                ctx.update(ProfileUpdate {
                    preferences: Some(preferences.clone()),
                    ..Default::default()
                });
                self.preferences = preferences;
                self.advance()
            }
            (S::Complete, A::Finish) => {
                let profile = ctx.update(ProfileUpdate::onboarded()).clone();
                ctx.set_authenticated(true);
                info!("Onboarding complete for {}", profile.email);
                return Ok(Transition::Finished(OnboardingOutcome {
                    profile,
                    route: Route::Dashboard,
                    notification: Notification::info("Profile created successfully!")
                        .with_description("Welcome to SquashMatch."),
                }));
            }
            (step, action) => {
                debug!("Ignoring {:?} on onboarding step {:?}", action, step);
                step
            }
        };
        Ok(Transition::Step(step))
    }

    fn back(&mut self) -> Option<OnboardingStep> {
        let previous = self.current_step.previous()?;
        debug!("Onboarding: back {:?} -> {:?}", self.current_step, previous);
        self.current_step = previous;
        Some(previous)
    }
}
