// ABOUTME: Lite onboarding for invitees without an account
// Availability -> Matching (swipe through candidate times) -> Complete

use super::swipe::{SwipeDeck, SwipeDirection};
use super::validation::{required, RequiredField, ValidationError};
use super::{Transition, Wizard};
use crate::app::{Notification, Route, UserContext};
use crate::models::{
    AvailabilityMatrix, Clock, DayPart, InviteId, ProfileUpdate, SkillRating, SystemClock,
    UserProfile, Weekday,
};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteOnboardingStep {
    Availability,
    Matching,
    Complete,
}

impl LiteOnboardingStep {
    pub fn all() -> &'static [LiteOnboardingStep] {
        &[Self::Availability, Self::Matching, Self::Complete]
    }

    pub fn number(&self) -> usize {
        match self {
            Self::Availability => 1,
            Self::Matching => 2,
            Self::Complete => 3,
        }
    }

    pub fn total() -> usize {
        3
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Availability => "Your Availability",
            Self::Matching => "Select Available Times",
            Self::Complete => "Almost Done!",
        }
    }

    /// Path segment under `/lite-onboarding`
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Matching => "matching",
            Self::Complete => "complete",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.segment() == segment)
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Matching => Some(Self::Availability),
            Self::Availability | Self::Complete => None,
        }
    }
}

/// Which upcoming times are offered as swipe cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingSchedule {
    /// Days from today to the first candidate day
    pub first_day_offset: u32,
    /// Number of consecutive candidate days
    pub days: u32,
    /// Start times offered on each day
    pub times: Vec<NaiveTime>,
}

impl Default for MatchingSchedule {
    fn default() -> Self {
        Self {
            first_day_offset: 1,
            days: 7,
            times: [10, 15, 19]
                .into_iter()
                .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
                .collect(),
        }
    }
}

/// Candidate start times after `today` that fall into the availability grid.
///
/// An all-false grid filters nothing, so a user who has not picked any cell is
/// offered every time. This holds even when cells were toggled on and back off;
/// the grid carries no "touched" state, so such a user also sees every time
/// rather than none. Days past the end of the calendar are dropped.
pub fn candidate_slots(
    today: NaiveDate,
    schedule: &MatchingSchedule,
    availability: &AvailabilityMatrix,
) -> Vec<NaiveDateTime> {
    let first = schedule.first_day_offset;
    (first..first.saturating_add(schedule.days))
        .map_while(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .flat_map(|day| schedule.times.iter().map(move |&time| day.and_time(time)))
        .filter(|slot| availability.is_empty() || availability.matches(*slot))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteOnboardingAction {
    ToggleAvailability(Weekday, DayPart),
    Continue,
    SwipeRight,
    SwipeLeft,
    Skip,
    Finish {
        name: String,
        email: String,
        rating: SkillRating,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteOnboardingOutcome {
    pub profile: UserProfile,
    pub accepted_slots: Vec<NaiveDateTime>,
    pub invite: Option<InviteId>,
    pub route: Route,
    pub notification: Notification,
}

pub struct LiteOnboardingFlow {
    current_step: LiteOnboardingStep,
    availability: AvailabilityMatrix,
    schedule: MatchingSchedule,
    clock: Box<dyn Clock>,
    invite: Option<InviteId>,
    /// Deck plus the availability it was built from
    deck: Option<(AvailabilityMatrix, SwipeDeck<NaiveDateTime>)>,
}

impl std::fmt::Debug for LiteOnboardingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiteOnboardingFlow")
            .field("current_step", &self.current_step)
            .field("availability", &self.availability)
            .field("invite", &self.invite)
            .field("deck", &self.deck)
            .finish_non_exhaustive()
    }
}

impl LiteOnboardingFlow {
    /// Start the flow for the invite pending in `ctx`, on the system clock
    pub fn new(ctx: &mut UserContext, schedule: MatchingSchedule) -> Self {
        Self::with_clock(ctx, schedule, Box::new(SystemClock))
    }

    pub fn with_clock(
        ctx: &mut UserContext,
        schedule: MatchingSchedule,
        clock: Box<dyn Clock>,
    ) -> Self {
        ctx.set_lite_onboarding(true);
        Self {
            current_step: LiteOnboardingStep::Availability,
            availability: ctx.profile().map(|p| p.availability).unwrap_or_default(),
            schedule,
            clock,
            invite: ctx.pending_invite().cloned(),
            deck: None,
        }
    }

    pub fn availability(&self) -> &AvailabilityMatrix {
        &self.availability
    }

    pub fn deck(&self) -> Option<&SwipeDeck<NaiveDateTime>> {
        self.deck.as_ref().map(|(_, deck)| deck)
    }

    pub fn accepted_slots(&self) -> &[NaiveDateTime] {
        self.deck().map(SwipeDeck::accepted).unwrap_or_default()
    }

    fn go_to(&mut self, step: LiteOnboardingStep) -> LiteOnboardingStep {
        info!("Lite onboarding: {:?} -> {:?}", self.current_step, step);
        self.current_step = step;
        step
    }

    /// Build the deck unless one already exists for the current availability
    fn prepare_deck(&mut self) {
        if matches!(&self.deck, Some((built_for, _)) if *built_for == self.availability) {
            return;
        }
        let today = self.clock.now().date();
        let slots = candidate_slots(today, &self.schedule, &self.availability);
        debug!("Built swipe deck with {} candidate slots", slots.len());
        self.deck = Some((self.availability, SwipeDeck::new(slots)));
    }

    fn swipe(&mut self, direction: SwipeDirection) -> LiteOnboardingStep {
        let Some((_, deck)) = self.deck.as_mut() else {
            return self.current_step;
        };
        if deck.swipe(direction).is_none() {
            debug!("Swipe on an exhausted deck ignored");
            return self.current_step;
        }
        if deck.is_exhausted() {
            self.go_to(LiteOnboardingStep::Complete)
        } else {
            self.current_step
        }
    }
}

impl Wizard for LiteOnboardingFlow {
    type Step = LiteOnboardingStep;
    type Action = LiteOnboardingAction;
    type Outcome = LiteOnboardingOutcome;

    fn current_step(&self) -> LiteOnboardingStep {
        self.current_step
    }

    fn apply(
        &mut self,
        ctx: &mut UserContext,
        action: LiteOnboardingAction,
    ) -> Result<Transition<LiteOnboardingStep, LiteOnboardingOutcome>, ValidationError> {
        use LiteOnboardingAction as A;
        use LiteOnboardingStep as S;

        let step = match (self.current_step, action) {
            (S::Availability, A::ToggleAvailability(day, part)) => {
                self.availability = self.availability.toggled(day, part);
                ctx.update(ProfileUpdate::availability(self.availability));
                self.current_step
            }
            (S::Availability, A::Continue) => {
                self.prepare_deck();
                self.go_to(S::Matching)
            }
            (S::Matching, A::SwipeRight) => self.swipe(SwipeDirection::Right),
            (S::Matching, A::SwipeLeft) => self.swipe(SwipeDirection::Left),
            (S::Matching, A::Skip) => self.go_to(S::Complete),
            (S::Complete, A::Finish { name, email, rating }) => {
                let mut missing = Vec::new();
                let name = required(&name, RequiredField::Name, &mut missing);
                let email = required(&email, RequiredField::Email, &mut missing);
                if !missing.is_empty() {
                    return Err(ValidationError::MissingFields(missing));
                }

                let profile = ctx
                    .update(ProfileUpdate {
                        name: Some(name),
                        email: Some(email),
                        rating: Some(rating),
                        is_onboarded: Some(true),
                        ..Default::default()
                    })
                    .clone();
                ctx.set_authenticated(true);
                ctx.set_lite_onboarding(false);
                ctx.set_pending_invite(None);
                info!(
                    "Lite onboarding complete, {} slots accepted",
                    self.accepted_slots().len()
                );

                return Ok(Transition::Finished(LiteOnboardingOutcome {
                    profile,
                    accepted_slots: self.accepted_slots().to_vec(),
                    invite: self.invite.clone(),
                    route: Route::Dashboard,
                    notification: Notification::info("Game response recorded!")
                        .with_description("Your game time preferences have been submitted."),
                }));
            }
            (step, action) => {
                debug!("Ignoring {:?} on lite onboarding step {:?}", action, step);
                step
            }
        };
        Ok(Transition::Step(step))
    }

    fn back(&mut self) -> Option<LiteOnboardingStep> {
        let previous = self.current_step.previous()?;
        debug!("Lite onboarding: back {:?} -> {:?}", self.current_step, previous);
        self.current_step = previous;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_slots::MockClock;
    use pretty_assertions::assert_eq;

    // Monday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn clock() -> Box<dyn Clock> {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .return_const(today().and_hms_opt(9, 0, 0).unwrap());
        Box::new(clock)
    }

    #[test]
    fn test_candidates_cover_next_week() {
        let slots = candidate_slots(today(), &MatchingSchedule::default(), &AvailabilityMatrix::new());

        assert_eq!(slots.len(), 21);
        assert_eq!(
            slots[0],
            NaiveDate::from_ymd_opt(2026, 10, 20)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(
            slots[20],
            NaiveDate::from_ymd_opt(2026, 10, 26)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_candidates_filtered_by_availability() {
        let availability = AvailabilityMatrix::new()
            .toggled(Weekday::Tuesday, DayPart::Evening)
            .toggled(Weekday::Monday, DayPart::Morning);

        let slots = candidate_slots(today(), &MatchingSchedule::default(), &availability);

        // Tuesday 20th at 19:00 and Monday 26th at 10:00
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|slot| availability.matches(*slot)));
    }

    #[test]
    fn test_toggled_off_grid_offers_everything() {
        let cleared = AvailabilityMatrix::new()
            .toggled(Weekday::Friday, DayPart::Evening)
            .toggled(Weekday::Friday, DayPart::Evening);

        let slots = candidate_slots(today(), &MatchingSchedule::default(), &cleared);
        assert_eq!(slots.len(), 21);
    }

    #[test]
    fn test_candidates_stop_at_calendar_end() {
        let schedule = MatchingSchedule {
            first_day_offset: u32::MAX - 1,
            days: 5,
            ..MatchingSchedule::default()
        };
        assert!(candidate_slots(today(), &schedule, &AvailabilityMatrix::new()).is_empty());
    }

    #[test]
    fn test_swiping_through_deck_completes() {
        let mut ctx = UserContext::new();
        ctx.update(ProfileUpdate::availability(
            AvailabilityMatrix::new().toggled(Weekday::Wednesday, DayPart::Afternoon),
        ));
        let mut flow = LiteOnboardingFlow::with_clock(&mut ctx, MatchingSchedule::default(), clock());
        assert!(ctx.is_lite_onboarding());

        flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
        assert_eq!(flow.current_step(), LiteOnboardingStep::Matching);
        assert_eq!(flow.deck().unwrap().cards().len(), 1);

        let next = flow.apply(&mut ctx, LiteOnboardingAction::SwipeRight).unwrap();

        assert_eq!(next, Transition::Step(LiteOnboardingStep::Complete));
        assert_eq!(flow.accepted_slots().len(), 1);
    }

    #[test]
    fn test_back_and_continue_keeps_deck() {
        let mut ctx = UserContext::new();
        let mut flow = LiteOnboardingFlow::with_clock(&mut ctx, MatchingSchedule::default(), clock());
        flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
        flow.apply(&mut ctx, LiteOnboardingAction::SwipeRight).unwrap();
        let before = flow.deck().cloned();

        assert_eq!(flow.back(), Some(LiteOnboardingStep::Availability));
        flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();

        assert_eq!(flow.current_step(), LiteOnboardingStep::Matching);
        assert_eq!(flow.deck().cloned(), before);
    }

    #[test]
    fn test_finish_requires_name_and_email() {
        let mut ctx = UserContext::new();
        let mut flow = LiteOnboardingFlow::with_clock(&mut ctx, MatchingSchedule::default(), clock());
        flow.apply(&mut ctx, LiteOnboardingAction::Continue).unwrap();
        flow.apply(&mut ctx, LiteOnboardingAction::Skip).unwrap();

        let err = flow
            .apply(
                &mut ctx,
                LiteOnboardingAction::Finish {
                    name: String::new(),
                    email: String::new(),
                    rating: SkillRating::default(),
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingFields(vec![RequiredField::Name, RequiredField::Email])
        );
        assert_eq!(flow.current_step(), LiteOnboardingStep::Complete);
        assert!(!ctx.is_authenticated());
    }
}
