// ABOUTME: User context shared by every flow: profile, authentication and pending invite
// Owned by the caller and handed to controllers as `&mut`, so updates are serialized by the borrow

use super::router::Route;
use crate::flows::lite_onboarding::LiteOnboardingStep;
use crate::models::{InviteId, ProfileUpdate, UserProfile};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct UserContext {
    profile: Option<UserProfile>,
    authenticated: bool,
    lite_onboarding: bool,
    pending_invite: Option<InviteId>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current profile, `None` until the first update
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Shallow-merge `update` into the profile, creating a default one first if needed
    pub fn update(&mut self, update: ProfileUpdate) -> &UserProfile {
        debug!("Updating profile: {:?}", update);
        let profile = self.profile.get_or_insert_with(UserProfile::default);
        update.apply_to(profile);
        profile
    }

    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    pub const fn is_lite_onboarding(&self) -> bool {
        self.lite_onboarding
    }

    pub fn set_lite_onboarding(&mut self, lite_onboarding: bool) {
        self.lite_onboarding = lite_onboarding;
    }

    pub const fn pending_invite(&self) -> Option<&InviteId> {
        self.pending_invite.as_ref()
    }

    pub fn set_pending_invite(&mut self, invite: Option<InviteId>) {
        self.pending_invite = invite;
    }

    /// Clear the profile and authentication flag
    pub fn logout(&mut self) {
        info!("Logging out");
        self.profile = None;
        self.authenticated = false;
    }

    /// Where the landing page sends the user
    pub fn landing_route(&self) -> Route {
        let onboarded = self.profile.as_ref().is_some_and(|p| p.is_onboarded);
        if self.authenticated && onboarded {
            Route::Dashboard
        } else if self.pending_invite.is_some() && !self.authenticated {
            Route::LiteOnboarding(LiteOnboardingStep::Availability)
        } else {
            Route::Index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InviteKind, SkillRating};

    #[test]
    fn test_profile_absent_until_first_update() {
        let mut ctx = UserContext::new();
        assert!(ctx.profile().is_none());

        ctx.update(ProfileUpdate {
            name: Some("Alex".to_string()),
            ..Default::default()
        });

        let profile = ctx.profile().unwrap();
        assert_eq!(profile.name, "Alex");
        // Untouched fields come from the default profile
        assert_eq!(profile.rating, SkillRating::default());
        assert!(!profile.is_onboarded);
    }

    #[test]
    fn test_logout_clears_profile_and_auth() {
        let mut ctx = UserContext::new();
        ctx.update(ProfileUpdate::onboarded());
        ctx.set_authenticated(true);

        ctx.logout();

        assert!(ctx.profile().is_none());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_landing_route() {
        let mut ctx = UserContext::new();
        assert_eq!(ctx.landing_route(), Route::Index);

        ctx.set_pending_invite(Some(InviteId::generate(InviteKind::Game)));
        assert_eq!(
            ctx.landing_route(),
            Route::LiteOnboarding(LiteOnboardingStep::Availability)
        );

        ctx.update(ProfileUpdate::onboarded());
        ctx.set_authenticated(true);
        assert_eq!(ctx.landing_route(), Route::Dashboard);
    }
}
