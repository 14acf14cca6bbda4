// ABOUTME: Recipient side of an invite link: remember the invite, then accept or decline

use crate::app::{Notification, Route, UserContext};
use crate::flows::lite_onboarding::LiteOnboardingStep;
use crate::models::InviteId;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteDecision {
    Accept,
    Decline,
}

/// Where the recipient goes next and what they are told
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteReply {
    pub route: Route,
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteResponse {
    invite: InviteId,
}

impl InviteResponse {
    /// Opening the link stores the invite so it survives onboarding
    pub fn open(ctx: &mut UserContext, invite: InviteId) -> Self {
        info!("Opened invite {}", invite);
        ctx.set_pending_invite(Some(invite.clone()));
        Self { invite }
    }

    pub fn invite(&self) -> &InviteId {
        &self.invite
    }

    pub fn headline(&self) -> String {
        format!("You've been invited to play squash! ({})", self.invite.kind().description())
    }

    /// Accepting without an account starts lite onboarding; the invite stays pending
    pub fn respond(&self, ctx: &mut UserContext, decision: InviteDecision) -> InviteReply {
        match decision {
            InviteDecision::Accept if ctx.is_authenticated() => {
                info!("Accepted invite {}", self.invite);
                ctx.set_pending_invite(None);
                InviteReply {
                    route: Route::Dashboard,
                    notification: Some(
                        Notification::info("Game accepted!")
                            .with_description("You have accepted the invitation to play."),
                    ),
                }
            }
            InviteDecision::Accept => InviteReply {
                route: Route::LiteOnboarding(LiteOnboardingStep::Availability),
                notification: None,
            },
            InviteDecision::Decline => {
                info!("Declined invite {}", self.invite);
                ctx.set_pending_invite(None);
                InviteReply {
                    route: Route::Index,
                    notification: Some(
                        Notification::info("Invitation declined")
                            .with_description("You have declined the invitation to play."),
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InviteKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_sets_pending_invite() {
        let mut ctx = UserContext::new();
        let id = InviteId::generate(InviteKind::Game);

        let response = InviteResponse::open(&mut ctx, id.clone());

        assert_eq!(ctx.pending_invite(), Some(&id));
        assert_eq!(response.invite(), &id);
    }

    #[test]
    fn test_accept_without_account_starts_lite_onboarding() {
        let mut ctx = UserContext::new();
        let response = InviteResponse::open(&mut ctx, InviteId::generate(InviteKind::Game));

        let reply = response.respond(&mut ctx, InviteDecision::Accept);

        assert_eq!(
            reply.route,
            Route::LiteOnboarding(LiteOnboardingStep::Availability)
        );
        assert_eq!(reply.notification, None);
        assert!(ctx.pending_invite().is_some());
    }

    #[test]
    fn test_accept_when_signed_in() {
        let mut ctx = UserContext::new();
        ctx.set_authenticated(true);
        let response =
            InviteResponse::open(&mut ctx, InviteId::generate(InviteKind::Availability));

        let reply = response.respond(&mut ctx, InviteDecision::Accept);

        assert_eq!(reply.route, Route::Dashboard);
        assert_eq!(reply.notification.unwrap().title, "Game accepted!");
        assert!(ctx.pending_invite().is_none());
    }

    #[test]
    fn test_decline_clears_invite() {
        let mut ctx = UserContext::new();
        let response = InviteResponse::open(&mut ctx, InviteId::generate(InviteKind::Game));

        let reply = response.respond(&mut ctx, InviteDecision::Decline);

        assert_eq!(reply.route, Route::Index);
        assert_eq!(ctx.landing_route(), Route::Index);
    }
}
