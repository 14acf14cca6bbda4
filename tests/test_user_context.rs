// ABOUTME: Integration tests for the user context, routing and invite identifiers

use pretty_assertions::assert_eq;
use squash_match::app::{Route, UserContext};
use squash_match::flows::{InviteDecision, InviteResponse, LiteOnboardingStep};
use squash_match::models::{InviteId, InviteIdError, InviteKind, ProfileUpdate, SkillRating};
use url::Url;

#[test]
fn test_updates_merge_shallowly() {
    let mut ctx = UserContext::new();
    ctx.update(ProfileUpdate {
        name: Some("Riley".to_string()),
        rating: Some(SkillRating::new(5).unwrap()),
        ..Default::default()
    });
    ctx.update(ProfileUpdate {
        email: Some("riley@example.com".to_string()),
        ..Default::default()
    });

    let profile = ctx.profile().unwrap();
    assert_eq!(profile.name, "Riley");
    assert_eq!(profile.email, "riley@example.com");
    assert_eq!(profile.rating.value(), 5);
}

#[test]
fn test_landing_route_follows_session() {
    let mut ctx = UserContext::new();
    assert_eq!(ctx.landing_route(), Route::Index);

    ctx.set_pending_invite(Some(InviteId::generate(InviteKind::Availability)));
    assert_eq!(
        ctx.landing_route(),
        Route::LiteOnboarding(LiteOnboardingStep::Availability)
    );

    ctx.update(ProfileUpdate::onboarded());
    ctx.set_authenticated(true);
    assert_eq!(ctx.landing_route(), Route::Dashboard);

    ctx.logout();
    assert!(ctx.profile().is_none());
}

#[test]
fn test_generated_ids_are_prefixed_and_distinct() {
    let game = InviteId::generate(InviteKind::Game);
    let avail = InviteId::generate(InviteKind::Availability);

    assert!(game.as_str().starts_with("game_"));
    assert!(avail.as_str().starts_with("avail_"));
    assert!(!game.suffix().is_empty());
    assert_ne!(game, InviteId::generate(InviteKind::Game));

    let parsed: InviteId = game.as_str().parse().unwrap();
    assert_eq!(parsed, game);
}

#[test]
fn test_invalid_ids_rejected() {
    assert!(matches!(
        "match_123".parse::<InviteId>(),
        Err(InviteIdError::UnknownPrefix(_))
    ));
    assert!(matches!(
        "game_".parse::<InviteId>(),
        Err(InviteIdError::EmptySuffix(_))
    ));
    assert!("avail_a/b".parse::<InviteId>().is_err());
}

#[test]
fn test_invite_links_and_routes() {
    let invite: InviteId = "avail_q7".parse().unwrap();
    let base = Url::parse("https://squashmatch.app/").unwrap();

    let link = invite.link(&base).unwrap();
    assert_eq!(link.as_str(), "https://squashmatch.app/invite/avail_q7");
    assert_eq!(Route::parse(link.path()), Route::Invite(invite.clone()));
    assert_eq!(Route::Invite(invite).path(), "/invite/avail_q7");

    assert_eq!(
        Route::parse("/invite/bogus"),
        Route::NotFound("/invite/bogus".to_string())
    );
    assert_eq!(Route::parse("/app"), Route::Dashboard);
}

#[test]
fn test_signed_in_accept_clears_pending_invite() {
    let mut ctx = UserContext::new();
    ctx.update(ProfileUpdate::onboarded());
    ctx.set_authenticated(true);

    let response = InviteResponse::open(&mut ctx, InviteId::generate(InviteKind::Game));
    assert_eq!(ctx.pending_invite(), Some(response.invite()));
    assert!(response.headline().contains("Game invitation"));

    let reply = response.respond(&mut ctx, InviteDecision::Accept);
    assert_eq!(reply.route, Route::Dashboard);
    assert_eq!(reply.notification.unwrap().title, "Game accepted!");
    assert!(ctx.pending_invite().is_none());
}
