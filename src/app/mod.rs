// ABOUTME: Application layer shared by every flow: user context, routes, notifications
// and cancellable deferred effects

pub mod context;
pub mod deferred;
pub mod notification;
pub mod router;

pub use context::UserContext;
pub use deferred::DeferredAction;
pub use notification::{Notification, Severity};
pub use router::Route;
