// ABOUTME: Shared CLI helpers: argument parsers, driving wizards from flags, output
//
// Validation failures surface as errors carrying the same text the user
// would see in a notification.

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt::Debug;
use tracing::warn;
use url::Url;

use crate::app::UserContext;
use crate::config::time_format::parse_hhmm;
use crate::flows::{Transition, ValidationError, Wizard};
use crate::models::SkillRating;

pub fn parse_rating(raw: &str) -> Result<SkillRating, String> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number between 1 and 5"))?;
    SkillRating::new(value).map_err(|e| e.to_string())
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    parse_hhmm(raw).map_err(|_| format!("'{raw}' is not a time like 18:00"))
}

/// "2026-10-21T18:00" or "2026-10-21 18:00"
pub fn parse_slot(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("'{raw}' is not a date-time like 2026-10-21T18:00"))
}

/// Accept a bare identifier or a full `.../invite/<id>` link; query and fragment are dropped
pub fn invite_id_from(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(link) = Url::parse(raw) {
        let id = link.path_segments().and_then(|segments| {
            segments
                .skip_while(|segment| *segment != "invite")
                .nth(1)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        });
        if let Some(id) = id {
            return id;
        }
    }
    raw.to_string()
}

/// Turn a validation failure into an error with the notification text
pub fn rejection(err: &ValidationError) -> anyhow::Error {
    anyhow!("{}", err.notification())
}

/// Apply one action, failing the command on a validation error
pub fn drive<W: Wizard>(
    flow: &mut W,
    ctx: &mut UserContext,
    action: W::Action,
) -> Result<Transition<W::Step, W::Outcome>> {
    flow.apply(ctx, action).map_err(|e| {
        warn!("Step {:?} rejected input: {}", flow.current_step(), e);
        rejection(&e)
    })
}

/// The outcome of a transition that is expected to end the flow
pub fn finished<S: Debug, O>(transition: Transition<S, O>) -> Result<O> {
    match transition {
        Transition::Finished(outcome) => Ok(outcome),
        Transition::Step(step) => Err(anyhow!("Flow stopped at {step:?} instead of finishing")),
    }
}

/// "Wed Oct 21, 18:00"
pub fn format_slot(at: NaiveDateTime) -> String {
    at.format("%a %b %-d, %H:%M").to_string()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")?;
    Ok(())
}
