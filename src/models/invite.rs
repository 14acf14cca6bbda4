// ABOUTME: Invite identifiers for shared game offers and availability links
// The `game_` / `avail_` prefix selects which invite variant is shown to the recipient

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// What an invite link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteKind {
    /// A game at a fixed date, time and place
    Game,
    /// The sender's weekly availability, recipient picks a time
    Availability,
}

impl InviteKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Game => "game_",
            Self::Availability => "avail_",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Game => "Game invitation",
            Self::Availability => "Availability share",
        }
    }
}

/// Invite identifier could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InviteIdError {
    #[error("Unknown invite prefix in '{0}' (expected game_ or avail_)")]
    UnknownPrefix(String),
    #[error("Invite '{0}' has no identifier after the prefix")]
    EmptySuffix(String),
    #[error("Invite '{0}' contains characters not allowed in a link")]
    InvalidCharacters(String),
}

/// Opaque invite token: a kind prefix followed by a random suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteId {
    kind: InviteKind,
    raw: String,
}

impl InviteId {
    /// Generate a fresh identifier of the given kind
    pub fn generate(kind: InviteKind) -> Self {
        let mut bits = Uuid::new_v4().as_u128();
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        for _ in 0..SUFFIX_LEN {
            suffix.push(char::from(BASE36[(bits % 36) as usize]));
            bits /= 36;
        }
        Self {
            kind,
            raw: format!("{}{suffix}", kind.prefix()),
        }
    }

    pub const fn kind(&self) -> InviteKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The part after the prefix
    pub fn suffix(&self) -> &str {
        &self.raw[self.kind.prefix().len()..]
    }

    /// Shareable link: `<base>/invite/<id>`
    pub fn link(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("invite/{}", self.raw))
    }
}

impl FromStr for InviteId {
    type Err = InviteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = [InviteKind::Game, InviteKind::Availability]
            .into_iter()
            .find(|kind| s.starts_with(kind.prefix()))
            .ok_or_else(|| InviteIdError::UnknownPrefix(s.to_string()))?;

        let suffix = &s[kind.prefix().len()..];
        if suffix.is_empty() {
            return Err(InviteIdError::EmptySuffix(s.to_string()));
        }
        if !suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InviteIdError::InvalidCharacters(s.to_string()));
        }

        Ok(Self {
            kind,
            raw: s.to_string(),
        })
    }
}

impl TryFrom<String> for InviteId {
    type Error = InviteIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InviteId> for String {
    fn from(id: InviteId) -> Self {
        id.raw
    }
}

impl fmt::Display for InviteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
