// ABOUTME: User profile data model: identity, skill rating, match preferences and availability
// Includes the partial update record used for shallow-merge updates

use super::availability::AvailabilityMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rating is outside the 1..=5 star range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Skill rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub u8);

/// Self-assessed skill level, 1 (beginner) to 5 (competitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillRating(u8);

impl SkillRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    pub const fn min() -> Self {
        Self(Self::MIN)
    }

    pub const fn max() -> Self {
        Self(Self::MAX)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// One-line description shown next to the stars
    pub const fn description(self) -> &'static str {
        match self.0 {
            1 => "Complete beginner, new to squash",
            2 => "Can rally but still learning basics",
            3 => "Consistent player with good fundamentals",
            4 => "Advanced player with strong techniques",
            _ => "Competitive/professional level",
        }
    }

    pub fn stars(self) -> String {
        "★".repeat(self.0 as usize) + &"☆".repeat((Self::MAX - self.0) as usize)
    }
}

impl Default for SkillRating {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for SkillRating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillRating> for u8 {
    fn from(rating: SkillRating) -> Self {
        rating.0
    }
}

impl fmt::Display for SkillRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender of players the user prefers to be matched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GenderPreference {
    Male,
    Female,
    Any,
}

/// Unknown gender preference value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown gender preference '{0}' (expected male, female or any)")]
pub struct UnknownGender(pub String);

impl FromStr for GenderPreference {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "any" => Ok(Self::Any),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Any => "Any",
        };
        f.write_str(label)
    }
}

/// Who the user wants to be matched with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPreferences {
    #[serde(default = "SkillRating::min")]
    pub min_rating: SkillRating,
    #[serde(default = "SkillRating::max")]
    pub max_rating: SkillRating,
    #[serde(default)]
    pub locations: BTreeSet<String>,
    #[serde(default)]
    pub genders: BTreeSet<GenderPreference>,
}

impl Default for MatchPreferences {
    fn default() -> Self {
        Self {
            min_rating: SkillRating::min(),
            max_rating: SkillRating::max(),
            locations: BTreeSet::new(),
            genders: BTreeSet::new(),
        }
    }
}

impl MatchPreferences {
    /// Set the rating range; bounds are swapped if given in the wrong order
    pub fn set_rating_range(&mut self, a: SkillRating, b: SkillRating) {
        self.min_rating = a.min(b);
        self.max_rating = a.max(b);
    }

    /// The same preferences with the rating bounds in ascending order
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let (a, b) = (self.min_rating, self.max_rating);
        self.set_rating_range(a, b);
        self
    }

    /// Add the location if absent, remove it if present
    pub fn toggle_location(&mut self, location: &str) {
        let location = location.trim();
        if location.is_empty() {
            return;
        }
        if !self.locations.remove(location) {
            self.locations.insert(location.to_string());
        }
    }

    pub fn toggle_gender(&mut self, gender: GenderPreference) {
        if !self.genders.remove(&gender) {
            self.genders.insert(gender);
        }
    }

    pub fn accepts_rating(&self, rating: SkillRating) -> bool {
        rating >= self.min_rating && rating <= self.max_rating
    }

    /// Human readable rating range
    pub fn rating_summary(&self) -> String {
        if self.min_rating == self.max_rating {
            format!("Players with exactly {} stars", self.min_rating)
        } else {
            format!(
                "Players with {} to {} stars",
                self.min_rating, self.max_rating
            )
        }
    }
}

/// The signed-in user's profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub rating: SkillRating,
    #[serde(default)]
    pub preferences: MatchPreferences,
    #[serde(default)]
    pub availability: AvailabilityMatrix,
    #[serde(default)]
    pub is_onboarded: bool,
}

/// Partial profile. `None` fields are left as they are when merged;
/// nested records (preferences, availability) are replaced whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<SkillRating>,
    pub preferences: Option<MatchPreferences>,
    pub availability: Option<AvailabilityMatrix>,
    pub is_onboarded: Option<bool>,
}

impl ProfileUpdate {
    pub fn availability(availability: AvailabilityMatrix) -> Self {
        Self {
            availability: Some(availability),
            ..Default::default()
        }
    }

    pub fn onboarded() -> Self {
        Self {
            is_onboarded: Some(true),
            ..Default::default()
        }
    }

    /// Shallow-merge into an existing profile
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            profile.phone_number = phone_number;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(rating) = self.rating {
            profile.rating = rating;
        }
        if let Some(preferences) = self.preferences {
            profile.preferences = preferences;
        }
        if let Some(availability) = self.availability {
            profile.availability = availability;
        }
        if let Some(is_onboarded) = self.is_onboarded {
            profile.is_onboarded = is_onboarded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::availability::{DayPart, Weekday};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rating_bounds() {
        assert!(SkillRating::new(0).is_err());
        assert!(SkillRating::new(6).is_err());
        assert_eq!(SkillRating::new(1).unwrap().value(), 1);
        assert_eq!(SkillRating::new(5).unwrap().value(), 5);
        assert_eq!(SkillRating::default().value(), 3);
    }

    #[test]
    fn test_rating_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<SkillRating>("4").is_ok());
        assert!(serde_json::from_str::<SkillRating>("9").is_err());
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(SkillRating::new(2).unwrap().stars(), "★★☆☆☆");
    }

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default();
        assert!(profile.name.is_empty());
        assert_eq!(profile.rating.value(), 3);
        assert_eq!(profile.preferences.min_rating.value(), 1);
        assert_eq!(profile.preferences.max_rating.value(), 5);
        assert!(profile.availability.is_empty());
        assert!(!profile.is_onboarded);
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut profile = UserProfile {
            name: "Jamie".to_string(),
            email: "jamie@example.com".to_string(),
            bio: "Lefty".to_string(),
            ..Default::default()
        };

        ProfileUpdate {
            email: Some("jamie@club.example".to_string()),
            availability: Some(
                profile
                    .availability
                    .toggled(Weekday::Tuesday, DayPart::Evening),
            ),
            ..Default::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.name, "Jamie");
        assert_eq!(profile.email, "jamie@club.example");
        assert_eq!(profile.bio, "Lefty");
        assert!(profile
            .availability
            .is_available(Weekday::Tuesday, DayPart::Evening));
    }

    #[test]
    fn test_preferences_toggles() {
        let mut prefs = MatchPreferences::default();
        prefs.toggle_location("Downtown");
        prefs.toggle_location("North Side");
        prefs.toggle_location("Downtown");
        prefs.toggle_location("   ");
        assert_eq!(
            prefs.locations.iter().cloned().collect::<Vec<_>>(),
            vec!["North Side".to_string()]
        );

        prefs.toggle_gender(GenderPreference::Any);
        assert!(prefs.genders.contains(&GenderPreference::Any));
        prefs.toggle_gender(GenderPreference::Any);
        assert!(prefs.genders.is_empty());
    }

    #[test]
    fn test_rating_range_is_ordered() {
        let mut prefs = MatchPreferences::default();
        prefs.set_rating_range(SkillRating::new(4).unwrap(), SkillRating::new(2).unwrap());
        assert_eq!(prefs.min_rating.value(), 2);
        assert_eq!(prefs.max_rating.value(), 4);
        assert!(prefs.accepts_rating(SkillRating::new(3).unwrap()));
        assert!(!prefs.accepts_rating(SkillRating::new(5).unwrap()));
        assert_eq!(prefs.rating_summary(), "Players with 2 to 4 stars");
    }

    #[test]
    fn test_normalized_swaps_reversed_bounds() {
        let prefs = MatchPreferences {
            min_rating: SkillRating::max(),
            max_rating: SkillRating::new(2).unwrap(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(prefs.min_rating.value(), 2);
        assert_eq!(prefs.max_rating.value(), 5);
        assert_eq!(MatchPreferences::default().normalized(), MatchPreferences::default());
    }
}
