// ABOUTME: Profile page editor: identity fields and rating saved together,
// availability committed on every toggle

use super::validation::{required, RequiredField, ValidationError};
use crate::app::{Notification, UserContext};
use crate::models::{AvailabilityMatrix, DayPart, ProfileUpdate, SkillRating, UserProfile, Weekday};
use tracing::info;

/// Editable profile fields, pre-filled from the current profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdits {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub bio: String,
    pub rating: SkillRating,
}

impl ProfileEdits {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            bio: profile.bio.clone(),
            rating: profile.rating,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    edits: ProfileEdits,
    availability: AvailabilityMatrix,
}

impl ProfileEditor {
    pub fn new(ctx: &UserContext) -> Self {
        ctx.profile()
            .map(|profile| Self {
                edits: ProfileEdits::from_profile(profile),
                availability: profile.availability,
            })
            .unwrap_or_default()
    }

    pub fn edits(&self) -> &ProfileEdits {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut ProfileEdits {
        &mut self.edits
    }

    pub fn availability(&self) -> &AvailabilityMatrix {
        &self.availability
    }

    /// Commit the identity fields and rating. Name and email are required.
    pub fn save(&mut self, ctx: &mut UserContext) -> Result<Notification, ValidationError> {
        let mut missing = Vec::new();
        let name = required(&self.edits.name, RequiredField::Name, &mut missing);
        let email = required(&self.edits.email, RequiredField::Email, &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        self.edits.name = name.clone();
        self.edits.email = email.clone();
        ctx.update(ProfileUpdate {
            name: Some(name),
            email: Some(email),
            phone_number: Some(self.edits.phone_number.trim().to_string()),
            bio: Some(self.edits.bio.trim().to_string()),
            rating: Some(self.edits.rating),
            ..Default::default()
        });
        info!("Profile saved");

        Ok(Notification::info("Profile updated")
            .with_description("Your changes have been saved successfully."))
    }

    pub fn toggle_availability(
        &mut self,
        ctx: &mut UserContext,
        day: Weekday,
        part: DayPart,
    ) -> Notification {
        self.availability = self.availability.toggled(day, part);
        ctx.update(ProfileUpdate::availability(self.availability));
        Notification::info("Availability updated")
            .with_description("Your availability has been updated successfully.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_requires_name_and_email() {
        let mut ctx = UserContext::new();
        let mut editor = ProfileEditor::new(&ctx);
        editor.edits_mut().name = "Alex".to_string();

        let err = editor.save(&mut ctx).unwrap_err();

        assert_eq!(err, ValidationError::missing(RequiredField::Email));
        assert!(ctx.profile().is_none());
    }

    #[test]
    fn test_save_commits_fields() {
        let mut ctx = UserContext::new();
        let mut editor = ProfileEditor::new(&ctx);
        let edits = editor.edits_mut();
        edits.name = "Alex ".to_string();
        edits.email = "alex@example.com".to_string();
        edits.rating = SkillRating::new(5).unwrap();

        let notification = editor.save(&mut ctx).unwrap();

        assert_eq!(notification.title, "Profile updated");
        let profile = ctx.profile().unwrap();
        assert_eq!(profile.name, "Alex");
        assert_eq!(profile.rating.value(), 5);
    }

    #[test]
    fn test_toggle_commits_immediately() {
        let mut ctx = UserContext::new();
        let mut editor = ProfileEditor::new(&ctx);

        let notification = editor.toggle_availability(&mut ctx, Weekday::Friday, DayPart::Evening);

        assert_eq!(notification.title, "Availability updated");
        assert!(ctx
            .profile()
            .unwrap()
            .availability
            .is_available(Weekday::Friday, DayPart::Evening));
    }
}
