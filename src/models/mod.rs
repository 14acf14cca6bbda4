// ABOUTME: Core data models for SquashMatch: profiles, availability, time slots and invites

pub mod availability;
pub mod invite;
pub mod profile;
pub mod time_slots;

pub use availability::{AvailabilityCell, AvailabilityMatrix, CellKeyError, DayAvailability, DayPart, Weekday};
pub use invite::{InviteId, InviteIdError, InviteKind};
pub use profile::{GenderPreference, MatchPreferences, ProfileUpdate, RatingOutOfRange, SkillRating, UnknownGender, UserProfile};
pub use time_slots::{Clock, FixedClock, PastSlot, SlotGrid, SlotToggle, SystemClock, TimeSlotSelection, WeekView};
