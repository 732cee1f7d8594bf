pub mod achievement;
pub mod entry;
pub mod profile;

pub use achievement::{AchievementDefinition, AchievementState, Requirement};
pub use entry::{CalorieEntry, WeightEntry};
pub use profile::UserProfile;
