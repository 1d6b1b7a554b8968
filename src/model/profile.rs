use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name length bounds (characters)
pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 12;
/// Age bounds (inclusive)
pub const AGE_MIN: u32 = 15;
pub const AGE_MAX: u32 = 80;

/// Error type for profile validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name must be {NAME_MIN}-{NAME_MAX} characters (got {0})")]
    NameLength(usize),
    #[error("age must be {AGE_MIN}-{AGE_MAX} (got {0})")]
    AgeRange(u32),
}

/// Free-form descriptive fields about the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub bio: String,
    pub joined: NaiveDate,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            name: "You".into(),
            age: 25,
            profession: String::new(),
            goal: String::new(),
            bio: String::new(),
            joined: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }
}

impl UserProfile {
    /// Fresh profile for a newly seeded workspace
    pub fn seeded(joined: NaiveDate) -> Self {
        UserProfile {
            joined,
            ..UserProfile::default()
        }
    }

    /// Client-side validation, checked before any profile mutation is applied.
    /// Never enforced at the storage layer.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let len = self.name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(ProfileError::NameLength(len));
        }
        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(ProfileError::AgeRange(self.age));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, age: u32) -> UserProfile {
        UserProfile {
            name: name.into(),
            age,
            ..UserProfile::default()
        }
    }

    #[test]
    fn default_profile_is_valid() {
        assert_eq!(UserProfile::default().validate(), Ok(()));
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(profile("", 25).validate(), Err(ProfileError::NameLength(0)));
        assert_eq!(profile("a", 25).validate(), Ok(()));
        assert_eq!(profile("abcdefghijkl", 25).validate(), Ok(()));
        assert_eq!(
            profile("abcdefghijklm", 25).validate(),
            Err(ProfileError::NameLength(13))
        );
    }

    #[test]
    fn age_bounds() {
        assert_eq!(profile("ok", 14).validate(), Err(ProfileError::AgeRange(14)));
        assert_eq!(profile("ok", 15).validate(), Ok(()));
        assert_eq!(profile("ok", 80).validate(), Ok(()));
        assert_eq!(profile("ok", 81).validate(), Err(ProfileError::AgeRange(81)));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 12 two-byte characters must pass
        let name = "é".repeat(12);
        assert_eq!(profile(&name, 25).validate(), Ok(()));
    }
}
