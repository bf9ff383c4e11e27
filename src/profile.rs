use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Profile shown on the card
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Contact email address
    pub email: String,
    /// Ten digit phone number
    pub phone: String,
    /// Path, URL or data-URI token of the profile picture
    pub profile_picture: String,
}

impl Profile {
    /// Returns the value stored for `field`
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::ProfilePicture => &self.profile_picture,
        }
    }

    /// Replaces the value stored for `field`
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Email => self.email = value,
            ProfileField::Phone => self.phone = value,
            ProfileField::ProfilePicture => self.profile_picture = value,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Kunal Sabale".to_string(),
            email: "kunalsabale85@gmail.com".to_string(),
            phone: "9762016975".to_string(),
            profile_picture: "src/assets/user.png".to_string(),
        }
    }
}

/// Editable fields of a [`Profile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    ProfilePicture,
}

/// Fields checked on submit, in display order
pub const VALIDATED_FIELDS: [ProfileField; 3] =
    [ProfileField::Name, ProfileField::Email, ProfileField::Phone];

impl ProfileField {
    /// Key used in seed files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::ProfilePicture => "profilePicture",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Email => "Email",
            ProfileField::Phone => "Phone",
            ProfileField::ProfilePicture => "Profile picture",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ProfileField::Name),
            "email" => Ok(ProfileField::Email),
            "phone" => Ok(ProfileField::Phone),
            "profilePicture" | "profile_picture" | "picture" => Ok(ProfileField::ProfilePicture),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}
