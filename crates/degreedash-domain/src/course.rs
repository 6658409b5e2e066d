//! Course-related domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Role a professor holds on a course.
///
/// The set is open: any unrecognised label is kept verbatim as [`InstructorRole::Other`]
/// and ranks after the well-known roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstructorRole {
    PrimaryInstructor,
    #[default]
    Instructor,
    TeachingAssistant,
    GuestLecturer,
    Other(String),
}

impl InstructorRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PrimaryInstructor => "Primary Instructor",
            Self::Instructor => "Instructor",
            Self::TeachingAssistant => "Teaching Assistant",
            Self::GuestLecturer => "Guest Lecturer",
            Self::Other(label) => label,
        }
    }

    /// Display order on a course page: lower ranks first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::PrimaryInstructor => 1,
            Self::Instructor => 2,
            Self::TeachingAssistant => 3,
            Self::GuestLecturer | Self::Other(_) => 4,
        }
    }
}

impl From<&str> for InstructorRole {
    fn from(s: &str) -> Self {
        match s {
            "Primary Instructor" => Self::PrimaryInstructor,
            "Instructor" => Self::Instructor,
            "Teaching Assistant" => Self::TeachingAssistant,
            "Guest Lecturer" => Self::GuestLecturer,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for InstructorRole {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<InstructorRole> for String {
    fn from(role: InstructorRole) -> Self {
        match role {
            InstructorRole::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for InstructorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an enrollment row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Dropped,
    Completed,
    Auditing,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Dropped => "dropped",
            Self::Completed => "completed",
            Self::Auditing => "auditing",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enrolled" => Ok(Self::Enrolled),
            "dropped" => Ok(Self::Dropped),
            "completed" => Ok(Self::Completed),
            "auditing" => Ok(Self::Auditing),
            other => Err(UnknownVariant {
                kind: "enrollment status",
                value: other.to_owned(),
            }),
        }
    }
}
