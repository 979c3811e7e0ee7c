use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Topic a submission was filed under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Conspiracy,
    Gender,
    Language,
    Religion,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Conspiracy,
        Category::Gender,
        Category::Language,
        Category::Religion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Conspiracy => "conspiracy",
            Category::Gender => "gender",
            Category::Language => "language",
            Category::Religion => "religion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::validation("invalid category"))
    }
}

/// Source platform the text was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Platform {
    Reddit,
    X,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Reddit, Platform::X];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reddit => "Reddit",
            Platform::X => "X",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::validation("invalid platform"))
    }
}

/// Review state. Starts at `Pending`; only the review service moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "approved" => Ok(Status::Approved),
            "rejected" => Ok(Status::Rejected),
            _ => Err(Error::validation("invalid status")),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: i64,
    pub text: String,
    pub anonymized_text: Option<String>,
    pub category: Category,
    pub platform: Platform,
    pub context: Option<String>,
    pub status: Status,
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    /// Text safe to show or export: the anonymized form when present.
    pub fn display_text(&self) -> &str {
        match self.anonymized_text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => &self.text,
        }
    }
}

/// Untrusted submission fields as they arrive from a form or JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    pub text: String,
    pub category: String,
    pub platform: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub anonymized_text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A submission that passed validation and is ready to insert.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub text: String,
    pub anonymized_text: String,
    pub category: Category,
    pub platform: Platform,
    pub context: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub per_category: BTreeMap<Category, i64>,
}
