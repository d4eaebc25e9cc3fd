use super::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reported when no record exists for an identifier.
pub const UNKNOWN_MOOD: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
	Happy,
	Sad,
}

impl Mood {
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Happy => "happy",
			Self::Sad => "sad",
		}
	}
}

impl fmt::Display for Mood {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Mood {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"happy" => Ok(Self::Happy),
			"sad" => Ok(Self::Sad),
			other => Err(ParseError::UnknownMood(other.to_string())),
		}
	}
}

/// The second path segment of `/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	Status,
	Feed,
	Slap,
}

impl Action {
	/// The mood a write action stores. `Status` is read-only and maps to nothing.
	#[must_use]
	pub const fn mood(self) -> Option<Mood> {
		match self {
			Self::Status => None,
			Self::Feed => Some(Mood::Happy),
			Self::Slap => Some(Mood::Sad),
		}
	}

	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Status => "status",
			Self::Feed => "feed",
			Self::Slap => "slap",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"status" => Ok(Self::Status),
			"feed" => Ok(Self::Feed),
			"slap" => Ok(Self::Slap),
			other => Err(ParseError::UnknownAction(other.to_string())),
		}
	}
}

/// Response body for both reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodReport {
	pub id: String,
	pub mood: String,
}

impl MoodReport {
	#[must_use]
	pub fn written(id: impl Into<String>, mood: Mood) -> Self {
		Self {
			id: id.into(),
			mood: mood.as_str().to_string(),
		}
	}

	/// Builds a read report. Missing records become `unknown`; anything else
	/// the store holds is echoed back as-is.
	#[must_use]
	pub fn from_stored(id: impl Into<String>, stored: Option<String>) -> Self {
		let id = id.into();
		let mood = match stored {
			Some(value) => {
				if value.parse::<Mood>().is_err() {
					tracing::warn!(id = %id, value = %value, "Stored mood is outside the known vocabulary");
				}
				value
			}
			None => UNKNOWN_MOOD.to_string(),
		};

		Self { id, mood }
	}
}
