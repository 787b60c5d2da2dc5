use std::fmt;

use serde::Deserialize;

use crate::i18n::Locale;

/// Category of a family tie, parsed from the backend's free-form label.
///
/// A `null` or blank label reads as [`RelationshipKind::FamilyMember`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<String>")]
pub enum RelationshipKind {
	Spouse,
	Parent,
	Child,
	Sibling,
	FamilyMember,
	/// The signed-in citizen.
	Myself,
	Other(String),
}

impl RelationshipKind {
	/// Index into the node palette.
	pub fn group(&self) -> usize {
		match self {
			Self::Myself => 0,
			Self::Spouse => 1,
			Self::Parent => 2,
			Self::Child => 3,
			Self::Sibling => 4,
			Self::FamilyMember => 5,
			Self::Other(_) => 6,
		}
	}

	pub fn label(&self) -> &str {
		match self {
			Self::Spouse => "Spouse",
			Self::Parent => "Parent",
			Self::Child => "Child",
			Self::Sibling => "Sibling",
			Self::FamilyMember => "Family Member",
			Self::Myself => "Self",
			Self::Other(label) => label,
		}
	}

	/// Display label in `locale`. Unrecognised labels are shown as received.
	pub fn localized(&self, locale: Locale) -> &str {
		match (locale, self) {
			(Locale::Hi, Self::Spouse) => "जीवनसाथी",
			(Locale::Hi, Self::Parent) => "माता-पिता",
			(Locale::Hi, Self::Child) => "संतान",
			(Locale::Hi, Self::Sibling) => "भाई-बहन",
			(Locale::Hi, Self::FamilyMember) => "परिवार सदस्य",
			(Locale::Hi, Self::Myself) => "स्वयं",
			_ => self.label(),
		}
	}
}

impl From<&str> for RelationshipKind {
	fn from(raw: &str) -> Self {
		let key: String = raw
			.trim()
			.chars()
			.filter(|c| !matches!(c, ' ' | '_' | '-'))
			.flat_map(char::to_lowercase)
			.collect();
		match key.as_str() {
			"spouse" | "wife" | "husband" => Self::Spouse,
			"parent" | "father" | "mother" => Self::Parent,
			"child" | "son" | "daughter" => Self::Child,
			"sibling" | "brother" | "sister" => Self::Sibling,
			"familymember" | "relative" | "family" => Self::FamilyMember,
			"self" => Self::Myself,
			"" => Self::FamilyMember,
			_ => Self::Other(raw.trim().to_string()),
		}
	}
}

impl From<Option<String>> for RelationshipKind {
	fn from(raw: Option<String>) -> Self {
		raw.as_deref().map_or(Self::FamilyMember, Self::from)
	}
}

impl fmt::Display for RelationshipKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
	Male,
	Female,
	Other,
}

impl From<String> for Gender {
	fn from(raw: String) -> Self {
		match raw.trim().to_lowercase().as_str() {
			"m" | "male" => Self::Male,
			"f" | "female" => Self::Female,
			_ => Self::Other,
		}
	}
}

impl fmt::Display for Gender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Male => "Male",
			Self::Female => "Female",
			Self::Other => "Other",
		})
	}
}

/// Certainty of an inferred attribute, 0 to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "f64")]
pub struct Confidence(u8);

impl Confidence {
	pub fn value(self) -> u8 {
		self.0
	}
}

impl From<f64> for Confidence {
	fn from(raw: f64) -> Self {
		if raw.is_nan() {
			return Self(0);
		}
		Self(raw.round().clamp(0.0, 100.0) as u8)
	}
}
