use serde::Deserialize;

use crate::family::{FamilyMember, Gender, RelationshipKind};
use crate::i18n::Locale;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	pub id: String,
	#[serde(alias = "name")]
	pub full_name: String,
	#[serde(default, alias = "fullNameHindi", alias = "nameLocal")]
	pub full_name_local: Option<String>,
	#[serde(default)]
	pub age: Option<u32>,
	#[serde(default)]
	pub gender: Option<Gender>,
	#[serde(default, alias = "mobileNumber")]
	pub phone: Option<String>,
	#[serde(default)]
	pub district: Option<String>,
}

impl Profile {
	pub fn display_name(&self, locale: Locale) -> &str {
		locale.pick(&self.full_name, self.full_name_local.as_deref())
	}

	/// The citizen as a node of their own family graph.
	pub fn as_family_member(&self) -> FamilyMember {
		FamilyMember {
			id: self.id.clone(),
			name: self.full_name.clone(),
			name_local: self.full_name_local.clone(),
			age: self.age,
			gender: self.gender,
			relationship: RelationshipKind::Myself,
			confidence: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	pub scheme_id: String,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
	#[serde(default = "Vec::new")]
	pub content: Vec<T>,
	#[serde(default)]
	pub total_elements: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
	pub id: String,
	pub name: String,
	#[serde(default, alias = "nameHindi")]
	pub name_local: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

impl Scheme {
	pub fn display_name(&self, locale: Locale) -> &str {
		locale.pick(&self.name, self.name_local.as_deref())
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAllocation {
	#[serde(default)]
	pub scheme_name: Option<String>,
	#[serde(default)]
	pub benefit_type: Option<String>,
	#[serde(default)]
	pub amount: Option<f64>,
	#[serde(default)]
	pub status: Option<String>,
}
