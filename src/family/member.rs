use serde::Deserialize;

use super::relationship::{Confidence, Gender, RelationshipKind};
use crate::i18n::Locale;

/// A person in the family graph, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
	pub id: String,
	pub name: String,
	#[serde(default, alias = "nameHindi")]
	pub name_local: Option<String>,
	#[serde(default)]
	pub age: Option<u32>,
	#[serde(default)]
	pub gender: Option<Gender>,
	#[serde(default = "unlabelled")]
	pub relationship: RelationshipKind,
	#[serde(default, alias = "confidenceScore")]
	pub confidence: Option<Confidence>,
}

fn unlabelled() -> RelationshipKind {
	RelationshipKind::FamilyMember
}

impl FamilyMember {
	pub fn display_name(&self, locale: Locale) -> &str {
		locale.pick(&self.name, self.name_local.as_deref())
	}
}

/// A directed, labelled edge between two members.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRelationship {
	#[serde(alias = "fromMemberId")]
	pub from: String,
	#[serde(alias = "toMemberId")]
	pub to: String,
	#[serde(default = "unlabelled", alias = "relationshipType")]
	pub relationship: RelationshipKind,
	#[serde(default, alias = "confidenceScore")]
	pub confidence: Option<Confidence>,
}

/// Members and relationships of one family-graph load, replaced wholesale on refetch.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGraphData {
	#[serde(default)]
	pub members: Vec<FamilyMember>,
	#[serde(default)]
	pub relationships: Vec<FamilyRelationship>,
}

impl FamilyGraphData {
	/// Graph holding only the given member, used when the backend has nothing.
	pub fn single(member: FamilyMember) -> Self {
		Self {
			members: vec![member],
			relationships: Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let json = r#"{
			"members": [
				{"id": "c1", "name": "Ravi", "nameLocal": "रवि", "age": 41, "gender": "MALE", "relationship": "Self"},
				{"id": "c2", "name": "Meena", "relationship": "Wife", "confidenceScore": 93.4}
			],
			"relationships": [
				{"fromMemberId": "c1", "toMemberId": "c2", "relationshipType": "SPOUSE", "confidence": 90}
			]
		}"#;
		let data: FamilyGraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.members.len(), 2);
		assert_eq!(data.members[0].relationship, RelationshipKind::Myself);
		assert_eq!(data.members[0].display_name(Locale::Hi), "रवि");
		assert_eq!(data.members[1].relationship, RelationshipKind::Spouse);
		assert_eq!(data.members[1].confidence.map(Confidence::value), Some(93));
		assert_eq!(data.members[1].gender, None);
		assert_eq!(data.relationships[0].relationship, RelationshipKind::Spouse);
	}

	#[test]
	fn null_labels_keep_the_rest_of_the_graph() {
		let json = r#"{
			"members": [
				{"id": "c1", "name": "A", "relationship": "Self", "gender": null},
				{"id": "c2", "name": "B", "relationship": null, "confidenceScore": null}
			],
			"relationships": [
				{"from": "c1", "to": "c2", "relationshipType": null}
			]
		}"#;
		let data: FamilyGraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.members.len(), 2);
		assert_eq!(data.members[0].gender, None);
		assert_eq!(data.members[1].relationship, RelationshipKind::FamilyMember);
		assert_eq!(data.members[1].confidence, None);
		assert_eq!(data.relationships[0].relationship, RelationshipKind::FamilyMember);
	}

	#[test]
	fn missing_lists_default_to_empty() {
		let data: FamilyGraphData = serde_json::from_str("{}").unwrap();
		assert_eq!(data, FamilyGraphData::default());
	}
}
