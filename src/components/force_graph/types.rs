use crate::family::{Confidence, Gender, Position, RelationshipKind};

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub relationship: RelationshipKind,
	/// `relationship` as shown in the active locale.
	pub relationship_label: String,
	pub age: Option<u32>,
	pub gender: Option<Gender>,
	pub confidence: Option<Confidence>,
	pub is_current_user: bool,
	/// Pinned coordinates; `None` lets the simulation place the node.
	pub fixed: Option<Position>,
}

impl GraphNode {
	/// Hover caption: relationship, then age, gender, and confidence when known.
	pub fn detail(&self) -> String {
		let mut parts = vec![self.relationship_label.clone()];
		if let Some(age) = self.age {
			parts.push(age.to_string());
		}
		if let Some(gender) = self.gender {
			parts.push(gender.to_string());
		}
		if let Some(confidence) = self.confidence {
			parts.push(format!("{}%", confidence.value()));
		}
		parts.join(" · ")
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub relationship: RelationshipKind,
	pub label: String,
	pub confidence: Option<Confidence>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Emitted when a drag ends on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct PinEvent {
	pub id: String,
	pub x: f64,
	pub y: f64,
}
