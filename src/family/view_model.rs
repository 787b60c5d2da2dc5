use std::collections::HashSet;

use super::member::{FamilyMember, FamilyRelationship};
use super::pins::PositionCache;
use super::relationship::RelationshipKind;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::i18n::{Locale, Msg};

/// Composes the renderable family graph.
///
/// The current user always appears exactly once: if `members` lacks their id a
/// synthetic "Self" node built from `current_user` is placed first. Repeated
/// member ids keep their first occurrence. Links survive only when both ends
/// resolve to a node; self-loops and duplicate links pass through as given.
pub fn build_family_graph(
	members: &[FamilyMember],
	relationships: &[FamilyRelationship],
	current_user: &FamilyMember,
	pins: &PositionCache,
	locale: Locale,
) -> GraphData {
	let mut seen: HashSet<&str> = HashSet::with_capacity(members.len() + 1);
	let mut nodes = Vec::with_capacity(members.len() + 1);

	if !members.iter().any(|m| m.id == current_user.id) {
		let synthetic = FamilyMember {
			relationship: RelationshipKind::Myself,
			..current_user.clone()
		};
		nodes.push(to_node(&synthetic, &current_user.id, pins, locale));
		seen.insert(current_user.id.as_str());
	}

	for member in members {
		if seen.insert(member.id.as_str()) {
			nodes.push(to_node(member, &current_user.id, pins, locale));
		}
	}

	let links = relationships
		.iter()
		.filter(|r| seen.contains(r.from.as_str()) && seen.contains(r.to.as_str()))
		.map(|r| GraphLink {
			source: r.from.clone(),
			target: r.to.clone(),
			relationship: r.relationship.clone(),
			label: r.relationship.localized(locale).to_string(),
			confidence: r.confidence,
		})
		.collect();

	GraphData { nodes, links }
}

fn to_node(
	member: &FamilyMember,
	current_user_id: &str,
	pins: &PositionCache,
	locale: Locale,
) -> GraphNode {
	let is_current_user = member.id == current_user_id;
	let name = member.display_name(locale);
	let label = if is_current_user {
		format!("{} ({})", name, locale.text(Msg::You))
	} else {
		name.to_string()
	};
	GraphNode {
		id: member.id.clone(),
		label,
		relationship: member.relationship.clone(),
		relationship_label: member.relationship.localized(locale).to_string(),
		age: member.age,
		gender: member.gender,
		confidence: member.confidence,
		is_current_user,
		fixed: pins.get(&member.id),
	}
}
