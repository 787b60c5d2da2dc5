use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, GraphNode, PinEvent};
use crate::family::Confidence;

/// Node fill by relationship group: self, spouse, parent, child, sibling, family, other.
const COLORS: &[&str] = &[
	"#f5c542", "#e377c2", "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#7f7f7f",
];

pub const NODE_RADIUS: f64 = 6.0;
pub const CURRENT_USER_RADIUS: f64 = 9.0;
pub const HIT_RADIUS: f64 = 12.0;
const SEED_RADIUS: f64 = 100.0;

pub fn group_color(group: usize) -> &'static str {
	COLORS[group % COLORS.len()]
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub detail: String,
	pub color: String,
	pub is_current_user: bool,
}

impl NodeInfo {
	pub fn radius(&self) -> f64 {
		if self.is_current_user {
			CURRENT_USER_RADIUS
		} else {
			NODE_RADIUS
		}
	}
}

#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
	pub confidence: Option<Confidence>,
}

impl LinkInfo {
	pub fn is_loop(&self) -> bool {
		self.source == self.target
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			links: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.rebuild(data);
		state
	}

	/// Replaces the graph contents, keeping the view transform and the last
	/// simulated position of every node that survives the change.
	pub fn rebuild(&mut self, data: &GraphData) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let count = data.nodes.len().max(1) as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = seed_position(node, i, count, previous.get(&node.id).copied());
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: node.fixed.is_some(),
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					detail: node.detail(),
					color: group_color(node.relationship.group()).into(),
					is_current_user: node.is_current_user,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) else {
				continue;
			};
			// Loops are drawn but never simulated.
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
			links.push(LinkInfo {
				source: src,
				target: tgt,
				label: link.label.clone(),
				confidence: link.confidence,
			});
		}

		self.graph = graph;
		self.links = links;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS.max(node.data.user_data.radius()) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Position and drawn radius of every node.
	pub fn node_positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.index(),
				(node.x() as f64, node.y() as f64, node.data.user_data.radius()),
			);
		});
		positions
	}

	/// Starts dragging the node under the pointer, or panning when there is none.
	pub fn press(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: sx,
				start_y: sy,
				..DragState::default()
			};
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn move_pointer(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (dx, dy) = (
				(sx - self.drag.start_x) / self.transform.k,
				(sy - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.drag.moved = true;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends any drag or pan. A drag that moved its node pins it where it was dropped.
	pub fn release(&mut self) -> Option<PinEvent> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		if !(drag.active && drag.moved) {
			return None;
		}
		let idx = drag.node_idx?;
		let mut pinned = None;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = true;
				pinned = Some(PinEvent {
					id: node.data.user_data.id.clone(),
					x: node.data.x as f64,
					y: node.data.y as f64,
				});
			}
		});
		pinned
	}

	/// Pointer left the canvas: finishes the gesture and clears hover.
	pub fn leave(&mut self) -> Option<PinEvent> {
		let pinned = self.release();
		self.set_hover(None);
		pinned
	}

	/// Frees the node under the pointer so the simulation moves it again.
	/// A drag still in progress on that node is abandoned.
	pub fn release_anchor_at(&mut self, sx: f64, sy: f64) -> Option<String> {
		let idx = self.node_at_position(sx, sy)?;
		if self.drag.node_idx == Some(idx) {
			self.drag = DragState::default();
		}
		let mut released = None;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
				released = Some(node.data.user_data.id.clone());
			}
		});
		released
	}

	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for link in &self.links {
				if link.source == idx {
					self.hover.neighbors.insert(link.target);
				} else if link.target == idx {
					self.hover.neighbors.insert(link.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Hovering or dragging a node holds the layout still.
	pub fn is_interacting(&self) -> bool {
		self.drag.active || self.hover.node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		if !self.is_interacting() {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}

/// Pinned coordinates win, then the node's last simulated position, then a
/// slot on a circle around the origin. The current user starts at the centre.
fn seed_position(
	node: &GraphNode,
	i: usize,
	count: f64,
	previous: Option<(f32, f32)>,
) -> (f32, f32) {
	if let Some(fixed) = node.fixed {
		return (fixed.x as f32, fixed.y as f32);
	}
	if let Some(pos) = previous {
		return pos;
	}
	if node.is_current_user {
		return (0.0, 0.0);
	}
	let angle = (i as f64) * 2.0 * PI / count;
	(
		(SEED_RADIUS * angle.cos()) as f32,
		(SEED_RADIUS * angle.sin()) as f32,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};
	use crate::family::{Position, RelationshipKind};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn node(id: &str, fixed: Option<Position>) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.to_uppercase(),
			relationship: RelationshipKind::FamilyMember,
			relationship_label: "Family Member".into(),
			age: None,
			gender: None,
			confidence: None,
			is_current_user: id == "me",
			fixed,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			relationship: RelationshipKind::Child,
			label: "संतान".into(),
			confidence: None,
		}
	}

	fn family() -> GraphData {
		GraphData {
			nodes: vec![
				node("me", None),
				node("kid", Some(Position { x: 40.0, y: -30.0 })),
				node("gran", None),
			],
			links: vec![link("me", "kid"), link("gran", "me"), link("kid", "kid")],
		}
	}

	/// Graph-space position and anchor flag of the node with `id`.
	fn node_state(state: &ForceGraphState, id: &str) -> Option<(f64, f64, bool)> {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x() as f64, node.y() as f64, node.data.is_anchor));
			}
		});
		found
	}

	fn to_screen(state: &ForceGraphState, x: f64, y: f64) -> (f64, f64) {
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn fixed_nodes_start_anchored_at_their_pin() {
		let state = ForceGraphState::new(&family(), W, H);
		assert_eq!(node_state(&state, "kid"), Some((40.0, -30.0, true)));
		assert_eq!(node_state(&state, "me"), Some((0.0, 0.0, false)));
		assert!(!node_state(&state, "gran").unwrap().2);
	}

	#[test]
	fn loops_are_kept_for_drawing() {
		let state = ForceGraphState::new(&family(), W, H);
		assert_eq!(state.links.len(), 3);
		assert_eq!(state.links.iter().filter(|l| l.is_loop()).count(), 1);
	}

	#[test]
	fn rebuild_keeps_positions_and_transform() {
		let mut state = ForceGraphState::new(&family(), W, H);
		state.graph.visit_nodes_mut(|node| {
			if node.data.user_data.id == "gran" {
				node.data.x = 55.0;
				node.data.y = 66.0;
			}
		});
		state.transform.k = 2.0;

		let mut grown = family();
		grown.nodes.push(node("cousin", None));
		state.rebuild(&grown);

		assert_eq!(node_state(&state, "gran"), Some((55.0, 66.0, false)));
		assert_eq!(node_state(&state, "kid"), Some((40.0, -30.0, true)));
		assert!(node_state(&state, "cousin").is_some());
		assert_eq!(state.transform.k, 2.0);
	}

	#[test]
	fn dragging_a_node_pins_it_where_dropped() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (x, y, _) = node_state(&state, "me").unwrap();
		let (sx, sy) = to_screen(&state, x, y);

		state.press(sx, sy);
		state.move_pointer(sx + 30.0, sy + 40.0);
		let pin = state.release().expect("drag end pins");

		assert_eq!(pin.id, "me");
		assert_eq!((pin.x, pin.y), (x + 30.0, y + 40.0));
		assert_eq!(node_state(&state, "me"), Some((x + 30.0, y + 40.0, true)));
		assert!(!state.drag.active);
	}

	#[test]
	fn click_without_movement_does_not_pin() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (sx, sy) = to_screen(&state, 0.0, 0.0);
		state.press(sx, sy);
		assert_eq!(state.release(), None);
		assert!(!node_state(&state, "me").unwrap().2);
	}

	#[test]
	fn right_click_releases_anchor() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (sx, sy) = to_screen(&state, 40.0, -30.0);
		assert_eq!(state.release_anchor_at(sx, sy), Some("kid".to_string()));
		assert!(!node_state(&state, "kid").unwrap().2);
		assert_eq!(state.release_anchor_at(-500.0, -500.0), None);
	}

	#[test]
	fn right_click_during_press_does_not_repin() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (sx, sy) = to_screen(&state, 40.0, -30.0);
		state.press(sx, sy);
		assert_eq!(state.release_anchor_at(sx, sy), Some("kid".to_string()));
		state.move_pointer(sx + 2.0, sy + 1.0);
		assert_eq!(state.release(), None);
		assert_eq!(node_state(&state, "kid"), Some((40.0, -30.0, false)));
	}

	#[test]
	fn link_labels_come_from_the_view_model() {
		let state = ForceGraphState::new(&family(), W, H);
		assert!(state.links.iter().all(|l| l.label == "संतान"));
	}

	#[test]
	fn hovering_pauses_the_simulation() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (sx, sy) = to_screen(&state, 0.0, 0.0);
		state.move_pointer(sx, sy);
		assert!(state.is_interacting());

		let before = node_state(&state, "gran");
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_eq!(node_state(&state, "gran"), before);
		assert!(state.flow_time > 0.0);

		state.leave();
		assert!(!state.is_interacting());
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_ne!(node_state(&state, "gran"), before);
	}

	#[test]
	fn hover_highlights_neighbors() {
		let mut state = ForceGraphState::new(&family(), W, H);
		let (sx, sy) = to_screen(&state, 0.0, 0.0);
		state.move_pointer(sx, sy);
		assert_eq!(state.hover.neighbors.len(), 2);
	}

	#[test]
	fn panning_moves_the_transform() {
		let mut state = ForceGraphState::new(&family(), W, H);
		state.press(5.0, 5.0);
		state.move_pointer(25.0, 15.0);
		assert_eq!(state.release(), None);
		assert_eq!((state.transform.x, state.transform.y), (W / 2.0 + 20.0, H / 2.0 + 10.0));
	}
}
