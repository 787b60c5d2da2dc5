use std::collections::HashMap;

/// Graph-space coordinates of a pinned member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// Pinned positions keyed by member id, owned by one mounted dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionCache {
	pins: HashMap<String, Position>,
}

impl PositionCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fixes `id` at `(x, y)`, replacing any earlier pin.
	pub fn pin(&mut self, id: impl Into<String>, x: f64, y: f64) {
		self.pins.insert(id.into(), Position { x, y });
	}

	/// Releases `id`. Returns whether it was pinned.
	pub fn unpin(&mut self, id: &str) -> bool {
		self.pins.remove(id).is_some()
	}

	pub fn get(&self, id: &str) -> Option<Position> {
		self.pins.get(id).copied()
	}

	/// Sorted ids of pinned members.
	pub fn pinned_ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.pins.keys().map(String::as_str).collect();
		ids.sort_unstable();
		ids
	}

	pub fn len(&self) -> usize {
		self.pins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pins.is_empty()
	}

	pub fn clear(&mut self) {
		self.pins.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pin_then_unpin() {
		let mut cache = PositionCache::new();
		cache.pin("u2", 10.0, 20.0);
		assert_eq!(cache.get("u2"), Some(Position { x: 10.0, y: 20.0 }));
		assert!(cache.unpin("u2"));
		assert_eq!(cache.get("u2"), None);
	}

	#[test]
	fn repinning_overwrites() {
		let mut cache = PositionCache::new();
		cache.pin("u1", 1.0, 1.0);
		cache.pin("u1", -4.5, 7.0);
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.get("u1"), Some(Position { x: -4.5, y: 7.0 }));
	}

	#[test]
	fn unpin_of_unknown_id_is_a_no_op() {
		let mut cache = PositionCache::new();
		cache.pin("u1", 0.0, 0.0);
		assert!(!cache.unpin("ghost"));
		assert_eq!(cache.pinned_ids(), vec!["u1"]);
	}

	#[test]
	fn pinned_ids_are_sorted() {
		let mut cache = PositionCache::new();
		cache.pin("c", 0.0, 0.0);
		cache.pin("a", 0.0, 0.0);
		cache.pin("b", 0.0, 0.0);
		assert_eq!(cache.pinned_ids(), vec!["a", "b", "c"]);
		cache.clear();
		assert!(cache.is_empty());
	}
}
