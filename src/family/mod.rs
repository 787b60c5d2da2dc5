//! Family-relationship domain: backend shapes, pinned layout, and the graph view model.

mod member;
mod pins;
mod relationship;
mod view_model;

pub use member::{FamilyGraphData, FamilyMember};
pub use pins::{Position, PositionCache};
pub use relationship::{Confidence, Gender, RelationshipKind};
pub use view_model::build_family_graph;
