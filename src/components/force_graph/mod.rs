mod component;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::group_color;
pub use types::{GraphData, GraphLink, GraphNode, PinEvent};
