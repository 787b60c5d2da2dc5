pub mod family_graph;
pub mod force_graph;
