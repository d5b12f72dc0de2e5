mod component;
mod config;
mod curvature;
mod geometry;
mod highlight;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use config::GraphConfig;
pub use highlight::HighlightSet;
pub use types::{GraphData, GraphLink, GraphNode, NodeId};
