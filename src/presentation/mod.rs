//! Presentation layer: pure renderers from models to display data.

pub mod criterion_node;
pub mod resource_row;

pub use criterion_node::{render_node, render_tree, TreeRow};
pub use resource_row::{
    availability_bar, overtime_cell, render_resource_row, AvailabilityBar, AvailabilityTier,
    OvertimeCell, ResourceRow,
};
