//! Service layer: use cases coordinating domain models and ports.

pub mod allocation_selector;
pub mod bootstrap;
pub mod configuration_conversation;
pub mod criterion_tree;

pub use allocation_selector::{AllocationSelector, ColumnSort, ResourceColumn, SortDirection};
pub use bootstrap::{run_bootstraps, ConfigurationBootstrap, DataBootstrap};
pub use configuration_conversation::{ConfigurationConversation, ConversationStatus};
pub use criterion_tree::{CriterionNode, CriterionTree, CriterionTreeBuilder, NodeData};
