//! Domain layer: decision tree, builder and answer interpretation
//!
//! This layer is independent of external concerns (no console, no CLI, no config loading).

pub mod answer;
pub mod arena;
pub mod builder;
pub mod error;
pub mod render;

pub use answer::{parse_yes_no, Answer};
pub use arena::{AttachError, DecisionTree, NodeId, Slot, TreeNode, ROOT_ID};
pub use builder::{BuildReport, TreeBuilder, TreeLine, TreeResult};
pub use error::DomainError;
pub use render::TreeRender;
