//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent malformed trees, tree files or answers.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tree file has no root line: {0}")]
    EmptyTree(PathBuf),

    #[error("line {line_no}: invalid tree line {text:?}: {reason}")]
    InvalidLine {
        line_no: usize,
        text: String,
        reason: String,
    },

    #[error("line {line_no}: parent node {parent_id} not found for {label:?}")]
    MalformedTreeLine {
        line_no: usize,
        parent_id: NodeId,
        label: String,
    },

    #[error("line {line_no}: parent node {parent_id} already has two children, skipping {label:?}")]
    OverfullParent {
        line_no: usize,
        parent_id: NodeId,
        label: String,
    },

    #[error("node {node_id} has exactly one child, cannot decide between yes and no")]
    MalformedTraversal { node_id: NodeId },

    #[error("empty answer, expected yes or no")]
    EmptyAnswer,

    #[error("parent node {0} cannot be written as a single digit")]
    UnencodableParent(NodeId),
}

impl DomainError {
    /// Construction issues are reported and skipped, everything else aborts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidLine { .. }
                | DomainError::MalformedTreeLine { .. }
                | DomainError::OverfullParent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_line_issues_are_recoverable() {
        let overfull = DomainError::OverfullParent {
            line_no: 3,
            parent_id: 0,
            label: "c".into(),
        };
        let unknown = DomainError::MalformedTreeLine {
            line_no: 4,
            parent_id: 9,
            label: "d".into(),
        };
        let invalid = DomainError::InvalidLine {
            line_no: 5,
            text: "x,e".into(),
            reason: "expected a parent digit".into(),
        };
        assert!(overfull.is_recoverable());
        assert!(unknown.is_recoverable());
        assert!(invalid.is_recoverable());

        assert!(!DomainError::FileNotFound(PathBuf::from("tree.txt")).is_recoverable());
        assert!(!DomainError::MalformedTraversal { node_id: 0 }.is_recoverable());
        assert!(!DomainError::EmptyAnswer.is_recoverable());
    }
}
