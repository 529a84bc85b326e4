//! Tree builder for the line-oriented decision tree format.
//!
//! ```text
//! Is it broken?
//! 0,Try restarting
//! 0,Unplug it
//! ```
//!
//! The first line is the root label. Every following line starts with the
//! single-digit id of its parent, one separator character, then the label.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::domain::arena::{AttachError, DecisionTree, NodeId};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Character offset where the label starts on a data line.
const LABEL_OFFSET: usize = 2;

/// One parsed data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub parent_id: NodeId,
    pub label: String,
}

impl TreeLine {
    pub fn parse(line_no: usize, text: &str) -> TreeResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidLine {
            line_no,
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = text.chars();
        let parent_id = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| invalid("expected a parent digit"))? as NodeId;
        if chars.next().is_none() {
            return Err(invalid("missing separator after parent digit"));
        }
        let label: String = text.chars().skip(LABEL_OFFSET).collect();

        Ok(Self { parent_id, label })
    }
}

/// Outcome of a load: the tree plus every issue that was skipped over.
#[derive(Debug)]
pub struct BuildReport {
    pub tree: DecisionTree,
    pub issues: Vec<DomainError>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Constructs decision trees from their line format.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    fail_fast: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort on the first construction issue instead of skipping the line.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Build a tree from a file on disk.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> TreeResult<BuildReport> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DomainError::FileNotFound(path.to_path_buf()),
            _ => DomainError::FileRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        self.build_from_lines(content.lines())
            .map_err(|e| match e {
                DomainError::EmptyTree(_) => DomainError::EmptyTree(path.to_path_buf()),
                other => other,
            })
    }

    /// Build a tree from already split lines.
    ///
    /// Data lines get ids 1, 2, ... in order, also those that end up skipped.
    /// Blank lines carry no node and consume no id.
    #[instrument(level = "debug", skip_all)]
    pub fn build_from_lines<I, S>(&self, lines: I) -> TreeResult<BuildReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter();
        let root_label = match lines.next() {
            Some(line) => strip_cr(line.as_ref()).to_string(),
            None => return Err(DomainError::EmptyTree(Default::default())),
        };

        let mut tree = DecisionTree::new(root_label);
        let mut issues = Vec::new();
        let mut next_id: NodeId = 1;

        for (offset, line) in lines.enumerate() {
            let line_no = offset + 2;
            let text = strip_cr(line.as_ref());
            if text.trim().is_empty() {
                continue;
            }
            let id = next_id;
            next_id += 1;

            match self.attach_line(&mut tree, line_no, id, text) {
                Ok(()) => {}
                Err(e) if self.fail_fast || !e.is_recoverable() => return Err(e),
                Err(e) => {
                    warn!("{}", e);
                    issues.push(e);
                }
            }
        }

        debug!(nodes = tree.len(), issues = issues.len(), "tree built");
        Ok(BuildReport { tree, issues })
    }

    fn attach_line(
        &self,
        tree: &mut DecisionTree,
        line_no: usize,
        id: NodeId,
        text: &str,
    ) -> TreeResult<()> {
        let TreeLine { parent_id, label } = TreeLine::parse(line_no, text)?;
        match tree.attach(parent_id, id, label.as_str()) {
            Ok((_, slot)) => {
                debug!(id, parent_id, %slot, "attached {:?}", label);
                Ok(())
            }
            Err(AttachError::ParentNotFound) => Err(DomainError::MalformedTreeLine {
                line_no,
                parent_id,
                label,
            }),
            Err(AttachError::ParentFull) => Err(DomainError::OverfullParent {
                line_no,
                parent_id,
                label,
            }),
        }
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
