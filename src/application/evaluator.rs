//! Interactive traversal of a decision tree.

use tracing::{debug, instrument, warn};

use crate::application::error_ext::IoResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{parse_yes_no, Answer, DecisionTree, DomainError, NodeId};
use crate::infrastructure::Console;

/// Final answer of one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Label of the leaf that was reached
    pub label: String,
    /// Id of that leaf
    pub node_id: NodeId,
    /// Questions asked on the way, with the answer given to each
    pub path: Vec<(String, Answer)>,
}

/// Walks a tree by asking yes/no questions until a leaf is reached.
#[derive(Debug, Clone)]
pub struct Evaluator {
    greeting: String,
    prompt_suffix: String,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Evaluator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            greeting: settings.greeting.clone(),
            prompt_suffix: settings.prompt_suffix.clone(),
        }
    }

    /// One traversal from the root, consuming one answer per decision node.
    ///
    /// Empty answers repeat the question. A decision node with a single
    /// child is a malformed traversal and aborts.
    #[instrument(level = "debug", skip_all)]
    pub fn evaluate(
        &self,
        tree: &DecisionTree,
        console: &mut dyn Console,
    ) -> ApplicationResult<Verdict> {
        console.say(&self.greeting).with_context("print greeting")?;

        let mut current = tree.root_node();
        let mut path = Vec::new();

        loop {
            let (left, right) = match (current.left, current.right) {
                (None, None) => {
                    console.say(&current.label).with_context("print answer")?;
                    debug!(node_id = current.id, "reached leaf");
                    return Ok(Verdict {
                        label: current.label.clone(),
                        node_id: current.id,
                        path,
                    });
                }
                (Some(left), Some(right)) => (left, right),
                _ => {
                    return Err(DomainError::MalformedTraversal {
                        node_id: current.id,
                    }
                    .into())
                }
            };

            let answer = self.ask(console, &current.label)?;
            debug!(node_id = current.id, %answer, "answered");
            path.push((current.label.clone(), answer));

            let next = match answer {
                Answer::No => left,
                Answer::Yes => right,
            };
            current = tree
                .get_node(next)
                .ok_or(DomainError::MalformedTraversal { node_id: current.id })?;
        }
    }

    fn ask(&self, console: &mut dyn Console, question: &str) -> ApplicationResult<Answer> {
        let prompt = format!("{}{}", question, self.prompt_suffix);
        loop {
            let response = console
                .ask(&prompt)
                .with_context("read answer")?
                .ok_or(ApplicationError::InputExhausted)?;
            match parse_yes_no(&response) {
                Ok(answer) => return Ok(answer),
                Err(e) => warn!("{}, asking again", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;
    use crate::infrastructure::IoConsole;
    use std::io::Cursor;

    fn tree(lines: &[&str]) -> DecisionTree {
        TreeBuilder::new().build_from_lines(lines).unwrap().tree
    }

    #[test]
    fn test_leaf_root_needs_no_input() {
        let tree = tree(&["Just reboot"]);
        let mut console = IoConsole::new(Cursor::new(""), Vec::new());

        let verdict = Evaluator::default().evaluate(&tree, &mut console).unwrap();

        assert_eq!(verdict.label, "Just reboot");
        assert!(verdict.path.is_empty());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Let's figure out what's wrong!\nJust reboot\n");
    }

    #[test]
    fn test_empty_answer_repeats_question() {
        let tree = tree(&["Q?", "0,left", "0,right"]);
        let mut console = IoConsole::new(Cursor::new("\nno\n"), Vec::new());

        let verdict = Evaluator::default().evaluate(&tree, &mut console).unwrap();

        assert_eq!(verdict.label, "left");
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output.matches("Q? --> Please enter 'Yes' or 'No': ").count(), 2);
    }
}
