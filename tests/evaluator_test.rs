//! Tests for the interactive Evaluator, driven by scripted consoles

use std::path::Path;

use rstest::rstest;

use dtree::application::{ApplicationError, Evaluator};
use dtree::config::Settings;
use dtree::domain::{Answer, DecisionTree, DomainError, TreeBuilder};
use dtree::util::testing::{captured, init_test_setup, scripted_console};

const PROMPT: &str = " --> Please enter 'Yes' or 'No': ";

fn broken_tree() -> DecisionTree {
    TreeBuilder::new()
        .build_from_lines(["Is it broken?", "0,Try restarting", "0,Unplug it"])
        .unwrap()
        .tree
}

fn fixture(name: &str) -> DecisionTree {
    TreeBuilder::new()
        .build_from_file(&Path::new("tests/resources/trees").join(name))
        .unwrap()
        .tree
}

#[rstest]
#[case("no", "Try restarting")]
#[case("N", "Try restarting")]
#[case("nope", "Try restarting")]
#[case("yes", "Unplug it")]
#[case("Y", "Unplug it")]
#[case("anything else", "Unplug it")]
fn given_example_tree_when_answering_then_reaches_expected_leaf(
    #[case] answer: &str,
    #[case] expected: &str,
) {
    // Arrange
    init_test_setup();
    let tree = broken_tree();
    let mut console = scripted_console(&[answer]);

    // Act
    let verdict = Evaluator::default().evaluate(&tree, &mut console).unwrap();

    // Assert
    assert_eq!(verdict.label, expected);
    let output = captured(console);
    assert_eq!(
        output,
        format!(
            "Let's figure out what's wrong!\nIs it broken?{}{}\n",
            PROMPT, expected
        )
    );
}

#[rstest]
#[case("no")]
#[case("yes")]
fn given_example_file_as_written_when_answering_root_then_malformed_traversal(
    #[case] answer: &str,
) {
    // Arrange
    let tree = TreeBuilder::new()
        .build_from_lines(["Is it broken?", "0,Try restarting", "1,Unplug it"])
        .unwrap()
        .tree;
    let mut console = scripted_console(&[answer]);

    // Act
    let result = Evaluator::default().evaluate(&tree, &mut console);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::MalformedTraversal { node_id: 0 }))
    ));
}

#[test]
fn given_deep_tree_when_answering_then_one_answer_per_decision_node() {
    // Arrange
    let tree = fixture("tree1.txt");
    let mut console = scripted_console(&["yes", "no", "yes", "extra answer never read"]);

    // Act
    let verdict = Evaluator::default().evaluate(&tree, &mut console).unwrap();

    // Assert
    assert_eq!(verdict.label, "Restart it");
    assert_eq!(verdict.node_id, 8);
    assert_eq!(
        verdict.path,
        vec![
            ("Does the computer turn on?".to_string(), Answer::Yes),
            ("Does it show an error message?".to_string(), Answer::No),
            ("Is it running slow?".to_string(), Answer::Yes),
        ]
    );
    let output = captured(console);
    assert_eq!(output.matches(PROMPT).count(), 3);
    assert!(output.ends_with("Restart it\n"));
}

#[test]
fn given_answers_run_out_when_evaluating_then_input_exhausted() {
    let tree = fixture("tree1.txt");
    let mut console = scripted_console(&["yes"]);

    let result = Evaluator::default().evaluate(&tree, &mut console);

    assert!(matches!(result, Err(ApplicationError::InputExhausted)));
}

#[test]
fn given_only_empty_answers_when_evaluating_then_asks_again_until_input_ends() {
    let tree = broken_tree();
    let mut console = scripted_console(&["", ""]);

    let result = Evaluator::default().evaluate(&tree, &mut console);

    assert!(matches!(result, Err(ApplicationError::InputExhausted)));
    assert_eq!(captured(console).matches(PROMPT).count(), 3);
}

#[test]
fn given_node_with_single_child_when_reached_then_malformed_traversal() {
    // Arrange: A (id 1) only got a left child because its siblings were skipped
    init_test_setup();
    let tree = fixture("malformed.txt");
    let mut console = scripted_console(&["no"]);

    // Act
    let result = Evaluator::default().evaluate(&tree, &mut console);

    // Assert
    match result {
        Err(ApplicationError::Domain(DomainError::MalformedTraversal { node_id })) => {
            assert_eq!(node_id, 1)
        }
        other => panic!("expected MalformedTraversal, got {:?}", other),
    }
}

#[test]
fn given_malformed_tree_when_taking_sound_branch_then_still_answers() {
    let tree = fixture("malformed.txt");
    let mut console = scripted_console(&["yes"]);

    let verdict = Evaluator::default().evaluate(&tree, &mut console).unwrap();

    assert_eq!(verdict.label, "B");
}

#[test]
fn given_custom_settings_when_evaluating_then_uses_greeting_and_suffix() {
    let settings = Settings {
        greeting: "Diagnosis".into(),
        prompt_suffix: " [y/n] ".into(),
        ..Settings::default()
    };
    let tree = broken_tree();
    let mut console = scripted_console(&["n"]);

    Evaluator::new(&settings).evaluate(&tree, &mut console).unwrap();

    assert_eq!(
        captured(console),
        "Diagnosis\nIs it broken? [y/n] Try restarting\n"
    );
}
