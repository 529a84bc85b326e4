//! dtree: interactive yes/no decision trees
//!
//! Architecture:
//! - `domain`: decision tree arena, line-format builder, answer parsing
//! - `application`: evaluator and file-level use cases
//! - `infrastructure`: console boundary
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
