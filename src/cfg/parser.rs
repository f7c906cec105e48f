//! Recursive-descent parser for the cfg dialect
//!
//! Grammar rules are functions over a [`Parser`] cursor, composed with the
//! four primitives in [`combinators`]. Every rule returns a node id; failures
//! are `Error` nodes, never panics or `Result`s, so a malformed file still
//! yields a tree that is complete up to (and, with recovery, past) each
//! failure point.
//!
//! ```text
//! Program           := TopLevelStatement* EOF
//! TopLevelStatement := FileStarter | TopLevelAssignment | Route | EOF
//! FileStarter       := PREPROC{SER|KAMAILIO|OPENSER|MAXCOMPAT|ALL}
//! Route             := ROUTE RouteName? Block
//! RouteName         := "[" (Identifier | Number | String) "]"
//! Block             := "{" Statement* "}"
//! Statement         := Assignment ";"
//! Assignment        := LHS "=" RHS
//! ```

pub mod api;
pub mod combinators;
pub mod elements;
#[allow(clippy::module_inception)]
pub mod parser;

pub use api::{parse, parse_source, parse_with_options, parse_with_spans};
pub use combinators::{choice, optional, repeat, sequence, Rule};
pub use parser::{Mark, Parser};
