//! Grammar rules, one module per construct

pub mod file_starter;
pub mod program;
pub mod routes;
pub mod statements;
pub mod terminals;

pub use file_starter::{file_starter, FILE_STARTERS};
pub use program::{program, top_level_statement};
pub use routes::{route, route_name, ROUTE_NAME_REQUIRED};
pub use statements::{assignment, block, lhs, rhs, statement, top_level_assignment};
pub use terminals::{
    assign_operator, core_variable, end_of_statement, identifier, number, string,
};
