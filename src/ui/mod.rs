//! User interface module - terminal output for check results.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_outcome, display_rules, display_status,
    display_success, format_outcome,
};
