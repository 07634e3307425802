//! Project layer tests

pub mod tests_config;
pub mod tests_workspace_loader;
