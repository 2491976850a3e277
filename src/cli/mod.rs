//! Command-line interface for `dmsnap`.

pub mod args;
pub mod commands;
