//! Command implementations shared by the `moviexml` binary and its tests.
pub mod commands;
