//! Harness for testing strategy return significance from the command line.

pub mod commands;
