//! demography library - named-query access to a demography dataset
//!
//! Provides the query catalog and store facade, the visualization tools built
//! on top of them, and the command execution and output formatting behind the
//! `demography` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod db;
pub mod output;
pub mod tools;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;
