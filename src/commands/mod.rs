//! # CLI Command Implementations
//!
//! This module contains the implementation of the `darktable-importer`
//! command-line tool. The tool has a single action, kept in its own file in
//! the same shape as any future command would take:
//!
//! - An `Args` struct that defines the command's arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `darktable_importer` library.

pub mod import;
