//! blogcast command-line shell
//!
//! Argument definitions live in [`cli`]; [`commands`] wires them to the
//! pipeline.

#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod cli;
pub mod commands;
