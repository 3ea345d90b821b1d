//! Shelf TUI Library
//!
//! This crate provides the interactive terminal interface for shelf. It owns
//! the session state machine (navigation, help, confirmation and
//! parameter-input modals), renders the two-pane frame, and bridges into
//! `shelf-core` for placeholder handling and command execution.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`app`]: Session state, the modal state machine and rendering
//! - [`editor`]: Launching an external editor on the config file
//!
//! The binary (`shelf`) runs a single-threaded event loop: draw a frame,
//! read one crossterm event, feed it to the state machine, and act on the
//! returned [`app::Action`] (if any). Command execution suspends the
//! terminal UI and hands the foreground to the child process.

pub mod app;
pub mod cli_args;
pub mod editor;
