//! Shelf Core Library
//!
//! This crate provides the core functionality for shelf, an interactive
//! terminal launcher that renders a user-configured tree of shell commands,
//! fills in placeholder variables, and runs the result through the shell.
//!
//! # Key Features
//!
//! - **Configuration**: Parse the YAML command tree, with first-run creation
//!   of a starter config and a built-in fallback when loading fails
//! - **Command Tree**: Navigable folder/command tree with expand state and
//!   per-node confirmation flags
//! - **Placeholders**: Extraction and literal substitution of `{name}`
//!   variables in command templates
//! - **Execution**: Hand a finished command line to an interactive shell
//! - **Error Handling**: Contextual error types for all failure modes
//!
//! # Examples
//!
//! Building the command tree from a loaded configuration:
//!
//! ```no_run
//! use shelf_core::config::Config;
//! use shelf_core::tree::CommandTree;
//!
//! let config = Config::load(&None)?;
//! let tree = CommandTree::from_config(&config);
//! for row in tree.root().visible_rows() {
//!     println!("depth {}", row.depth);
//! }
//! # Ok::<(), shelf_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod placeholder;
pub mod tree;
