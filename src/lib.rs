//! Input-file navigation for a terminal pager.
//!
//! Invariant: only [`Navigator::switch_to`] changes which file is current; every other
//! operation (`open`, `open_list`, `next`, `prev`, `open_index`, ...) goes through it.
//!
//! # Public API Overview
//! - Split filename lists with [`TextList`], honoring a [`Quoting`] quote pair and escape.
//! - Keep the ordered file list in an [`IFileRegistry`] addressed by stable [`IFileId`]s.
//! - Drive a [`Host`] (stream, screen, prompt, pattern expansion, messages) through a
//!   [`Navigator`], which falls back to the previous file whenever a file cannot be shown.
//! - Default console collaborators live in [`platform`].

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod nav;
pub mod platform;

/// Word-list tokenizing and quoting helpers.
pub use crate::core::textlist::{quote_name, unquote, Quoting, TextList, Word, Words};

/// File registry and identifiers.
pub use crate::core::ifile::{IFileId, IFileRegistry, EMPTY_FILE_NAME, STDIN_NAME};

/// Collaborator interfaces.
pub use crate::core::host::{Host, PatternExpander, Prompt, Reporter, Screen, ScrollPosition};
pub use crate::core::stream::{StreamFlags, StreamLayer, StreamSource};

/// Navigation.
pub use crate::nav::{Direction, FileIdentity, Navigator, Transcript};

pub use crate::config::NavConfig;
pub use crate::error::{ConfigError, NavError, QUIT_ERROR, QUIT_OK};
