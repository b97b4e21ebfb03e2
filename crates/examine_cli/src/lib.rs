//! Line-oriented front end for the `examine` navigator.
//!
//! Each shown file prints a `==> name (file i of n) <==` header and its first lines. Commands
//! are read one per line:
//!
//! - `:n [N]` / `:p [N]` step forward or back through the list
//! - `:x [N]` opens list position `N` (default: the first file)
//! - `:e [LIST]` opens a space-separated list of names, or re-opens the current file
//! - `:f` describes the current file, `:l NAME` starts a transcript, `:r` re-opens
//! - `q` quits
//!
//! When standard output is not a terminal every file is copied to it in list order instead.

pub mod commands;
pub mod console;
pub mod session;
