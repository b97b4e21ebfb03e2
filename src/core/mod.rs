//! Core types: word lists, the file registry, and collaborator interfaces.

pub mod host;
pub mod ifile;
pub mod stream;
pub mod textlist;
