//! # Core Module
//!
//! Stateless building blocks of the index builder: the data models (atom records, the
//! record store, identifier sets and groups), natural ordering, and file I/O for
//! structure (`.gro`) and index (`.ndx`) files.
//!
//! - **Data Models** ([`models`]) - Atom records grouped by residue name, identifier sets, groups
//! - **File I/O** ([`io`]) - Fixed-width structure reader, index writer/reader, backups
//! - **Utilities** ([`utils`]) - Natural ("human") ordering of identifiers

pub mod io;
pub mod models;
pub mod utils;
