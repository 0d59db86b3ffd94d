//! # Workflows Module
//!
//! Top-level entry points tying the readers, the selection engine, the group builder and
//! the index writer together.
//!
//! - **Index Building** ([`make_ndx`]) - Read a structure, run the interactive selections,
//!   build groups and write them to an index file.

pub mod make_ndx;
