//! Data models shared by the readers, the selection engine and the index writer.
//!
//! - [`atom`] - A single parsed atom line (residue number, atom name, atom number)
//! - [`store`] - Atom records grouped by residue name
//! - [`identifiers`] - Unique identifier sets with natural ordering
//! - [`group`] - Named groups of atom numbers ready for serialization

pub mod atom;
pub mod group;
pub mod identifiers;
pub mod store;
