//! # makendx Core Library
//!
//! Builds GROMACS index (`.ndx`) files from `.gro` structure files through interactive,
//! pattern-driven selection of residue names, residue numbers and atom names.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a three-layer split so that each layer can be tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`RecordStore`, identifier sets,
//!   `Groups`), natural ordering, and the `.gro` reader and `.ndx` reader/writer with
//!   numbered backups.
//!
//! - **[`engine`]: The Logic Core.** Pattern resolution, the add/remove selection state
//!   machine, the prompt contract used to drive it, and the group builder with its
//!   combination strategies.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a complete
//!   structure-to-index run that front-ends call with their own prompter and progress sink.

pub mod core;
pub mod engine;
pub mod workflows;
