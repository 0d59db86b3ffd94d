//! Provides input/output functionality for structure and index files.
//!
//! Structure files are read through the [`traits::StructureFile`] interface into a
//! [`RecordStore`](crate::core::models::store::RecordStore); index files are rendered from
//! [`Groups`](crate::core::models::group::Groups) and can be read back for inspection.
//! Existing output files are moved aside by [`backup`] before being replaced.

pub mod backup;
pub mod gro;
pub mod ndx;
pub mod traits;
