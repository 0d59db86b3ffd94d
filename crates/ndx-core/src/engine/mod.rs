//! # Engine Module
//!
//! The interactive selection and grouping logic of the index builder.
//!
//! ## Overview
//!
//! A run narrows a universe of identifiers (residue names, then residue numbers and atom
//! names per chosen residue) down to chosen subsets through add/remove rounds driven by
//! patterns, then cross-joins those subsets into named groups of atom numbers.
//!
//! ## Architecture
//!
//! - **Pattern Resolution** ([`pattern`]) - Exact, numeric-range and regex matching rules
//! - **Selection** ([`selection`]) - The two-set state machine and its interactive driver
//! - **Prompting** ([`prompt`]) - The request/response contract with the operator
//! - **Grouping** ([`grouping`]) - Combination strategies and the group builder
//! - **Configuration** ([`config`]) - Validated workflow settings
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front-ends
//! - **Error Handling** ([`error`]) - Engine errors and their classification

pub mod config;
pub mod error;
pub mod grouping;
pub mod pattern;
pub mod progress;
pub mod prompt;
pub mod selection;
