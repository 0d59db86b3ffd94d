use super::config::ConfigError;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::atom::AtomRecord;
use crate::core::models::group::Groups;
use crate::core::models::identifiers::IdentifierSet;
use crate::core::models::store::RecordStore;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// How per-residue selections are cross-joined into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineStrategy {
    /// One group per chosen residue number: `<residue name><residue number>`.
    ResidueNumber,
    /// One group per chosen atom name: `<residue name><atom name>`.
    AtomName,
}

impl CombineStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombineStrategy::ResidueNumber => "resnum",
            CombineStrategy::AtomName => "atomname",
        }
    }
}

impl FromStr for CombineStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resnum" => Ok(CombineStrategy::ResidueNumber),
            "atomname" => Ok(CombineStrategy::AtomName),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for CombineStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chosen atom names and residue numbers of one chosen residue name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSelection<S: IdentifierSet> {
    pub residue_numbers: S,
    pub atom_names: S,
}

/// Chosen residue names mapped to their per-residue selections.
pub type Selections<S> = BTreeMap<String, ResidueSelection<S>>;

/// Expands `selections` into named groups.
///
/// Every (residue name, selector) pair yields a group, including pairs that match no
/// atom; each such empty group is announced with a [`Progress::Message`]. Members keep file order. Group names must be unique across residues: a name
/// such as `SOL12` reachable from both `SOL`+`12` and `SOL1`+`2` is rejected rather than
/// silently overwritten.
///
/// # Errors
///
/// Returns [`EngineError::GroupNameCollision`] when two residues produce the same name.
#[instrument(skip_all, name = "group_builder", fields(strategy = %strategy))]
pub fn build_groups<S: IdentifierSet>(
    store: &RecordStore,
    selections: &Selections<S>,
    strategy: CombineStrategy,
    reporter: &ProgressReporter,
) -> Result<Groups, EngineError> {
    let mut groups = Groups::new();
    let mut owners: HashMap<String, &str> = HashMap::new();

    reporter.report(Progress::TaskStart {
        total_steps: selections.len() as u64,
    });

    for (residue_name, selection) in selections {
        let atoms = store.atoms(residue_name);
        let (selectors, filter) = match strategy {
            CombineStrategy::ResidueNumber => (&selection.residue_numbers, &selection.atom_names),
            CombineStrategy::AtomName => (&selection.atom_names, &selection.residue_numbers),
        };

        for selector in selectors.to_ordered() {
            let members: Vec<String> = atoms
                .iter()
                .filter(|atom| {
                    let (key, other) = split_fields(atom, strategy);
                    key == selector && filter.contains(other)
                })
                .map(|atom| atom.atom_number.clone())
                .collect();

            let name = format!("{}{}", residue_name, selector);
            if let Some(first) = owners.insert(name.clone(), residue_name.as_str()) {
                return Err(EngineError::GroupNameCollision {
                    name,
                    first: first.to_string(),
                    second: residue_name.clone(),
                });
            }
            debug!("Group '{}' has {} members.", name, members.len());
            if members.is_empty() {
                reporter.report(Progress::Message(format!("Group '{}' matches no atoms.", name)));
            }
            groups.insert(name, members);
        }

        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    Ok(groups)
}

/// Returns (selector field, filter field) of `atom` for `strategy`.
fn split_fields(atom: &AtomRecord, strategy: CombineStrategy) -> (&str, &str) {
    match strategy {
        CombineStrategy::ResidueNumber => (atom.residue_number.as_str(), atom.atom_name.as_str()),
        CombineStrategy::AtomName => (atom.atom_name.as_str(), atom.residue_number.as_str()),
    }
}
