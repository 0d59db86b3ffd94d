use super::atom::AtomRecord;
use super::identifiers::IdentifierSet;
use std::collections::HashMap;

/// Atom records grouped by residue name.
///
/// Records under each residue name keep the order in which they were pushed (file order).
/// The store is filled once by a structure reader and only queried afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    residues: HashMap<String, Vec<AtomRecord>>,
    residue_order: Vec<String>, // Residue names in order of first appearance
    atom_count: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, residue_name: &str, record: AtomRecord) {
        match self.residues.get_mut(residue_name) {
            Some(records) => records.push(record),
            None => {
                self.residue_order.push(residue_name.to_string());
                self.residues.insert(residue_name.to_string(), vec![record]);
            }
        }
        self.atom_count += 1;
    }

    /// Returns the records of `residue_name` in file order, or an empty slice if the
    /// residue name is unknown.
    pub fn atoms(&self, residue_name: &str) -> &[AtomRecord] {
        self.residues
            .get(residue_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Residue names in order of first appearance in the source file.
    pub fn residue_names_in_file_order(&self) -> impl Iterator<Item = &str> {
        self.residue_order.iter().map(String::as_str)
    }

    pub fn residue_names<S: IdentifierSet>(&self) -> S {
        S::from_members(&self.residue_order)
    }

    pub fn residue_numbers<S: IdentifierSet>(&self, residue_name: &str) -> S {
        S::from_members(
            self.atoms(residue_name)
                .iter()
                .map(|atom| atom.residue_number.as_str()),
        )
    }

    pub fn atom_names<S: IdentifierSet>(&self, residue_name: &str) -> S {
        S::from_members(
            self.atoms(residue_name)
                .iter()
                .map(|atom| atom.atom_name.as_str()),
        )
    }

    pub fn residue_count(&self) -> usize {
        self.residue_order.len()
    }

    pub fn len(&self) -> usize {
        self.atom_count
    }

    pub fn is_empty(&self) -> bool {
        self.atom_count == 0
    }
}
