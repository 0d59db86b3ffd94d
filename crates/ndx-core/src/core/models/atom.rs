/// One parsed atom line of a structure file.
///
/// Every field is kept exactly as printed (whitespace-trimmed) so atom numbers round-trip
/// into the index file without reformatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomRecord {
    pub residue_number: String, // Residue sequence number as printed, e.g. "12"
    pub atom_name: String,      // Atom name within the residue, e.g. "OW"
    pub atom_number: String,    // Atom index as printed, e.g. "8261"
}

impl AtomRecord {
    pub fn new(residue_number: &str, atom_name: &str, atom_number: &str) -> Self {
        Self {
            residue_number: residue_number.to_string(),
            atom_name: atom_name.to_string(),
            atom_number: atom_number.to_string(),
        }
    }
}
