use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::store::RecordStore;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroMetadata {
    pub title: String,
    pub declared_atoms: usize,
    pub box_line: String,
}

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: GroParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum GroParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for an atom record (must be at least 20 chars)")]
    LineTooShort,
}

const ATOM_LINE_MIN_LEN: usize = 20;

// (start, end, 1-based column label) of each fixed-width field.
const RESIDUE_NUMBER_COLS: (usize, usize, &str) = (0, 5, "1-5");
const RESIDUE_NAME_COLS: (usize, usize, &str) = (5, 10, "6-10");
const ATOM_NAME_COLS: (usize, usize, &str) = (10, 15, "11-15");
const ATOM_NUMBER_COLS: (usize, usize, &str) = (15, 20, "16-20");

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn required_field<'a>(
    line: &'a str,
    line_num: usize,
    (start, end, columns): (usize, usize, &'static str),
) -> Result<&'a str, GroError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        return Err(GroError::Parse {
            line: line_num,
            kind: GroParseErrorKind::MissingRequiredField { columns },
        });
    }
    Ok(value)
}

/// Reader for the fixed-width GROMACS `.gro` layout.
///
/// Line 1 is the title, line 2 the atom count, then one line per atom and finally the box
/// vectors. Only the residue number, residue name, atom name and atom number columns are
/// read; coordinates and velocities are ignored.
pub struct GroFile;

impl StructureFile for GroFile {
    type Metadata = GroMetadata;
    type Error = GroError;

    fn read_from(reader: &mut impl BufRead) -> Result<(RecordStore, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();
        let mut metadata = GroMetadata::default();

        metadata.title = match lines.next() {
            Some(line) => line?,
            None => return Err(GroError::MissingRecord("title line".into())),
        };

        let count_line = match lines.next() {
            Some(line) => line?,
            None => return Err(GroError::MissingRecord("atom count line".into())),
        };
        metadata.declared_atoms =
            count_line
                .trim()
                .parse()
                .map_err(|_| GroError::Parse {
                    line: 2,
                    kind: GroParseErrorKind::InvalidAtomCount {
                        value: count_line.trim().into(),
                    },
                })?;

        let mut store = RecordStore::new();
        for index in 0..metadata.declared_atoms {
            let line_num = index + 3;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    return Err(GroError::Inconsistency(format!(
                        "Header declares {} atoms but only {} atom lines were found",
                        metadata.declared_atoms, index
                    )));
                }
            };

            if line.len() < ATOM_LINE_MIN_LEN {
                return Err(GroError::Parse {
                    line: line_num,
                    kind: GroParseErrorKind::LineTooShort,
                });
            }

            let residue_number = required_field(&line, line_num, RESIDUE_NUMBER_COLS)?;
            let residue_name = required_field(&line, line_num, RESIDUE_NAME_COLS)?;
            let atom_name = required_field(&line, line_num, ATOM_NAME_COLS)?;
            let atom_number = required_field(&line, line_num, ATOM_NUMBER_COLS)?;

            trace!(
                line = line_num,
                residue_name, residue_number, atom_name, atom_number, "Parsed atom record."
            );
            store.push(
                residue_name,
                AtomRecord::new(residue_number, atom_name, atom_number),
            );
        }

        metadata.box_line = match lines.next() {
            Some(line) => line?.trim().to_string(),
            None => return Err(GroError::MissingRecord("box vector line".into())),
        };

        debug!(
            "Read {} atoms in {} residue names from structure '{}'.",
            store.len(),
            store.residue_count(),
            metadata.title.trim()
        );
        Ok((store, metadata))
    }
}
