use crate::core::io::backup;
use crate::core::models::group::Groups;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of atom numbers printed per line when no other value is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 15;

#[derive(Debug, Error)]
pub enum NdxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: NdxParseErrorKind },
    #[error("Failed to back up existing file '{path}': {source}", path = path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write index file '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NdxParseErrorKind {
    #[error("Group header has an empty name")]
    EmptyGroupName,
    #[error("Group header is not closed with ']'")]
    UnterminatedHeader,
    #[error("Atom numbers appear before the first group header")]
    MembersBeforeHeader,
}

/// A group as it appears in an index file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGroup {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub chunk_size: usize,
    pub backup: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            backup: true,
        }
    }
}

/// Outcome of writing an index file to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub backup: Option<PathBuf>,
    pub groups_written: usize,
}

/// Reader and writer for GROMACS index (`.ndx`) files.
pub struct IndexFile;

impl IndexFile {
    /// Serializes `groups` in natural order of their names.
    ///
    /// Each group is a `[ name ]` header, its members `chunk_size` per line, and a blank
    /// line. Members are written verbatim.
    pub fn write_to(groups: &Groups, writer: &mut impl Write, chunk_size: usize) -> io::Result<()> {
        let chunk_size = chunk_size.max(1);
        for (name, members) in groups.iter_ordered() {
            writeln!(writer, "[ {} ]", name)?;
            for chunk in members.chunks(chunk_size) {
                writeln!(writer, "{}", chunk.join(" "))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Renders the whole file into memory.
    pub fn render(groups: &Groups, chunk_size: usize) -> Vec<u8> {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        Self::write_to(groups, &mut buffer, chunk_size).ok();
        buffer
    }

    /// Writes `groups` to `path`.
    ///
    /// The file is rendered in memory first. An existing file is moved to a backup when
    /// `options.backup` is set, then the buffer is written with a single create. If the
    /// write fails the partially written file is removed.
    pub fn write_to_path<P: AsRef<Path>>(
        groups: &Groups,
        path: P,
        options: WriteOptions,
    ) -> Result<WriteReport, NdxError> {
        let path = path.as_ref();
        let buffer = Self::render(groups, options.chunk_size);

        let backup = if options.backup {
            backup::backup_existing(path).map_err(|source| NdxError::Backup {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            None
        };

        let mut file = File::create(path).map_err(|source| NdxError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let written = file.write_all(&buffer).and_then(|_| file.sync_all());
        if let Err(source) = written {
            drop(file);
            if let Err(e) = fs::remove_file(path) {
                warn!("Could not remove partial index file '{}': {}", path.display(), e);
            }
            return Err(NdxError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        debug!(
            "Wrote {} groups ({} bytes) to '{}'.",
            groups.len(),
            buffer.len(),
            path.display()
        );
        Ok(WriteReport {
            path: path.to_path_buf(),
            backup,
            groups_written: groups.len(),
        })
    }

    /// Parses an index file. Blank lines are skipped; groups are returned in file order.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<IndexGroup>, NdxError> {
        let mut groups: Vec<IndexGroup> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or(NdxError::Parse {
                        line: line_num,
                        kind: NdxParseErrorKind::UnterminatedHeader,
                    })?
                    .trim();
                if name.is_empty() {
                    return Err(NdxError::Parse {
                        line: line_num,
                        kind: NdxParseErrorKind::EmptyGroupName,
                    });
                }
                groups.push(IndexGroup {
                    name: name.to_string(),
                    members: Vec::new(),
                });
                continue;
            }

            let current = groups.last_mut().ok_or(NdxError::Parse {
                line: line_num,
                kind: NdxParseErrorKind::MembersBeforeHeader,
            })?;
            current
                .members
                .extend(trimmed.split_whitespace().map(str::to_owned));
        }

        Ok(groups)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IndexGroup>, NdxError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
