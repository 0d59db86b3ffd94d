use crate::core::io::gro::GroFile;
use crate::core::io::ndx::{IndexFile, WriteReport};
use crate::core::io::traits::StructureFile;
use crate::core::models::group::Groups;
use crate::core::models::identifiers::{HashIdentifierSet, IdentifierSet};
use crate::core::models::store::RecordStore;
use crate::engine::config::WorkflowConfig;
use crate::engine::error::EngineError;
use crate::engine::grouping::{self, CombineStrategy, ResidueSelection, Selections};
use crate::engine::progress::ProgressReporter;
use crate::engine::prompt::Prompter;
use crate::engine::selection::{self, SelectionKind};
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeNdxReport {
    pub atoms_read: usize,
    pub groups: Groups,
    pub write: WriteReport,
}

/// Runs every interactive selection for `store`.
///
/// Residue names are selected first; then, for each chosen residue name in natural
/// order, its residue numbers followed by its atom names.
pub fn select_residues<S, P>(store: &RecordStore, prompter: &mut P) -> Result<Selections<S>, EngineError>
where
    S: IdentifierSet,
    P: Prompter + ?Sized,
{
    let residue_names: S = selection::select(
        store.residue_names(),
        SelectionKind::ResidueName,
        None,
        prompter,
    )?;

    let mut selections = Selections::new();
    for residue_name in residue_names.to_ordered() {
        let residue_numbers = selection::select(
            store.residue_numbers(&residue_name),
            SelectionKind::ResidueNumber,
            Some(&residue_name),
            prompter,
        )?;
        let atom_names = selection::select(
            store.atom_names(&residue_name),
            SelectionKind::AtomName,
            Some(&residue_name),
            prompter,
        )?;
        selections.insert(
            residue_name,
            ResidueSelection {
                residue_numbers,
                atom_names,
            },
        );
    }
    Ok(selections)
}

/// Selects interactively and builds groups, using identifier sets of type `S`.
pub fn run_with<S, P>(
    store: &RecordStore,
    strategy: CombineStrategy,
    prompter: &mut P,
    reporter: &ProgressReporter,
) -> Result<Groups, EngineError>
where
    S: IdentifierSet,
    P: Prompter + ?Sized,
{
    let selections: Selections<S> = select_residues(store, prompter)?;
    info!(
        "Selected {} residue name(s); building groups by {}.",
        selections.len(),
        strategy
    );
    reporter.phase("Building groups", || {
        grouping::build_groups(store, &selections, strategy, reporter)
    })
}

/// Selects interactively and builds groups with hash-backed identifier sets.
pub fn run<P: Prompter + ?Sized>(
    store: &RecordStore,
    strategy: CombineStrategy,
    prompter: &mut P,
    reporter: &ProgressReporter,
) -> Result<Groups, EngineError> {
    run_with::<HashIdentifierSet, P>(store, strategy, prompter, reporter)
}

/// Reads `input`, runs the interactive workflow and writes the resulting index to `output`.
///
/// Nothing is written when reading or selecting fails.
#[instrument(skip_all, name = "make_ndx_workflow")]
pub fn make_index_file<P: Prompter + ?Sized>(
    input: &Path,
    output: &Path,
    config: &WorkflowConfig,
    prompter: &mut P,
    reporter: &ProgressReporter,
) -> Result<MakeNdxReport, EngineError> {
    let (store, metadata) = reporter
        .phase("Reading structure", || GroFile::read_from_path(input))
        .map_err(|source| EngineError::Structure {
            path: input.to_path_buf(),
            source,
        })?;
    info!(
        "Loaded '{}' with {} atoms in {} residue names ({}).",
        metadata.title.trim(),
        store.len(),
        store.residue_count(),
        store.residue_names_in_file_order().collect::<Vec<_>>().join(", ")
    );
    debug!(
        "Header declared {} atoms; box vectors '{}'.",
        metadata.declared_atoms, metadata.box_line
    );

    let groups = run(&store, config.strategy, prompter, reporter)?;

    let write = reporter.phase("Writing index", || {
        IndexFile::write_to_path(&groups, output, config.output)
    })?;

    Ok(MakeNdxReport {
        atoms_read: store.len(),
        groups,
        write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::identifiers::TreeIdentifierSet;
    use crate::engine::config::WorkflowConfigBuilder;
    use crate::engine::prompt::ScriptedPrompter;
    use std::fs;
    use tempfile::tempdir;

    const WATER_AND_ION: &str = "\
water box
7
    1SOL     OW    1   0.126   1.624   1.679
    1SOL    HW1    2   0.190   1.661   1.747
    1SOL    HW2    3   0.177   1.568   1.613
    2SOL     OW    4   1.259   0.584   1.549
    2SOL    HW1    5   1.310   0.662   1.514
    2SOL    HW2    6   1.255   0.608   1.645
    3NA      NA    7   0.500   0.500   0.500
   1.86206   1.86206   1.86206
";

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        for (number, serial) in [("1", 1), ("2", 4)] {
            for (offset, name) in ["OW", "HW1", "HW2"].iter().enumerate() {
                store.push(
                    "SOL",
                    AtomRecord::new(number, name, &(serial + offset).to_string()),
                );
            }
        }
        store.push("NA", AtomRecord::new("3", "NA", "7"));
        store
    }

    #[test]
    fn select_residues_asks_numbers_then_names_per_chosen_residue() {
        let mut prompter = ScriptedPrompter::new([
            "SOL", "a", "NA", "done", // residue names
            "1,2", "done", // NA residue numbers (natural order: NA before SOL)
            "NA", "done", // NA atom names
            "1", "done", // SOL residue numbers
            "^HW", "done", // SOL atom names
        ]);

        let selections: Selections<TreeIdentifierSet> =
            select_residues(&store(), &mut prompter).unwrap();

        assert_eq!(selections.len(), 2);
        assert_eq!(selections["NA"].residue_numbers.to_ordered(), Vec::<String>::new());
        assert_eq!(selections["NA"].atom_names.to_ordered(), vec!["NA"]);
        assert_eq!(selections["SOL"].residue_numbers.to_ordered(), vec!["1"]);
        assert_eq!(selections["SOL"].atom_names.to_ordered(), vec!["HW1", "HW2"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn run_builds_groups_from_scripted_selections() {
        let mut prompter = ScriptedPrompter::new([
            "SOL", "done", "1,2", "done", "OW", "done",
        ]);

        let groups = run(
            &store(),
            CombineStrategy::ResidueNumber,
            &mut prompter,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(groups.names(), vec!["SOL1", "SOL2"]);
        assert_eq!(groups.get("SOL1"), Some(&["1".to_string()][..]));
        assert_eq!(groups.get("SOL2"), Some(&["4".to_string()][..]));
    }

    #[test]
    fn run_with_nothing_chosen_builds_no_groups() {
        let mut prompter = ScriptedPrompter::new(["", "done"]);
        let groups = run(
            &store(),
            CombineStrategy::AtomName,
            &mut prompter,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn make_index_file_writes_groups_and_backs_up_previous_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("conf.gro");
        let output = dir.path().join("index.ndx");
        fs::write(&input, WATER_AND_ION).unwrap();
        fs::write(&output, b"old index").unwrap();

        let config = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::AtomName)
            .build()
            .unwrap();
        let mut prompter = ScriptedPrompter::new([
            "SOL", "done", ".", "done", "HW1", "a", "OW", "done",
        ]);

        let report = make_index_file(
            &input,
            &output,
            &config,
            &mut prompter,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(report.atoms_read, 7);
        assert_eq!(
            report.write.backup.as_deref(),
            Some(dir.path().join("#index.ndx.1#").as_path())
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "[ SOLHW1 ]\n2 5\n\n[ SOLOW ]\n1 4\n\n"
        );
        assert_eq!(
            fs::read(dir.path().join("#index.ndx.1#")).unwrap(),
            b"old index"
        );
    }

    #[test]
    fn make_index_file_writes_nothing_when_input_runs_out() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("conf.gro");
        let output = dir.path().join("index.ndx");
        fs::write(&input, WATER_AND_ION).unwrap();

        let config = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::ResidueNumber)
            .build()
            .unwrap();
        let mut prompter = ScriptedPrompter::new(["SOL"]);

        let result = make_index_file(
            &input,
            &output,
            &config,
            &mut prompter,
            &ProgressReporter::new(),
        );

        assert!(matches!(result, Err(EngineError::InputClosed { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn make_index_file_names_the_unreadable_structure() {
        let dir = tempdir().unwrap();
        let config = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::ResidueNumber)
            .build()
            .unwrap();
        let missing = dir.path().join("missing.gro");

        let result = make_index_file(
            &missing,
            &dir.path().join("index.ndx"),
            &config,
            &mut ScriptedPrompter::default(),
            &ProgressReporter::new(),
        );

        assert!(matches!(
            &result,
            Err(EngineError::Structure { path, .. }) if path == &missing
        ));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains(&missing.display().to_string())
        );
    }
}
