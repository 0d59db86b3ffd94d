use super::error::EngineError;
use super::pattern::{self, MatchRule};
use super::prompt::Prompter;
use crate::core::models::identifiers::IdentifierSet;
use phf::{Map, phf_map};
use std::fmt;
use tracing::{debug, trace, warn};

/// Which set a round moves identifiers out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Move matches from the candidates into the chosen set.
    Add,
    /// Move matches from the chosen set back into the candidates.
    Remove,
}

/// The operator's answer after each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Add,
    Remove,
    Done,
}

static DIRECTIVE_TOKENS: Map<&'static str, Directive> = phf_map! {
    "Add" => Directive::Add, "add" => Directive::Add, "A" => Directive::Add, "a" => Directive::Add,
    "Remove" => Directive::Remove, "remove" => Directive::Remove,
    "R" => Directive::Remove, "r" => Directive::Remove,
    "Done" => Directive::Done, "done" => Directive::Done, "D" => Directive::Done, "d" => Directive::Done,
    "No" => Directive::Done, "no" => Directive::Done, "N" => Directive::Done, "n" => Directive::Done,
};

impl Directive {
    /// Parses a continuation answer; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        DIRECTIVE_TOKENS.get(input.trim()).copied()
    }
}

/// What a single pattern round did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub rule: MatchRule,
    pub moved: Vec<String>,
}

/// The two-set state of one selection run.
///
/// Every identifier of the starting universe is in exactly one of `candidates` and
/// `chosen` at all times; rounds only move identifiers between them.
#[derive(Debug, Clone)]
pub struct SelectionState<S: IdentifierSet> {
    candidates: S,
    chosen: S,
    mode: Mode,
}

impl<S: IdentifierSet> SelectionState<S> {
    pub fn new(universe: S) -> Self {
        Self {
            candidates: universe,
            chosen: S::default(),
            mode: Mode::Add,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn candidates(&self) -> &S {
        &self.candidates
    }

    pub fn chosen(&self) -> &S {
        &self.chosen
    }

    /// The set patterns are currently resolved against.
    pub fn operative(&self) -> &S {
        match self.mode {
            Mode::Add => &self.candidates,
            Mode::Remove => &self.chosen,
        }
    }

    /// Resolves `pattern` against the operative set and moves every match to the other set.
    ///
    /// A pattern that matches nothing leaves the state untouched. On error the state is
    /// unchanged as well.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<RoundOutcome, EngineError> {
        let resolution = pattern::resolve(pattern.trim(), self.operative())?;

        let (from, to) = match self.mode {
            Mode::Add => (&mut self.candidates, &mut self.chosen),
            Mode::Remove => (&mut self.chosen, &mut self.candidates),
        };
        for id in &resolution.matches {
            from.remove(id);
            to.add(id);
        }

        Ok(RoundOutcome {
            rule: resolution.rule,
            moved: resolution.matches,
        })
    }

    /// Applies a continuation directive. Returns `true` when the run is finished.
    pub fn apply_directive(&mut self, directive: Directive) -> bool {
        match directive {
            Directive::Add => self.mode = Mode::Add,
            Directive::Remove => self.mode = Mode::Remove,
            Directive::Done => return true,
        }
        false
    }

    pub fn into_chosen(self) -> S {
        self.chosen
    }
}

/// What kind of identifier a selection run narrows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    ResidueName,
    ResidueNumber,
    AtomName,
}

impl SelectionKind {
    fn article(&self) -> &'static str {
        match self {
            SelectionKind::AtomName => "an",
            SelectionKind::ResidueName | SelectionKind::ResidueNumber => "a",
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionKind::ResidueName => "residue name",
            SelectionKind::ResidueNumber => "residue number",
            SelectionKind::AtomName => "atom name",
        })
    }
}

/// Runs an interactive selection over `universe` and returns the chosen identifiers.
///
/// Each round shows the operative set, asks for a pattern, applies it, shows the chosen
/// set and asks whether to add more, remove some, or finish. Invalid patterns and
/// unrecognized directives are reported through the prompter and asked again.
///
/// `residue` names the residue whose numbers or atom names are being selected, if any.
///
/// # Errors
///
/// Returns [`EngineError::InputClosed`] if the prompter runs out of input and
/// [`EngineError::Prompt`] if displaying or reading fails.
pub fn select<S, P>(
    universe: S,
    kind: SelectionKind,
    residue: Option<&str>,
    prompter: &mut P,
) -> Result<S, EngineError>
where
    S: IdentifierSet,
    P: Prompter + ?Sized,
{
    let pattern_prompt = match residue {
        Some(name) => format!("Select {} {} of {}. > ", kind.article(), kind, name),
        None => format!("Select {} {}. > ", kind.article(), kind),
    };
    let mut state = SelectionState::new(universe);
    debug!(
        "Starting {} selection over {} candidates.",
        kind,
        state.candidates().len()
    );

    loop {
        let label = match state.mode() {
            Mode::Add => "Candidates",
            Mode::Remove => "Chosen",
        };
        prompter.show(label, &state.operative().to_ordered())?;

        let outcome = loop {
            let line = prompter
                .ask(&pattern_prompt)?
                .ok_or(EngineError::InputClosed {
                    expected: "a selection pattern",
                })?;
            match state.apply_pattern(&line) {
                Ok(outcome) => break outcome,
                Err(e) if e.is_recoverable() => {
                    warn!("{}", e);
                    prompter.notify(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        };
        trace!(
            "{:?} round ({:?} rule) moved {:?}.",
            state.mode(),
            outcome.rule,
            outcome.moved
        );

        prompter.show("Chosen", &state.chosen().to_ordered())?;

        let directive = loop {
            let line = prompter
                .ask("Continue? [add/remove/done] > ")?
                .ok_or(EngineError::InputClosed {
                    expected: "a continuation directive",
                })?;
            match Directive::parse(&line) {
                Some(directive) => break directive,
                None => prompter.notify("Invalid input. Answer add, remove or done.")?,
            }
        };
        if state.apply_directive(directive) {
            break;
        }
    }

    let chosen = state.into_chosen();
    debug!("Finished {} selection with {} chosen.", kind, chosen.len());
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::identifiers::{HashIdentifierSet, TreeIdentifierSet};
    use crate::engine::prompt::ScriptedPrompter;

    fn universe(ids: &[&str]) -> HashIdentifierSet {
        ids.iter().collect()
    }

    fn assert_partition<S: IdentifierSet>(state: &SelectionState<S>, all: &[&str]) {
        for id in all {
            assert!(
                state.candidates().contains(id) ^ state.chosen().contains(id),
                "'{}' must be in exactly one set",
                id
            );
        }
        assert_eq!(state.candidates().len() + state.chosen().len(), all.len());
    }

    #[test]
    fn new_state_starts_in_add_mode_with_nothing_chosen() {
        let state = SelectionState::new(universe(&["A", "B"]));
        assert_eq!(state.mode(), Mode::Add);
        assert!(state.chosen().is_empty());
        assert_eq!(state.operative().len(), 2);
    }

    #[test]
    fn exact_add_moves_one_identifier() {
        let all = ["SOL", "NA", "CL"];
        let mut state = SelectionState::new(universe(&all));

        let outcome = state.apply_pattern("SOL").unwrap();

        assert_eq!(outcome.rule, MatchRule::Exact);
        assert_eq!(outcome.moved, vec!["SOL"]);
        assert!(state.chosen().contains("SOL"));
        assert!(!state.candidates().contains("SOL"));
        assert_partition(&state, &all);
    }

    #[test]
    fn exact_add_of_already_chosen_identifier_is_noop() {
        let all = ["SOL", "NA"];
        let mut state = SelectionState::new(universe(&all));
        state.apply_pattern("SOL").unwrap();

        let outcome = state.apply_pattern("SOL").unwrap();

        assert!(outcome.moved.is_empty());
        assert_eq!(state.chosen().to_ordered(), vec!["SOL"]);
        assert_partition(&state, &all);
    }

    #[test]
    fn range_add_moves_inclusive_range_only() {
        let all = ["A1", "A2", "A3", "A4"];
        let mut state = SelectionState::new(universe(&all));

        state.apply_pattern("A1,3").unwrap();

        assert_eq!(state.chosen().to_ordered(), vec!["A1", "A2", "A3"]);
        assert_eq!(state.candidates().to_ordered(), vec!["A4"]);
        assert_partition(&state, &all);
    }

    #[test]
    fn reversed_range_leaves_state_unchanged() {
        let all = ["A1", "A2", "A3", "A4", "A5"];
        let mut state = SelectionState::new(universe(&all));

        let outcome = state.apply_pattern("A5,2").unwrap();

        assert!(outcome.moved.is_empty());
        assert!(state.chosen().is_empty());
        assert_partition(&state, &all);
    }

    #[test]
    fn remove_mode_moves_matches_back_to_candidates() {
        let all = ["HW1", "HW2", "OW"];
        let mut state = SelectionState::new(universe(&all));
        state.apply_pattern("W").unwrap();
        assert_eq!(state.chosen().len(), 3);

        assert!(!state.apply_directive(Directive::Remove));
        assert_eq!(state.mode(), Mode::Remove);
        state.apply_pattern("^HW").unwrap();

        assert_eq!(state.chosen().to_ordered(), vec!["OW"]);
        assert_eq!(state.candidates().to_ordered(), vec!["HW1", "HW2"]);
        assert_partition(&state, &all);
    }

    #[test]
    fn remove_mode_ignores_identifiers_that_are_not_chosen() {
        let all = ["HW1", "OW"];
        let mut state = SelectionState::new(universe(&all));
        state.apply_pattern("OW").unwrap();
        state.apply_directive(Directive::Remove);

        let outcome = state.apply_pattern("HW1").unwrap();

        assert!(outcome.moved.is_empty());
        assert_eq!(state.chosen().to_ordered(), vec!["OW"]);
        assert_partition(&state, &all);
    }

    #[test]
    fn invalid_pattern_leaves_state_unchanged() {
        let all = ["OW", "HW1"];
        let mut state = SelectionState::new(universe(&all));

        let err = state.apply_pattern("[").unwrap_err();

        assert!(err.is_recoverable());
        assert!(state.chosen().is_empty());
        assert_partition(&state, &all);
    }

    #[test]
    fn pattern_whitespace_is_trimmed() {
        let mut state = SelectionState::new(universe(&["SOL"]));
        let outcome = state.apply_pattern("  SOL \n").unwrap();
        assert_eq!(outcome.rule, MatchRule::Exact);
    }

    #[test]
    fn partition_invariant_holds_across_mixed_rounds() {
        let all = ["1", "2", "3", "10", "11", "12", "20"];
        let mut state = SelectionState::new(TreeIdentifierSet::from_members(all));
        let script = [
            (Directive::Add, "1,11"),
            (Directive::Add, "^2"),
            (Directive::Remove, "^1"),
            (Directive::Remove, "3"),
            (Directive::Add, "."),
        ];
        for (directive, pattern) in script {
            state.apply_directive(directive);
            state.apply_pattern(pattern).unwrap();
            assert_partition(&state, &all);
        }
        assert_eq!(state.chosen().len(), all.len());
    }

    #[test]
    fn directive_parse_accepts_documented_spellings() {
        for token in ["Add", "add", "A", "a"] {
            assert_eq!(Directive::parse(token), Some(Directive::Add));
        }
        for token in ["Remove", "remove", "R", "r"] {
            assert_eq!(Directive::parse(token), Some(Directive::Remove));
        }
        for token in ["Done", "done", "D", "d", "No", "no", "N", "n", " n \n"] {
            assert_eq!(Directive::parse(token), Some(Directive::Done));
        }
        assert_eq!(Directive::parse("yes"), None);
        assert_eq!(Directive::parse(""), None);
    }

    #[test]
    fn select_runs_until_done_and_returns_chosen() {
        let mut prompter =
            ScriptedPrompter::new(["SOL", "a", "N.*", "r", "NA", "done"]);
        let chosen = select(
            universe(&["SOL", "NA", "NAC", "CL"]),
            SelectionKind::ResidueName,
            None,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(chosen.to_ordered(), vec!["NAC", "SOL"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn select_shows_operative_and_chosen_sets_before_each_request() {
        let mut prompter = ScriptedPrompter::new(["OW", "r", "OW", "d"]);
        select(
            universe(&["OW", "HW1"]),
            SelectionKind::AtomName,
            Some("SOL"),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(
            prompter.transcript(),
            &[
                "Candidates: {HW1, OW}",
                "Select an atom name of SOL. > ",
                "Chosen: {OW}",
                "Continue? [add/remove/done] > ",
                "Chosen: {OW}",
                "Select an atom name of SOL. > ",
                "Chosen: {}",
                "Continue? [add/remove/done] > ",
            ]
        );
    }

    #[test]
    fn select_retries_after_invalid_pattern() {
        let mut prompter = ScriptedPrompter::new(["(", "OW", "done"]);
        let chosen = select(
            universe(&["OW", "HW1"]),
            SelectionKind::AtomName,
            None,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(chosen.to_ordered(), vec!["OW"]);
        assert!(
            prompter
                .transcript()
                .iter()
                .any(|line| line.starts_with("Invalid selection pattern '('"))
        );
    }

    #[test]
    fn select_reprompts_unrecognized_directive() {
        let mut prompter = ScriptedPrompter::new(["OW", "maybe", "", "done"]);
        let chosen = select(
            universe(&["OW"]),
            SelectionKind::AtomName,
            None,
            &mut prompter,
        )
        .unwrap();

        assert_eq!(chosen.to_ordered(), vec!["OW"]);
        let invalid_notices = prompter
            .transcript()
            .iter()
            .filter(|line| line.starts_with("Invalid input."))
            .count();
        assert_eq!(invalid_notices, 2);
    }

    #[test]
    fn select_fails_when_input_runs_out() {
        let mut prompter = ScriptedPrompter::new(["OW"]);
        let err = select(
            universe(&["OW"]),
            SelectionKind::AtomName,
            None,
            &mut prompter,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            EngineError::InputClosed {
                expected: "a continuation directive"
            }
        ));
    }

    #[test]
    fn select_with_no_matching_rounds_returns_empty_set() {
        let mut prompter = ScriptedPrompter::new(["^XYZ", "done"]);
        let chosen = select(
            universe(&["OW"]),
            SelectionKind::AtomName,
            None,
            &mut prompter,
        )
        .unwrap();
        assert!(chosen.is_empty());
    }
}
