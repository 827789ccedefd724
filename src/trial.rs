//! Rank trial parsing and placeholder synthesis.
//!
//! A rank timestep records a query stimulus, `n_reference` reference stimuli,
//! and the subject's `n_select` ordered selections, all as flat interaction
//! events. Presentation and selection order are declared by the `_<order>`
//! suffix on the interaction kind, not by array position; parsing re-sorts by
//! the declared order before deriving the outcome index.

use crate::asset::parse_asset_id;
use crate::constants::trial::{
    KIND_2RANK1, KIND_8RANK2, KIND_FEEDBACK, KIND_QUERY, N_OUTCOME_2RANK1, N_OUTCOME_8RANK2,
    REFERENCE_PREFIX, SELECTION_PREFIX,
};
use crate::data::RawTimestep;
use crate::errors::FormatError;
use crate::outcome::as_sparse_outcome;
use crate::types::{OutcomeIndex, StimulusId};

/// Supported rank trial configurations.
///
/// A configuration fixes how many reference stimuli are shown and how many
/// the subject ranks. Only these two are legal; anything else in the logs is
/// a fatal configuration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RankConfig {
    /// Eight references, two ordered selections.
    Given8Rank2,
    /// Two references, one selection.
    Given2Rank1,
}

impl RankConfig {
    /// Both supported configurations, in canonical feature order.
    pub const ALL: [RankConfig; 2] = [RankConfig::Given2Rank1, RankConfig::Given8Rank2];

    /// Resolve a configuration from raw reference/selection counts.
    pub fn from_counts(n_reference: usize, n_select: usize) -> Result<Self, FormatError> {
        match (n_reference, n_select) {
            (8, 2) => Ok(RankConfig::Given8Rank2),
            (2, 1) => Ok(RankConfig::Given2Rank1),
            _ => Err(FormatError::UnsupportedRankConfiguration {
                n_reference,
                n_select,
            }),
        }
    }

    /// Number of reference stimuli shown.
    pub fn n_reference(self) -> usize {
        match self {
            RankConfig::Given8Rank2 => 8,
            RankConfig::Given2Rank1 => 2,
        }
    }

    /// Number of ordered selections the subject makes.
    pub fn n_select(self) -> usize {
        match self {
            RankConfig::Given8Rank2 => 2,
            RankConfig::Given2Rank1 => 1,
        }
    }

    /// Size of this configuration's outcome space.
    pub fn n_outcome(self) -> usize {
        match self {
            RankConfig::Given8Rank2 => N_OUTCOME_8RANK2,
            RankConfig::Given2Rank1 => N_OUTCOME_2RANK1,
        }
    }

    /// Stimulus set length: query plus references.
    pub fn stimulus_set_len(self) -> usize {
        self.n_reference() + 1
    }

    /// Prefix used for this configuration's emitted feature names.
    pub fn feature_prefix(self) -> &'static str {
        match self {
            RankConfig::Given8Rank2 => "given8rank2",
            RankConfig::Given2Rank1 => "given2rank1",
        }
    }

    /// The other supported configuration, which receives a placeholder
    /// whenever this one fires.
    pub fn counterpart(self) -> RankConfig {
        match self {
            RankConfig::Given8Rank2 => RankConfig::Given2Rank1,
            RankConfig::Given2Rank1 => RankConfig::Given8Rank2,
        }
    }
}

/// Closed classification of a timestep's `kind` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimestepKind {
    /// A rank trial of the given configuration.
    Rank(RankConfig),
    /// A feedback questionnaire; contributes nothing to any sequence.
    Feedback,
    /// Anything else; fatal during assembly.
    Unknown(String),
}

impl TimestepKind {
    /// Classify a raw timestep kind tag.
    pub fn parse(kind: &str) -> Self {
        match kind {
            KIND_8RANK2 => TimestepKind::Rank(RankConfig::Given8Rank2),
            KIND_2RANK1 => TimestepKind::Rank(RankConfig::Given2Rank1),
            KIND_FEEDBACK => TimestepKind::Feedback,
            other => TimestepKind::Unknown(other.to_string()),
        }
    }
}

/// Closed classification of an interaction's `kind` tag.
///
/// The attached order index is the declared presentation/selection order; it
/// is authoritative even when the interaction list arrives pre-sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// The query stimulus shown to the subject.
    Query,
    /// A reference stimulus with its declared presentation order.
    Reference(u32),
    /// A ranked selection with its declared selection order.
    Selection(u32),
    /// Anything else; ignored during the scan, as in the source logs.
    Unknown,
}

impl InteractionKind {
    /// Classify a raw interaction kind tag.
    pub fn parse(kind: &str) -> Self {
        if kind == KIND_QUERY {
            return InteractionKind::Query;
        }
        if let Some(order) = kind.strip_prefix(REFERENCE_PREFIX) {
            if let Ok(order) = order.parse() {
                return InteractionKind::Reference(order);
            }
        }
        if let Some(order) = kind.strip_prefix(SELECTION_PREFIX) {
            if let Ok(order) = order.parse() {
                return InteractionKind::Selection(order);
            }
        }
        InteractionKind::Unknown
    }
}

/// One parsed or synthesized rank trial.
#[derive(Clone, Debug, PartialEq)]
pub struct RankTrial {
    /// Configuration this trial belongs to.
    pub config: RankConfig,
    /// Query stimulus first, then references in declared order; all zeros for
    /// placeholders (index 0 is the reserved no-stimulus sentinel).
    pub stimulus_set: Vec<StimulusId>,
    /// Canonical outcome index in `[0, n_outcome)`.
    pub outcome_index: OutcomeIndex,
    /// Total response time in milliseconds; 0.0 for placeholders.
    pub response_time_ms: f32,
    /// Sample weight in `[0, 1]`; 0.0 for placeholders.
    pub sample_weight: f32,
}

impl RankTrial {
    /// Synthesize a zero-information placeholder trial.
    ///
    /// The outcome index is 0, not an all-zero vector: every emitted outcome
    /// one-hot must have exactly one 1.0 entry so downstream categorical
    /// losses stay finite. The zero weight is what removes the placeholder
    /// from the loss.
    pub fn placeholder(config: RankConfig) -> Self {
        Self {
            config,
            stimulus_set: vec![0; config.stimulus_set_len()],
            outcome_index: 0,
            response_time_ms: 0.0,
            sample_weight: 0.0,
        }
    }

    /// True when this trial carries no information.
    pub fn is_placeholder(&self) -> bool {
        self.sample_weight == 0.0 && self.stimulus_set.iter().all(|&idx| idx == 0)
    }
}

/// Parse one rank timestep into a trial of the expected configuration.
///
/// Contract:
/// 1. Scan the interaction list once, routing each event by kind.
/// 2. Re-sort references and selections by declared order. The lists are
///    typically pre-sorted, but declared order is the correctness guard.
/// 3. Locate each selection's position within the corrected references
///    (first match); a missing match is malformed input, never ignored.
/// 4. Stimulus set = query followed by corrected references.
/// 5. Outcome index = `as_sparse_outcome` over the ordered positions.
/// 6. Response time is read verbatim from the timestep.
pub fn parse_rank_timestep(
    timestep: &RawTimestep,
    config: RankConfig,
    sample_weight: f32,
) -> Result<RankTrial, FormatError> {
    let mut query: Option<StimulusId> = None;
    let mut references: Vec<(u32, StimulusId)> = Vec::new();
    let mut selections: Vec<(u32, StimulusId)> = Vec::new();

    for interaction in &timestep.interactions {
        match InteractionKind::parse(&interaction.kind) {
            InteractionKind::Query => {
                let parsed = parse_asset_id(&interaction.detail)?;
                if query.replace(parsed.local_id).is_some() {
                    return Err(shape_mismatch(timestep, "more than one query stimulus"));
                }
            }
            InteractionKind::Reference(order) => {
                let parsed = parse_asset_id(&interaction.detail)?;
                references.push((order, parsed.local_id));
            }
            InteractionKind::Selection(order) => {
                let parsed = parse_asset_id(&interaction.detail)?;
                selections.push((order, parsed.local_id));
            }
            InteractionKind::Unknown => {}
        }
    }

    let query = query.ok_or_else(|| shape_mismatch(timestep, "no query stimulus"))?;
    if references.len() != config.n_reference() {
        return Err(shape_mismatch(
            timestep,
            &format!(
                "expected {} references, found {}",
                config.n_reference(),
                references.len()
            ),
        ));
    }
    if selections.len() != config.n_select() {
        return Err(shape_mismatch(
            timestep,
            &format!(
                "expected {} selections, found {}",
                config.n_select(),
                selections.len()
            ),
        ));
    }

    references.sort_by_key(|&(order, _)| order);
    selections.sort_by_key(|&(order, _)| order);

    let mut positions = Vec::with_capacity(selections.len());
    for &(_, selection) in &selections {
        let position = references
            .iter()
            .position(|&(_, reference)| reference == selection)
            .ok_or(FormatError::SelectionNotInReferences { selection })?;
        positions.push(position);
    }

    let mut stimulus_set = Vec::with_capacity(config.stimulus_set_len());
    stimulus_set.push(query);
    stimulus_set.extend(references.iter().map(|&(_, reference)| reference));

    let outcome_index = as_sparse_outcome(config.n_reference(), &positions)?;

    Ok(RankTrial {
        config,
        stimulus_set,
        outcome_index,
        response_time_ms: timestep.response_time_ms,
        sample_weight,
    })
}

fn shape_mismatch(timestep: &RawTimestep, details: &str) -> FormatError {
    FormatError::TrialShapeMismatch {
        kind: timestep.kind.clone(),
        details: details.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawInteraction;

    fn asset(local: &str) -> String {
        format!("AA001{local}")
    }

    fn interaction(kind: &str, local: &str) -> RawInteraction {
        RawInteraction {
            kind: kind.to_string(),
            detail: asset(local),
        }
    }

    fn two_rank_one_timestep() -> RawTimestep {
        RawTimestep {
            kind: KIND_2RANK1.to_string(),
            interactions: vec![
                interaction("content:query", "A1"),
                interaction("content:reference_0", "5"),
                interaction("content:reference_1", "3"),
                interaction("behavior:rank_0", "3"),
            ],
            response_time_ms: 1234.5,
        }
    }

    #[test]
    fn parses_query_references_and_selection_positions() {
        let trial =
            parse_rank_timestep(&two_rank_one_timestep(), RankConfig::Given2Rank1, 0.9).unwrap();
        // Query A1 = 361, references [5, 3]; selection 3 sits at position 1.
        assert_eq!(trial.stimulus_set, vec![361, 5, 3]);
        assert_eq!(trial.outcome_index, 1);
        assert_eq!(trial.response_time_ms, 1234.5);
        assert_eq!(trial.sample_weight, 0.9);
    }

    #[test]
    fn declared_order_beats_array_position() {
        let mut shuffled = two_rank_one_timestep();
        shuffled.interactions.reverse();
        let baseline =
            parse_rank_timestep(&two_rank_one_timestep(), RankConfig::Given2Rank1, 0.9).unwrap();
        let reparsed = parse_rank_timestep(&shuffled, RankConfig::Given2Rank1, 0.9).unwrap();
        assert_eq!(reparsed, baseline);
    }

    #[test]
    fn swapped_declared_orders_change_the_reference_order() {
        let timestep = RawTimestep {
            kind: KIND_2RANK1.to_string(),
            interactions: vec![
                interaction("content:query", "A1"),
                // Declared order says the list order is wrong.
                interaction("content:reference_1", "5"),
                interaction("content:reference_0", "3"),
                interaction("behavior:rank_0", "3"),
            ],
            response_time_ms: 0.0,
        };
        let trial = parse_rank_timestep(&timestep, RankConfig::Given2Rank1, 1.0).unwrap();
        assert_eq!(trial.stimulus_set, vec![361, 3, 5]);
        assert_eq!(trial.outcome_index, 0);
    }

    #[test]
    fn eight_rank_two_outcome_uses_both_selection_positions() {
        let mut interactions = vec![interaction("content:query", "A1")];
        for idx in 0..8 {
            interactions.push(interaction(
                &format!("content:reference_{idx}"),
                &format!("{}", 10 + idx),
            ));
        }
        // Select references at positions 7 then 6.
        interactions.push(interaction("behavior:rank_0", "17"));
        interactions.push(interaction("behavior:rank_1", "16"));
        let timestep = RawTimestep {
            kind: KIND_8RANK2.to_string(),
            interactions,
            response_time_ms: 2.0,
        };
        let trial = parse_rank_timestep(&timestep, RankConfig::Given8Rank2, 1.0).unwrap();
        assert_eq!(trial.stimulus_set.len(), 9);
        assert_eq!(trial.outcome_index, 55);
    }

    #[test]
    fn selection_outside_references_is_fatal() {
        let mut timestep = two_rank_one_timestep();
        timestep.interactions[3] = interaction("behavior:rank_0", "7");
        let err = parse_rank_timestep(&timestep, RankConfig::Given2Rank1, 1.0).unwrap_err();
        assert!(matches!(
            err,
            FormatError::SelectionNotInReferences { selection: 7 }
        ));
    }

    #[test]
    fn missing_query_and_wrong_counts_are_shape_mismatches() {
        let mut no_query = two_rank_one_timestep();
        no_query.interactions.remove(0);
        assert!(matches!(
            parse_rank_timestep(&no_query, RankConfig::Given2Rank1, 1.0),
            Err(FormatError::TrialShapeMismatch { .. })
        ));

        // A (2,1) timestep parsed as (8,2) has too few references.
        assert!(matches!(
            parse_rank_timestep(&two_rank_one_timestep(), RankConfig::Given8Rank2, 1.0),
            Err(FormatError::TrialShapeMismatch { .. })
        ));
    }

    #[test]
    fn unrecognized_interaction_kinds_are_ignored() {
        let mut timestep = two_rank_one_timestep();
        timestep.interactions.push(RawInteraction {
            kind: "telemetry:mouse_move".to_string(),
            detail: "ignored".to_string(),
        });
        let trial = parse_rank_timestep(&timestep, RankConfig::Given2Rank1, 1.0).unwrap();
        assert_eq!(trial.stimulus_set, vec![361, 5, 3]);
    }

    #[test]
    fn placeholder_is_all_zero_with_zero_weight() {
        for config in RankConfig::ALL {
            let placeholder = RankTrial::placeholder(config);
            assert_eq!(placeholder.stimulus_set, vec![0; config.stimulus_set_len()]);
            assert_eq!(placeholder.outcome_index, 0);
            assert_eq!(placeholder.response_time_ms, 0.0);
            assert_eq!(placeholder.sample_weight, 0.0);
            assert!(placeholder.is_placeholder());
        }
    }

    #[test]
    fn from_counts_gates_unsupported_configurations() {
        assert_eq!(
            RankConfig::from_counts(8, 2).unwrap(),
            RankConfig::Given8Rank2
        );
        assert_eq!(
            RankConfig::from_counts(2, 1).unwrap(),
            RankConfig::Given2Rank1
        );
        assert!(matches!(
            RankConfig::from_counts(4, 1),
            Err(FormatError::UnsupportedRankConfiguration {
                n_reference: 4,
                n_select: 1,
            })
        ));
    }

    #[test]
    fn timestep_kind_classification_is_closed() {
        assert_eq!(
            TimestepKind::parse("rank:8rank2"),
            TimestepKind::Rank(RankConfig::Given8Rank2)
        );
        assert_eq!(
            TimestepKind::parse("questionnaire:feedback"),
            TimestepKind::Feedback
        );
        assert_eq!(
            TimestepKind::parse("rank:4rank1"),
            TimestepKind::Unknown("rank:4rank1".to_string())
        );
    }

    #[test]
    fn interaction_kind_requires_a_numeric_order_suffix() {
        assert_eq!(InteractionKind::parse("content:query"), InteractionKind::Query);
        assert_eq!(
            InteractionKind::parse("content:reference_3"),
            InteractionKind::Reference(3)
        );
        assert_eq!(
            InteractionKind::parse("behavior:rank_1"),
            InteractionKind::Selection(1)
        );
        assert_eq!(
            InteractionKind::parse("content:reference_x"),
            InteractionKind::Unknown
        );
        assert_eq!(InteractionKind::parse("content:reference"), InteractionKind::Unknown);
    }
}
