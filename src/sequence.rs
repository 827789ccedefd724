//! Sequence assembly, padding, and timestep selection.
//!
//! A session's timesteps fold into parallel per-configuration lists. Every
//! logical timestep contributes exactly one entry to every configuration's
//! lists (a real trial to the configuration that fired, a placeholder to the
//! other) plus one group label, so all lists always share one length.
//! Feedback questionnaires contribute nothing at all.

use crate::config::FormatConfig;
use crate::data::{RawSession, RawTimestep};
use crate::errors::FormatError;
use crate::features::{FormattedTimestep, SequenceExample};
use crate::outcome::one_hot;
use crate::trial::{parse_rank_timestep, RankConfig, RankTrial, TimestepKind};
use crate::types::{AnonymousId, ExampleId, SequenceId};

use crate::constants::sequence::GRADE_SCALE;

/// Parallel per-timestep lists for one rank configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigLists {
    /// Stimulus sets, each of length `n_reference + 1`.
    pub stimulus_sets: Vec<Vec<crate::types::StimulusId>>,
    /// One-hot outcome vectors, each of length `n_outcome`.
    pub outcomes: Vec<Vec<f32>>,
    /// Response times in milliseconds.
    pub response_times_ms: Vec<f32>,
    /// Sample weights in `[0, 1]`.
    pub sample_weights: Vec<f32>,
}

impl ConfigLists {
    /// Number of timestep entries held.
    pub fn len(&self) -> usize {
        self.stimulus_sets.len()
    }

    /// True when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.stimulus_sets.is_empty()
    }

    fn push(&mut self, trial: &RankTrial) -> Result<(), FormatError> {
        let outcome = one_hot(trial.outcome_index as usize, trial.config.n_outcome())?;
        self.stimulus_sets.push(trial.stimulus_set.clone());
        self.outcomes.push(outcome);
        self.response_times_ms.push(trial.response_time_ms);
        self.sample_weights.push(trial.sample_weight);
        Ok(())
    }
}

/// One assembled session: aligned per-configuration lists plus group labels.
#[derive(Clone, Debug, PartialEq)]
pub struct FormattedSequence {
    /// Session identifier used to derive example ids.
    pub sequence_id: SequenceId,
    /// Subject identifier repeated as the per-timestep group label.
    pub anonymous_id: AnonymousId,
    /// Group labels, one per logical timestep.
    pub anonymous_ids: Vec<AnonymousId>,
    /// Lists of the 2-reference/1-select slot.
    pub given2rank1: ConfigLists,
    /// Lists of the 8-reference/2-select slot.
    pub given8rank2: ConfigLists,
}

impl FormattedSequence {
    /// Number of logical timesteps assembled so far.
    pub fn len(&self) -> usize {
        self.anonymous_ids.len()
    }

    /// True when the session contributed no logical timesteps.
    pub fn is_empty(&self) -> bool {
        self.anonymous_ids.is_empty()
    }

    /// Lists of the given configuration.
    pub fn lists(&self, config: RankConfig) -> &ConfigLists {
        match config {
            RankConfig::Given2Rank1 => &self.given2rank1,
            RankConfig::Given8Rank2 => &self.given8rank2,
        }
    }

    /// Extend the sequence to exactly `max_timestep` logical timesteps by
    /// appending placeholder timesteps.
    ///
    /// A sequence longer than `max_timestep` is a configuration error;
    /// real trials are never silently truncated.
    pub fn pad_to(&mut self, max_timestep: usize) -> Result<(), FormatError> {
        if self.len() > max_timestep {
            return Err(FormatError::SequenceExceedsMaxLength {
                length: self.len(),
                max_timestep,
            });
        }
        while self.len() < max_timestep {
            for config in RankConfig::ALL {
                let placeholder = RankTrial::placeholder(config);
                self.lists_mut(config).push(&placeholder)?;
            }
            self.anonymous_ids.push(self.anonymous_id.clone());
        }
        Ok(())
    }

    /// Slice every parallel list at timestep `index`.
    pub fn select_timestep(&self, index: usize) -> Result<FormattedTimestep, FormatError> {
        if index >= self.len() {
            return Err(FormatError::IndexOutOfRange {
                index,
                width: self.len(),
            });
        }
        Ok(FormattedTimestep {
            given2rank1_stimulus_set: self.given2rank1.stimulus_sets[index].clone(),
            given2rank1_outcome: self.given2rank1.outcomes[index].clone(),
            given2rank1_response_time_ms: self.given2rank1.response_times_ms[index],
            given2rank1_sample_weight: self.given2rank1.sample_weights[index],
            given8rank2_stimulus_set: self.given8rank2.stimulus_sets[index].clone(),
            given8rank2_outcome: self.given8rank2.outcomes[index].clone(),
            given8rank2_response_time_ms: self.given8rank2.response_times_ms[index],
            given8rank2_sample_weight: self.given8rank2.sample_weights[index],
            anonymous_id: self.anonymous_ids[index].clone(),
        })
    }

    /// Split into independent per-timestep records (flattened mode).
    ///
    /// Example ids are `<sequence_id>/<timestep_index>`.
    pub fn into_timesteps(self) -> Result<Vec<(ExampleId, FormattedTimestep)>, FormatError> {
        let mut timesteps = Vec::with_capacity(self.len());
        for index in 0..self.len() {
            let example_id = format!("{}/{}", self.sequence_id, index);
            timesteps.push((example_id, self.select_timestep(index)?));
        }
        Ok(timesteps)
    }

    /// Reorganize into the whole-sequence example shape (sequence mode).
    pub fn into_example(self) -> (ExampleId, SequenceExample) {
        let example = SequenceExample {
            given2rank1_stimulus_set: self.given2rank1.stimulus_sets,
            given2rank1_outcome: self.given2rank1.outcomes,
            given2rank1_response_time_ms: self.given2rank1.response_times_ms,
            given2rank1_sample_weight: self.given2rank1.sample_weights,
            given8rank2_stimulus_set: self.given8rank2.stimulus_sets,
            given8rank2_outcome: self.given8rank2.outcomes,
            given8rank2_response_time_ms: self.given8rank2.response_times_ms,
            given8rank2_sample_weight: self.given8rank2.sample_weights,
            anonymous_id: self.anonymous_ids,
        };
        (self.sequence_id, example)
    }

    fn lists_mut(&mut self, config: RankConfig) -> &mut ConfigLists {
        match config {
            RankConfig::Given2Rank1 => &mut self.given2rank1,
            RankConfig::Given8Rank2 => &mut self.given8rank2,
        }
    }
}

/// Append-only builder keeping the parallel lists aligned by construction.
#[derive(Clone, Debug)]
pub struct SequenceBuilder {
    sequence: FormattedSequence,
    sample_weight: f32,
}

impl SequenceBuilder {
    /// Start an empty sequence for one session.
    ///
    /// `sample_weight` is applied to every real trial (the session grade
    /// scaled into `[0, 1]`).
    pub fn new(
        sequence_id: SequenceId,
        anonymous_id: AnonymousId,
        sample_weight: f32,
    ) -> Self {
        Self {
            sequence: FormattedSequence {
                sequence_id,
                anonymous_id,
                anonymous_ids: Vec::new(),
                given2rank1: ConfigLists::default(),
                given8rank2: ConfigLists::default(),
            },
            sample_weight,
        }
    }

    /// Append one logical timestep: a real trial parsed from `timestep` for
    /// `config`, a placeholder for the counterpart configuration, and one
    /// group label.
    pub fn push_rank(
        &mut self,
        config: RankConfig,
        timestep: &RawTimestep,
    ) -> Result<(), FormatError> {
        let trial = parse_rank_timestep(timestep, config, self.sample_weight)?;
        let placeholder = RankTrial::placeholder(config.counterpart());
        self.sequence.lists_mut(config).push(&trial)?;
        self.sequence
            .lists_mut(config.counterpart())
            .push(&placeholder)?;
        let label = self.sequence.anonymous_id.clone();
        self.sequence.anonymous_ids.push(label);
        Ok(())
    }

    /// Finish building and return the assembled sequence.
    pub fn finish(self) -> FormattedSequence {
        self.sequence
    }
}

/// Fold a raw session into an assembled sequence.
///
/// Rank timesteps append one logical timestep each; feedback questionnaires
/// are skipped entirely (no lists touched, no group label); any other kind
/// aborts assembly of this sequence.
pub fn format_sequence(session: &RawSession) -> Result<FormattedSequence, FormatError> {
    let sample_weight = session.grade / GRADE_SCALE;
    let mut builder = SequenceBuilder::new(
        session.sequence_id.clone(),
        session.anonymous_id.clone(),
        sample_weight,
    );
    for timestep in &session.sequence {
        match TimestepKind::parse(&timestep.kind) {
            TimestepKind::Rank(config) => builder.push_rank(config, timestep)?,
            TimestepKind::Feedback => {}
            TimestepKind::Unknown(kind) => {
                return Err(FormatError::UnrecognizedTimestepKind(kind));
            }
        }
    }
    Ok(builder.finish())
}

/// Fold a raw session and shape the result per `config`.
///
/// Sequence mode pads to `config.max_timestep` and emits one example;
/// flattened mode emits one example per logical timestep.
pub fn format_session(
    session: &RawSession,
    config: &FormatConfig,
) -> Result<Vec<(ExampleId, crate::features::Example)>, FormatError> {
    let mut sequence = format_sequence(session)?;
    match config.mode {
        crate::config::OutputMode::Sequence => {
            sequence.pad_to(config.max_timestep)?;
            let (example_id, example) = sequence.into_example();
            Ok(vec![(example_id, crate::features::Example::Sequence(example))])
        }
        crate::config::OutputMode::Flattened => Ok(sequence
            .into_timesteps()?
            .into_iter()
            .map(|(id, timestep)| (id, crate::features::Example::Timestep(timestep)))
            .collect()),
    }
}
