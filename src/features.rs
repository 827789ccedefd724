//! Emitted feature records.
//!
//! Field names are the wire names consumed downstream
//! (`given2rank1_stimulus_set`, `given8rank2_outcome`, ...). Sequence mode
//! emits one [`SequenceExample`] per session with every feature a
//! fixed-length list; flattened mode emits one [`FormattedTimestep`] per
//! logical timestep.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{AnonymousId, StimulusId};

/// One feature value, for consumers that want key/value access.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Feature {
    /// Stimulus index vector (query first, then references).
    StimulusSet(Vec<StimulusId>),
    /// One-hot outcome vector.
    Outcome(Vec<f32>),
    /// Scalar feature (response time or sample weight).
    Scalar(f32),
    /// Text feature (group label).
    Text(AnonymousId),
}

/// All features of one logical timestep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormattedTimestep {
    /// Stimulus set of the 2-reference/1-select slot, length 3.
    pub given2rank1_stimulus_set: Vec<StimulusId>,
    /// One-hot outcome of the 2-reference/1-select slot, length 2.
    pub given2rank1_outcome: Vec<f32>,
    /// Response time of the 2-reference/1-select slot.
    pub given2rank1_response_time_ms: f32,
    /// Sample weight of the 2-reference/1-select slot.
    pub given2rank1_sample_weight: f32,
    /// Stimulus set of the 8-reference/2-select slot, length 9.
    pub given8rank2_stimulus_set: Vec<StimulusId>,
    /// One-hot outcome of the 8-reference/2-select slot, length 56.
    pub given8rank2_outcome: Vec<f32>,
    /// Response time of the 8-reference/2-select slot.
    pub given8rank2_response_time_ms: f32,
    /// Sample weight of the 8-reference/2-select slot.
    pub given8rank2_sample_weight: f32,
    /// Group label: the session's subject identifier.
    pub anonymous_id: AnonymousId,
}

impl FormattedTimestep {
    /// Ordered key/value view over every feature of this timestep.
    ///
    /// Key order is the canonical feature order and is stable across calls.
    pub fn feature_map(&self) -> IndexMap<&'static str, Feature> {
        IndexMap::from([
            (
                "given2rank1_stimulus_set",
                Feature::StimulusSet(self.given2rank1_stimulus_set.clone()),
            ),
            (
                "given2rank1_outcome",
                Feature::Outcome(self.given2rank1_outcome.clone()),
            ),
            (
                "given2rank1_response_time_ms",
                Feature::Scalar(self.given2rank1_response_time_ms),
            ),
            (
                "given2rank1_sample_weight",
                Feature::Scalar(self.given2rank1_sample_weight),
            ),
            (
                "given8rank2_stimulus_set",
                Feature::StimulusSet(self.given8rank2_stimulus_set.clone()),
            ),
            (
                "given8rank2_outcome",
                Feature::Outcome(self.given8rank2_outcome.clone()),
            ),
            (
                "given8rank2_response_time_ms",
                Feature::Scalar(self.given8rank2_response_time_ms),
            ),
            (
                "given8rank2_sample_weight",
                Feature::Scalar(self.given8rank2_sample_weight),
            ),
            ("anonymous_id", Feature::Text(self.anonymous_id.clone())),
        ])
    }
}

/// All features of one padded session, each a list with one entry per
/// logical timestep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SequenceExample {
    /// Per-timestep stimulus sets of the 2-reference/1-select slot.
    pub given2rank1_stimulus_set: Vec<Vec<StimulusId>>,
    /// Per-timestep one-hot outcomes of the 2-reference/1-select slot.
    pub given2rank1_outcome: Vec<Vec<f32>>,
    /// Per-timestep response times of the 2-reference/1-select slot.
    pub given2rank1_response_time_ms: Vec<f32>,
    /// Per-timestep sample weights of the 2-reference/1-select slot.
    pub given2rank1_sample_weight: Vec<f32>,
    /// Per-timestep stimulus sets of the 8-reference/2-select slot.
    pub given8rank2_stimulus_set: Vec<Vec<StimulusId>>,
    /// Per-timestep one-hot outcomes of the 8-reference/2-select slot.
    pub given8rank2_outcome: Vec<Vec<f32>>,
    /// Per-timestep response times of the 8-reference/2-select slot.
    pub given8rank2_response_time_ms: Vec<f32>,
    /// Per-timestep sample weights of the 8-reference/2-select slot.
    pub given8rank2_sample_weight: Vec<f32>,
    /// Per-timestep group labels (one subject id repeated).
    pub anonymous_id: Vec<AnonymousId>,
}

/// One emitted example in either output mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Example {
    /// Whole padded session (sequence mode).
    Sequence(SequenceExample),
    /// Single logical timestep (flattened mode).
    Timestep(FormattedTimestep),
}
