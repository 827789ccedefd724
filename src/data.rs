//! Raw log data model.
//!
//! Serde mirror of the wire format produced by the experiment logger. A
//! sequence file holds a version tag and a `data` array of sessions; each
//! session is an ordered list of timesteps; each timestep is a list of
//! atomic interaction events plus a total response time.

use serde::{Deserialize, Serialize};

use crate::types::{AnonymousId, SequenceId};

/// Top-level payload of one raw sequence file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawSequenceFile {
    /// Log format version tag, recorded but not interpreted.
    #[serde(default)]
    pub version: Option<String>,
    /// Sessions recorded in this file (in practice exactly one).
    pub data: Vec<RawSession>,
}

/// One recorded subject session.
///
/// Fields the formatter does not consume (`design_id`, `project`,
/// `protocol`, ...) are tolerated and ignored during deserialization.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawSession {
    /// Subject identifier used as the per-timestep group label.
    pub anonymous_id: AnonymousId,
    /// Session grade percentage in `[0, 100]`; scaled into a sample weight.
    pub grade: f32,
    /// Stable session identifier used to derive example ids.
    pub sequence_id: SequenceId,
    /// Ordered timesteps of the session.
    pub sequence: Vec<RawTimestep>,
}

/// One timestep of a session: a trial or a questionnaire.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawTimestep {
    /// Timestep kind tag, e.g. `rank:8rank2` or `questionnaire:feedback`.
    pub kind: String,
    /// Atomic interaction events recorded during this timestep.
    #[serde(default)]
    pub interactions: Vec<RawInteraction>,
    /// Total response time in milliseconds, passed through verbatim.
    #[serde(default)]
    pub response_time_ms: f32,
}

/// One atomic event within a timestep.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawInteraction {
    /// Interaction kind tag, e.g. `content:query` or `behavior:rank_0`.
    pub kind: String,
    /// Composite asset identifier of the stimulus involved.
    pub detail: String,
}
