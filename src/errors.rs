use std::io;

use thiserror::Error;

use crate::types::StimulusId;

/// Error type for trial parsing, sequence assembly, and file formatting failures.
///
/// Every variant is fatal to the single sequence being processed; the caller
/// decides whether to skip that sequence or abort the whole run.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed asset identifier '{asset_id}': {reason}")]
    MalformedIdentifier { asset_id: String, reason: String },
    #[error("selection {selection} does not match any reference stimulus")]
    SelectionNotInReferences { selection: StimulusId },
    #[error("one-hot index {index} out of range for width {width}")]
    IndexOutOfRange { index: usize, width: usize },
    #[error("unsupported rank configuration ({n_reference} references, {n_select} selections)")]
    UnsupportedRankConfiguration {
        n_reference: usize,
        n_select: usize,
    },
    #[error("unrecognized timestep kind '{0}'")]
    UnrecognizedTimestepKind(String),
    #[error("sequence holds {length} timesteps, exceeding the maximum of {max_timestep}")]
    SequenceExceedsMaxLength { length: usize, max_timestep: usize },
    #[error("timestep '{kind}' has inconsistent shape: {details}")]
    TrialShapeMismatch { kind: String, details: String },
    #[error("stimulus metadata table is invalid: {0}")]
    MalformedMetadata(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("sequence file '{path}' is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
