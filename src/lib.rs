#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Composite asset identifier parsing.
pub mod asset;
/// Formatting configuration types.
pub mod config;
/// Centralized constants used across parsing, assembly, and sources.
pub mod constants;
/// Raw log record types.
pub mod data;
/// Reusable example runners shared by downstream crates.
pub mod example_apps;
/// Emitted feature record types.
pub mod features;
/// Stimulus metadata table parsing.
pub mod metadata;
/// Outcome index computation and one-hot encoding.
pub mod outcome;
/// Sequence assembly, padding, and timestep selection.
pub mod sequence;
/// Sequence file source.
pub mod source;
/// Rank trial parsing and placeholder synthesis.
pub mod trial;
/// Shared type aliases.
pub mod types;

mod errors;

pub use asset::{parse_asset_id, ParsedAssetId};
pub use config::{FormatConfig, OutputMode};
pub use data::{RawInteraction, RawSequenceFile, RawSession, RawTimestep};
pub use errors::FormatError;
pub use features::{Example, Feature, FormattedTimestep, SequenceExample};
pub use metadata::{read_stimulus_metadata, StimulusMeta};
pub use outcome::{as_sparse_outcome, n_outcome, one_hot};
pub use sequence::{format_sequence, format_session, FormattedSequence, SequenceBuilder};
pub use source::SequenceFileSource;
pub use trial::{parse_rank_timestep, InteractionKind, RankConfig, RankTrial, TimestepKind};
pub use types::{
    AnonymousId, AttributeValue, ExampleId, OutcomeIndex, SequenceId, StimulusId,
};
