/// Constants used by asset identifier parsing.
pub mod asset {
    /// Width of the domain segment at the front of an asset id.
    pub const DOMAIN_LENGTH: usize = 2;
    /// Width of the subdomain segment following the domain.
    pub const SUBDOMAIN_LENGTH: usize = 3;
    /// Minimum total length of a well-formed asset id.
    pub const MIN_IDENTIFIER_LENGTH: usize = DOMAIN_LENGTH + SUBDOMAIN_LENGTH;
    /// Radix used to decode the local id segment.
    pub const LOCAL_ID_RADIX: u32 = 36;
}

/// Constants used by trial parsing: kind tags and outcome-space sizes.
pub mod trial {
    /// Interaction kind tag for the query stimulus.
    pub const KIND_QUERY: &str = "content:query";
    /// Interaction kind prefix for reference stimuli; suffix is the declared order.
    pub const REFERENCE_PREFIX: &str = "content:reference_";
    /// Interaction kind prefix for ranked selections; suffix is the declared order.
    pub const SELECTION_PREFIX: &str = "behavior:rank_";
    /// Timestep kind tag for 8-reference/2-select rank trials.
    pub const KIND_8RANK2: &str = "rank:8rank2";
    /// Timestep kind tag for 2-reference/1-select rank trials.
    pub const KIND_2RANK1: &str = "rank:2rank1";
    /// Timestep kind tag for feedback questionnaires (skipped during assembly).
    pub const KIND_FEEDBACK: &str = "questionnaire:feedback";
    /// Outcome-space size for the 8-reference/2-select configuration.
    pub const N_OUTCOME_8RANK2: usize = 56;
    /// Outcome-space size for the 2-reference/1-select configuration.
    pub const N_OUTCOME_2RANK1: usize = 2;
}

/// Constants used by sequence assembly and padding.
pub mod sequence {
    /// Default fixed sequence length used in sequence mode.
    pub const DEFAULT_MAX_TIMESTEP: usize = 120;
    /// Divisor converting a session grade percentage into a sample weight.
    pub const GRADE_SCALE: f32 = 100.0;
}

/// Constants used by the sequence file source and metadata table.
pub mod source {
    /// File-name prefix identifying raw sequence files.
    pub const SEQUENCE_FILE_PREFIX: &str = "seq_";
    /// File extension of raw sequence files.
    pub const SEQUENCE_FILE_EXTENSION: &str = "json";
    /// Column delimiter used by the stimulus metadata table.
    pub const METADATA_DELIMITER: char = '|';
    /// Required metadata column holding the base-36 local id.
    pub const METADATA_LOCAL_ID_COLUMN: &str = "local_id";
    /// Required metadata column holding the stimulus file path.
    pub const METADATA_FILEPATH_COLUMN: &str = "filepath";
}
