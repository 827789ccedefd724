use crate::constants::sequence::DEFAULT_MAX_TIMESTEP;

/// Shape of the emitted examples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// One example per session; every feature is a fixed-length list padded
    /// with placeholder timesteps to `max_timestep`.
    Sequence,
    /// One example per logical timestep, without padding; example ids are
    /// `<sequence_id>/<timestep_index>`.
    Flattened,
}

/// Top-level formatting configuration, threaded explicitly through assembly.
#[derive(Clone, Copy, Debug)]
pub struct FormatConfig {
    /// Output shape for emitted examples.
    pub mode: OutputMode,
    /// Fixed sequence length used in sequence mode.
    ///
    /// A session with more non-feedback timesteps than this is a hard error,
    /// never a silent truncation.
    pub max_timestep: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Sequence,
            max_timestep: DEFAULT_MAX_TIMESTEP,
        }
    }
}
