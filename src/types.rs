/// Subject identifier shared by every timestep of a session.
/// Example: `8f3c9a70-2d11-4b6e-9c51-a1b2c3d4e5f6`
pub type AnonymousId = String;
/// Stable identifier for one recorded session.
/// Example: `seq_000123`
pub type SequenceId = String;
/// Identifier for one emitted example.
/// Examples: `seq_000123` (sequence mode), `seq_000123/7` (flattened mode)
pub type ExampleId = String;
/// Decoded stimulus identifier (base-36 local id, non-negative).
/// Example: `1657` (decoded from local id `001A1`)
pub type StimulusId = i32;
/// Canonical index into a rank configuration's outcome space.
/// Example: `49` (within `[0, 56)` for the 8-reference/2-select space)
pub type OutcomeIndex = u32;
/// Free-form stimulus attribute value from the metadata table.
/// Examples: `Blue Jay`, `Corvidae`
pub type AttributeValue = String;
