//! Stimulus metadata table.
//!
//! Datasets ship a pipe-delimited table describing each stimulus. The header
//! row names the columns; `local_id` (base-36) and `filepath` are required,
//! every other column becomes a free-form attribute.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::asset::decode_local_id;
use crate::constants::source::{
    METADATA_DELIMITER, METADATA_FILEPATH_COLUMN, METADATA_LOCAL_ID_COLUMN,
};
use crate::errors::FormatError;
use crate::types::{AttributeValue, StimulusId};

/// Metadata for one stimulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StimulusMeta {
    /// Path of the stimulus asset relative to the dataset root.
    pub filepath: String,
    /// Remaining columns, keyed by header name.
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Read a stimulus metadata table keyed by decoded local id.
pub fn read_stimulus_metadata(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<StimulusId, StimulusMeta>, FormatError> {
    let raw = fs::read_to_string(path)?;
    parse_stimulus_metadata(&raw)
}

/// Parse a stimulus metadata table from its text content.
pub fn parse_stimulus_metadata(
    raw: &str,
) -> Result<BTreeMap<StimulusId, StimulusMeta>, FormatError> {
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| FormatError::MalformedMetadata("missing header row".to_string()))?;
    let columns: Vec<&str> = header.split(METADATA_DELIMITER).map(str::trim).collect();
    let local_id_column = required_column(&columns, METADATA_LOCAL_ID_COLUMN)?;
    let filepath_column = required_column(&columns, METADATA_FILEPATH_COLUMN)?;

    let mut metadata = BTreeMap::new();
    for (line_idx, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(METADATA_DELIMITER).map(str::trim).collect();
        if fields.len() != columns.len() {
            return Err(FormatError::MalformedMetadata(format!(
                "row {} has {} fields, header has {}",
                line_idx + 2,
                fields.len(),
                columns.len()
            )));
        }
        let stimulus_id =
            decode_local_id(fields[local_id_column]).map_err(FormatError::MalformedMetadata)?;
        let mut attributes = BTreeMap::new();
        for (column_idx, &column) in columns.iter().enumerate() {
            if column_idx == local_id_column || column_idx == filepath_column {
                continue;
            }
            attributes.insert(column.to_string(), fields[column_idx].to_string());
        }
        metadata.insert(
            stimulus_id,
            StimulusMeta {
                filepath: fields[filepath_column].to_string(),
                attributes,
            },
        );
    }
    Ok(metadata)
}

fn required_column(columns: &[&str], name: &str) -> Result<usize, FormatError> {
    columns
        .iter()
        .position(|&column| column == name)
        .ok_or_else(|| FormatError::MalformedMetadata(format!("missing '{name}' column")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
local_id|filepath|common_name|taxonomic_family
1|birds/jay.png|Blue Jay|Corvidae
A1|birds/crow.png|American Crow|Corvidae
";

    #[test]
    fn parses_rows_keyed_by_decoded_local_id() {
        let metadata = parse_stimulus_metadata(TABLE).unwrap();
        assert_eq!(metadata.len(), 2);
        let jay = &metadata[&1];
        assert_eq!(jay.filepath, "birds/jay.png");
        assert_eq!(jay.attributes["common_name"], "Blue Jay");
        // A1 base-36 = 361.
        let crow = &metadata[&361];
        assert_eq!(crow.attributes["taxonomic_family"], "Corvidae");
    }

    #[test]
    fn rejects_tables_without_required_columns() {
        let err = parse_stimulus_metadata("name|filepath\nx|y\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedMetadata(_)));
    }

    #[test]
    fn rejects_rows_with_wrong_field_counts() {
        let err = parse_stimulus_metadata("local_id|filepath\n1|a|extra\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedMetadata(_)));
    }

    #[test]
    fn rejects_non_base36_local_ids() {
        let err = parse_stimulus_metadata("local_id|filepath\n-1|a\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedMetadata(_)));
    }
}
