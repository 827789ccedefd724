//! Composite asset identifier parsing.
//!
//! An asset id is a fixed-width composite string: a 2-character domain code,
//! a 3-character subdomain code, and a variable-length base-36 local id.
//! Example: `AA001001A1` segments into (`AA`, `001`, `001A1`) and the local
//! id decodes to `1657`.

use crate::constants::asset::{
    DOMAIN_LENGTH, LOCAL_ID_RADIX, MIN_IDENTIFIER_LENGTH, SUBDOMAIN_LENGTH,
};
use crate::errors::FormatError;
use crate::types::StimulusId;

/// Segments of a parsed asset identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAssetId {
    /// Two-character domain code.
    pub domain: String,
    /// Three-character subdomain code.
    pub subdomain: String,
    /// Decoded base-36 local id, guaranteed non-negative.
    pub local_id: StimulusId,
}

/// Parse a composite asset identifier into (domain, subdomain, local id).
///
/// Offsets are fixed: domain = chars `[0..2]`, subdomain = chars `[2..5]`,
/// local id = chars `[5..]` decoded as a base-36 numeral.
pub fn parse_asset_id(asset_id: &str) -> Result<ParsedAssetId, FormatError> {
    if asset_id.len() < MIN_IDENTIFIER_LENGTH || !asset_id.is_ascii() {
        return Err(FormatError::MalformedIdentifier {
            asset_id: asset_id.to_string(),
            reason: format!(
                "expected at least {MIN_IDENTIFIER_LENGTH} ASCII characters"
            ),
        });
    }
    let domain = &asset_id[..DOMAIN_LENGTH];
    let subdomain = &asset_id[DOMAIN_LENGTH..DOMAIN_LENGTH + SUBDOMAIN_LENGTH];
    let local = &asset_id[DOMAIN_LENGTH + SUBDOMAIN_LENGTH..];
    let local_id = decode_local_id(local).map_err(|reason| FormatError::MalformedIdentifier {
        asset_id: asset_id.to_string(),
        reason,
    })?;
    Ok(ParsedAssetId {
        domain: domain.to_string(),
        subdomain: subdomain.to_string(),
        local_id,
    })
}

/// Decode a base-36 numeral into a non-negative stimulus id.
///
/// Rejects empty input, sign characters, non-alphanumeric digits, and values
/// that overflow the stimulus index type.
pub fn decode_local_id(local: &str) -> Result<StimulusId, String> {
    if local.is_empty() {
        return Err("empty local id".to_string());
    }
    if !local.chars().all(|ch| ch.is_digit(LOCAL_ID_RADIX)) {
        return Err(format!("'{local}' is not a base-{LOCAL_ID_RADIX} numeral"));
    }
    let value = u64::from_str_radix(local, LOCAL_ID_RADIX)
        .map_err(|_| format!("'{local}' overflows the local id range"))?;
    StimulusId::try_from(value).map_err(|_| format!("'{local}' overflows the local id range"))
}
