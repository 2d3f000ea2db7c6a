use crate::models::release::UpdateError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Accepts padded or unpadded input and non-canonical trailing bits.
const CONTENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a contents API payload into text. GitHub wraps the base64 at 60 columns,
/// so ASCII whitespace is skipped before decoding.
pub fn decode_content(content: &str) -> Result<String, UpdateError> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = CONTENT_ENGINE.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}
