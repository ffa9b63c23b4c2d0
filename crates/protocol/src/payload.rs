use crate::constants::PAYLOAD_DELIMITER;

/// Splits an inbound payload into the lines it carries.
///
/// Always yields at least one segment: a payload without delimiters is
/// returned whole, and an empty payload yields one empty segment. Empty
/// segments are kept.
pub fn split_payload(payload: &str) -> impl Iterator<Item = &str> {
    payload.split(PAYLOAD_DELIMITER)
}
