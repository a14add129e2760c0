/// Additive 8-bit checksum used by both command and response frames.
///
/// Returns the low 8 bits of the sum of `bytes`; an empty slice sums to 0.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}
