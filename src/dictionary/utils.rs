//! Bit-level helpers shared by template matching and codepoint extraction.

/// Render a byte slice as its bit-string equivalent, most significant bit
/// first, eight characters per byte.
pub fn bit_string(bytes: &[u8]) -> String {
    let mut bits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        bits.push_str(&format!("{:08b}", byte));
    }
    bits
}

/// Parse a bit string as an unsigned binary integer.
pub fn parse_bits(bits: &str) -> Option<u32> {
    u32::from_str_radix(bits, 2).ok()
}
