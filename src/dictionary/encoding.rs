//! Encoding models: template sets, byte-stream scanning and codepoint
//! payload extraction.

use log::trace;

use super::template::SymbolTemplate;
use super::utils;

/// Minimal share of bytes that must belong to an encoding for a byte stream
/// to be accepted as that encoding.
pub const MINIMAL_BYTE_MATCH_RATIO: f64 = 0.8;

/// One candidate code unit inside a byte stream.
///
/// Carries no state of its own; its only meaning is the byte slice it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'a> {
    bytes: &'a [u8],
}

impl<'a> Symbol<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A character encoding described as an ordered set of code-unit shapes.
///
/// The scan tries shapes longest first, so a byte sequence that satisfies
/// both a wide and a narrow shape (UTF-16 surrogate pairs against the plain
/// two-byte unit) is consumed as the wide one.
#[derive(Debug, Clone)]
pub struct Encoding {
    name: &'static str,
    charset: &'static encoding_rs::Encoding,
    templates: Vec<SymbolTemplate>,
}

impl Encoding {
    /// # Panics
    /// Panics when two templates share a byte count; lookup by code-unit
    /// length must be unambiguous.
    pub fn new(
        name: &'static str,
        charset: &'static encoding_rs::Encoding,
        mut templates: Vec<SymbolTemplate>,
    ) -> Self {
        templates.sort_by(|a, b| b.byte_count().cmp(&a.byte_count()));
        for pair in templates.windows(2) {
            assert!(
                pair[0].byte_count() != pair[1].byte_count(),
                "{}: duplicate template byte count {}",
                name,
                pair[0].byte_count()
            );
        }
        Self {
            name,
            charset,
            templates,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn charset(&self) -> &'static encoding_rs::Encoding {
        self.charset
    }

    /// The first (longest) shape matching the stream at `offset`.
    fn match_at(&self, bytes: &[u8], offset: usize) -> Option<&SymbolTemplate> {
        self.templates.iter().find(|template| {
            let end = offset + template.byte_count();
            end <= bytes.len() && template.matches(&bytes[offset..end])
        })
    }

    /// Share of bytes recognized as code units of this encoding.
    ///
    /// Scans left to right; a matching shape consumes its full width, an
    /// unrecognized byte advances the scan by one. Empty input is vacuously
    /// 1.0.
    pub fn match_ratio(&self, bytes: &[u8]) -> f64 {
        if bytes.is_empty() {
            return 1.0;
        }
        let mut matched = 0usize;
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.match_at(bytes, offset) {
                Some(template) => {
                    matched += template.byte_count();
                    offset += template.byte_count();
                }
                None => offset += 1,
            }
        }
        matched as f64 / bytes.len() as f64
    }

    /// Whether at least `ratio` of the bytes belong to this encoding.
    pub fn is_valid(&self, bytes: &[u8], ratio: f64) -> bool {
        let matched = self.match_ratio(bytes);
        trace!(
            "{}: byte match ratio {:.3} (required {:.3})",
            self.name,
            matched,
            ratio
        );
        matched >= ratio
    }

    /// Collect the recognized code units of a byte stream.
    ///
    /// Same scan as [`match_ratio`](Self::match_ratio), but yields each
    /// matched unit as a [`Symbol`] borrowing from the input. Unrecognized
    /// bytes are skipped, so the result is sized to the number of matches,
    /// not the input length.
    pub fn segment<'b>(&self, bytes: &'b [u8]) -> Vec<Symbol<'b>> {
        let mut symbols = Vec::new();
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.match_at(bytes, offset) {
                Some(template) => {
                    let end = offset + template.byte_count();
                    symbols.push(Symbol::new(&bytes[offset..end]));
                    offset = end;
                }
                None => offset += 1,
            }
        }
        symbols
    }

    /// Shape lookup by code-unit length.
    pub fn template_for_len(&self, byte_count: usize) -> Option<&SymbolTemplate> {
        self.templates
            .iter()
            .find(|template| template.byte_count() == byte_count)
    }

    /// Whether the symbol is a well-formed code unit of this encoding.
    pub fn is_symbol_valid(&self, symbol: Symbol<'_>) -> bool {
        self.template_for_len(symbol.len())
            .is_some_and(|template| template.matches(symbol.bytes()))
    }

    /// Numeric payload of a code unit.
    ///
    /// The framing literals of the matching shape are removed at their first
    /// occurrence in the symbol's bit string and the remaining bits parse as
    /// an unsigned integer. For multi-byte units whose payload repeats a
    /// framing prefix the result differs from the Unicode scalar value.
    /// `None` when no shape matches the symbol.
    pub fn codepoint_of(&self, symbol: Symbol<'_>) -> Option<u32> {
        if !self.is_symbol_valid(symbol) {
            return None;
        }
        let template = self.template_for_len(symbol.len())?;
        let mut bits = utils::bit_string(symbol.bytes());
        for marker in template.identification_bits() {
            if let Some(at) = bits.find(marker) {
                bits.replace_range(at..at + marker.len(), "");
            }
        }
        utils::parse_bits(&bits)
    }

    /// Decode a byte stream to text with this encoding's charset; malformed
    /// sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, _, _) = self.charset.decode(bytes);
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::catalog::Catalog;

    fn utf8() -> Encoding {
        Catalog::builtin().encoding("UTF-8").unwrap().clone()
    }

    fn utf16be() -> Encoding {
        Catalog::builtin().encoding("UTF-16BE").unwrap().clone()
    }

    #[test]
    fn ascii_bytes_fully_match_utf8() {
        assert_eq!(utf8().match_ratio(b"plain text"), 1.0);
    }

    #[test]
    fn stray_continuation_bytes_lower_the_ratio() {
        // 0xBA matches no shape on its own
        assert_eq!(utf8().match_ratio(&[b'a', 0xBA, b'b', 0xBA]), 0.5);
    }

    #[test]
    fn empty_input_is_vacuously_valid() {
        assert!(utf8().is_valid(&[], MINIMAL_BYTE_MATCH_RATIO));
    }

    #[test]
    fn segments_mixed_width_symbols() {
        let encoding = utf8();
        let bytes = "aк".as_bytes();
        let symbols = encoding.segment(bytes);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].bytes(), b"a");
        assert_eq!(symbols[1].len(), 2);
    }

    #[test]
    fn segment_skips_unmatched_bytes() {
        let encoding = utf8();
        let symbols = encoding.segment(&[0xBA, b'x']);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].bytes(), b"x");
    }

    #[test]
    fn utf16_surrogate_pairs_segment_as_four_byte_units() {
        let encoding = utf16be();
        // U+1F600 as a UTF-16BE surrogate pair
        let bytes = [0xD8, 0x3D, 0xDE, 0x00];
        let symbols = encoding.segment(&bytes);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].len(), 4);
        assert!(encoding.codepoint_of(symbols[0]).is_some());
    }

    #[test]
    fn one_byte_payloads_equal_scalar_values() {
        let bytes = [0x41];
        assert_eq!(utf8().codepoint_of(Symbol::new(&bytes)), Some(65));
    }

    #[test]
    fn two_byte_payloads_strip_markers_by_first_occurrence() {
        // 0xD0 0xBA is "к"; the leading payload bits repeat the "10"
        // continuation marker, so the payload is 186, not U+043A.
        let bytes = [0xD0, 0xBA];
        assert_eq!(utf8().codepoint_of(Symbol::new(&bytes)), Some(186));
    }

    #[test]
    fn utf16_full_width_units_decode_exactly() {
        let bytes = [0x04, 0x3A]; // "к"
        assert_eq!(utf16be().codepoint_of(Symbol::new(&bytes)), Some(0x43A));
    }

    #[test]
    fn undecodable_symbols_yield_none() {
        let encoding = utf8();
        let bytes = [0xBA];
        assert!(!encoding.is_symbol_valid(Symbol::new(&bytes)));
        assert_eq!(encoding.codepoint_of(Symbol::new(&bytes)), None);
    }

    #[test]
    fn decode_replaces_malformed_sequences() {
        let encoding = utf8();
        assert_eq!(encoding.decode(b"ok"), "ok");
        assert!(encoding.decode(&[0xFF]).contains('\u{FFFD}'));
    }
}
