//! Demultiplexing of a binary run into ASCII candidates
//!
//! Letters and digits sit at different bit alignments. Upper- and lowercase
//! letters are read from the run behind one leading zero; digits are read from
//! the run behind two leading zeros, i.e. one bit further right. Each probe
//! builds its own window so the alignments stay independent.
use crate::models::BinaryRun;
use std::ops::RangeInclusive;

const WINDOW_BITS: usize = 8;
const WINDOW_PAD: &str = "00000000";

const LETTER_PREFIX: &str = "0";
const DIGIT_PREFIX: &str = "00";

const UPPERCASE: RangeInclusive<u8> = b'A'..=b'Z';
const LOWERCASE: RangeInclusive<u8> = b'a'..=b'z';
const DIGITS: RangeInclusive<u8> = b'0'..=b'9';

/// Three-probe symbol decoder
pub struct SymbolDecoder;

impl SymbolDecoder {
    /// Candidates in probe order: uppercase, lowercase, digit.
    ///
    /// The two letter probes share an alignment but test disjoint ranges, so at
    /// most one of them matches.
    pub fn candidates(run: &BinaryRun) -> Vec<char> {
        [
            Self::probe(LETTER_PREFIX, run, UPPERCASE),
            Self::probe(LETTER_PREFIX, run, LOWERCASE),
            Self::probe(DIGIT_PREFIX, run, DIGITS),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Candidates joined by `'/'`; empty when no probe matches
    pub fn decode(run: &BinaryRun) -> String {
        let candidates: Vec<String> = Self::candidates(run)
            .into_iter()
            .map(String::from)
            .collect();
        candidates.join("/")
    }

    /// Value of the 8-bit window `prefix + run + padding`, truncated to 8 bits
    fn window(prefix: &str, run: &BinaryRun) -> Option<u8> {
        let padded = format!("{prefix}{run}{WINDOW_PAD}");
        let bits = padded.get(..WINDOW_BITS)?;
        u8::from_str_radix(bits, 2).ok()
    }

    fn probe(prefix: &str, run: &BinaryRun, range: RangeInclusive<u8>) -> Option<char> {
        Self::window(prefix, run)
            .filter(|value| range.contains(value))
            .map(char::from)
    }
}
