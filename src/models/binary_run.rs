use crate::error::{DecodeError, Result};
use std::fmt;
use std::str::FromStr;

/// Sampled bit lattice of one line: `'1'` = mark present, `'0'` = empty cell.
///
/// Always non-empty and always starts with `'1'`, since the leftmost mark
/// anchors the lattice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryRun(String);

impl BinaryRun {
    /// Run holding only the anchoring mark
    pub(crate) fn anchor() -> Self {
        Self(String::from("1"))
    }

    pub(crate) fn push_mark(&mut self) {
        self.0.push('1');
    }

    pub(crate) fn push_gap(&mut self, cells: usize) {
        self.0.extend(std::iter::repeat_n('0', cells));
    }

    /// Bits as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of lattice cells
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of marks (set cells)
    pub fn mark_count(&self) -> usize {
        self.0.bytes().filter(|&b| b == b'1').count()
    }

    /// Cell indices of the marks, left to right
    pub fn mark_cells(&self) -> Vec<usize> {
        self.0
            .bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'1')
            .map(|(i, _)| i)
            .collect()
    }
}

impl FromStr for BinaryRun {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let valid = s.starts_with('1') && s.bytes().all(|b| b == b'0' || b == b'1');
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(DecodeError::InvalidRun(s.to_owned()))
        }
    }
}

impl fmt::Display for BinaryRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
