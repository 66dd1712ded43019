use crate::MolType;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Frame value of records without (or with an invalid) frame column.
pub const FRAME_UNSET: i8 = -1;

/// Strand of a feature, stored as a small signed integer
/// (`1` forward, `0` none, `-1` reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Strand {
    Reverse = -1,
    #[default]
    None = 0,
    Forward = 1,
}

impl Strand {
    /// Parses the strand column. Anything other than `+`, `.` or `-`
    /// yields `Strand::None`.
    #[inline]
    pub fn from_symbol(s: &[u8]) -> Strand {
        match s {
            b"+" => Strand::Forward,
            b"-" => Strand::Reverse,
            _ => Strand::None,
        }
    }

    #[inline]
    pub fn symbol(&self) -> &'static str {
        match *self {
            Strand::Forward => "+",
            Strand::None => ".",
            Strand::Reverse => "-",
        }
    }

    #[inline]
    pub fn as_i8(&self) -> i8 {
        *self as i8
    }

    /// Returns `None` for values other than -1, 0 and 1.
    pub fn from_i8(v: i8) -> Option<Strand> {
        match v {
            1 => Some(Strand::Forward),
            0 => Some(Strand::None),
            -1 => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One GFF feature line.
///
/// `start` is always stored 0-based; the reader and writer convert from and
/// to 1-based coordinates if configured to do so (the default). `end` is
/// never adjusted. No check is done whether `start <= end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Sequence / chromosome name (column 1)
    pub location: Vec<u8>,
    /// Annotation source (column 2), may be empty
    pub source: Vec<u8>,
    /// Feature type (column 3)
    pub feature: Vec<u8>,
    pub start: i64,
    pub end: i64,
    pub score: f64,
    pub strand: Strand,
    /// 0, 1, 2 or [`FRAME_UNSET`](FRAME_UNSET)
    pub frame: i8,
    /// Not part of the line; taken from the molecule type declared by the
    /// last `##Type` directive.
    pub mol_type: MolType,
    /// Column 9, kept verbatim
    pub attributes: Vec<u8>,
    /// Trailing comment (a 10th column on input)
    pub comments: Option<Vec<u8>>,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        FeatureRecord {
            location: vec![],
            source: vec![],
            feature: vec![],
            start: 0,
            end: 0,
            score: 0.,
            strand: Strand::None,
            frame: FRAME_UNSET,
            mol_type: MolType::Dna,
            attributes: vec![],
            comments: None,
        }
    }
}

impl FeatureRecord {
    /// Returns the frame if it is one of 0, 1 or 2.
    #[inline]
    pub fn valid_frame(&self) -> Option<u8> {
        match self.frame {
            0..=2 => Some(self.frame as u8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_symbols() {
        for s in [Strand::Forward, Strand::None, Strand::Reverse] {
            assert_eq!(Strand::from_symbol(s.symbol().as_bytes()), s);
            assert_eq!(Strand::from_i8(s.as_i8()), Some(s));
        }
        assert_eq!(Strand::from_symbol(b"?"), Strand::None);
        assert_eq!(Strand::from_symbol(b""), Strand::None);
        assert_eq!(Strand::from_i8(2), None);
    }

    #[test]
    fn frame() {
        let mut rec = FeatureRecord::default();
        assert_eq!(rec.valid_frame(), None);
        rec.frame = 2;
        assert_eq!(rec.valid_frame(), Some(2));
        rec.frame = 3;
        assert_eq!(rec.valid_frame(), None);
    }
}
