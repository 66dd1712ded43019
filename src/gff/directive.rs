use crate::MolType;
use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};

/// `##sequence-region <id> <start> <end>`. Like in
/// [`FeatureRecord`](super::FeatureRecord), `start` is stored 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequenceRegion {
    pub id: Vec<u8>,
    pub start: i64,
    pub end: i64,
}

/// A sequence embedded in a `##DNA` / `##RNA` / `##Protein` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaSequence {
    pub id: Vec<u8>,
    pub mol_type: MolType,
    /// All sequence lines concatenated, whitespace removed
    pub seq: Vec<u8>,
}

/// A `##` line, as returned by the reader. Every directive that changes
/// the reader state is still reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `##gff-version`, with the version that is now in effect
    Version(i32),
    /// `##source-version`
    SourceVersion(Vec<u8>),
    /// `##date`
    Date(NaiveDateTime),
    /// `##Type`
    Type(MolType),
    /// `##sequence-region`
    SequenceRegion(SequenceRegion),
    /// A complete sequence block
    Sequence(MetaSequence),
    /// Any other directive, without the `##` prefix
    Other(Vec<u8>),
}

/// Payload accepted by [`Writer::write_meta_data`](super::Writer::write_meta_data).
///
/// Text, sequences and sequence regions convert into it via `From`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetaData<'a> {
    /// Written as `##<text>`
    Text(&'a [u8]),
    /// Written as a `##DNA <id>` ... `##end-DNA` block
    Sequence(&'a MetaSequence),
    /// Written as `##sequence-region <id> <start> <end>`
    Region(&'a SequenceRegion),
}

impl<'a> From<&'a [u8]> for MetaData<'a> {
    fn from(t: &'a [u8]) -> Self {
        MetaData::Text(t)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for MetaData<'a> {
    fn from(t: &'a [u8; N]) -> Self {
        MetaData::Text(&t[..])
    }
}

impl<'a> From<&'a str> for MetaData<'a> {
    fn from(t: &'a str) -> Self {
        MetaData::Text(t.as_bytes())
    }
}

impl<'a> From<&'a String> for MetaData<'a> {
    fn from(t: &'a String) -> Self {
        MetaData::Text(t.as_bytes())
    }
}

impl<'a> From<&'a MetaSequence> for MetaData<'a> {
    fn from(s: &'a MetaSequence) -> Self {
        MetaData::Sequence(s)
    }
}

impl<'a> From<&'a SequenceRegion> for MetaData<'a> {
    fn from(r: &'a SequenceRegion) -> Self {
        MetaData::Region(r)
    }
}
