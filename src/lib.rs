//! This library reads and writes GFF feature annotation files: tab-delimited
//! feature lines interleaved with `##` directives (including embedded
//! sequences) and `#` comments.
//!
//! The reader processes the input line by line from an internal buffer
//! (64 KiB by default, growing if a line does not fit). Each call to
//! [`gff::Reader::next()`](gff/struct.Reader.html#method.next) returns one
//! [`Entry`](gff/enum.Entry.html): either a feature record or a directive.
//! Directives such as `##gff-version`, `##date` or `##Type` additionally
//! update the reader state, which affects how following lines are
//! interpreted.
//!
//! # More detailed documentation
//!
//! Please refer to the [`gff module`](gff) docs for information on the exact
//! parsing and writing behaviour.
//!
//! # Example
//!
//! This code prints the location and type of each feature:
//!
//! ```no_run
//! use gff_io::gff::Reader;
//!
//! let mut reader = Reader::from_path("features.gff").unwrap();
//!
//! for result in reader.features() {
//!     let rec = result.expect("Error reading feature");
//!     println!(
//!         "{}: {} {}-{}",
//!         String::from_utf8_lossy(&rec.location),
//!         String::from_utf8_lossy(&rec.feature),
//!         rec.start,
//!         rec.end
//!     );
//! }
//! ```
//!
//! # Writing
//!
//! ```
//! use gff_io::gff::{FeatureRecord, Strand, Writer};
//!
//! let mut writer = Writer::new(vec![], 2, 60, true).unwrap();
//! writer.write_comment("generated").unwrap();
//! writer.write(&FeatureRecord {
//!     location: b"chr1".to_vec(),
//!     source: b"pred".to_vec(),
//!     feature: b"gene".to_vec(),
//!     start: 0,
//!     end: 100,
//!     strand: Strand::Forward,
//!     ..Default::default()
//! }).unwrap();
//!
//! let out = writer.close().unwrap();
//! assert_eq!(
//!     std::str::from_utf8(&out).unwrap(),
//!     "##gff-version 2\n# generated\nchr1\tpred\tgene\t1\t100\t0\t+\t.\t\n"
//! );
//! ```
//!
//! # Logging
//!
//! Directives changing the reader state are logged at `debug` level using
//! the [`log`](https://docs.rs/log) facade, and fields replaced by defaults
//! at `trace` level.

extern crate buffer_redux;
extern crate memchr;

extern crate serde;
extern crate serde_derive;

#[macro_use]
mod error;

pub mod core;
pub mod fasta;
pub mod gff;
mod mol_type;
pub mod policy;

pub use crate::error::Position;
pub use crate::mol_type::{MolType, MolTypeTable};

/// Remove a final '\r' from a byte slice
#[inline]
fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Remove leading and trailing ASCII whitespace
#[inline]
fn trim_ws(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim() {
        assert_eq!(trim_cr(b"ab\r"), b"ab");
        assert_eq!(trim_cr(b"ab"), b"ab");
        assert_eq!(trim_ws(b" \tab c \r"), b"ab c");
        assert_eq!(trim_ws(b"  "), b"");
        assert_eq!(trim_ws(b""), b"");
    }
}
