//! GFF reading and writing
//!
//! # Example
//!
//! This example reads some content, writes it back and compares the output
//! (should be the same):
//!
//! ```
//! use gff_io::gff::{Entry, Reader, Writer};
//!
//! let input = concat!(
//!     "##gff-version 2\n",
//!     "##sequence-region ctg1 1 500\n",
//!     "ctg1\tmaker\tgene\t10\t300\t0.5\t+\t.\tID=gene1\n",
//!     "ctg1\tmaker\tCDS\t10\t120\t0\t+\t0\tParent=gene1\n",
//!     "##DNA ctg1\n",
//!     "##ACGTACGT\n",
//!     "##GG\n",
//!     "##end-DNA\n",
//! ).as_bytes();
//!
//! let mut reader = Reader::new(input);
//! let mut writer = Writer::new(vec![], 2, 8, false).unwrap();
//!
//! while let Some(result) = reader.next() {
//!     match result.expect("Error reading GFF") {
//!         Entry::Feature(rec) => writer.write(&rec).unwrap(),
//!         Entry::Directive(d) => writer.write_directive(&d).unwrap(),
//!     };
//! }
//!
//! let output = writer.close().unwrap();
//! assert_eq!(input, output.as_slice());
//! ```
//!
//! # Details on parsing behaviour
//!
//! * The parser handles UNIX (LF) and Windows (CRLF) line endings. Whitespace
//!   around each line is removed. Writing always uses UNIX line endings.
//! * Empty lines and comment lines (starting with a single `#`) are skipped.
//! * Lines starting with `##` are directives. `gff-version`, `source-version`,
//!   `date`, `Type`, `sequence-region` and the sequence blocks `DNA`, `RNA`
//!   and `Protein` are interpreted; all other directives are returned as
//!   [`Directive::Other`](Directive::Other).
//! * Feature lines are split at tabs into at most 10 fields. Everything after
//!   the 9th tab ends up in [`FeatureRecord::comments`](FeatureRecord::comments).
//! * Invalid or missing numbers never cause an error: start and end become `0`,
//!   the score `0.0` and the frame [`FRAME_UNSET`](FRAME_UNSET). Unknown
//!   strand symbols become [`Strand::None`](Strand::None).
//! * By default, start coordinates are converted from 1-based to 0-based
//!   (a start of `0` is left as is). The end coordinate is never changed.
//! * In contrast to feature lines, invalid `sequence-region` coordinates and
//!   dates are errors, as are directives with missing arguments and lines not
//!   starting with `##` within a sequence block.
//!
//! # Writing
//!
//! [`Writer`](Writer) applies the same conversions in reverse. The strand is
//! only written for DNA features, the frame only for DNA features or if the
//! GFF version is below 2; otherwise `.` is written.

mod directive;
mod error;
mod reader;
mod record;
mod writer;

pub use self::directive::*;
pub use self::error::*;
pub use self::reader::*;
pub use self::record::*;
pub use self::writer::*;

/// GFF version used if none is specified
pub const DEFAULT_VERSION: i32 = 2;

/// Start coordinates are 1-based unless configured otherwise
pub const DEFAULT_ONE_BASED: bool = true;
