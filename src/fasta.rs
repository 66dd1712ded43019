//! FASTA-style sequence writing with configurable line prefixes.
//!
//! GFF embeds raw sequences as directive lines, which is FASTA with every
//! line prefixed by `##` and the header introduced by `##DNA ` (or
//! `##RNA `, `##Protein `) instead of `>`. [`SeqWriter`] covers both:
//!
//! ```
//! use gff_io::fasta::SeqWriter;
//!
//! let mut out = vec![];
//! SeqWriter::new(b">", b"", 4).write(&mut out, b"id", b"ACGTACGTAC").unwrap();
//! assert_eq!(&out, b">id\nACGT\nACGT\nAC\n");
//!
//! let mut out = vec![];
//! SeqWriter::new(b"##DNA ", b"##", 4).write(&mut out, b"id", b"ACGTAC").unwrap();
//! assert_eq!(&out, b"##DNA id\n##ACGT\n##AC\n");
//! ```

use std::io;

/// Writes header and sequence lines with the given prefixes, wrapping the
/// sequence at `width` (0 = no wrapping).
#[derive(Debug, Clone, Copy)]
pub struct SeqWriter<'a> {
    id_prefix: &'a [u8],
    line_prefix: &'a [u8],
    width: usize,
}

impl<'a> SeqWriter<'a> {
    pub fn new(id_prefix: &'a [u8], line_prefix: &'a [u8], width: usize) -> Self {
        SeqWriter {
            id_prefix,
            line_prefix,
            width,
        }
    }

    /// Writes a complete record and returns the number of bytes written.
    pub fn write<W: io::Write>(&self, mut writer: W, id: &[u8], seq: &[u8]) -> io::Result<usize> {
        let n = write_head(&mut writer, self.id_prefix, id)?;
        Ok(n + write_wrap_seq(writer, self.line_prefix, seq, self.width)?)
    }
}

/// Writes only the header line.
#[inline]
pub fn write_head<W>(mut writer: W, prefix: &[u8], head: &[u8]) -> io::Result<usize>
where
    W: io::Write,
{
    writer.write_all(prefix)?;
    writer.write_all(head)?;
    writer.write_all(b"\n")?;
    Ok(prefix.len() + head.len() + 1)
}

/// Writes the sequence lines, each starting with `prefix`, and wraps the
/// output to a maximum width specified by `wrap`. An empty sequence writes
/// nothing.
#[inline]
pub fn write_wrap_seq<W>(mut writer: W, prefix: &[u8], seq: &[u8], wrap: usize) -> io::Result<usize>
where
    W: io::Write,
{
    if seq.is_empty() {
        return Ok(0);
    }
    let wrap = if wrap == 0 { seq.len() } else { wrap };
    let mut n = 0;
    for chunk in seq.chunks(wrap) {
        writer.write_all(prefix)?;
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
        n += prefix.len() + chunk.len() + 1;
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrapped() {
        let mut out = vec![];
        let n = SeqWriter::new(b"##RNA ", b"##", 0)
            .write(&mut out, b"r1", b"ACGUACGU")
            .unwrap();
        assert_eq!(&out, b"##RNA r1\n##ACGUACGU\n");
        assert_eq!(n, out.len());
    }

    #[test]
    fn exact_width() {
        let mut out = vec![];
        write_wrap_seq(&mut out, b"", b"ACGTACGT", 4).unwrap();
        assert_eq!(&out, b"ACGT\nACGT\n");
    }

    #[test]
    fn empty_seq() {
        let mut out = vec![];
        let n = SeqWriter::new(b">", b"", 60).write(&mut out, b"e", b"").unwrap();
        assert_eq!(&out, b">e\n");
        assert_eq!(n, 3);
    }
}
