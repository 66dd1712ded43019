use super::{Directive, FeatureRecord, MetaData, MetaSequence, SequenceRegion};
use super::{DEFAULT_ONE_BASED, DEFAULT_VERSION};
use crate::fasta::SeqWriter;
use crate::MolType;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Line width of embedded sequences used by `WriterBuilder`
pub const DEFAULT_WIDTH: usize = 60;

/// Notation of the score column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    /// `123.45`. Without precision, the shortest representation that
    /// reads back to the same value.
    #[default]
    Decimal,
    /// `1.2345e2`
    Exponent,
    /// Exponent notation for very large or small numbers, decimal notation
    /// otherwise. The precision is the number of significant digits;
    /// trailing zeros are removed.
    General,
}

impl FloatFormat {
    /// Formats `x` with the given precision (`None` = shortest
    /// representation).
    ///
    /// ```
    /// use gff_io::gff::FloatFormat;
    ///
    /// assert_eq!(FloatFormat::Decimal.format(0.25, None), "0.25");
    /// assert_eq!(FloatFormat::Decimal.format(0.25, Some(3)), "0.250");
    /// assert_eq!(FloatFormat::Exponent.format(1500., Some(2)), "1.50e3");
    /// assert_eq!(FloatFormat::General.format(1500., Some(2)), "1.5e3");
    /// assert_eq!(FloatFormat::General.format(0.5, Some(3)), "0.5");
    /// ```
    pub fn format(&self, x: f64, precision: Option<usize>) -> String {
        match (*self, precision) {
            (FloatFormat::Decimal, None) => format!("{}", x),
            (FloatFormat::Decimal, Some(p)) => format!("{:.*}", p, x),
            (FloatFormat::Exponent, None) => format!("{:e}", x),
            (FloatFormat::Exponent, Some(p)) => format!("{:.*e}", p, x),
            (FloatFormat::General, p) => format_general(x, p),
        }
    }
}

fn format_general(x: f64, precision: Option<usize>) -> String {
    if !x.is_finite() || x == 0. {
        return format!("{}", x);
    }
    let digits = precision.map(|p| p.max(1));
    let sci = match digits {
        Some(d) => format!("{:.*e}", d - 1, x),
        None => format!("{:e}", x),
    };
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let limit = digits.map(|d| d as i32).unwrap_or(21);
    if exp < -4 || exp >= limit {
        format!("{}e{}", trim_fraction_zeros(mantissa), exp)
    } else {
        match digits {
            Some(d) => {
                let decimals = (d as i32 - 1 - exp).max(0) as usize;
                trim_fraction_zeros(&format!("{:.*}", decimals, x)).to_string()
            }
            None => format!("{}", x),
        }
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Builder for [`Writer`](Writer)
///
/// ```
/// use gff_io::gff::{FeatureRecord, FloatFormat, WriterBuilder};
///
/// let mut writer = WriterBuilder::new()
///     .version(3)
///     .header(true)
///     .float_format(FloatFormat::Decimal)
///     .precision(Some(2))
///     .from_writer(vec![])
///     .unwrap();
///
/// let rec = FeatureRecord {
///     location: b"chr1".to_vec(),
///     feature: b"exon".to_vec(),
///     start: 99,
///     end: 200,
///     ..Default::default()
/// };
/// writer.write(&rec).unwrap();
///
/// let out = writer.close().unwrap();
/// assert_eq!(&out, b"##gff-version 3\nchr1\t\texon\t100\t200\t0.00\t.\t.\t\n");
/// ```
#[derive(Debug, Clone)]
pub struct WriterBuilder {
    version: i32,
    one_based: bool,
    width: usize,
    float_format: FloatFormat,
    precision: Option<usize>,
    header: bool,
    time_format: String,
}

impl Default for WriterBuilder {
    fn default() -> Self {
        WriterBuilder::new()
    }
}

impl WriterBuilder {
    pub fn new() -> Self {
        WriterBuilder {
            version: DEFAULT_VERSION,
            one_based: DEFAULT_ONE_BASED,
            width: DEFAULT_WIDTH,
            float_format: FloatFormat::default(),
            precision: None,
            header: false,
            time_format: "%Y-%m-%d".to_string(),
        }
    }

    /// GFF version; affects frame output and the header line (default: 2)
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Whether start coordinates are written 1-based (default: true)
    pub fn one_based(mut self, one_based: bool) -> Self {
        self.one_based = one_based;
        self
    }

    /// Line width of embedded sequences (default: 60, 0 = no wrapping)
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn float_format(mut self, format: FloatFormat) -> Self {
        self.float_format = format;
        self
    }

    /// Digits used for scores, `None` meaning the shortest representation
    /// (default)
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    /// Write a `##gff-version` line when the writer is created
    /// (default: false)
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// `strftime`-style format for writing `##date` directives
    /// (default: `%Y-%m-%d`)
    pub fn time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn from_writer<W: io::Write>(self, writer: W) -> io::Result<Writer<W>> {
        let mut w = Writer {
            writer: io::BufWriter::new(writer),
            version: self.version,
            one_based: self.one_based,
            width: self.width,
            float_format: self.float_format,
            precision: self.precision,
            time_format: self.time_format,
            line: vec![],
        };
        if self.header {
            let header = format!("gff-version {}", w.version);
            w.write_meta_data(&header)?;
        }
        Ok(w)
    }

    /// Creates a writer for the given path, truncating any existing file.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> io::Result<Writer<File>> {
        self.from_writer(File::create(path)?)
    }
}

/// GFF writer. Output is buffered; call [`close`](Writer::close) or
/// [`flush`](Writer::flush) to make sure everything is written.
pub struct Writer<W: io::Write> {
    writer: io::BufWriter<W>,
    version: i32,
    one_based: bool,
    width: usize,
    float_format: FloatFormat,
    precision: Option<usize>,
    time_format: String,
    line: Vec<u8>,
}

impl Writer<File> {
    /// Creates a writer with the default settings for the given path,
    /// truncating any existing file.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Writer<File>> {
        WriterBuilder::new().from_path(path)
    }
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer for GFF version `version`, wrapping embedded
    /// sequences at `width`. If `header` is true, a `##gff-version` line
    /// is written.
    pub fn new(writer: W, version: i32, width: usize, header: bool) -> io::Result<Self> {
        WriterBuilder::new()
            .version(version)
            .width(width)
            .header(header)
            .from_writer(writer)
    }

    #[inline]
    pub fn version(&self) -> i32 {
        self.version
    }

    #[inline]
    pub fn one_based(&self) -> bool {
        self.one_based
    }

    /// Writes a feature line and returns the number of bytes written.
    pub fn write(&mut self, rec: &FeatureRecord) -> io::Result<usize> {
        let mut line = std::mem::take(&mut self.line);
        line.clear();
        self.format_record(rec, &mut line);
        line.push(b'\n');
        let res = self.writer.write_all(&line);
        let n = line.len();
        self.line = line;
        res.map(|_| n)
    }

    /// Appends the feature line (without line terminator) to `out`.
    pub fn format_record(&self, rec: &FeatureRecord, out: &mut Vec<u8>) {
        out.extend_from_slice(&rec.location);
        out.push(b'\t');
        out.extend_from_slice(&rec.source);
        out.push(b'\t');
        out.extend_from_slice(&rec.feature);
        out.push(b'\t');
        out.extend_from_slice(self.out_start(rec.start).to_string().as_bytes());
        out.push(b'\t');
        out.extend_from_slice(rec.end.to_string().as_bytes());
        out.push(b'\t');
        out.extend_from_slice(self.float_format.format(rec.score, self.precision).as_bytes());
        out.push(b'\t');

        if rec.mol_type == MolType::Dna {
            out.extend_from_slice(rec.strand.symbol().as_bytes());
        } else {
            out.push(b'.');
        }
        out.push(b'\t');

        match rec.valid_frame() {
            Some(f) if rec.mol_type == MolType::Dna || self.version < 2 => out.push(b'0' + f),
            _ => out.push(b'.'),
        }
        out.push(b'\t');

        out.extend_from_slice(&rec.attributes);
        if let Some(c) = rec.comments.as_ref().filter(|c| !c.is_empty()) {
            out.extend_from_slice(b" #");
            out.extend_from_slice(c);
        }
    }

    /// Writes text as `##<text>`, a sequence as `##DNA` (`RNA`, `Protein`)
    /// block or a sequence region as `##sequence-region` line.
    /// Returns the number of bytes written. Sequences of type
    /// `MolType::Undefined` are rejected with `io::ErrorKind::InvalidInput`.
    ///
    /// ```
    /// use gff_io::gff::{MetaSequence, SequenceRegion, Writer};
    /// use gff_io::MolType;
    ///
    /// let mut writer = Writer::new(vec![], 2, 4, false).unwrap();
    /// writer.write_meta_data("organism yeast").unwrap();
    /// writer.write_meta_data(&SequenceRegion { id: b"ctg1".to_vec(), start: 0, end: 6 }).unwrap();
    /// writer.write_meta_data(&MetaSequence {
    ///     id: b"ctg1".to_vec(),
    ///     mol_type: MolType::Dna,
    ///     seq: b"ACGTAC".to_vec(),
    /// }).unwrap();
    ///
    /// let out = writer.close().unwrap();
    /// assert_eq!(
    ///     std::str::from_utf8(&out).unwrap(),
    ///     "##organism yeast\n##sequence-region ctg1 1 6\n##DNA ctg1\n##ACGT\n##AC\n##end-DNA\n"
    /// );
    /// ```
    pub fn write_meta_data<'a, M: Into<MetaData<'a>>>(&mut self, data: M) -> io::Result<usize> {
        match data.into() {
            MetaData::Text(text) => self.write_meta_line(&[text]),
            MetaData::Sequence(seq) => self.write_sequence(seq),
            MetaData::Region(region) => self.write_region(region),
        }
    }

    /// Writes a directive as returned by the reader.
    pub fn write_directive(&mut self, d: &Directive) -> io::Result<usize> {
        match d {
            Directive::Version(v) => {
                let v = v.to_string();
                self.write_meta_line(&[b"gff-version ", v.as_bytes()])
            }
            Directive::SourceVersion(sv) => self.write_meta_line(&[b"source-version ", sv.as_slice()]),
            Directive::Date(date) => {
                let mut s = String::new();
                write!(s, "{}", date.format(&self.time_format))
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid time format"))?;
                self.write_meta_line(&[b"date ", s.as_bytes()])
            }
            Directive::Type(t) => self.write_meta_line(&[b"Type ", t.name().as_bytes()]),
            Directive::SequenceRegion(r) => self.write_region(r),
            Directive::Sequence(s) => self.write_sequence(s),
            Directive::Other(text) => self.write_meta_line(&[text.as_slice()]),
        }
    }

    /// Writes a `# <comment>` line.
    pub fn write_comment<C: AsRef<[u8]>>(&mut self, comment: C) -> io::Result<usize> {
        let c = comment.as_ref();
        self.writer.write_all(b"# ")?;
        self.writer.write_all(c)?;
        self.writer.write_all(b"\n")?;
        Ok(c.len() + 3)
    }

    fn write_meta_line(&mut self, parts: &[&[u8]]) -> io::Result<usize> {
        self.writer.write_all(b"##")?;
        let mut n = 2;
        for p in parts {
            self.writer.write_all(p)?;
            n += p.len();
        }
        self.writer.write_all(b"\n")?;
        Ok(n + 1)
    }

    fn write_region(&mut self, r: &SequenceRegion) -> io::Result<usize> {
        let coords = format!(" {} {}", self.out_start(r.start), r.end);
        self.write_meta_line(&[b"sequence-region ", r.id.as_slice(), coords.as_bytes()])
    }

    // Only DNA, RNA and Protein blocks can be read back
    fn write_sequence(&mut self, s: &MetaSequence) -> io::Result<usize> {
        if s.mol_type == MolType::Undefined {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "sequence block without molecule type",
            ));
        }
        let name = s.mol_type.name();
        let id_prefix = format!("##{} ", name);
        let n = SeqWriter::new(id_prefix.as_bytes(), b"##", self.width).write(
            &mut self.writer,
            &s.id,
            &s.seq,
        )?;
        Ok(n + self.write_meta_line(&[b"end-", name.as_bytes()])?)
    }

    #[inline]
    fn out_start(&self, start: i64) -> i64 {
        if self.one_based && start >= 0 {
            start.saturating_add(1)
        } else {
            start
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flushes all buffered output and returns the underlying writer.
    /// If flushing fails, the error is returned instead.
    pub fn close(mut self) -> io::Result<W> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
