use super::{
    Directive, Error, ErrorKind, FeatureRecord, MetaSequence, Result, SequenceRegion, Strand,
    DEFAULT_ONE_BASED, DEFAULT_VERSION, FRAME_UNSET,
};
use crate::core::{LineReader, BUFSIZE};
use crate::policy::{BufPolicy, StdPolicy};
use crate::{trim_ws, MolType, MolTypeTable, Position};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, Seek};
use std::path::Path;
use std::str;

/// One logical unit of a GFF stream
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Feature(FeatureRecord),
    Directive(Directive),
}

impl Entry {
    #[inline]
    pub fn is_feature(&self) -> bool {
        matches!(self, Entry::Feature(_))
    }

    #[inline]
    pub fn feature(&self) -> Option<&FeatureRecord> {
        match self {
            Entry::Feature(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub fn into_feature(self) -> Option<FeatureRecord> {
        match self {
            Entry::Feature(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub fn directive(&self) -> Option<&Directive> {
        match self {
            Entry::Directive(d) => Some(d),
            _ => None,
        }
    }
}

/// Settings fixed at construction time
#[derive(Debug, Clone)]
struct Settings {
    default_version: i32,
    one_based: bool,
    time_format: Option<String>,
    mol_types: MolTypeTable,
}

/// State changed by directives while reading. Persists across
/// [`Reader::rewind`](Reader::rewind).
#[derive(Debug, Clone, PartialEq)]
struct StreamState {
    version: i32,
    source_version: Option<Vec<u8>>,
    date: Option<NaiveDateTime>,
    mol_type: MolType,
}

/// Builder for [`Reader`](Reader)
///
/// ```
/// use gff_io::gff::{Entry, ReaderBuilder};
///
/// let gff = b"##date 2011-03-21\nchr1\tsrc\tgene\t5\t10\t.\t+\t.\tID=g1\n";
///
/// let mut reader = ReaderBuilder::new()
///     .time_format("%Y-%m-%d")
///     .one_based(false)
///     .from_reader(&gff[..]);
///
/// let _date = reader.next().unwrap().unwrap();
/// assert!(reader.date().is_some());
/// let rec = reader.next().unwrap().unwrap().into_feature().unwrap();
/// assert_eq!(rec.start, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ReaderBuilder {
    settings: Settings,
    mol_type: MolType,
    capacity: usize,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        ReaderBuilder::new()
    }
}

impl ReaderBuilder {
    pub fn new() -> Self {
        ReaderBuilder {
            settings: Settings {
                default_version: DEFAULT_VERSION,
                one_based: DEFAULT_ONE_BASED,
                time_format: None,
                mol_types: MolTypeTable::default(),
            },
            mol_type: MolType::Dna,
            capacity: BUFSIZE,
        }
    }

    /// Version assumed before any `##gff-version` line, and whenever
    /// a version directive cannot be parsed (default: 2)
    pub fn version(mut self, version: i32) -> Self {
        self.settings.default_version = version;
        self
    }

    /// Whether start coordinates in the input are 1-based (default: true)
    pub fn one_based(mut self, one_based: bool) -> Self {
        self.settings.one_based = one_based;
        self
    }

    /// `strftime`-style format used for parsing `##date` lines. Without
    /// a format, every date directive results in an error.
    pub fn time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.settings.time_format = Some(format.into());
        self
    }

    /// Molecule type assigned to features before any `##Type` line
    /// (default: DNA)
    pub fn mol_type(mut self, mol_type: MolType) -> Self {
        self.mol_type = mol_type;
        self
    }

    /// Replaces the table used to look up `##Type` names
    pub fn mol_types(mut self, table: MolTypeTable) -> Self {
        self.settings.mol_types = table;
        self
    }

    /// Initial buffer capacity (default: 64 KiB, minimum 3)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn from_reader<R: io::Read>(self, reader: R) -> Reader<R> {
        let state = StreamState {
            version: self.settings.default_version,
            source_version: None,
            date: None,
            mol_type: self.mol_type,
        };
        Reader {
            lines: LineReader::with_capacity(reader, self.capacity),
            settings: self.settings,
            state,
            position: None,
            finished: false,
        }
    }

    pub fn from_path<P: AsRef<Path>>(self, path: P) -> io::Result<Reader<File>> {
        File::open(path).map(|f| self.from_reader(f))
    }
}

/// GFF parser
pub struct Reader<R, P = StdPolicy>
where
    R: io::Read,
{
    lines: LineReader<R, P>,
    settings: Settings,
    state: StreamState,
    position: Option<Position>,
    finished: bool,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    /// Creates a new reader with the default settings and a buffer size of
    /// 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use gff_io::gff::Reader;
    ///
    /// let gff = b"chr1\tsrc\tgene\t5\t10\t.\t+\t.\tID=g1\n";
    /// let mut reader = Reader::new(&gff[..]);
    /// let rec = reader.next().unwrap().unwrap().into_feature().unwrap();
    /// assert_eq!(rec.location, b"chr1");
    /// assert_eq!((rec.start, rec.end), (4, 10));
    /// ```
    #[inline]
    pub fn new(reader: R) -> Self {
        ReaderBuilder::new().from_reader(reader)
    }

    /// Creates a new reader with a given buffer capacity. The minimum allowed
    /// capacity is 3.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        ReaderBuilder::new().capacity(capacity).from_reader(reader)
    }
}

impl Reader<File> {
    /// Creates a reader from a file path.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use gff_io::gff::Reader;
    ///
    /// let mut reader = Reader::from_path("features.gff").expect("File could not be opened.");
    ///
    /// // (... do something with the reader)
    /// ```
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Reader<File>> {
        File::open(path).map(Reader::new)
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    /// Applies a [`BufPolicy`](crate::policy::BufPolicy) to the
    /// current reader. The method consumes the reader and returns a new
    /// `Reader` instance.
    #[inline]
    pub fn set_policy<T: BufPolicy>(self, buf_policy: T) -> Reader<R, T> {
        Reader {
            lines: self.lines.set_policy(buf_policy),
            settings: self.settings,
            state: self.state,
            position: self.position,
            finished: self.finished,
        }
    }

    /// Returns a reference to the underlying `BufPolicy` of the reader
    #[inline]
    pub fn policy(&self) -> &P {
        self.lines.policy()
    }

    /// Reads the next feature or directive. Blank lines and `#` comments
    /// are skipped. Returns `None` at the end of the input.
    ///
    /// Errors concerning a single directive leave the reader usable:
    /// the next call continues after the offending line.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use gff_io::gff::{Entry, Reader};
    ///
    /// let mut reader = Reader::from_path("features.gff").unwrap();
    ///
    /// while let Some(result) = reader.next() {
    ///     match result.unwrap() {
    ///         Entry::Feature(rec) => println!("{}", String::from_utf8_lossy(&rec.feature)),
    ///         Entry::Directive(d) => println!("{:?}", d),
    ///     }
    /// }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<Entry>> {
        if self.finished {
            return None;
        }
        let res = self._next();
        match res {
            Ok(None) => {
                self.finished = true;
                None
            }
            Ok(Some(entry)) => Some(Ok(entry)),
            Err(e) => {
                if e.is_fatal() {
                    self.finished = true;
                }
                Some(Err(e))
            }
        }
    }

    fn _next(&mut self) -> Result<Option<Entry>> {
        let pending = loop {
            let line = match self.lines.next_line()? {
                Some(l) => l,
                None => return Ok(None),
            };
            let data = trim_ws(line.data);
            if data.is_empty() {
                continue;
            }
            self.position = Some(line.pos);
            if let Some(meta) = data.strip_prefix(b"##") {
                match parse_directive(meta, line.pos, &self.settings, &mut self.state)? {
                    Parsed::Done(d) => return Ok(Some(Entry::Directive(d))),
                    Parsed::SequenceStart { tag, id } => break (tag, id),
                }
            } else if data[0] != b'#' {
                let rec = parse_feature(data, self.settings.one_based, self.state.mol_type);
                return Ok(Some(Entry::Feature(rec)));
            }
        };
        let (tag, id) = pending;
        let seq = self.read_meta_sequence(&tag, id)?;
        Ok(Some(Entry::Directive(Directive::Sequence(seq))))
    }

    // Reads the body of a ##DNA / ##RNA / ##Protein block up to
    // and including the ##end-<tag> line.
    fn read_meta_sequence(&mut self, tag: &[u8], id: Vec<u8>) -> Result<MetaSequence> {
        // sequence blocks keep a writable type even if the table
        // does not know the tag
        let mol_type = match self.settings.mol_types.get(tag) {
            MolType::Undefined => MolType::from_canonical_name(tag).unwrap_or_default(),
            t => t,
        };
        let mut terminator = b"end-".to_vec();
        terminator.extend_from_slice(tag);

        let mut seq = vec![];
        loop {
            let line = match self.lines.next_line()? {
                Some(l) => l,
                None => {
                    return Err(Error::new(ErrorKind::UnexpectedEnd {
                        pos: self.lines.next_position(),
                        mol_type,
                    }))
                }
            };
            let data = trim_ws(line.data);
            if data.is_empty() {
                continue;
            }
            let chunk = match data.strip_prefix(b"##") {
                Some(c) => trim_ws(c),
                None => {
                    return Err(Error::new(ErrorKind::CorruptMetaSequence {
                        pos: line.pos,
                        line: String::from_utf8_lossy(data).into_owned(),
                    }))
                }
            };
            if chunk == terminator.as_slice() {
                break;
            }
            seq.extend(chunk.iter().filter(|b| !b.is_ascii_whitespace()));
        }
        debug!(
            "Read {} sequence '{}' of length {}",
            mol_type,
            String::from_utf8_lossy(&id),
            seq.len()
        );
        Ok(MetaSequence { id, mol_type, seq })
    }

    /// Returns a borrowed iterator over all entries (features and
    /// directives).
    ///
    /// # Example
    ///
    /// ```
    /// use gff_io::gff::{Directive, Entry, Reader};
    ///
    /// let gff = b"##gff-version 3\n# comment\nchr1\tsrc\tgene\t1\t9\t.\t.\t.\t\n";
    ///
    /// let mut reader = Reader::new(&gff[..]);
    /// let entries: Result<Vec<_>, _> = reader.records().collect();
    /// let entries = entries.unwrap();
    ///
    /// assert_eq!(entries.len(), 2);
    /// assert_eq!(entries[0], Entry::Directive(Directive::Version(3)));
    /// assert!(entries[1].is_feature());
    /// ```
    pub fn records(&mut self) -> RecordsIter<R, P> {
        RecordsIter { rdr: self }
    }

    /// Returns an iterator over all entries like `Reader::records()`,
    /// but with the difference that it owns the underlying reader.
    pub fn into_records(self) -> RecordsIntoIter<R, P> {
        RecordsIntoIter { rdr: self }
    }

    /// Returns a borrowed iterator over feature records only. Directives
    /// still update the reader state.
    pub fn features(&mut self) -> FeaturesIter<R, P> {
        FeaturesIter { rdr: self }
    }

    /// Version set by the last `##gff-version` line, or the default
    #[inline]
    pub fn version(&self) -> i32 {
        self.state.version
    }

    #[inline]
    pub fn one_based(&self) -> bool {
        self.settings.one_based
    }

    /// Text of the last `##source-version` line
    #[inline]
    pub fn source_version(&self) -> Option<&[u8]> {
        self.state.source_version.as_deref()
    }

    /// Date of the last `##date` line
    #[inline]
    pub fn date(&self) -> Option<&NaiveDateTime> {
        self.state.date.as_ref()
    }

    /// Molecule type currently assigned to features
    #[inline]
    pub fn mol_type(&self) -> MolType {
        self.state.mol_type
    }

    /// Returns the position of the line where the last returned entry
    /// started. `None` before the first call to `next()`.
    #[inline]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        self.lines.get_ref()
    }

    /// Returns the underlying reader. Buffered data is lost.
    #[inline]
    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read + Seek,
    P: BufPolicy,
{
    /// Moves back to the start of the input. The state set by directives
    /// read so far (version, source version, date, molecule type) is kept.
    ///
    /// ```
    /// use gff_io::gff::Reader;
    /// use std::io::Cursor;
    ///
    /// let gff = b"##gff-version 3\nchr1\tsrc\tgene\t1\t9\t.\t.\t.\t\n";
    /// let mut reader = Reader::new(Cursor::new(&gff[..]));
    /// let n = reader.records().count();
    /// reader.rewind().unwrap();
    /// assert_eq!(reader.records().count(), n);
    /// assert_eq!(reader.version(), 3);
    /// ```
    pub fn rewind(&mut self) -> Result<()> {
        self.lines.rewind()?;
        self.position = None;
        self.finished = false;
        Ok(())
    }
}

/// Borrowed iterator of `Entry`
pub struct RecordsIter<'a, R, P = StdPolicy>
where
    P: 'a,
    R: io::Read + 'a,
{
    rdr: &'a mut Reader<R, P>,
}

impl<'a, R, P> Iterator for RecordsIter<'a, R, P>
where
    P: BufPolicy + 'a,
    R: io::Read + 'a,
{
    type Item = Result<Entry>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// Iterator of `Entry` that owns the underlying reader
pub struct RecordsIntoIter<R: io::Read, P = StdPolicy> {
    rdr: Reader<R, P>,
}

impl<R, P> RecordsIntoIter<R, P>
where
    P: BufPolicy,
    R: io::Read,
{
    /// Returns the reader, e.g. for inspecting the stream state after
    /// iteration.
    pub fn into_reader(self) -> Reader<R, P> {
        self.rdr
    }
}

impl<R, P> Iterator for RecordsIntoIter<R, P>
where
    P: BufPolicy,
    R: io::Read,
{
    type Item = Result<Entry>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// Borrowed iterator of `FeatureRecord`, skipping directives
pub struct FeaturesIter<'a, R, P = StdPolicy>
where
    P: 'a,
    R: io::Read + 'a,
{
    rdr: &'a mut Reader<R, P>,
}

impl<'a, R, P> Iterator for FeaturesIter<'a, R, P>
where
    P: BufPolicy + 'a,
    R: io::Read + 'a,
{
    type Item = Result<FeatureRecord>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rdr.next()? {
                Ok(Entry::Feature(f)) => return Some(Ok(f)),
                Ok(Entry::Directive(_)) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

enum Parsed {
    Done(Directive),
    // a sequence block follows
    SequenceStart { tag: Vec<u8>, id: Vec<u8> },
}

fn parse_directive(
    meta: &[u8],
    pos: Position,
    settings: &Settings,
    state: &mut StreamState,
) -> Result<Parsed> {
    let fields: Vec<&[u8]> = meta
        .split(|b| b.is_ascii_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    let incomplete = || {
        Error::new(ErrorKind::IncompleteDirective {
            pos,
            directive: String::from_utf8_lossy(meta).into_owned(),
        })
    };

    let name = fields.first().copied().unwrap_or_default();
    let d = match name {
        b"gff-version" => {
            let v = fields
                .get(1)
                .and_then(|v| parse_int::<i32>(v))
                .unwrap_or(settings.default_version);
            debug!("GFF version: {}", v);
            state.version = v;
            Directive::Version(v)
        }
        b"source-version" => {
            if fields.len() < 2 {
                return Err(incomplete());
            }
            let sv = fields[1..].join(&b' ');
            debug!("Source version: {}", String::from_utf8_lossy(&sv));
            state.source_version = Some(sv.clone());
            Directive::SourceVersion(sv)
        }
        b"date" => {
            if fields.len() < 2 {
                return Err(incomplete());
            }
            let value = String::from_utf8_lossy(&fields[1..].join(&b' ')).into_owned();
            let date = match settings.time_format.as_deref() {
                Some(fmt) => parse_date(&value, fmt).map_err(|e| e.to_string()),
                None => Err("no time format configured".to_string()),
            };
            let date = date.map_err(|msg| Error::new(ErrorKind::InvalidDate { pos, value, msg }))?;
            debug!("Date: {}", date);
            state.date = Some(date);
            Directive::Date(date)
        }
        b"Type" => {
            if fields.len() < 2 {
                return Err(incomplete());
            }
            let t = settings.mol_types.get(fields[1]);
            debug!("Molecule type: {}", t);
            state.mol_type = t;
            Directive::Type(t)
        }
        b"sequence-region" => {
            if fields.len() < 4 {
                return Err(incomplete());
            }
            let coord = |field: &[u8]| {
                parse_int::<i64>(field).ok_or_else(|| {
                    Error::new(ErrorKind::InvalidRegion {
                        pos,
                        field: String::from_utf8_lossy(field).into_owned(),
                    })
                })
            };
            let start = coord(fields[2])?;
            let end = coord(fields[3])?;
            Directive::SequenceRegion(SequenceRegion {
                id: fields[1].to_vec(),
                start: to_zero_based(start, settings.one_based),
                end,
            })
        }
        b"DNA" | b"RNA" | b"Protein" => {
            if fields.len() < 2 {
                return Err(incomplete());
            }
            return Ok(Parsed::SequenceStart {
                tag: name.to_vec(),
                id: fields[1].to_vec(),
            });
        }
        _ => Directive::Other(meta.to_vec()),
    };
    Ok(Parsed::Done(d))
}

fn parse_date(value: &str, fmt: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    match NaiveDateTime::parse_from_str(value, fmt) {
        Ok(dt) => Ok(dt),
        // formats without a time part
        Err(e) => NaiveDate::parse_from_str(value, fmt)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| e),
    }
}

/// Parses one feature line (already trimmed, not empty). Invalid numeric,
/// strand and frame fields are replaced by defaults.
pub(crate) fn parse_feature(line: &[u8], one_based: bool, mol_type: MolType) -> FeatureRecord {
    let mut fields = line.splitn(10, |b| *b == b'\t');
    let mut next = || fields.next().unwrap_or_default();

    let location = next().to_vec();
    let source = next().to_vec();
    let feature = next().to_vec();

    let start_field = next();
    let start = parse_int::<i64>(start_field).unwrap_or_else(|| {
        trace!("Invalid start '{}' replaced by 0", String::from_utf8_lossy(start_field));
        0
    });
    let end_field = next();
    let end = parse_int::<i64>(end_field).unwrap_or_else(|| {
        trace!("Invalid end '{}' replaced by 0", String::from_utf8_lossy(end_field));
        0
    });
    let score_field = next();
    let score = str::from_utf8(score_field)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or_else(|| {
            trace!("Invalid score '{}' replaced by 0", String::from_utf8_lossy(score_field));
            0.
        });
    let strand = Strand::from_symbol(next());
    let frame = parse_int::<i8>(next()).unwrap_or(FRAME_UNSET);

    let attributes = next().to_vec();
    let comments = fields.next().map(|c| c.to_vec());

    FeatureRecord {
        location,
        source,
        feature,
        start: to_zero_based(start, one_based),
        end,
        score,
        strand,
        frame,
        mol_type,
        attributes,
        comments,
    }
}

#[inline]
fn to_zero_based(start: i64, one_based: bool) -> i64 {
    if one_based && start > 0 {
        start - 1
    } else {
        start
    }
}

#[inline]
fn parse_int<T: str::FromStr>(field: &[u8]) -> Option<T> {
    str::from_utf8(field).ok()?.parse().ok()
}
