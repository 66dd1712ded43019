use crate::error::Position;
use crate::policy::{BufPolicy, StdPolicy};
use crate::trim_cr;
use memchr::memchr;
use std::fs::File;
use std::io::{self, BufRead, Seek};
use std::path::Path;

/// The default initial buffer size for readers.
pub const BUFSIZE: usize = 64 * 1024;

/// Error returned by [`LineReader::next_line`](LineReader::next_line)
#[derive(Debug)]
pub enum LineError {
    Io(io::Error),
    /// The line did not fit into the buffer and the policy refused to grow it.
    BufferLimit,
}

impl From<io::Error> for LineError {
    fn from(e: io::Error) -> Self {
        LineError::Io(e)
    }
}

/// A single physical line borrowed from the reader buffer. The line
/// terminator (`\n` or `\r\n`) is removed.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub pos: Position,
    pub data: &'a [u8],
}

/// Wraps buffer_redux::BufReader, handing out one physical line at a time
/// and managing buffer growth based on BufPolicy.
/// Does not implement `std::io::BufRead`
pub struct LineReader<R, P = StdPolicy>
where
    R: io::Read,
{
    buf_reader: buffer_redux::BufReader<R>,
    // Buffer resizing policy
    buf_policy: P,
    // length of the line handed out last (including terminator),
    // consumed at the next call
    pending: usize,
    // position of the next line start
    next_pos: Position,
}

impl LineReader<File> {
    /// Creates a buffered line reader from a file path.
    #[inline]
    pub fn from_path<F: AsRef<Path>>(path: F) -> io::Result<LineReader<File>> {
        File::open(path).map(LineReader::new)
    }
}

impl<R> LineReader<R>
where
    R: io::Read,
{
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, BUFSIZE)
    }

    /// Creates a line reader with a given initial buffer capacity.
    /// The minimum allowed capacity is 3.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        assert!(capacity >= 3);
        LineReader {
            buf_reader: buffer_redux::BufReader::with_capacity(capacity, reader),
            buf_policy: StdPolicy,
            pending: 0,
            next_pos: Position::new(1, 0),
        }
    }
}

impl<R, P> LineReader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    #[inline]
    pub fn policy(&self) -> &P {
        &self.buf_policy
    }

    #[inline]
    pub fn set_policy<T: BufPolicy>(self, buf_policy: T) -> LineReader<R, T> {
        LineReader {
            buf_reader: self.buf_reader,
            buf_policy,
            pending: self.pending,
            next_pos: self.next_pos,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf_reader.capacity()
    }

    /// Position of the line that will be returned by the next call to
    /// `next_line()`.
    #[inline]
    pub fn next_position(&self) -> Position {
        let mut pos = self.next_pos;
        if self.pending > 0 {
            pos.line += 1;
            pos.byte += self.pending as u64;
        }
        pos
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        self.buf_reader.get_ref()
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.buf_reader.into_inner()
    }

    /// Returns the next physical line or `None` at the end of the input.
    /// The last line does not need a terminator.
    pub fn next_line(&mut self) -> Result<Option<Line>, LineError> {
        self.release();

        let mut search_pos = 0;
        loop {
            let found = memchr(b'\n', &self.buf_reader.buffer()[search_pos..]);
            if let Some(i) = found {
                let end = search_pos + i;
                self.pending = end + 1;
                return Ok(Some(Line {
                    pos: self.next_pos,
                    data: trim_cr(&self.buf_reader.buffer()[..end]),
                }));
            }
            search_pos = self.buf_reader.buffer().len();

            // move the partial line to the buffer start, grow if it fills
            // the whole buffer
            self.buf_reader.make_room();
            if self.buf_reader.buf_len() == self.buf_reader.capacity() {
                self.grow()?;
            }

            if self.read_into_buf()? == 0 {
                // EOF: whatever remains is an unterminated last line
                let len = self.buf_reader.buffer().len();
                if len == 0 {
                    return Ok(None);
                }
                self.pending = len;
                return Ok(Some(Line {
                    pos: self.next_pos,
                    data: trim_cr(self.buf_reader.buffer()),
                }));
            }
        }
    }

    // consume the line handed out last
    #[inline]
    fn release(&mut self) {
        if self.pending > 0 {
            self.buf_reader.consume(self.pending);
            self.next_pos.line += 1;
            self.next_pos.byte += self.pending as u64;
            self.pending = 0;
        }
    }

    // grow buffer based on policy
    fn grow(&mut self) -> Result<(), LineError> {
        let cap = self.buf_reader.capacity();
        let new_size = self
            .buf_policy
            .grow_to(cap)
            .ok_or(LineError::BufferLimit)?;
        if new_size <= cap {
            return Err(LineError::BufferLimit);
        }
        self.buf_reader.reserve(new_size - cap);
        Ok(())
    }

    // code adapted from `io::Read::read_exact`
    fn read_into_buf(&mut self) -> io::Result<usize> {
        loop {
            match self.buf_reader.read_into_buf() {
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                res => return res,
            }
        }
    }
}

impl<R, P> LineReader<R, P>
where
    R: io::Read + Seek,
    P: BufPolicy,
{
    /// Moves back to the start of the input, discarding the buffer.
    pub fn rewind(&mut self) -> io::Result<()> {
        self.buf_reader.seek(io::SeekFrom::Start(0))?;
        self.pending = 0;
        self.next_pos = Position::new(1, 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect_lines<R: io::Read>(mut rdr: LineReader<R>) -> Vec<(u64, u64, Vec<u8>)> {
        let mut out = vec![];
        while let Some(line) = rdr.next_line().unwrap() {
            out.push((line.pos.line(), line.pos.byte(), line.data.to_vec()));
        }
        out
    }

    #[test]
    fn lines_and_positions() {
        let input = b"ab\r\n\ncdef\ngh";
        let expected = vec![
            (1, 0, b"ab".to_vec()),
            (2, 4, b"".to_vec()),
            (3, 5, b"cdef".to_vec()),
            (4, 10, b"gh".to_vec()),
        ];
        for cap in 3..20 {
            let rdr = LineReader::with_capacity(&input[..], cap);
            assert_eq!(collect_lines(rdr), expected, "capacity {}", cap);
        }
    }

    // hands out at most one byte per read() call
    struct Trickle<'a>(&'a [u8]);

    impl<'a> io::Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn partial_line_at_buffer_end() {
        // the unfinished line sits at the end of the buffer after the
        // preceding lines were consumed
        let input = b"a\nbcdefg\nhi\n\njklmnopqrstu";
        let expected = vec![
            (1, 0, b"a".to_vec()),
            (2, 2, b"bcdefg".to_vec()),
            (3, 9, b"hi".to_vec()),
            (4, 12, b"".to_vec()),
            (5, 13, b"jklmnopqrstu".to_vec()),
        ];
        for cap in 3..30 {
            let rdr = LineReader::with_capacity(Trickle(&input[..]), cap);
            assert_eq!(collect_lines(rdr), expected, "capacity {}", cap);
        }
    }

    #[test]
    fn empty_input() {
        let mut rdr = LineReader::new(&b""[..]);
        assert!(rdr.next_line().unwrap().is_none());
        assert!(rdr.next_line().unwrap().is_none());
    }

    #[test]
    fn buffer_limit() {
        let input = b"0123456789abcdef\n";
        let mut rdr = LineReader::with_capacity(&input[..], 4)
            .set_policy(crate::policy::DoubleUntilLimited::new(4, 8));
        assert!(matches!(rdr.next_line(), Err(LineError::BufferLimit)));
    }

    #[test]
    fn rewind() {
        let mut rdr = LineReader::with_capacity(Cursor::new(b"a\nb\n".to_vec()), 3);
        assert_eq!(rdr.next_line().unwrap().unwrap().data, b"a");
        assert_eq!(rdr.next_line().unwrap().unwrap().data, b"b");
        rdr.rewind().unwrap();
        let line = rdr.next_line().unwrap().unwrap();
        assert_eq!(line.data, b"a");
        assert_eq!(line.pos, Position::new(1, 0));
    }
}
