use crate::core::LineError;
use crate::{MolType, Position};
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ErrorKind {
    /// `std::io::Error`
    Io(io::Error),
    /// A directive lacks its required arguments
    IncompleteDirective {
        /// Position of the directive line
        pos: Position,
        /// The directive line without `##`
        directive: String,
    },
    /// A `##date` directive that does not match the configured time
    /// format, or no time format was configured.
    InvalidDate {
        pos: Position,
        /// Date text
        value: String,
        /// Description of the problem
        msg: String,
    },
    /// A `##sequence-region` start or end that is not an integer
    InvalidRegion {
        pos: Position,
        /// The offending field
        field: String,
    },
    /// A line within an embedded sequence block that does not start
    /// with `##`
    CorruptMetaSequence {
        pos: Position,
        line: String,
    },
    /// Input ended within an embedded sequence block (no `##end-<type>`
    /// line found)
    UnexpectedEnd {
        /// Position just after the last byte
        pos: Position,
        mol_type: MolType,
    },
    /// Size limit of buffer was reached, which happens if `policy::BufPolicy::grow_to()` returned
    /// `None`. This does not happen with the default `StdPolicy`.
    BufferLimit,
    /// Hints that destructuring should not be exhaustive,
    /// makes sure that adding new variants will not break the code.
    #[doc(hidden)]
    __Nonexhaustive,
}

impl ErrorKind {
    /// Returns the position for this error, if one exists.
    pub fn position(&self) -> Option<&Position> {
        match self {
            ErrorKind::IncompleteDirective { pos, .. } => Some(pos),
            ErrorKind::InvalidDate { pos, .. } => Some(pos),
            ErrorKind::InvalidRegion { pos, .. } => Some(pos),
            ErrorKind::CorruptMetaSequence { pos, .. } => Some(pos),
            ErrorKind::UnexpectedEnd { pos, .. } => Some(pos),
            _ => None,
        }
    }
}

impl_error!(ErrorKind);

impl Error {
    /// Returns `true` if reading cannot continue after this error.
    /// Other errors are tied to a single (already consumed) line or
    /// directive block, and calling `next()` again resumes after it.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Io(_) | ErrorKind::BufferLimit | ErrorKind::UnexpectedEnd { .. }
        )
    }
}

impl From<LineError> for Error {
    fn from(e: LineError) -> Self {
        match e {
            LineError::Io(e) => Error::new(ErrorKind::Io(e)),
            LineError::BufferLimit => Error::new(ErrorKind::BufferLimit),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(ref e) => e.fmt(f),
            ErrorKind::IncompleteDirective { pos, directive } => write!(
                f,
                "GFF parse error: incomplete {} directive ({})",
                directive, pos
            ),
            ErrorKind::InvalidDate { pos, value, msg } => write!(
                f,
                "GFF parse error: invalid date '{}': {} ({})",
                value, msg, pos
            ),
            ErrorKind::InvalidRegion { pos, field } => write!(
                f,
                "GFF parse error: invalid sequence-region coordinate '{}' ({})",
                field, pos
            ),
            ErrorKind::CorruptMetaSequence { pos, line } => write!(
                f,
                "GFF parse error: corrupt metasequence, expected '##' but found '{}' ({})",
                line, pos
            ),
            ErrorKind::UnexpectedEnd { pos, mol_type } => write!(
                f,
                "GFF parse error: unexpected end of input, missing '##end-{}' ({})",
                mol_type, pos
            ),
            ErrorKind::BufferLimit => write!(f, "GFF parse error: Buffer limit reached."),
            _ => Ok(()),
        }
    }
}
