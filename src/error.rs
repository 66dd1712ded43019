use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Position of a line within the input: line number and byte offset of the
/// line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub(crate) line: u64,
    pub(crate) byte: u64,
}

impl Position {
    pub fn new(line: u64, byte: u64) -> Position {
        Position { line, byte }
    }

    /// Line number (starting with 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the input
    pub fn byte(&self) -> u64 {
        self.byte
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, byte {}", self.line, self.byte)
    }
}

macro_rules! impl_error {
    ($ErrorKind:ident) => {
        pub type Result<T> = std::result::Result<T, Error>;

        /// Parsing error
        #[derive(Debug)]
        pub struct Error {
            kind: Box<$ErrorKind>,
        }

        impl Error {
            #[inline]
            pub fn new(kind: $ErrorKind) -> Self {
                Error {
                    kind: Box::new(kind),
                }
            }

            /// Returns a reference to the [`ErrorKind`](ErrorKind)
            /// associated with the error.
            #[inline]
            pub fn kind(&self) -> &$ErrorKind {
                &self.kind
            }

            /// Returns the [`ErrorKind`](ErrorKind) associated with
            /// the error, thereby consuming the error.
            #[inline]
            pub fn into_kind(self) -> $ErrorKind {
                *self.kind
            }

            /// Returns the [`Position`](crate::Position) of the offending
            /// line, if the error is tied to one.
            #[inline]
            pub fn position(&self) -> Option<&crate::Position> {
                self.kind().position()
            }
        }

        impl From<$ErrorKind> for Error {
            fn from(kind: $ErrorKind) -> Error {
                Error::new(kind)
            }
        }

        impl From<std::io::Error> for Error {
            fn from(e: std::io::Error) -> Error {
                Error {
                    kind: Box::new($ErrorKind::Io(e)),
                }
            }
        }

        impl From<Error> for std::io::Error {
            fn from(err: Error) -> std::io::Error {
                std::io::Error::new(std::io::ErrorKind::Other, err)
            }
        }

        impl std::error::Error for Error {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                match self.kind() {
                    $ErrorKind::Io(ref err) => Some(err),
                    _ => None,
                }
            }
        }
    };
}
