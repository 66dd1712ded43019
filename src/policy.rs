//! Buffer growth policies.
//!
//! The GFF reader keeps every physical line in one contiguous buffer. If a
//! line (usually one with a very long attribute column or an unwrapped
//! embedded sequence) does not fit, the buffer grows according to a
//! [`BufPolicy`].
//!
//! # Example
//!
//! A policy that allows three growth steps at most. Lines that do not fit
//! into eight times the initial capacity end the reader with
//! `ErrorKind::BufferLimit`:
//!
//! ```
//! use gff_io::gff::{ErrorKind, Reader};
//! use gff_io::policy::BufPolicy;
//!
//! struct ThreeSteps(u8);
//!
//! impl BufPolicy for ThreeSteps {
//!     fn grow_to(&mut self, current_size: usize) -> Option<usize> {
//!         self.0 = self.0.checked_sub(1)?;
//!         Some(current_size * 2)
//!     }
//! }
//!
//! let line = format!("chr1\tsrc\tgene\t1\t9\t.\t+\t.\tNote={}\n", "x".repeat(1000));
//! let mut reader = Reader::with_capacity(line.as_bytes(), 8).set_policy(ThreeSteps(3));
//! let err = reader.next().unwrap().unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::BufferLimit));
//! ```

/// Decides how far the line buffer grows when a line does not fit.
///
/// `grow_to` receives the current capacity and returns the new one.
/// `None` (or a size not larger than the current one) stops reading with
/// `gff::ErrorKind::BufferLimit`.
pub trait BufPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize>;
}

// Size reached by doubling before StdPolicy switches to linear growth
const STD_DOUBLE_UNTIL: usize = 1 << 23;

#[inline]
fn next_size(current_size: usize, double_until: usize) -> usize {
    if current_size < double_until {
        current_size.saturating_mul(2)
    } else {
        current_size.saturating_add(double_until)
    }
}

/// The default: doubles up to 8 MiB, then grows in 8 MiB steps without
/// an upper limit. Same as `DoubleUntil(8 * 1024 * 1024)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(next_size(current_size, STD_DOUBLE_UNTIL))
    }
}

/// Doubles until the given size (in bytes), then grows linearly in steps
/// of that size. Unlimited.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntil(pub usize);

impl BufPolicy for DoubleUntil {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(next_size(current_size, self.0))
    }
}

/// Like [`DoubleUntil`], but never grows beyond `limit` bytes. A GFF
/// line longer than that (e.g. an unwrapped chromosome-sized `##` sequence
/// line) makes the reader return `BufferLimit`.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(next_size(current_size, self.double_until)).filter(|&n| n <= self.limit)
    }
}
