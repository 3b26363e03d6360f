//! Pull-based byte sources
//!
//! The decoder never touches the platform I/O layer directly; it pulls
//! bytes through the [`ByteSource`] trait. Two variants are provided:
//! [`FileSource`] wraps a file handle and [`MemorySource`] wraps a
//! borrowed byte slice. Each variant releases its own resources on drop.

pub mod file;
pub mod memory;

pub use file::FileSource;
pub use memory::MemorySource;

/// A pull-based reader with relative seeking
///
/// This is the minimum contract the decoder needs: sequential reads for
/// headers and sample data, and signed 32-bit relative seeks for skipping
/// chunks and random access. Larger displacements are issued as a
/// sequence of capped relative seeks by the caller.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes into `buf`, returning the number of
    /// bytes actually read.
    ///
    /// A short read signals end-of-stream or an I/O error; the two are
    /// not distinguished.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Seek relative to the current position.
    ///
    /// Returns `false` if the seek could not be performed.
    fn seek_relative(&mut self, offset: i32) -> bool;
}
