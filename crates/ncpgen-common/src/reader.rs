//! Binary reader for zero-copy parsing of fixed-size records.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! `#[repr(C)]` records out of a byte slice. Records are read in host byte
//! order, which is how the build artifacts are laid out on disk.

use std::mem::size_of;

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use ncpgen_common::BinaryReader;
///
/// let data = 0x0403_0201u32.to_ne_bytes();
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_struct::<u32>().unwrap(), 0x0403_0201);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Read the whole buffer as exactly one record.
    ///
    /// Fails with [`Error::SizeMismatch`] unless the buffer is exactly
    /// `size_of::<T>()` bytes long.
    pub fn read_exact_struct<T: FromBytes>(mut self, what: &str) -> Result<T> {
        let size = size_of::<T>();
        if self.data.len() != size {
            return Err(Error::SizeMismatch {
                what: what.to_string(),
                expected: format!("exactly {} bytes", size),
                actual: self.data.len(),
            });
        }
        self.read_struct()
    }

    /// Read the rest of the buffer as an array of records.
    ///
    /// The remaining length must be a whole multiple of `size_of::<T>()`;
    /// trailing bytes are rejected rather than dropped.
    pub fn read_array<T: FromBytes>(mut self, what: &str) -> Result<Vec<T>> {
        let size = size_of::<T>();
        if self.remaining() % size != 0 {
            return Err(Error::SizeMismatch {
                what: what.to_string(),
                expected: format!("a multiple of {} bytes", size),
                actual: self.remaining(),
            });
        }

        let count = self.remaining() / size;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.read_struct::<T>()?);
        }
        Ok(records)
    }
}
