// WEC - wec-runtime
// Module: Linear Memory
//
// Copyright (c) 2025 The WEC Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Linear memory implementation.
//!
//! A [`Memory`] is a flat, page-granular byte array described by a
//! [`MemoryType`]. Every read and write is bounds-checked against the current
//! size; an access whose last byte lies outside memory traps with
//! "out of bounds memory access". Growth happens in whole pages and is
//! limited by the type's declared maximum.

use log::debug;

use crate::prelude::{Error, MemoryOperations, MemoryType, Result};

/// Size of a WebAssembly memory page in bytes (64 KiB)
pub const PAGE_SIZE: usize = 65_536;

/// Hard ceiling on page count, giving the full 4 GiB address space
pub const MAX_PAGES: u32 = 65_536;

/// A linear memory instance
#[derive(Debug, Clone)]
pub struct Memory {
    /// The memory type (minimum and optional maximum page counts)
    ty: MemoryType,
    /// Backing bytes, always a whole number of pages
    data: Vec<u8>,
}

impl Memory {
    /// Create a memory from its type, zero-initialized at the minimum size.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the type's minimum exceeds its maximum
    /// or the 4 GiB page ceiling.
    pub fn new(ty: MemoryType) -> Result<Self> {
        if ty.limits.min > MAX_PAGES {
            return Err(Error::validation_error("Memory minimum exceeds page ceiling"));
        }
        if let Some(max) = ty.limits.max {
            if ty.limits.min > max {
                return Err(Error::validation_error("Memory minimum exceeds maximum"));
            }
        }
        let bytes = ty.limits.min as usize * PAGE_SIZE;
        debug!("memory: created with {} pages ({} bytes)", ty.limits.min, bytes);
        Ok(Self { ty, data: vec![0; bytes] })
    }

    /// The memory's type.
    #[must_use]
    pub fn ty(&self) -> &MemoryType {
        &self.ty
    }

    /// Current size in pages.
    #[must_use]
    pub fn size(&self) -> u32 {
        (self.data.len() / PAGE_SIZE) as u32
    }

    /// Current size in bytes.
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        self.data.len()
    }

    /// Grow the memory by `pages`, returning the previous size in pages.
    ///
    /// # Errors
    ///
    /// Returns a memory grow error if the new size would exceed the declared
    /// maximum or the 4 GiB page ceiling. The caller translates this failure
    /// into the -1 result `memory.grow` reports to WebAssembly code.
    pub fn grow(&mut self, pages: u32) -> Result<u32> {
        let prev = self.size();
        if pages == 0 {
            return Ok(prev);
        }
        let new_pages = prev
            .checked_add(pages)
            .ok_or_else(|| Error::memory_grow_error("Page count overflow"))?;
        let limit = self.ty.limits.max.unwrap_or(MAX_PAGES).min(MAX_PAGES);
        if new_pages > limit {
            return Err(Error::memory_grow_error("Growth exceeds memory limit"));
        }
        self.data.resize(new_pages as usize * PAGE_SIZE, 0);
        debug!("memory: grew from {prev} to {new_pages} pages");
        Ok(prev)
    }

    /// Read exactly `buffer.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if any byte of the read lies
    /// outside the current size. A read ending exactly at the memory size
    /// succeeds.
    pub fn read(&self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        let end = offset
            .checked_add(buffer.len() as u64)
            .ok_or_else(Error::trap_memory_out_of_bounds)?;
        if end > self.data.len() as u64 {
            return Err(Error::trap_memory_out_of_bounds());
        }
        buffer.copy_from_slice(&self.data[offset as usize..end as usize]);
        Ok(())
    }

    /// Write all of `bytes` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Traps with out of bounds memory access if any byte of the write lies
    /// outside the current size.
    pub fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let end = offset
            .checked_add(bytes.len() as u64)
            .ok_or_else(Error::trap_memory_out_of_bounds)?;
        if end > self.data.len() as u64 {
            return Err(Error::trap_memory_out_of_bounds());
        }
        self.data[offset as usize..end as usize].copy_from_slice(bytes);
        Ok(())
    }

    /// Initialize a region from a data segment at instantiation time.
    ///
    /// # Errors
    ///
    /// Returns a validation error (not a trap) if the segment does not fit;
    /// instantiation has no program to trap.
    pub fn init_data(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.write(offset, bytes)
            .map_err(|_| Error::validation_error("Data segment out of bounds"))
    }
}

impl MemoryOperations for Memory {
    fn read_bytes(&self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        self.read(offset, buffer)
    }

    fn write_bytes(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.write(offset, bytes)
    }

    fn size_in_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Limits;

    fn one_page() -> Memory {
        Memory::new(MemoryType { limits: Limits { min: 1, max: Some(2) } }).unwrap()
    }

    #[test]
    fn new_memory_is_zeroed() {
        let memory = one_page();
        assert_eq!(memory.size(), 1);
        let mut buffer = [1u8; 8];
        memory.read(0, &mut buffer).unwrap();
        assert_eq!(buffer, [0u8; 8]);
    }

    #[test]
    fn read_at_the_boundary() {
        let memory = one_page();
        let mut buffer = [0u8; 8];
        // last valid 8-byte read on a one-page memory
        memory.read(0xfff8, &mut buffer).unwrap();
        let err = memory.read(0xfff9, &mut buffer).unwrap_err();
        assert_eq!(err.message, "out of bounds memory access");
    }

    #[test]
    fn grow_respects_the_maximum() {
        let mut memory = one_page();
        assert_eq!(memory.grow(1).unwrap(), 1);
        assert_eq!(memory.size(), 2);
        assert!(memory.grow(1).is_err());
    }

    #[test]
    fn grow_by_zero_reports_current_size() {
        let mut memory = one_page();
        assert_eq!(memory.grow(0).unwrap(), 1);
    }

    #[test]
    fn writes_survive_growth() {
        let mut memory = one_page();
        memory.write(16, &[1, 2, 3, 4]).unwrap();
        memory.grow(1).unwrap();
        let mut buffer = [0u8; 4];
        memory.read(16, &mut buffer).unwrap();
        assert_eq!(buffer, [1, 2, 3, 4]);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        assert!(Memory::new(MemoryType { limits: Limits { min: 2, max: Some(1) } }).is_err());
    }
}
