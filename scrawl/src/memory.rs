// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

//! Reading strings that syscall arguments point at, without dereferencing
//! the register value directly.

use std::{
    ffi::CString,
    io::{self, IoSliceMut},
};

use log::trace;
use nix::{
    sys::uio::{process_vm_readv, RemoteIoVec},
    unistd::Pid,
};

const CHUNK_SIZE: usize = 4096;

pub trait MemoryReader {
    /// Reads a NUL-terminated string starting at `addr`, returning the bytes
    /// before the terminator. Stops after `max` bytes if no terminator shows up.
    fn read_cstr(&self, addr: u64, max: usize) -> io::Result<Vec<u8>>;
}

/// Reads another (or our own) process' memory through `process_vm_readv`,
/// which fails with EFAULT instead of faulting on a bad address.
pub struct ProcessMemory {
    pid: Pid,
}

impl ProcessMemory {
    pub fn new(pid: u32) -> Self {
        ProcessMemory {
            pid: Pid::from_raw(pid as libc::pid_t),
        }
    }

    pub fn current() -> Self {
        ProcessMemory {
            pid: Pid::this(),
        }
    }
}

impl MemoryReader for ProcessMemory {
    fn read_cstr(&self, addr: u64, max: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut addr = addr;
        let mut chunk = [0u8; CHUNK_SIZE];

        while out.len() < max {
            // Never cross a page boundary in one read, so a string that ends
            // right before an unmapped page is still readable.
            let page_left = CHUNK_SIZE - (addr as usize % CHUNK_SIZE);
            let want = page_left.min(max - out.len());

            let remote = [RemoteIoVec {
                base: addr as usize,
                len: want,
            }];
            let mut local = [IoSliceMut::new(&mut chunk[..want])];
            let read = process_vm_readv(self.pid, &mut local, &remote).map_err(|errno| {
                trace!("process_vm_readv at 0x{addr:x} for pid {} failed: {errno}", self.pid);
                io::Error::from(errno)
            })?;

            if read == 0 {
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
            }

            if let Some(nul) = chunk[..read].iter().position(|&b| b == 0) {
                out.extend_from_slice(&chunk[..nul]);
                return Ok(out);
            }

            out.extend_from_slice(&chunk[..read]);
            addr = addr.wrapping_add(read as u64);
        }

        Ok(out)
    }
}

/// No memory access at all; every pathname falls back to its address.
pub struct NullMemory;

impl MemoryReader for NullMemory {
    fn read_cstr(&self, _addr: u64, _max: usize) -> io::Result<Vec<u8>> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}

/// Strings owned by the caller, handed out by address. Reads are looked up
/// in the table and bounds-checked against the owning string.
#[derive(Default)]
pub struct OwnedStrings {
    strings: Vec<CString>,
}

impl OwnedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `s` and returns the address it can be found at.
    pub fn insert(&mut self, s: CString) -> u64 {
        let addr = s.as_ptr() as u64;
        self.strings.push(s);
        addr
    }
}

impl MemoryReader for OwnedStrings {
    fn read_cstr(&self, addr: u64, max: usize) -> io::Result<Vec<u8>> {
        for s in &self.strings {
            let start = s.as_ptr() as u64;
            let bytes = s.as_bytes();
            if addr >= start && addr <= start + bytes.len() as u64 {
                let offset = (addr - start) as usize;
                let tail = &bytes[offset..];
                return Ok(tail[..tail.len().min(max)].to_vec());
            }
        }

        Err(io::Error::from_raw_os_error(libc::EFAULT))
    }
}
