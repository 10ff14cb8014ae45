// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

#![cfg_attr(not(test), no_std)]

use core::fmt;

/// Capacity of the shared "about to call" buffer, in bytes. A rendered
/// prefix is bounded by its header, six separators and six fragments, and a
/// pathname fragment is at most `MAX_PATHNAME_LEN + 2` bytes with invalid
/// UTF-8 escaped, so six of them stay well under this.
pub const PREBUFFER_LEN: usize = 4096 * 6;

/// Capacity of the shared return-value buffer.
pub const POSTBUFFER_LEN: usize = 128;

/// Longest pathname read out of the caller's memory, and the most bytes
/// its rendering may take between the quotes.
pub const MAX_PATHNAME_LEN: usize = 2048;

/// Number of register arguments a syscall can take.
pub const MAX_ARGS: usize = 6;

pub const MAX_ERRNO: u64 = 4095;

pub const ANSI_RESET: &str = "\x1b[0m";
pub const ANSI_RED: &str = "\x1b[1;31m";
pub const ANSI_GREEN: &str = "\x1b[1;32m";

/// How a raw register value should be interpreted when rendered.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArgType {
    #[default]
    Undefined,
    Pathname,
    Pid,
    Fd,
    Mode,
    Address,
    NonNullAddress,
    Iovec,
    Sockaddr,
    Mmap,
    Op,
    List,
    Len,
    Range,
    Cpu,
    IovecLen,
    SockaddrLen,
}

/// The worker slot number and process id a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildIdentity {
    pub num: u32,
    pub pid: u32,
}

/// One in-flight syscall invocation together with its crash-durable
/// renderings. Plain data so it can live in a mapping shared with a
/// supervising process.
#[repr(C)]
#[derive(Clone)]
pub struct CallRecord {
    pub nr: u32,
    pub do32bit: bool,
    pub op_nr: u64,
    pub args: [u64; MAX_ARGS],
    pub retval: u64,
    pub errno_post: i32,
    pub prebuffer: [u8; PREBUFFER_LEN],
    pub postbuffer: [u8; POSTBUFFER_LEN],
}

impl CallRecord {
    pub const fn new(nr: u32, do32bit: bool, op_nr: u64, args: [u64; MAX_ARGS]) -> Self {
        CallRecord {
            nr,
            do32bit,
            op_nr,
            args,
            retval: 0,
            errno_post: 0,
            prebuffer: [0; PREBUFFER_LEN],
            postbuffer: [0; POSTBUFFER_LEN],
        }
    }

    /// Argument by 1-based position, as syscall tables number them.
    pub fn arg(&self, argnum: usize) -> u64 {
        self.args[argnum - 1]
    }

    pub fn set_result(&mut self, retval: i64, errno: i32) {
        self.retval = retval as u64;
        self.errno_post = errno;
    }
}

impl fmt::Debug for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRecord")
            .field("nr", &self.nr)
            .field("do32bit", &self.do32bit)
            .field("op_nr", &self.op_nr)
            .field("args", &self.args)
            .field("retval", &self.retval)
            .field("errno_post", &self.errno_post)
            .finish_non_exhaustive()
    }
}

/// Same test as the kernel's IS_ERR(): the top 4095 values of the address
/// space are negated errnos.
pub const fn is_err_return(retval: u64) -> bool {
    retval >= MAX_ERRNO.wrapping_neg()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub len: usize,
    pub capacity: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rendering of {} bytes does not fit a {} byte shared buffer",
            self.len, self.capacity
        )
    }
}

impl core::error::Error for CapacityExceeded {}

/// Copies `rendered` to the start of `dst` and zeroes everything after it,
/// so a reader never sees the tail of an older, longer rendering.
///
/// `dst` is left untouched when the rendering does not fit.
pub fn publish(dst: &mut [u8], rendered: &[u8]) -> Result<usize, CapacityExceeded> {
    let len = rendered.len();
    if len > dst.len() {
        return Err(CapacityExceeded {
            len,
            capacity: dst.len(),
        });
    }

    let (head, tail) = dst.split_at_mut(len);
    head.copy_from_slice(rendered);
    tail.fill(0);

    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_zero_fills_tail() {
        let mut buf = [0xffu8; 16];
        assert_eq!(publish(&mut buf, b"hello"), Ok(5));
        assert_eq!(&buf[..5], b"hello");
        assert!(buf[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn publish_shorter_after_longer() {
        let mut buf = [0u8; 32];
        publish(&mut buf, b"a much longer rendering").unwrap();
        publish(&mut buf, b"short").unwrap();
        assert_eq!(&buf[..5], b"short");
        assert!(buf[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn publish_exact_fit() {
        let mut buf = [1u8; 4];
        assert_eq!(publish(&mut buf, b"abcd"), Ok(4));
        assert_eq!(&buf, b"abcd");
    }

    #[test]
    fn publish_over_capacity_leaves_buffer_alone() {
        let mut buf = *b"keep";
        assert_eq!(
            publish(&mut buf, b"too long"),
            Err(CapacityExceeded {
                len: 8,
                capacity: 4
            })
        );
        assert_eq!(&buf, b"keep");
    }

    #[test]
    fn err_return_range() {
        assert!(is_err_return(-1i64 as u64));
        assert!(is_err_return(-4095i64 as u64));
        assert!(!is_err_return(-4096i64 as u64));
        assert!(!is_err_return(0));
        assert!(!is_err_return(0x7f00_0000_0000));
    }

    #[test]
    fn arg_positions_are_one_based() {
        let rec = CallRecord::new(2, false, 0, [10, 20, 30, 40, 50, 60]);
        assert_eq!(rec.arg(1), 10);
        assert_eq!(rec.arg(6), 60);
    }
}
