// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

//! Static syscall descriptions, keyed by number for both the native 64-bit
//! and the 32-bit compat ABI.

use std::borrow::Cow;

use scrawl_common::{ArgType, CallRecord, MAX_ARGS};

use crate::format_helpers::{
    format_mmap_flags, format_mmap_prot, format_open_flags, format_signal_number,
};

/// Extra per-syscall decoding, appended after the generic rendering of an
/// argument. Returning `None` means there is nothing to add.
pub trait ArgDecorator: Sync {
    fn decode(&self, rec: &CallRecord, argnum: usize) -> Option<String>;
}

#[derive(Clone, Copy, Debug)]
pub struct ArgSpec {
    pub name: &'static str,
    pub ty: ArgType,
}

impl ArgSpec {
    const UNUSED: ArgSpec = ArgSpec {
        name: "",
        ty: ArgType::Undefined,
    };
}

pub struct SyscallEntry {
    pub name: &'static str,
    pub num_args: usize,
    pub args: [ArgSpec; MAX_ARGS],
    pub decode: Option<&'static dyn ArgDecorator>,
}

impl SyscallEntry {
    pub const fn new(
        name: &'static str,
        args: &[(&'static str, ArgType)],
        decode: Option<&'static dyn ArgDecorator>,
    ) -> Self {
        let mut specs = [ArgSpec::UNUSED; MAX_ARGS];
        let mut i = 0;
        while i < args.len() {
            specs[i] = ArgSpec {
                name: args[i].0,
                ty: args[i].1,
            };
            i += 1;
        }

        SyscallEntry {
            name,
            num_args: args.len(),
            args: specs,
            decode,
        }
    }

    /// Spec of an argument by 1-based position.
    pub fn arg(&self, argnum: usize) -> &ArgSpec {
        &self.args[argnum - 1]
    }
}

/// Appends ` (<symbolic>)` for the argument positions it knows about.
pub struct Symbolic(pub &'static [(usize, fn(u64) -> Cow<'static, str>)]);

impl ArgDecorator for Symbolic {
    fn decode(&self, rec: &CallRecord, argnum: usize) -> Option<String> {
        self.0
            .iter()
            .find(|(pos, _)| *pos == argnum)
            .map(|(_, format)| format!(" ({})", format(rec.arg(argnum))))
    }
}

const OPEN_FLAGS: Symbolic = Symbolic(&[(2, format_open_flags)]);
const OPENAT_FLAGS: Symbolic = Symbolic(&[(3, format_open_flags)]);
const MMAP_BITS: Symbolic = Symbolic(&[(3, format_mmap_prot), (4, format_mmap_flags)]);
const MPROTECT_PROT: Symbolic = Symbolic(&[(3, format_mmap_prot)]);
const KILL_SIGNAL: Symbolic = Symbolic(&[(2, format_signal_number)]);

use ArgType::*;

const READ: SyscallEntry = SyscallEntry::new(
    "read",
    &[("fd", Fd), ("buf", Address), ("count", Len)],
    None,
);
const WRITE: SyscallEntry = SyscallEntry::new(
    "write",
    &[("fd", Fd), ("buf", Address), ("count", Len)],
    None,
);
const OPEN: SyscallEntry = SyscallEntry::new(
    "open",
    &[("filename", Pathname), ("flags", Op), ("mode", Mode)],
    Some(&OPEN_FLAGS),
);
const CLOSE: SyscallEntry = SyscallEntry::new("close", &[("fd", Fd)], None);
const STAT: SyscallEntry = SyscallEntry::new(
    "stat",
    &[("filename", Pathname), ("statbuf", Address)],
    None,
);
const FSTAT: SyscallEntry =
    SyscallEntry::new("fstat", &[("fd", Fd), ("statbuf", Address)], None);
const LSTAT: SyscallEntry = SyscallEntry::new(
    "lstat",
    &[("filename", Pathname), ("statbuf", Address)],
    None,
);
const LSEEK: SyscallEntry = SyscallEntry::new(
    "lseek",
    &[("fd", Fd), ("offset", Undefined), ("whence", Op)],
    None,
);
const MMAP: SyscallEntry = SyscallEntry::new(
    "mmap",
    &[
        ("addr", Address),
        ("len", Len),
        ("prot", List),
        ("flags", List),
        ("fd", Fd),
        ("off", Len),
    ],
    Some(&MMAP_BITS),
);
const MMAP2: SyscallEntry = SyscallEntry::new(
    "mmap2",
    &[
        ("addr", Address),
        ("len", Len),
        ("prot", List),
        ("flags", List),
        ("fd", Fd),
        ("pgoff", Len),
    ],
    Some(&MMAP_BITS),
);
const MPROTECT: SyscallEntry = SyscallEntry::new(
    "mprotect",
    &[("start", Mmap), ("len", Len), ("prot", List)],
    Some(&MPROTECT_PROT),
);
const MUNMAP: SyscallEntry =
    SyscallEntry::new("munmap", &[("addr", Mmap), ("len", Len)], None);
const BRK: SyscallEntry = SyscallEntry::new("brk", &[("brk", Address)], None);
const READV: SyscallEntry = SyscallEntry::new(
    "readv",
    &[("fd", Fd), ("vec", Iovec), ("vlen", IovecLen)],
    None,
);
const WRITEV: SyscallEntry = SyscallEntry::new(
    "writev",
    &[("fd", Fd), ("vec", Iovec), ("vlen", IovecLen)],
    None,
);
const ACCESS: SyscallEntry = SyscallEntry::new(
    "access",
    &[("filename", Pathname), ("mode", Mode)],
    None,
);
const DUP: SyscallEntry = SyscallEntry::new("dup", &[("fildes", Fd)], None);
const DUP2: SyscallEntry =
    SyscallEntry::new("dup2", &[("oldfd", Fd), ("newfd", Fd)], None);
const GETPID: SyscallEntry = SyscallEntry::new("getpid", &[], None);
const SOCKET: SyscallEntry = SyscallEntry::new(
    "socket",
    &[("family", Undefined), ("type", Undefined), ("protocol", Undefined)],
    None,
);
const CONNECT: SyscallEntry = SyscallEntry::new(
    "connect",
    &[("fd", Fd), ("uservaddr", Sockaddr), ("addrlen", SockaddrLen)],
    None,
);
const KILL: SyscallEntry = SyscallEntry::new(
    "kill",
    &[("pid", Pid), ("sig", Undefined)],
    Some(&KILL_SIGNAL),
);
const MKDIR: SyscallEntry = SyscallEntry::new(
    "mkdir",
    &[("pathname", Pathname), ("mode", Mode)],
    None,
);
const RMDIR: SyscallEntry = SyscallEntry::new("rmdir", &[("pathname", Pathname)], None);
const UNLINK: SyscallEntry = SyscallEntry::new("unlink", &[("pathname", Pathname)], None);
const CHMOD: SyscallEntry = SyscallEntry::new(
    "chmod",
    &[("filename", Pathname), ("mode", Mode)],
    None,
);
const SCHED_SETAFFINITY: SyscallEntry = SyscallEntry::new(
    "sched_setaffinity",
    &[("pid", Pid), ("len", Len), ("user_mask_ptr", Address)],
    None,
);
const GETCPU: SyscallEntry = SyscallEntry::new(
    "getcpu",
    &[("cpup", Address), ("nodep", Address), ("unused", Address)],
    None,
);
const MADVISE: SyscallEntry = SyscallEntry::new(
    "madvise",
    &[("start", NonNullAddress), ("len_in", Len), ("advice", Op)],
    None,
);
const OPENAT: SyscallEntry = SyscallEntry::new(
    "openat",
    &[("dfd", Fd), ("filename", Pathname), ("flags", Op), ("mode", Mode)],
    Some(&OPENAT_FLAGS),
);
const SYNC_FILE_RANGE: SyscallEntry = SyscallEntry::new(
    "sync_file_range",
    &[("fd", Fd), ("offset", Range), ("nbytes", Range), ("flags", List)],
    None,
);

static SYSCALLS_64: &[(u32, SyscallEntry)] = &[
    (0, READ),
    (1, WRITE),
    (2, OPEN),
    (3, CLOSE),
    (4, STAT),
    (5, FSTAT),
    (6, LSTAT),
    (8, LSEEK),
    (9, MMAP),
    (10, MPROTECT),
    (11, MUNMAP),
    (12, BRK),
    (19, READV),
    (20, WRITEV),
    (21, ACCESS),
    (28, MADVISE),
    (32, DUP),
    (33, DUP2),
    (39, GETPID),
    (41, SOCKET),
    (42, CONNECT),
    (62, KILL),
    (83, MKDIR),
    (84, RMDIR),
    (87, UNLINK),
    (90, CHMOD),
    (203, SCHED_SETAFFINITY),
    (257, OPENAT),
    (277, SYNC_FILE_RANGE),
    (309, GETCPU),
];

// i386 numbering.
static SYSCALLS_32: &[(u32, SyscallEntry)] = &[
    (3, READ),
    (4, WRITE),
    (5, OPEN),
    (6, CLOSE),
    (10, UNLINK),
    (15, CHMOD),
    (19, LSEEK),
    (20, GETPID),
    (33, ACCESS),
    (37, KILL),
    (39, MKDIR),
    (40, RMDIR),
    (41, DUP),
    (45, BRK),
    (63, DUP2),
    (91, MUNMAP),
    (106, STAT),
    (107, LSTAT),
    (108, FSTAT),
    (125, MPROTECT),
    (145, READV),
    (146, WRITEV),
    (192, MMAP2),
    (219, MADVISE),
    (241, SCHED_SETAFFINITY),
    (295, OPENAT),
    (318, GETCPU),
    (359, SOCKET),
    (362, CONNECT),
];

fn table(do32bit: bool) -> &'static [(u32, SyscallEntry)] {
    if do32bit {
        SYSCALLS_32
    } else {
        SYSCALLS_64
    }
}

pub fn syscall_entry(nr: u32, do32bit: bool) -> Option<&'static SyscallEntry> {
    table(do32bit)
        .iter()
        .find(|(n, _)| *n == nr)
        .map(|(_, entry)| entry)
}

pub fn syscall_nr_from_name(name: &str, do32bit: bool) -> Option<u32> {
    table(do32bit)
        .iter()
        .find(|(_, entry)| entry.name == name)
        .map(|(nr, _)| *nr)
}
