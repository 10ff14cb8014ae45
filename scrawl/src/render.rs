// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

//! Assembly of the two halves of a syscall line: the prefix, written just
//! before the call is made, and the postfix carrying its result.

use std::{
    borrow::Cow,
    fmt::{self, Write as _},
};

use nix::errno::Errno;
use scrawl_common::{
    is_err_return, CallRecord, ChildIdentity, ANSI_GREEN, ANSI_RED, ANSI_RESET,
};

use crate::{decode::decode_argtype, memory::MemoryReader, table::SyscallEntry};

/// Return values above this are printed as hex.
const DECIMAL_RETVAL_LIMIT: u64 = 10000;

/// Renders argument `argnum` (1-based) as `name=value`, preceded by a
/// separator for every argument but the first.
pub fn render_arg(
    out: &mut String,
    rec: &CallRecord,
    argnum: usize,
    entry: &SyscallEntry,
    mem: &dyn MemoryReader,
) -> fmt::Result {
    let spec = entry.arg(argnum);

    if argnum != 1 {
        write!(out, "{ANSI_RESET}, ")?;
    }

    write!(out, "{}=", spec.name)?;

    decode_argtype(out, rec.arg(argnum), spec.ty, mem)?;

    if let Some(decorator) = entry.decode {
        if let Some(extra) = decorator.decode(rec, argnum) {
            out.push_str(&extra);
        }
    }

    Ok(())
}

pub fn render_syscall_prefix(
    out: &mut String,
    child: ChildIdentity,
    rec: &CallRecord,
    entry: &SyscallEntry,
    mem: &dyn MemoryReader,
) -> fmt::Result {
    write!(
        out,
        "[child{}:{}] [{}] {}",
        child.num,
        child.pid,
        rec.op_nr,
        if rec.do32bit { "[32BIT] " } else { "" }
    )?;

    write!(out, "{}{ANSI_RESET}(", entry.name)?;

    for argnum in 1..=entry.num_args {
        render_arg(out, rec, argnum, entry, mem)?;
    }

    write!(out, "{ANSI_RESET}) ")
}

pub fn render_syscall_postfix(out: &mut String, rec: &CallRecord) -> fmt::Result {
    if is_err_return(rec.retval) {
        write!(
            out,
            "{ANSI_RED}= {} ({})",
            rec.retval as i64,
            errno_description(rec.errno_post)
        )?;
    } else {
        write!(out, "{ANSI_GREEN}= ")?;
        if rec.retval > DECIMAL_RETVAL_LIMIT {
            write!(out, "0x{:x}", rec.retval)?;
        } else {
            write!(out, "{}", rec.retval as i64)?;
        }
    }

    writeln!(out, "{ANSI_RESET}")
}

/// Same text glibc's strerror(3) gives for `errno`.
pub fn errno_description(errno: i32) -> Cow<'static, str> {
    match Errno::from_raw(errno) {
        Errno::UnknownErrno if errno == 0 => Cow::Borrowed("Success"),
        Errno::UnknownErrno => Cow::Owned(format!("Unknown error {errno}")),
        known => Cow::Borrowed(known.desc()),
    }
}
