// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

//! Symbolic names for flag and enum arguments. These feed the per-syscall
//! decorators, which append them after the raw value the decoder printed.

use std::borrow::Cow;

fn join_bits(value: u32, defs: &[(i32, &'static str)]) -> Vec<&'static str> {
    defs.iter()
        .filter(|(bit, _)| *bit != 0 && value & (*bit as u32) != 0)
        .map(|(_, name)| *name)
        .collect()
}

pub fn format_open_flags(flags: u64) -> Cow<'static, str> {
    let flags = flags as u32;

    // Access mode (lowest two bits)
    let access = match flags & 0b11 {
        0 => "O_RDONLY",
        1 => "O_WRONLY",
        2 => "O_RDWR",
        _ => "<invalid>",
    };

    let flag_defs = [
        (libc::O_CREAT, "O_CREAT"),
        (libc::O_EXCL, "O_EXCL"),
        (libc::O_NOCTTY, "O_NOCTTY"),
        (libc::O_TRUNC, "O_TRUNC"),
        (libc::O_APPEND, "O_APPEND"),
        (libc::O_NONBLOCK, "O_NONBLOCK"),
        (libc::O_DSYNC, "O_DSYNC"),
        (libc::O_DIRECTORY, "O_DIRECTORY"),
        (libc::O_NOFOLLOW, "O_NOFOLLOW"),
        (libc::O_CLOEXEC, "O_CLOEXEC"),
        (libc::O_ASYNC, "O_ASYNC"),
        (libc::O_DIRECT, "O_DIRECT"),
        (libc::O_NOATIME, "O_NOATIME"),
        (libc::O_PATH, "O_PATH"),
    ];

    // O_SYNC and O_TMPFILE contain the O_DSYNC and O_DIRECTORY bits; when
    // the composite is fully set only its own name is printed.
    let composites = [
        (libc::O_SYNC as u32, libc::O_DSYNC as u32, "O_SYNC"),
        (libc::O_TMPFILE as u32, libc::O_DIRECTORY as u32, "O_TMPFILE"),
    ];

    let mut simple = flags;
    let mut names = Vec::new();
    for (composite, shared, name) in composites {
        if flags & composite == composite {
            simple &= !shared;
            names.push(name);
        }
    }

    let mut parts = vec![access];
    parts.extend(join_bits(simple, &flag_defs));
    parts.extend(names);

    Cow::Owned(parts.join("|"))
}

pub fn format_mmap_prot(prot: u64) -> Cow<'static, str> {
    let prot = prot as u32;
    if prot == 0 {
        return Cow::Borrowed("PROT_NONE");
    }

    let defs = [
        (libc::PROT_READ, "PROT_READ"),
        (libc::PROT_WRITE, "PROT_WRITE"),
        (libc::PROT_EXEC, "PROT_EXEC"),
        (libc::PROT_GROWSDOWN, "PROT_GROWSDOWN"),
        (libc::PROT_GROWSUP, "PROT_GROWSUP"),
    ];

    let parts = join_bits(prot, &defs);
    if parts.is_empty() {
        Cow::Owned(format!("0x{prot:x}"))
    } else {
        Cow::Owned(parts.join("|"))
    }
}

pub fn format_mmap_flags(flags: u64) -> Cow<'static, str> {
    let defs = [
        (libc::MAP_SHARED, "MAP_SHARED"),
        (libc::MAP_PRIVATE, "MAP_PRIVATE"),
        (libc::MAP_FIXED, "MAP_FIXED"),
        (libc::MAP_ANONYMOUS, "MAP_ANONYMOUS"),
        #[cfg(target_arch = "x86_64")]
        (libc::MAP_32BIT, "MAP_32BIT"),
        (libc::MAP_GROWSDOWN, "MAP_GROWSDOWN"),
        (libc::MAP_DENYWRITE, "MAP_DENYWRITE"),
        (libc::MAP_EXECUTABLE, "MAP_EXECUTABLE"),
        (libc::MAP_LOCKED, "MAP_LOCKED"),
        (libc::MAP_NORESERVE, "MAP_NORESERVE"),
        (libc::MAP_POPULATE, "MAP_POPULATE"),
        (libc::MAP_NONBLOCK, "MAP_NONBLOCK"),
        (libc::MAP_STACK, "MAP_STACK"),
        (libc::MAP_HUGETLB, "MAP_HUGETLB"),
        (libc::MAP_FIXED_NOREPLACE, "MAP_FIXED_NOREPLACE"),
    ];

    let parts = join_bits(flags as u32, &defs);
    if parts.is_empty() {
        Cow::Owned(format!("0x{flags:x}"))
    } else {
        Cow::Owned(parts.join("|"))
    }
}

pub fn format_signal_number(signum: u64) -> Cow<'static, str> {
    let Ok(signum) = i32::try_from(signum) else {
        return Cow::Owned(format!("UNKNOWN({signum})"));
    };
    match signum {
        0 => Cow::Borrowed("0"),
        libc::SIGHUP => Cow::Borrowed("SIGHUP"),
        libc::SIGINT => Cow::Borrowed("SIGINT"),
        libc::SIGQUIT => Cow::Borrowed("SIGQUIT"),
        libc::SIGILL => Cow::Borrowed("SIGILL"),
        libc::SIGTRAP => Cow::Borrowed("SIGTRAP"),
        libc::SIGABRT => Cow::Borrowed("SIGABRT"),
        libc::SIGBUS => Cow::Borrowed("SIGBUS"),
        libc::SIGFPE => Cow::Borrowed("SIGFPE"),
        libc::SIGKILL => Cow::Borrowed("SIGKILL"),
        libc::SIGUSR1 => Cow::Borrowed("SIGUSR1"),
        libc::SIGSEGV => Cow::Borrowed("SIGSEGV"),
        libc::SIGUSR2 => Cow::Borrowed("SIGUSR2"),
        libc::SIGPIPE => Cow::Borrowed("SIGPIPE"),
        libc::SIGALRM => Cow::Borrowed("SIGALRM"),
        libc::SIGTERM => Cow::Borrowed("SIGTERM"),
        libc::SIGCHLD => Cow::Borrowed("SIGCHLD"),
        libc::SIGCONT => Cow::Borrowed("SIGCONT"),
        libc::SIGSTOP => Cow::Borrowed("SIGSTOP"),
        libc::SIGTSTP => Cow::Borrowed("SIGTSTP"),
        libc::SIGTTIN => Cow::Borrowed("SIGTTIN"),
        libc::SIGTTOU => Cow::Borrowed("SIGTTOU"),
        libc::SIGURG => Cow::Borrowed("SIGURG"),
        libc::SIGXCPU => Cow::Borrowed("SIGXCPU"),
        libc::SIGXFSZ => Cow::Borrowed("SIGXFSZ"),
        libc::SIGVTALRM => Cow::Borrowed("SIGVTALRM"),
        libc::SIGPROF => Cow::Borrowed("SIGPROF"),
        libc::SIGWINCH => Cow::Borrowed("SIGWINCH"),
        libc::SIGIO => Cow::Borrowed("SIGIO"),
        libc::SIGSYS => Cow::Borrowed("SIGSYS"),
        _ => {
            if (34..=64).contains(&signum) {
                Cow::Owned(format!("SIGRT{}", signum - 34))
            } else {
                Cow::Owned(format!("UNKNOWN({signum})"))
            }
        }
    }
}
