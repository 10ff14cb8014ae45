// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use std::fmt::{self, Write as _};

use log::trace;
use scrawl_common::{ArgType, ANSI_RESET, MAX_PATHNAME_LEN};

use crate::memory::MemoryReader;

/// Values outside of +/- this are printed as hex.
const DECIMAL_LIMIT: i64 = 16384;

/// Appends the rendering of `reg` interpreted as `ty` to `out`.
pub fn decode_argtype(
    out: &mut String,
    reg: u64,
    ty: ArgType,
    mem: &dyn MemoryReader,
) -> fmt::Result {
    match ty {
        ArgType::Pathname => match mem.read_cstr(reg, MAX_PATHNAME_LEN) {
            Ok(bytes) => write_pathname(out, &bytes),
            Err(e) => {
                trace!("unreadable pathname at 0x{reg:x}: {e}");
                write!(out, "0x{reg:x}")
            }
        },
        ArgType::Pid | ArgType::Fd => write!(out, "{ANSI_RESET}{}", reg as i64),
        ArgType::Mode => write!(out, "{ANSI_RESET}{:o}", reg as u32),
        ArgType::Address
        | ArgType::NonNullAddress
        | ArgType::Iovec
        | ArgType::Sockaddr
        | ArgType::Op
        | ArgType::List => write!(out, "0x{reg:x}"),
        ArgType::Mmap => write_pointer(out, reg),
        ArgType::Undefined
        | ArgType::Len
        | ArgType::Range
        | ArgType::Cpu
        | ArgType::IovecLen
        | ArgType::SockaddrLen => {
            write_numeric(out, reg)?;
            out.write_str(ANSI_RESET)
        }
    }
}

/// Quoted pathname, at most `MAX_PATHNAME_LEN` bytes between the quotes.
/// Bytes that are not valid UTF-8 are escaped as `\xNN`; an escape that
/// would overrun the limit is dropped along with everything after it.
fn write_pathname(out: &mut String, bytes: &[u8]) -> fmt::Result {
    let mut left = MAX_PATHNAME_LEN;

    out.push('"');
    'chunks: for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c.len_utf8() > left {
                break 'chunks;
            }
            out.push(c);
            left -= c.len_utf8();
        }
        for b in chunk.invalid() {
            if left < 4 {
                break 'chunks;
            }
            write!(out, "\\x{b:02x}")?;
            left -= 4;
        }
    }
    out.push('"');

    Ok(())
}

/// Signed decimal for small magnitudes, hex for everything else.
pub fn write_numeric(out: &mut String, reg: u64) -> fmt::Result {
    let signed = reg as i64;
    if (-DECIMAL_LIMIT..=DECIMAL_LIMIT).contains(&signed) {
        write!(out, "{signed}")
    } else {
        write!(out, "0x{reg:x}")
    }
}

/// Pointer in the same shape glibc's `%p` uses.
fn write_pointer(out: &mut String, reg: u64) -> fmt::Result {
    if reg == 0 {
        out.write_str("(nil)")
    } else {
        write!(out, "0x{reg:x}")
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;
    use crate::memory::{NullMemory, OwnedStrings};

    fn decode(reg: u64, ty: ArgType) -> String {
        let mut out = String::new();
        decode_argtype(&mut out, reg, ty, &NullMemory).unwrap();
        out
    }

    #[test]
    fn mode_is_octal() {
        assert_eq!(decode(0o755, ArgType::Mode), format!("{ANSI_RESET}755"));
        assert_eq!(decode(0o644, ArgType::Mode), format!("{ANSI_RESET}644"));
    }

    #[test]
    fn pid_and_fd_are_signed() {
        assert_eq!(decode(1234, ArgType::Pid), format!("{ANSI_RESET}1234"));
        assert_eq!(decode(-1i64 as u64, ArgType::Fd), format!("{ANSI_RESET}-1"));
    }

    #[test]
    fn addresses_are_hex() {
        for ty in [
            ArgType::Address,
            ArgType::NonNullAddress,
            ArgType::Iovec,
            ArgType::Sockaddr,
            ArgType::Op,
            ArgType::List,
        ] {
            assert_eq!(decode(0x7fff_dead_beef, ty), "0x7fffdeadbeef");
        }
        assert_eq!(decode(0, ArgType::Address), "0x0");
    }

    #[test]
    fn mmap_uses_pointer_format() {
        assert_eq!(decode(0x7f12_3456_7000, ArgType::Mmap), "0x7f1234567000");
        assert_eq!(decode(0, ArgType::Mmap), "(nil)");
    }

    #[test]
    fn numeric_family() {
        for ty in [
            ArgType::Undefined,
            ArgType::Len,
            ArgType::Range,
            ArgType::Cpu,
            ArgType::IovecLen,
            ArgType::SockaddrLen,
        ] {
            assert_eq!(decode(100, ty), format!("100{ANSI_RESET}"));
            assert_eq!(decode(20000, ty), format!("0x4e20{ANSI_RESET}"));
            assert_eq!(decode(-5i64 as u64, ty), format!("-5{ANSI_RESET}"));
        }
    }

    #[test]
    fn numeric_boundaries_are_inclusive() {
        assert_eq!(decode(16384, ArgType::Len), format!("16384{ANSI_RESET}"));
        assert_eq!(
            decode(-16384i64 as u64, ArgType::Len),
            format!("-16384{ANSI_RESET}")
        );
        assert_eq!(decode(16385, ArgType::Len), format!("0x4001{ANSI_RESET}"));
        assert_eq!(
            decode(-16385i64 as u64, ArgType::Len),
            format!("0xffffffffffffbfff{ANSI_RESET}")
        );
    }

    #[test]
    fn pathname_is_quoted() {
        let mut mem = OwnedStrings::new();
        let addr = mem.insert(CString::new("/tmp/x").unwrap());

        let mut out = String::new();
        decode_argtype(&mut out, addr, ArgType::Pathname, &mem).unwrap();
        assert_eq!(out, "\"/tmp/x\"");
    }

    #[test]
    fn pathname_is_capped() {
        let mut mem = OwnedStrings::new();
        let long = "a".repeat(MAX_PATHNAME_LEN * 2);
        let addr = mem.insert(CString::new(long).unwrap());

        let mut out = String::new();
        decode_argtype(&mut out, addr, ArgType::Pathname, &mem).unwrap();
        assert_eq!(out.len(), MAX_PATHNAME_LEN + 2);
    }

    #[test]
    fn pathname_escapes_invalid_utf8() {
        let mut mem = OwnedStrings::new();
        let addr = mem.insert(CString::new(vec![0xff, 0xfe, b'a']).unwrap());

        let mut out = String::new();
        decode_argtype(&mut out, addr, ArgType::Pathname, &mem).unwrap();
        assert_eq!(out, r#""\xff\xfea""#);
    }

    #[test]
    fn pathname_keeps_multibyte_text() {
        let mut mem = OwnedStrings::new();
        let addr = mem.insert(CString::new("/tmp/caf\u{e9}").unwrap());

        let mut out = String::new();
        decode_argtype(&mut out, addr, ArgType::Pathname, &mem).unwrap();
        assert_eq!(out, "\"/tmp/caf\u{e9}\"");
    }

    #[test]
    fn escaped_pathname_stays_within_cap() {
        let mut mem = OwnedStrings::new();
        let addr = mem.insert(CString::new(vec![0xff; MAX_PATHNAME_LEN]).unwrap());

        let mut out = String::new();
        decode_argtype(&mut out, addr, ArgType::Pathname, &mem).unwrap();
        assert_eq!(out.len(), MAX_PATHNAME_LEN + 2);
        assert!(out.starts_with(r#""\xff\xff"#));
    }

    #[test]
    fn unreadable_pathname_falls_back_to_address() {
        assert_eq!(decode(0xdead0000, ArgType::Pathname), "0xdead0000");
    }
}
