// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

//! Reading the shared buffers back after their worker is gone.

use std::borrow::Cow;

use scrawl_common::CallRecord;

use crate::output::strip_style_markers;

/// The rendering held by a shared buffer: everything before the zero padding.
pub fn buffer_text(buf: &[u8]) -> Cow<'_, str> {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end])
}

/// The last call a record saw, as plain text. A call that never returned,
/// typically the one that took the worker down, is marked as such.
pub fn dump_record(rec: &CallRecord) -> String {
    let prefix = buffer_text(&rec.prebuffer);
    if prefix.is_empty() {
        return String::new();
    }

    let postfix = buffer_text(&rec.postbuffer);

    let mut out = strip_style_markers(&prefix).into_owned();
    if postfix.is_empty() {
        out.push_str("<no return>\n");
    } else {
        out.push_str(&strip_style_markers(&postfix));
    }

    out
}

#[cfg(test)]
mod tests {
    use scrawl_common::{publish, ANSI_GREEN, ANSI_RESET};

    use super::*;

    #[test]
    fn empty_record_dumps_nothing() {
        let rec = Box::new(CallRecord::new(0, false, 0, [0; 6]));
        assert_eq!(dump_record(&rec), "");
    }

    #[test]
    fn call_without_return() {
        let mut rec = Box::new(CallRecord::new(0, false, 0, [0; 6]));
        publish(&mut rec.prebuffer, b"[child0:1] [4] getpid() ").unwrap();
        assert_eq!(dump_record(&rec), "[child0:1] [4] getpid() <no return>\n");
    }

    #[test]
    fn completed_call() {
        let mut rec = Box::new(CallRecord::new(0, false, 0, [0; 6]));
        publish(&mut rec.prebuffer, b"[child0:1] [4] getpid() ").unwrap();
        let postfix = format!("{ANSI_GREEN}= 1{ANSI_RESET}\n");
        publish(&mut rec.postbuffer, postfix.as_bytes()).unwrap();
        assert_eq!(dump_record(&rec), "[child0:1] [4] getpid() = 1\n");
    }

    #[test]
    fn full_buffer_has_no_terminator() {
        assert_eq!(buffer_text(b"abc"), "abc");
        assert_eq!(buffer_text(b"ab\0\0"), "ab");
    }
}
