// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use scrawl_common::CapacityExceeded;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The syscall table has no entry for this number and ABI.
    #[error("unknown syscall {nr} (32-bit: {do32bit})")]
    UnknownSyscall { nr: u32, do32bit: bool },

    /// A rendering outgrew its shared buffer. Buffer sizes are supposed to
    /// bound the worst case, so this means they are misconfigured.
    #[error(transparent)]
    Capacity(#[from] CapacityExceeded),

    #[error("formatting failed")]
    Fmt(#[from] std::fmt::Error),
}
