// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

/// Loudest verbosity; every `-q` takes one level off.
pub const MAX_LOGLEVEL: u8 = 3;

/// Syscall lines go to the console only at this verbosity or above.
pub const SYSCALL_ECHO_LEVEL: u8 = MAX_LOGLEVEL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub quiet_level: u8,
    pub logging: bool,
    pub monochrome: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            quiet_level: MAX_LOGLEVEL,
            logging: false,
            monochrome: false,
        }
    }
}

impl OutputConfig {
    /// Configuration after `quiet_flags` occurrences of `-q`.
    pub fn with_quiet_flags(quiet_flags: u8) -> Self {
        OutputConfig {
            quiet_level: MAX_LOGLEVEL.saturating_sub(quiet_flags),
            ..Default::default()
        }
    }

    pub fn console_enabled(&self) -> bool {
        self.quiet_level >= SYSCALL_ECHO_LEVEL
    }
}
