// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

pub mod config;
pub mod decode;
pub mod error;
pub mod format_helpers;
pub mod memory;
pub mod output;
pub mod postmortem;
pub mod render;
pub mod table;
pub mod worker;

pub use error::RenderError;

#[cfg(test)]
mod tests;
