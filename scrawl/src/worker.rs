// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use std::io::Write;

use log::trace;
use scrawl_common::{publish, CallRecord, ChildIdentity, POSTBUFFER_LEN, PREBUFFER_LEN};

use crate::{
    error::RenderError,
    memory::MemoryReader,
    output::{LogSinks, OutputRouter},
    render::{render_syscall_postfix, render_syscall_prefix},
    table::syscall_entry,
};

/// Rendering state owned by one worker: its identity, scratch space sized
/// for the shared buffers, and where output ends up.
pub struct Worker<C: Write, S: LogSinks, M: MemoryReader> {
    child: ChildIdentity,
    prefix: String,
    postfix: String,
    mem: M,
    router: OutputRouter<C, S>,
}

impl<C: Write, S: LogSinks, M: MemoryReader> Worker<C, S, M> {
    pub fn new(child: ChildIdentity, mem: M, router: OutputRouter<C, S>) -> Self {
        Worker {
            child,
            prefix: String::with_capacity(PREBUFFER_LEN),
            postfix: String::with_capacity(POSTBUFFER_LEN),
            mem,
            router,
        }
    }

    pub fn router(&self) -> &OutputRouter<C, S> {
        &self.router
    }

    /// Renders the "about to call" line for `rec` into scratch space.
    pub fn render_prefix(&mut self, rec: &CallRecord) -> Result<&str, RenderError> {
        let entry = syscall_entry(rec.nr, rec.do32bit).ok_or(RenderError::UnknownSyscall {
            nr: rec.nr,
            do32bit: rec.do32bit,
        })?;

        self.prefix.clear();
        render_syscall_prefix(&mut self.prefix, self.child, rec, entry, &self.mem)?;

        Ok(&self.prefix)
    }

    pub fn render_postfix(&mut self, rec: &CallRecord) -> Result<&str, RenderError> {
        self.postfix.clear();
        render_syscall_postfix(&mut self.postfix, rec)?;

        Ok(&self.postfix)
    }

    /// Publishes the prefix into the record's shared buffer and routes it.
    ///
    /// The postfix buffer is cleared as well, since whatever it holds belongs
    /// to the previous call. A capacity error is fatal: the shared buffers are
    /// sized to hold any rendering, so the caller must stop the run.
    pub fn output_syscall_prefix(&mut self, rec: &mut CallRecord) -> Result<(), RenderError> {
        self.render_prefix(rec)?;

        let len = publish(&mut rec.prebuffer, self.prefix.as_bytes())?;
        publish(&mut rec.postbuffer, &[])?;
        trace!(
            "child {} published {len} byte prefix for op {}",
            self.child.num,
            rec.op_nr
        );

        self.router.route(&self.prefix);

        Ok(())
    }

    pub fn output_syscall_postfix(&mut self, rec: &mut CallRecord) -> Result<(), RenderError> {
        self.render_postfix(rec)?;

        let len = publish(&mut rec.postbuffer, self.postfix.as_bytes())?;
        trace!(
            "child {} published {len} byte postfix for op {}",
            self.child.num,
            rec.op_nr
        );

        self.router.route(&self.postfix);

        Ok(())
    }
}
