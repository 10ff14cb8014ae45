// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use std::{ffi::CString, io, path::PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use clap::{ArgAction, Parser};
use log::debug;
use scrawl::{
    config::OutputConfig,
    memory::OwnedStrings,
    output::{LogFile, OutputRouter},
    postmortem::dump_record,
    table::{syscall_entry, syscall_nr_from_name},
    worker::Worker,
};
use scrawl_common::{ArgType, CallRecord, ChildIdentity, MAX_ARGS};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Lower the verbosity; syscall lines are only echoed at full verbosity
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    /// Write a plain-text log per child into this directory
    #[arg(long = "logging")]
    log_dir: Option<PathBuf>,

    /// Strip colours from console output
    #[arg(long)]
    monochrome: bool,

    /// Look the syscall up in the 32-bit table
    #[arg(long = "32bit")]
    do32bit: bool,

    /// Child slot number to report
    #[arg(long, default_value_t = 0)]
    child: u32,

    /// Sequence number of the call
    #[arg(long, default_value_t = 0)]
    seq: u64,

    /// Return value of the call
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    retval: String,

    /// errno captured after the call
    #[arg(long, default_value_t = 0)]
    errno: i32,

    /// Also print what a postmortem reader would find, on stderr
    #[arg(long)]
    postmortem: bool,

    /// Syscall name
    syscall: String,

    /// Arguments: numbers (decimal, 0x hex or 0o octal), or strings for pathnames
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
}

fn parse_number(s: &str) -> Result<u64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let value = if let Some(hex) = digits.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(octal) = digits.strip_prefix("0o") {
        u64::from_str_radix(octal, 8)
    } else {
        digits.parse()
    }
    .with_context(|| format!("Invalid number: {s}"))?;

    Ok(if negative {
        value.wrapping_neg()
    } else {
        value
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let nr = syscall_nr_from_name(&args.syscall, args.do32bit)
        .ok_or_else(|| anyhow!("Unknown syscall name: {}", args.syscall))?;
    let entry = syscall_entry(nr, args.do32bit)
        .ok_or_else(|| anyhow!("No table entry for syscall {nr}"))?;

    if args.args.len() > entry.num_args {
        bail!(
            "{} takes {} argument(s), {} given",
            entry.name,
            entry.num_args,
            args.args.len()
        );
    }

    let mut mem = OwnedStrings::new();
    let mut regs = [0u64; MAX_ARGS];
    for (i, arg) in args.args.iter().enumerate() {
        regs[i] = match entry.args[i].ty {
            ArgType::Pathname => mem.insert(CString::new(arg.as_str())?),
            _ => parse_number(arg)?,
        };
    }

    let retval = parse_number(&args.retval)?;

    let config = OutputConfig {
        logging: args.log_dir.is_some(),
        monochrome: args.monochrome,
        ..OutputConfig::with_quiet_flags(args.quiet)
    };
    debug!("output configuration: {config:?}");

    let logs = args
        .log_dir
        .as_deref()
        .map(|dir| LogFile::for_child(dir, args.child));
    let router = OutputRouter::new(config, io::stdout(), logs);

    let child = ChildIdentity {
        num: args.child,
        pid: std::process::id(),
    };
    let mut worker = Worker::new(child, mem, router);

    let mut rec = Box::new(CallRecord::new(nr, args.do32bit, args.seq, regs));
    worker.output_syscall_prefix(&mut rec)?;

    rec.set_result(retval as i64, args.errno);
    worker.output_syscall_postfix(&mut rec)?;

    if args.postmortem {
        eprint!("{}", dump_record(&rec));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(parse_number("42").unwrap(), 42);
        assert_eq!(parse_number("0x4e20").unwrap(), 20000);
        assert_eq!(parse_number("0o644").unwrap(), 0o644);
        assert_eq!(parse_number("-2").unwrap(), -2i64 as u64);
        assert!(parse_number("nope").is_err());
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory as _;
        Args::command().debug_assert();
    }
}
