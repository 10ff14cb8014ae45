// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>


/// Renders the prefix and postfix of the record built by `$init` through a
/// monochrome worker and compares the console output.
#[macro_export]
macro_rules! render_test {
    ($name:ident, $init:block, $expected:expr) => {
        #[test]
        fn $name() {
            let (mut rec, mem): (Box<scrawl_common::CallRecord>, $crate::memory::OwnedStrings) =
                $init;

            let config = $crate::config::OutputConfig {
                monochrome: true,
                ..Default::default()
            };
            let router =
                $crate::output::OutputRouter::new(config, Vec::new(), $crate::output::NoLogSink);
            let mut worker = $crate::worker::Worker::new(
                scrawl_common::ChildIdentity { num: 0, pid: 1234 },
                mem,
                router,
            );

            worker.output_syscall_prefix(&mut rec).unwrap();
            worker.output_syscall_postfix(&mut rec).unwrap();

            assert_eq!(
                String::from_utf8_lossy(worker.router().console())
                    .to_string()
                    .as_str(),
                $expected
            );
        }
    };
}
