//! Starting helper programs.
//!
//! Children are double-forked into their own session with null stdio, so they get reparented and
//! never become zombies of the caller.

use std::io;
use std::os::unix::process::CommandExt as _;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Spawns `command`, split on whitespace into the program and its arguments.
pub fn spawn(command: &str) -> anyhow::Result<()> {
    let mut words = command.split_whitespace();
    let program = words.next().context("empty command")?;

    let mut process = Command::new(program);
    process
        .args(words)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // SAFETY: setsid(), fork() and _exit() are async-signal-safe.
    unsafe {
        process.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }

            // The intermediate child exits right away; the grandchild goes on to exec.
            match libc::fork() {
                -1 => Err(io::Error::last_os_error()),
                0 => Ok(()),
                _ => libc::_exit(0),
            }
        });
    }

    let mut child = process
        .spawn()
        .with_context(|| format!("error spawning {program}"))?;

    // Reap the intermediate child.
    if let Err(err) = child.wait() {
        warn!("error waiting for the intermediate child of {program}: {err:?}");
    }
    debug!("spawned {program}");

    Ok(())
}
