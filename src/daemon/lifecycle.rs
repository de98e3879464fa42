//! Process daemonization: fork, session setup, stdio redirection.
//!
//! `Foreground → Detached → Backgrounded`, one way. The parent half of the
//! fork exits 0 immediately (the benign handoff an external supervisor
//! observes); the child resets its umask, starts a new session, moves to a
//! fixed working directory and points its standard streams at `/dev/null`.
//! Any stage failure is fatal — the caller reports it and exits non-zero.

use std::fs::OpenOptions;
use std::os::fd::AsRawFd;
use std::process;

use nix::sys::stat::{Mode, umask};
use nix::unistd::{ForkResult, chdir, dup2, fork, setsid};

use crate::core::errors::{MwdError, Result};

/// Working directory adopted once backgrounded. A fixed root keeps the
/// daemon off any mount an operator might want to unmount.
pub const WORKING_DIRECTORY: &str = "/";

/// Detach from the controlling terminal and background the process.
///
/// Called exactly once at startup, after the initial configuration load has
/// succeeded — a daemon with no valid configuration never gets this far. On
/// return the process is the session-leading child; there is no transition
/// back to the foreground.
pub fn enter_background() -> Result<()> {
    // fork(2) has no safe wrapper; nothing runs between the fork and the
    // parent's exit, and the child continues on a single thread.
    #[allow(unsafe_code)]
    let forked = unsafe { fork() }.map_err(|errno| stage_error("fork", errno))?;
    if let ForkResult::Parent { .. } = forked {
        process::exit(0);
    }

    umask(Mode::empty());
    setsid().map_err(|errno| stage_error("setsid", errno))?;
    chdir(WORKING_DIRECTORY).map_err(|errno| stage_error("chdir", errno))?;
    redirect_standard_streams()
}

/// Point stdin/stdout/stderr at `/dev/null`. The original descriptors are
/// closed by the `dup2`; redirecting instead of bare-closing keeps fds 0-2
/// occupied so later `open` calls cannot land on them.
fn redirect_standard_streams() -> Result<()> {
    let devnull = OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/null")
        .map_err(|err| MwdError::Daemonize {
            stage: "open /dev/null",
            details: err.to_string(),
        })?;
    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        dup2(devnull.as_raw_fd(), fd).map_err(|errno| stage_error("dup2", errno))?;
    }
    // `devnull` drops here, closing the scratch descriptor.
    Ok(())
}

fn stage_error(stage: &'static str, errno: nix::errno::Errno) -> MwdError {
    MwdError::Daemonize {
        stage,
        details: errno.to_string(),
    }
}
