//! Raw-mode session with RAII restore
//!
//! The guard owns the original attribute set. Dropping it puts the terminal
//! back the way it was, whether the loop returned normally, bailed out with
//! `?`, or unwound from a panic.

use std::os::fd::BorrowedFd;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::termios::{apply_attributes, capture_attributes, RawOptions, TerminalAttributes};

/// Terminal held in raw mode until dropped
pub struct RawModeGuard<'fd> {
    fd: BorrowedFd<'fd>,
    original: TerminalAttributes,
    armed: bool,
}

impl<'fd> RawModeGuard<'fd> {
    /// Capture the current attributes of `fd`, then switch it to raw mode.
    ///
    /// Nothing is restored if this fails: either the capture failed and the
    /// terminal was never touched, or the apply failed and the terminal kept
    /// its original set. Options that would make reads non-blocking are
    /// rejected before the terminal is queried.
    pub fn enter(fd: BorrowedFd<'fd>, options: RawOptions) -> Result<Self> {
        options.validate()?;
        let original = capture_attributes(fd)?;
        debug!(?original, "captured terminal attributes");

        let raw = original.derive_raw(options);
        apply_attributes(fd, &raw)?;
        info!(
            vmin = options.min_bytes,
            vtime = options.timeout_tenths,
            "entered raw mode"
        );

        Ok(Self {
            fd,
            original,
            armed: true,
        })
    }

    /// The attribute set that will be restored
    pub fn original(&self) -> &TerminalAttributes {
        &self.original
    }

    /// Restore now and report the result instead of leaving it to `Drop`
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.restore_original()
    }

    fn restore_original(&self) -> Result<()> {
        apply_attributes(self.fd, &self.original)?;
        info!("restored terminal attributes");
        Ok(())
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Best effort: report and keep exiting.
        if let Err(e) = self.restore_original() {
            warn!(error = %e, "failed to restore terminal attributes");
            eprintln!("error: {}", e);
        }
    }
}
