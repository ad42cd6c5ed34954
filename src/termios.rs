//! Terminal attribute sets: capture, derive raw, apply
//!
//! Thin wrapper over `tcgetattr`/`tcsetattr`. Everything that touches the
//! device takes a borrowed descriptor so tests can point it at a pty.

use std::fmt;
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};

use crate::error::{Error, Op, Result};

/// `VTIME` is counted in tenths of a second
pub const DEFAULT_TIMEOUT_TENTHS: u8 = 40;

/// Tunable parts of the raw attribute set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOptions {
    /// `VMIN`: bytes a read waits for before returning
    pub min_bytes: u8,
    /// `VTIME`: read timeout in tenths of a second
    pub timeout_tenths: u8,
}

impl RawOptions {
    /// `VMIN = 0, VTIME = 0` makes every read return at once, turning the
    /// echo loop into a busy spin.
    pub fn validate(&self) -> Result<()> {
        if self.min_bytes == 0 && self.timeout_tenths == 0 {
            return Err(Error::NonBlockingRead);
        }
        Ok(())
    }
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            min_bytes: 0,
            timeout_tenths: DEFAULT_TIMEOUT_TENTHS,
        }
    }
}

/// Snapshot of a terminal's configuration
#[derive(Clone, Copy)]
pub struct TerminalAttributes(libc::termios);

impl TerminalAttributes {
    pub(crate) fn from_raw(termios: libc::termios) -> Self {
        Self(termios)
    }

    pub fn as_raw(&self) -> &libc::termios {
        &self.0
    }

    /// Derive the raw-mode set from this one. Bits not named here are kept.
    pub fn derive_raw(&self, options: RawOptions) -> Self {
        let mut raw = self.0;

        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag = (raw.c_cflag & !libc::CSIZE) | libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        raw.c_cc[libc::VMIN] = options.min_bytes;
        raw.c_cc[libc::VTIME] = options.timeout_tenths;

        Self(raw)
    }

    /// Canonical (line-buffered) input enabled
    pub fn is_canonical(&self) -> bool {
        self.0.c_lflag & libc::ICANON != 0
    }

    /// Terminal driver echoes input
    pub fn echoes(&self) -> bool {
        self.0.c_lflag & libc::ECHO != 0
    }

    pub fn min_bytes(&self) -> u8 {
        self.0.c_cc[libc::VMIN]
    }

    pub fn timeout_tenths(&self) -> u8 {
        self.0.c_cc[libc::VTIME]
    }
}

// Speeds are left out: some drivers report them differently on read-back.
impl PartialEq for TerminalAttributes {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.0, &other.0);
        a.c_iflag == b.c_iflag
            && a.c_oflag == b.c_oflag
            && a.c_cflag == b.c_cflag
            && a.c_lflag == b.c_lflag
            && a.c_cc == b.c_cc
    }
}

impl Eq for TerminalAttributes {}

impl fmt::Debug for TerminalAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalAttributes")
            .field("iflag", &format_args!("{:#o}", self.0.c_iflag))
            .field("oflag", &format_args!("{:#o}", self.0.c_oflag))
            .field("cflag", &format_args!("{:#o}", self.0.c_cflag))
            .field("lflag", &format_args!("{:#o}", self.0.c_lflag))
            .field("vmin", &self.min_bytes())
            .field("vtime", &self.timeout_tenths())
            .finish()
    }
}

/// Read the current attribute set of the terminal behind `fd`.
///
/// Fails with `tcgetattr` when `fd` is not a terminal.
pub fn capture_attributes(fd: BorrowedFd<'_>) -> Result<TerminalAttributes> {
    let mut termios = std::mem::MaybeUninit::<libc::termios>::uninit();
    // tcgetattr fills the whole struct on success
    let termios = unsafe {
        if libc::tcgetattr(fd.as_raw_fd(), termios.as_mut_ptr()) != 0 {
            return Err(Error::io(Op::Capture, io::Error::last_os_error()));
        }
        termios.assume_init()
    };
    Ok(TerminalAttributes::from_raw(termios))
}

/// Push `attrs` to the terminal behind `fd`, discarding pending input and
/// draining pending output first.
pub fn apply_attributes(fd: BorrowedFd<'_>, attrs: &TerminalAttributes) -> Result<()> {
    let rc = unsafe { libc::tcsetattr(fd.as_raw_fd(), libc::TCSAFLUSH, attrs.as_raw()) };
    if rc != 0 {
        return Err(Error::io(Op::Apply, io::Error::last_os_error()));
    }
    Ok(())
}

/// Pseudo-terminal helpers for tests
#[cfg(test)]
pub mod test_utils {
    use std::os::fd::{FromRawFd, OwnedFd};

    /// Open a pty pair, returning `(master, slave)`
    pub fn open_pty() -> (OwnedFd, OwnedFd) {
        let mut master = -1;
        let mut slave = -1;
        let rc = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(rc, 0, "openpty: {}", std::io::Error::last_os_error());
        unsafe { (OwnedFd::from_raw_fd(master), OwnedFd::from_raw_fd(slave)) }
    }
}
