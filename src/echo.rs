//! Byte echo loop
//!
//! Reads one byte at a time and prints what it is:
//! - control bytes (0-31, 127): `<value>\r\n`
//! - everything else: `<value> ('<byte>')\r\n`
//!
//! Output post-processing is off in raw mode, so every line ends in an
//! explicit `\r\n`.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::BorrowedFd;

use tracing::debug;

use crate::error::{Error, Op, Result};

/// The byte that ends the session (`q`)
pub const QUIT_BYTE: u8 = b'q';

/// How a byte is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// 0-31 and 127: printed as a number only
    Control,
    /// Printed as a number followed by the byte itself
    Printable,
}

/// Classify a byte. Bytes above 127 are not control characters.
pub fn classify(byte: u8) -> ByteClass {
    if byte.is_ascii_control() {
        ByteClass::Control
    } else {
        ByteClass::Printable
    }
}

/// Write the echo line for `byte`. The byte itself is written unmodified.
pub fn write_line<W: Write>(out: &mut W, byte: u8) -> io::Result<()> {
    match classify(byte) {
        ByteClass::Control => write!(out, "{}\r\n", byte),
        ByteClass::Printable => {
            write!(out, "{} ('", byte)?;
            out.write_all(&[byte])?;
            out.write_all(b"')\r\n")
        }
    }
}

/// Unbuffered reader over a terminal descriptor.
///
/// `io::Stdin` reads ahead into its own buffer, which would pull bytes past
/// the quit key off the terminal. `File` issues one `read(2)` per call.
pub struct TtyReader {
    file: File,
}

impl TtyReader {
    /// Read from a duplicate of `fd`
    pub fn new(fd: BorrowedFd<'_>) -> Result<Self> {
        let owned = fd.try_clone_to_owned().map_err(|e| Error::io(Op::Read, e))?;
        Ok(Self {
            file: File::from(owned),
        })
    }
}

impl Read for TtyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Result of one trip through the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Read returned no data (timeout)
    Idle,
    /// A byte was printed
    Echoed(u8),
    /// The quit byte was printed; stop
    Quit,
}

/// The await/classify/emit state machine
pub struct Echo<R, W> {
    input: R,
    output: W,
    echoed: u64,
}

impl<R: Read, W: Write> Echo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echoed: 0,
        }
    }

    /// Await one byte and print it.
    pub fn step(&mut self) -> Result<Step> {
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(0) => return Ok(Step::Idle),
            Ok(_) => {}
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                return Ok(Step::Idle);
            }
            Err(e) => return Err(Error::io(Op::Read, e)),
        }

        let byte = byte[0];
        debug!(byte, class = ?classify(byte), "read byte");
        write_line(&mut self.output, byte)
            .and_then(|()| self.output.flush())
            .map_err(|e| Error::io(Op::Write, e))?;
        self.echoed += 1;

        if byte == QUIT_BYTE {
            Ok(Step::Quit)
        } else {
            Ok(Step::Echoed(byte))
        }
    }

    /// Run until the quit byte. Returns the number of bytes echoed.
    pub fn run(&mut self) -> Result<u64> {
        while self.step()? != Step::Quit {}
        Ok(self.echoed)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
