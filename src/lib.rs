//! rawkey - see what your keyboard actually sends
//!
//! Puts the terminal in raw mode and prints the value of every byte read
//! from it until `q` is pressed. The original terminal settings come back
//! when the session guard is dropped.

pub mod config;
pub mod echo;
pub mod error;
pub mod logging;
pub mod session;
pub mod termios;

pub use echo::{Echo, Step, TtyReader};
pub use error::{Error, Result};
pub use session::RawModeGuard;
pub use termios::{RawOptions, TerminalAttributes};
