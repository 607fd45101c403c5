// File: crates/termcandle-cli/src/term.rs
// Summary: Terminal size query through ioctl(TIOCGWINSZ).

use std::io;
use std::mem;
use std::os::unix::io::RawFd;

use libc::{winsize, TIOCGWINSZ};
use termcandle_core::TermSize;

/// Window size in character cells of the terminal behind `fd`.
///
/// A zero row or column count, which some pseudo terminals report, is
/// replaced by the fallback size.
pub fn terminal_size(fd: RawFd) -> io::Result<TermSize> {
    // SAFETY: `ioctl` is an FFI call. `winsz` is a valid, zeroed winsize.
    unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(TermSize::new(winsz.ws_row as usize, winsz.ws_col as usize).or_fallback())
    }
}

pub fn stdout_size() -> io::Result<TermSize> {
    terminal_size(libc::STDOUT_FILENO)
}

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
