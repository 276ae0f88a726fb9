use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pair_rotation::store;

/// Whether stdin is an interactive terminal.
pub fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    let is_tty = {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(io::stdin().as_raw_fd()) == 1 }
    };

    #[cfg(windows)]
    let is_tty = {
        use std::os::windows::io::AsRawHandle;
        let handle = io::stdin().as_raw_handle();
        let mut mode: u32 = 0;
        // GetConsoleMode returns 0 if the handle is not a console
        unsafe {
            #[link(name = "kernel32")]
            extern "system" {
                fn GetConsoleMode(hConsoleHandle: *mut std::ffi::c_void, lpMode: *mut u32) -> i32;
            }
            GetConsoleMode(handle as *mut std::ffi::c_void, &mut mode) != 0
        }
    };

    #[cfg(not(any(unix, windows)))]
    let is_tty = false;

    is_tty
}

/// Read roster entries from stdin.
///
/// Piped input is read to EOF. On a terminal a prompt is shown, entries are
/// echoed, and input ends at EOF (Ctrl+D / Ctrl+Z+Enter) or once the Ctrl+C
/// handler sets `interrupted`.
pub fn read_roster_stdin(interrupted: &Arc<AtomicBool>) -> io::Result<Vec<String>> {
    if !stdin_is_tty() {
        return store::read_roster_from(io::stdin().lock());
    }

    eprintln!("Enter participant names, one per line:");
    eprintln!("  - Ctrl+D (Unix/Mac) or Ctrl+Z+Enter (Windows): finish and match");
    eprintln!("  - Ctrl+C: stop early and match whoever was entered");
    eprintln!();

    // Read from /dev/tty on Unix so a redirected stdout does not matter.
    let reader: Box<dyn BufRead> = if cfg!(unix) {
        File::open("/dev/tty")
            .map(|f| Box::new(BufReader::new(f)) as Box<dyn BufRead>)
            .unwrap_or_else(|_| Box::new(BufReader::new(io::stdin())))
    } else {
        Box::new(BufReader::new(io::stdin()))
    };

    let mut roster = Vec::new();
    for line in reader.lines() {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        eprintln!("  added: {}", line.trim());
        roster.push(line);
    }

    Ok(roster)
}
