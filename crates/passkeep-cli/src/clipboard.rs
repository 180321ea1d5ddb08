//! Best-effort clipboard hand-off through the platform's own tool.
//!
//! A failed copy must never sink the operation that produced the
//! secret, so everything here degrades to a notice and the callers
//! carry on.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// Candidate clipboard commands in preference order for this platform.
#[cfg(target_os = "macos")]
const TOOLS: &[&[&str]] = &[&["pbcopy"]];
#[cfg(target_os = "windows")]
const TOOLS: &[&[&str]] = &[&["clip"]];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const TOOLS: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// Copy `text` to the system clipboard. Returns whether any tool
/// accepted it.
pub fn copy(text: &str) -> bool {
    for tool in TOOLS {
        if pipe_to(tool, text) {
            debug!(tool = tool[0], "copied to clipboard");
            return true;
        }
    }
    false
}

/// Copy and tell the user how it went; failure is only a notice.
pub fn copy_with_notice(text: &str) {
    if copy(text) {
        println!("Copied to clipboard.");
    } else {
        warn!("clipboard copy failed; no usable clipboard tool");
        println!("Could not reach the clipboard; use the value shown above.");
    }
}

fn pipe_to(argv: &[&str], text: &str) -> bool {
    let Some((program, args)) = argv.split_first() else {
        return false;
    };
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(_) => return false,
    };
    // stdin handle drops at the end of the closure, closing the pipe
    // before we wait
    let fed = child
        .stdin
        .take()
        .and_then(|mut stdin| stdin.write_all(text.as_bytes()).ok())
        .is_some();
    let status = child.wait();
    fed && status.map(|status| status.success()).unwrap_or(false)
}
