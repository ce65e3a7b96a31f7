//! Logging utilities for user-entered text (titles, notes, names) so log lines stay single-line.

/// Default cap on how much of a user string ends up in a log line.
pub const MAX_LOG_PREVIEW: usize = 80;

/// Escape a string for single-line logging, capped at [`MAX_LOG_PREVIEW`] characters.
pub fn escape_log(s: &str) -> String {
    escape_log_with_limit(s, MAX_LOG_PREVIEW)
}

/// Escape `\n`, `\r`, `\t`, backslash and other control characters; truncate with an ellipsis.
pub fn escape_log_with_limit(s: &str, max_preview: usize) -> String {
    let mut out = String::with_capacity(s.len().min(max_preview) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= max_preview {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
