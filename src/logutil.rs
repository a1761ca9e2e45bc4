//! Helpers for putting raw player input into log records.

/// Byte budget for input echoed into a log record.
pub const MAX_LOGGED_INPUT: usize = 120;

/// Make a typed line safe for a single-line log record.
///
/// Control characters and backslashes use Rust escape syntax (`\n`, `\t`,
/// `\u{1b}`, `\\`). Output stops at the last whole character that fits in
/// [`MAX_LOGGED_INPUT`] bytes and is then marked with `…`.
pub fn escape_input(line: &str) -> String {
    let mut out = String::with_capacity(line.len().min(MAX_LOGGED_INPUT) + 4);
    for ch in line.chars() {
        let before = out.len();
        if ch == '\\' || ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
        if out.len() > MAX_LOGGED_INPUT {
            out.truncate(before);
            out.push('…');
            break;
        }
    }
    out
}
