//! POSIX shell quoting for command strings built on the domain side

/// Quote a string as one single-quoted shell word
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
