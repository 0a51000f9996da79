//! Unix permission bits for a deployed file.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Permission mode, stored as the raw octal bits (`0o755`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileModeError {
    #[error("invalid file mode '{0}': expected up to 4 octal digits")]
    Invalid(String),
}

impl FileMode {
    pub const EXECUTABLE: FileMode = FileMode(0o755);
    pub const READABLE: FileMode = FileMode(0o644);

    pub fn new(bits: u32) -> Result<Self, FileModeError> {
        if bits > 0o7777 {
            return Err(FileModeError::Invalid(format!("{:o}", bits)));
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// Parses the form printed by `stat -c %a` (`755`, `644`, `4755`, `0`).
impl FromStr for FileMode {
    type Err = FileModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !(1..=4).contains(&trimmed.len()) {
            return Err(FileModeError::Invalid(trimmed.to_string()));
        }
        let bits = u32::from_str_radix(trimmed, 8)
            .map_err(|_| FileModeError::Invalid(trimmed.to_string()))?;
        Self::new(bits)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03o}", self.0)
    }
}
