//! Privilege tier an operation runs under on the remote host.

/// Normal operations run as the SSH login user; elevated ones go through `sudo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Privilege {
    #[default]
    Normal,
    Elevated,
}

impl Privilege {
    pub fn is_elevated(&self) -> bool {
        matches!(self, Privilege::Elevated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Normal => "normal",
            Privilege::Elevated => "elevated",
        }
    }
}
