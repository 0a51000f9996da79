//! Wait Outcome

/// Exactly one per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The element exists
    Found,
    /// The element did not appear within the budget
    TimedOut,
    /// The device could not be reached or the exchange failed
    DeviceUnreachable { message: String },
}

impl WaitOutcome {
    /// Process exit status for shell callers
    pub fn exit_code(&self) -> u8 {
        match self {
            WaitOutcome::Found => 0,
            WaitOutcome::TimedOut => 1,
            WaitOutcome::DeviceUnreachable { .. } => 2,
        }
    }

    /// The single stderr line, only for the exit-2 case
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            WaitOutcome::DeviceUnreachable { message } => {
                Some(format!("Device unreachable: {}", message))
            }
            _ => None,
        }
    }
}
