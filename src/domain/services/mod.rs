//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod cascade;
mod manifest;
mod shell;

pub use cascade::{mesh_rules, CascadeAction, CascadeRule, CascadeRules, FiredRule, Trigger};
pub use manifest::{
    journald_dropin, logrotate_dropin, Manifest, ManifestParams, CONTACTS, DEVICE_SCRIPT,
    JOURNALD_DROPIN, LOGROTATE_DROPIN, SCRIPTS, UNITS, WATCHDOG_SCRIPTS, WATCHDOG_SERVICES,
    WATCHDOG_UNITS,
};
pub use shell::shell_quote;
