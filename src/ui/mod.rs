//! Terminal output primitives shared by the command handlers.

pub mod context;
pub mod error;
pub mod icon;
pub mod terminal;
pub mod theme;

pub use context::UiContext;
pub use error::format_error;
pub use icon::Icon;
