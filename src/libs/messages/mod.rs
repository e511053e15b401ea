//! User-facing messages shared by the CLI, the server logs and the forms.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
