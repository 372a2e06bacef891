//! CLI command handlers, one per file.

mod resolve;
mod serve;
mod types;

pub use resolve::run_resolve;
pub use serve::{run_serve, ServeOverrides};
pub use types::run_types;
