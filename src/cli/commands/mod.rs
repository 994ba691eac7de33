//! Command implementations

mod config;
mod parse;
mod run;
mod state;

pub use config::show_config;
pub use parse::parse;
pub use run::run;
pub use state::state;
