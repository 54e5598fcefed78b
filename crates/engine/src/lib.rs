mod context;
mod error;
mod matcher;
mod pipeline;
mod rules;

pub use context::SweepContext;
pub use error::ConfigError;
pub use matcher::*;
pub use pipeline::*;
pub use rules::*;
