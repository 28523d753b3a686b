//! Error types

mod config;
mod resolve;

pub use config::*;
pub use resolve::*;

/// Any error the widget core can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The widget was configured inconsistently.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A query could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
