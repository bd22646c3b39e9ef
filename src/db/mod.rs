//! Storage abstraction: the repository trait and its implementations.

pub mod repositories;
pub mod repository;

pub use repository::{RepositoryError, RepositoryResult, SwimRepository, TimeFilter};

#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
