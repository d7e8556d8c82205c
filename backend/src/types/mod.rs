mod environment;
pub mod error;
pub mod extractors;

pub use environment::Environment;
pub use error::AppError;
pub use extractors::ValidatedQuery;
