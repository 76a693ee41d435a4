mod error;
pub use error::{Error, Violation};

pub mod query;
pub use query::QueryRoot;

pub mod schema;
pub use schema::Model;

/// A Result type alias that uses Keel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
