pub mod db;
pub use db::Db;

mod entity;
pub use entity::Entity;

pub mod provider;
pub use provider::Provider;

pub mod query;
pub use query::{DataSet, Query};

mod session;
pub use session::Session;

pub use keel_core::{bail, err, schema, Error, Result};
