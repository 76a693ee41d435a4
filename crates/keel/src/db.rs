mod builder;
pub use builder::Builder;

mod compiled;
pub use compiled::Compiled;

use crate::{
    query::{DataSet, Tracking},
    schema::Model,
    Entity, Provider, Session,
};

use std::sync::Arc;

/// A handle to a finalized model and the provider executing its queries.
///
/// Cloning is cheap; every clone shares the same model.
#[derive(Debug, Clone)]
pub struct Db {
    model: Arc<Model>,
    provider: Arc<dyn Provider>,
    default_tracking: Tracking,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Tracking used by queries that do not force their own
    pub fn default_tracking(&self) -> Tracking {
        self.default_tracking
    }

    /// A handle to the set of `E` entities.
    ///
    /// The handle is unbound when `E` is not part of the model; building a
    /// query from it fails.
    pub fn set<E: Entity>(&self) -> DataSet<E> {
        match self.model.entity_type_of::<E>() {
            Some(entity) => DataSet::bound(self.clone(), entity.id),
            None => {
                log::debug!("entity not registered; data set is unbound; entity={}", E::NAME);
                DataSet::unbound()
            }
        }
    }

    /// Start a change-tracking session.
    pub fn session(&self) -> Session {
        Session::new()
    }
}
