use super::{Query, TemporalMode};
use crate::{schema::EntityTypeId, Db, Entity, Error, Result};

use chrono::{DateTime, Utc};
use std::{fmt, marker::PhantomData};

/// A typed handle to the set of `E` entities in a [`Db`].
///
/// A handle is bound to a database and an entity type, or unbound. Building
/// a query from an unbound handle fails with an invalid argument error.
pub struct DataSet<E> {
    binding: Option<Binding>,
    _p: PhantomData<fn() -> E>,
}

#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) db: Db,
    pub(crate) entity: EntityTypeId,
}

impl<E: Entity> DataSet<E> {
    pub(crate) fn bound(db: Db, entity: EntityTypeId) -> DataSet<E> {
        DataSet {
            binding: Some(Binding { db, entity }),
            _p: PhantomData,
        }
    }

    /// A handle not bound to any database.
    pub fn unbound() -> DataSet<E> {
        DataSet {
            binding: None,
            _p: PhantomData,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn db(&self) -> Option<&Db> {
        self.binding.as_ref().map(|binding| &binding.db)
    }

    pub fn entity(&self) -> Option<EntityTypeId> {
        self.binding.as_ref().map(|binding| binding.entity)
    }

    pub(crate) fn binding(&self) -> Result<&Binding> {
        self.binding.as_ref().ok_or_else(|| {
            Error::invalid_argument(format!(
                "data set for `{}` is not bound to a database",
                E::NAME
            ))
        })
    }

    /// Query current state, tracked according to the database default.
    pub fn all(&self) -> Result<Query<E>> {
        self.query_root(TemporalMode::Current)
    }

    /// Query the rows that were valid at `at`.
    pub fn temporal_as_of(&self, at: DateTime<Utc>) -> Result<Query<E>> {
        self.query_root(TemporalMode::AsOf(at))
    }

    pub fn temporal_from_to(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Query<E>> {
        self.query_root(TemporalMode::FromTo { from, to })
    }

    pub fn temporal_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Query<E>> {
        self.query_root(TemporalMode::Between { from, to })
    }

    pub fn temporal_contained_in(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Query<E>> {
        self.query_root(TemporalMode::ContainedIn { from, to })
    }

    /// Query every historical version along with current state.
    pub fn temporal_all(&self) -> Result<Query<E>> {
        self.query_root(TemporalMode::All)
    }

    /// Build a query rooted on this set under `mode`.
    pub fn query_root(&self, mode: TemporalMode) -> Result<Query<E>> {
        super::construct(self, mode)
    }
}

impl<E: Entity> Default for DataSet<E> {
    fn default() -> Self {
        DataSet::unbound()
    }
}

impl<E> Clone for DataSet<E> {
    fn clone(&self) -> Self {
        DataSet {
            binding: self.binding.clone(),
            _p: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for DataSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("DataSet");
        s.field("entity", &E::NAME);

        match &self.binding {
            Some(binding) => s.field("id", &binding.entity),
            None => s.field("id", &"unbound"),
        };

        s.finish()
    }
}
