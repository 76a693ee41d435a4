mod data_set;
pub use data_set::DataSet;

pub use keel_core::query::{
    Capability, Period, Plan, QueryRoot, Row, Temporal, TemporalMode, TemporalRange, Tracking,
};

use crate::{Entity, Error, Result, Session};

use std::{fmt, marker::PhantomData, sync::Arc};

/// A query on a set of `E` entities, ready to execute.
pub struct Query<E> {
    root: QueryRoot,
    tracking: Tracking,
    _p: PhantomData<fn() -> E>,
}

/// Builds the query root for `set` under `mode` and wraps it in a query.
///
/// Every temporal mode yields a no-tracking query, whatever tracking the
/// database defaults to. Fails with an invalid argument error when `set` is
/// unbound or a range mode's start is not strictly before its end.
pub fn construct<E: Entity>(set: &DataSet<E>, mode: TemporalMode) -> Result<Query<E>> {
    let binding = set.binding()?;
    let temporal = Temporal::from_mode(mode)?;

    let root = QueryRoot::new(
        binding.db.model().clone(),
        binding.entity,
        binding.db.provider().clone(),
        temporal,
    )?;
    let tracking = root.tracking(binding.db.default_tracking());

    log::debug!(
        "query root constructed; entity={}; mode={mode}; tracking={tracking:?}",
        root.entity_type().name
    );

    Ok(Query {
        root,
        tracking,
        _p: PhantomData,
    })
}

impl<E: Entity> Query<E> {
    pub fn root(&self) -> &QueryRoot {
        &self.root
    }

    pub fn temporal(&self) -> &Temporal {
        self.root.temporal()
    }

    pub fn tracking(&self) -> Tracking {
        self.tracking
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_tracking()
    }

    /// Run the query without attaching results to a session.
    pub fn as_no_tracking(mut self) -> Self {
        self.tracking = Tracking::NoTracking;
        self
    }

    /// Ask the provider for an executable plan.
    pub fn plan(&self) -> Result<Plan> {
        self.root.create_query()
    }

    /// Execute the query. Results are attached to `session` unless the query
    /// is read-only.
    pub fn execute(&self, session: &mut Session) -> Result<Vec<Arc<E>>> {
        let plan = self.plan()?;
        let rows = self.root.provider().execute(&plan)?;

        log::trace!("query executed; plan={plan:?}; rows={}", rows.len());

        let mut entities = Vec::with_capacity(rows.len());

        for row in rows {
            let entity = row.clone().downcast::<E>().map_err(|_| {
                Error::invalid_state(format!(
                    "provider returned a row that is not a `{}`; plan={plan:?}",
                    E::NAME
                ))
            })?;

            if self.tracking.is_tracking() {
                session.attach(self.root.entity(), row);
            }

            entities.push(entity);
        }

        Ok(entities)
    }
}

impl<E: Entity> fmt::Debug for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("root", &self.root)
            .field("tracking", &self.tracking)
            .finish()
    }
}
