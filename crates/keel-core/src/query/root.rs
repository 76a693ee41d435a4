use super::{Plan, Provider, Temporal, Tracking};
use crate::{
    schema::{EntityType, EntityTypeId, Model},
    Error, Result,
};

use std::{fmt, sync::Arc};

/// What entity set, under what temporal view, a query is rooted on.
///
/// Roots are created per query and never mutated. They carry the finalized
/// model and the provider that will turn them into a [`Plan`].
#[derive(Clone)]
pub struct QueryRoot {
    model: Arc<Model>,
    entity: EntityTypeId,
    provider: Arc<dyn Provider>,
    temporal: Temporal,
}

impl QueryRoot {
    /// Fails with an invalid argument error when `entity` is not in `model`,
    /// or when `temporal` is a temporal view the provider cannot read.
    pub fn new(
        model: Arc<Model>,
        entity: EntityTypeId,
        provider: Arc<dyn Provider>,
        temporal: Temporal,
    ) -> Result<QueryRoot> {
        if entity.0 >= model.entity_types().len() {
            return Err(Error::invalid_argument(format!(
                "entity type {entity:?} is not part of the model"
            )));
        }

        if temporal.is_temporal() && !provider.capability().temporal_tables {
            return Err(Error::invalid_argument(format!(
                "provider `{}` does not support temporal queries; entity={}; temporal={temporal}",
                provider.capability().name,
                model.entity_type(entity).name,
            )));
        }

        Ok(QueryRoot {
            model,
            entity,
            provider,
            temporal,
        })
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn entity(&self) -> EntityTypeId {
        self.entity
    }

    pub fn entity_type(&self) -> &EntityType {
        self.model.entity_type(self.entity)
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    pub fn temporal(&self) -> &Temporal {
        &self.temporal
    }

    pub fn is_temporal(&self) -> bool {
        self.temporal.is_temporal()
    }

    /// The tracking mode a query on this root runs with. Temporal roots are
    /// always read-only, whatever `default` says.
    pub fn tracking(&self, default: Tracking) -> Tracking {
        if self.is_temporal() {
            Tracking::NoTracking
        } else {
            default
        }
    }

    /// Hand the root to its provider.
    pub fn create_query(&self) -> Result<Plan> {
        self.provider.create_query(self)
    }
}

impl fmt::Debug for QueryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRoot")
            .field("entity", &self.entity_type().name)
            .field("provider", &self.provider.capability().name)
            .field("temporal", &self.temporal)
            .finish()
    }
}

impl fmt::Display for QueryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_type().table_name())?;

        if self.is_temporal() {
            write!(f, " {}", self.temporal)?;
        }

        Ok(())
    }
}
