use super::Db;
use crate::{
    query::Tracking,
    schema::{self, EntityTypeBuilder, Model, TypeMappings},
    Entity, Provider, Result,
};

use std::sync::Arc;

type Declare = fn(&mut EntityTypeBuilder<'_>) -> Result<()>;

#[derive(Debug, Default)]
pub struct Builder {
    /// Registered entities, in registration order
    entities: Vec<Registration>,

    /// Prefix for unqualified entity type names
    default_schema: Option<String>,

    type_mappings: TypeMappings,

    default_tracking: Tracking,

    /// A model compiled ahead of time. When set, registrations are ignored.
    model: Option<Arc<Model>>,
}

struct Registration {
    name: &'static str,
    declare: Declare,
    relate: Declare,
}

impl Builder {
    pub fn register<E: Entity>(&mut self) -> &mut Self {
        fn declare<E: Entity>(entity: &mut EntityTypeBuilder<'_>) -> Result<()> {
            entity.shape::<E>();
            E::declare(entity)
        }

        self.entities.push(Registration {
            name: E::NAME,
            declare: declare::<E>,
            relate: E::relate,
        });
        self
    }

    /// Qualify unqualified entity type names with `schema`.
    pub fn default_schema(&mut self, schema: &str) -> &mut Self {
        self.default_schema = Some(schema.to_string());
        self
    }

    /// Set the store types used to resolve property type mappings.
    pub fn type_mappings(&mut self, type_mappings: TypeMappings) -> &mut Self {
        self.type_mappings = type_mappings;
        self
    }

    /// Set the tracking used by non-temporal queries.
    pub fn default_tracking(&mut self, tracking: Tracking) -> &mut Self {
        self.default_tracking = tracking;
        self
    }

    /// Use a model compiled ahead of time instead of building one from the
    /// registered entities.
    pub fn model(&mut self, model: Arc<Model>) -> &mut Self {
        self.model = Some(model);
        self
    }

    /// Declare every registered entity and finalize the model.
    ///
    /// Every call declares the entities from scratch, so a failed build can
    /// be retried after registering more entities.
    pub fn build_model(&self) -> Result<Arc<Model>> {
        let mut core = schema::Builder::new();
        core.type_mappings(self.type_mappings);

        if let Some(default_schema) = &self.default_schema {
            core.default_schema(default_schema);
        }

        let mut ids = Vec::with_capacity(self.entities.len());

        for registration in &self.entities {
            let mut entity = core.add_entity_type(registration.name)?;
            (registration.declare)(&mut entity)?;
            ids.push(entity.id());
        }

        for (registration, id) in self.entities.iter().zip(ids) {
            let mut entity = core.entity_type_mut(id)?;
            (registration.relate)(&mut entity)?;
        }

        core.finalize()
    }

    pub fn build(&mut self, provider: impl Provider) -> Result<Db> {
        let model = match self.model.take() {
            Some(model) => model,
            None => self.build_model()?,
        };

        log::debug!(
            "db built; entity_types={}; provider={}; default_tracking={:?}",
            model.entity_types().len(),
            provider.capability().name,
            self.default_tracking
        );

        Ok(Db {
            model,
            provider: Arc::new(provider),
            default_tracking: self.default_tracking,
        })
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .finish()
    }
}
