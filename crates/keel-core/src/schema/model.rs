use super::{
    EntityType, EntityTypeId, ForeignKey, ForeignKeyId, Index, IndexId, Key, KeyId, Property,
    PropertyId,
};

use indexmap::IndexMap;
use std::{any::TypeId, collections::HashMap};

/// A finalized, validated model.
///
/// Produced by [`Builder::finalize`](super::Builder::finalize). A `Model` has
/// no interior mutability, so it can be shared behind an `Arc` and read from
/// any number of threads without synchronization.
#[derive(Debug)]
pub struct Model {
    entity_types: Vec<EntityType>,

    /// Fully-qualified name to entity type
    names: IndexMap<String, EntityTypeId>,

    /// Declared Rust shape to entity type
    shapes: HashMap<TypeId, EntityTypeId>,

    /// Reverse lookups, indexed by `[entity][property]`
    relations: Vec<Vec<PropertyRelations>>,

    /// Foreign keys whose principal key is declared by the entity type,
    /// indexed by entity
    referencing: Vec<Vec<ForeignKeyId>>,
}

/// The keys, indices, and foreign keys a property is part of.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropertyRelations {
    /// Foreign keys listing the property as a dependent, in declaration order
    pub foreign_keys: Vec<ForeignKeyId>,

    pub keys: Vec<KeyId>,

    pub indices: Vec<IndexId>,
}

impl Model {
    /// Builds the read-optimized form. `entity_types` must already be verified.
    pub(super) fn new(entity_types: Vec<EntityType>) -> Model {
        let mut relations: Vec<Vec<PropertyRelations>> = entity_types
            .iter()
            .map(|entity| vec![PropertyRelations::default(); entity.properties.len()])
            .collect();
        let mut referencing = vec![vec![]; entity_types.len()];
        let mut names = IndexMap::with_capacity(entity_types.len());
        let mut shapes = HashMap::new();

        for entity in &entity_types {
            names.insert(entity.name.clone(), entity.id);

            if let Some(shape) = entity.shape {
                shapes.insert(shape, entity.id);
            }

            for key in &entity.keys {
                for property in &key.properties {
                    relations[property.entity.0][property.index].keys.push(key.id);
                }
            }

            for index in &entity.indices {
                for property in &index.properties {
                    relations[property.entity.0][property.index]
                        .indices
                        .push(index.id);
                }
            }

            for foreign_key in &entity.foreign_keys {
                for property in &foreign_key.properties {
                    let foreign_keys =
                        &mut relations[property.entity.0][property.index].foreign_keys;

                    // A property listed twice in one foreign key still
                    // belongs to it once.
                    if !foreign_keys.contains(&foreign_key.id) {
                        foreign_keys.push(foreign_key.id);
                    }
                }

                referencing[foreign_key.principal_entity().0].push(foreign_key.id);
            }
        }

        Model {
            entity_types,
            names,
            shapes,
            relations,
            referencing,
        }
    }

    pub fn entity_types(&self) -> impl ExactSizeIterator<Item = &EntityType> + '_ {
        self.entity_types.iter()
    }

    #[track_caller]
    pub fn entity_type(&self, id: impl Into<EntityTypeId>) -> &EntityType {
        &self.entity_types[id.into().0]
    }

    /// Looks up an entity type by its fully-qualified name.
    pub fn entity_type_by_name(&self, name: &str) -> Option<&EntityType> {
        self.names.get(name).map(|id| self.entity_type(*id))
    }

    /// Looks up an entity type by the Rust type declaring its shape.
    pub fn entity_type_of<T: 'static>(&self) -> Option<&EntityType> {
        self.shapes
            .get(&TypeId::of::<T>())
            .map(|id| self.entity_type(*id))
    }

    #[track_caller]
    pub fn property(&self, id: impl Into<PropertyId>) -> &Property {
        let id = id.into();
        self.entity_type(id.entity).property(id)
    }

    #[track_caller]
    pub fn key(&self, id: KeyId) -> &Key {
        &self.entity_type(id.entity).keys[id.index]
    }

    #[track_caller]
    pub fn index(&self, id: IndexId) -> &Index {
        &self.entity_type(id.entity).indices[id.index]
    }

    #[track_caller]
    pub fn foreign_key(&self, id: ForeignKeyId) -> &ForeignKey {
        &self.entity_type(id.entity).foreign_keys[id.index]
    }

    /// The declaring entity type of `property`
    pub fn declaring_entity_type(&self, property: impl Into<PropertyId>) -> &EntityType {
        self.entity_type(property.into().entity)
    }

    #[track_caller]
    pub fn relations(&self, property: impl Into<PropertyId>) -> &PropertyRelations {
        let id = property.into();
        &self.relations[id.entity.0][id.index]
    }

    /// Foreign keys using `property` as a dependent, in declaration order.
    pub fn containing_foreign_keys(
        &self,
        property: impl Into<PropertyId>,
    ) -> impl Iterator<Item = &ForeignKey> + '_ {
        self.relations(property)
            .foreign_keys
            .iter()
            .map(|id| self.foreign_key(*id))
    }

    /// Primary and alternate keys that include `property`.
    pub fn containing_keys(
        &self,
        property: impl Into<PropertyId>,
    ) -> impl Iterator<Item = &Key> + '_ {
        self.relations(property)
            .keys
            .iter()
            .map(|id| self.key(*id))
    }

    pub fn containing_indexes(
        &self,
        property: impl Into<PropertyId>,
    ) -> impl Iterator<Item = &Index> + '_ {
        self.relations(property)
            .indices
            .iter()
            .map(|id| self.index(*id))
    }

    /// The primary key that includes `property`, if any.
    pub fn find_containing_primary_key(&self, property: impl Into<PropertyId>) -> Option<&Key> {
        self.containing_keys(property).find(|key| key.primary)
    }

    /// The primary key of the entity type declaring `property`, if any.
    pub fn primary_key(&self, property: impl Into<PropertyId>) -> Option<&Key> {
        self.declaring_entity_type(property).primary_key()
    }

    pub fn is_foreign_key(&self, property: impl Into<PropertyId>) -> bool {
        !self.relations(property).foreign_keys.is_empty()
    }

    pub fn is_index(&self, property: impl Into<PropertyId>) -> bool {
        !self.relations(property).indices.is_empty()
    }

    pub fn is_unique_index(&self, property: impl Into<PropertyId>) -> bool {
        self.containing_indexes(property).any(|index| index.unique)
    }

    /// True if `property` is part of a primary or alternate key.
    pub fn is_key(&self, property: impl Into<PropertyId>) -> bool {
        !self.relations(property).keys.is_empty()
    }

    pub fn is_primary_key(&self, property: impl Into<PropertyId>) -> bool {
        self.find_containing_primary_key(property).is_some()
    }

    /// Foreign keys on other (or the same) entity types that reference a key
    /// of `entity`.
    pub fn referencing_foreign_keys(
        &self,
        entity: impl Into<EntityTypeId>,
    ) -> impl Iterator<Item = &ForeignKey> + '_ {
        self.referencing[entity.into().0]
            .iter()
            .map(|id| self.foreign_key(*id))
    }

    /// Walks the base types of `entity`, nearest first.
    pub fn base_types(&self, entity: impl Into<EntityTypeId>) -> impl Iterator<Item = &EntityType> + '_ {
        let mut next = self.entity_type(entity).base_type;

        std::iter::from_fn(move || {
            let base = self.entity_type(next?);
            next = base.base_type;
            Some(base)
        })
    }

    /// Entity types listing `entity` as their direct base type.
    pub fn derived_types(&self, entity: impl Into<EntityTypeId>) -> impl Iterator<Item = &EntityType> + '_ {
        let entity = entity.into();
        self.entity_types
            .iter()
            .filter(move |candidate| candidate.base_type == Some(entity))
    }
}
