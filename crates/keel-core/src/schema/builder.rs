use super::{
    EntityType, EntityTypeId, ForeignKey, ForeignKeyId, Index, IndexId, Key, KeyId,
    Model, Property, PropertyAccessMode, PropertyId, SaveBehavior, TemporalTable, TypeMappings,
    ValueGenerated, ValueType,
};
use crate::{Error, Result};

use std::{any::TypeId, sync::Arc};

/// Build-phase view of the model.
///
/// Entity types are added and mutated through the builder until
/// [`finalize`](Builder::finalize) validates them and freezes them into a
/// [`Model`]. The builder is single-writer; it is not meant to be shared
/// across threads while mutating.
#[derive(Debug)]
pub struct Builder {
    phase: Phase,

    /// Prepended to entity type names that are not already qualified
    default_schema: Option<String>,

    /// Provider store types used to resolve property type mappings
    type_mappings: TypeMappings,

    entity_types: Vec<EntityType>,
}

/// Which capabilities the builder currently grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Entity types may be added and mutated
    Building,

    /// The model was handed out; only reads are allowed
    Finalized,
}

/// Mutable view of one entity type, available only while building.
#[derive(Debug)]
pub struct EntityTypeBuilder<'a> {
    builder: &'a mut Builder,
    id: EntityTypeId,
}

/// Mutable view of one property, available only while building.
#[derive(Debug)]
pub struct PropertyBuilder<'a> {
    entity: &'a mut EntityType,
    index: usize,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            phase: Phase::Building,
            default_schema: None,
            type_mappings: TypeMappings::default(),
            entity_types: vec![],
        }
    }

    /// Qualify unqualified entity type names with `schema`, e.g. `Order`
    /// becomes `Sales.Order`.
    pub fn default_schema(&mut self, schema: &str) -> &mut Self {
        self.default_schema = Some(schema.to_string());
        self
    }

    /// Set the provider store types used to resolve type mappings.
    pub fn type_mappings(&mut self, type_mappings: TypeMappings) -> &mut Self {
        self.type_mappings = type_mappings;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    pub fn add_entity_type(&mut self, name: &str) -> Result<EntityTypeBuilder<'_>> {
        self.ensure_building(|| format!("cannot add entity type `{name}`"))?;

        let id = EntityTypeId(self.entity_types.len());
        let name = self.qualify(name);
        self.entity_types.push(EntityType::new(id, name));

        Ok(EntityTypeBuilder { builder: self, id })
    }

    pub fn entity_type_mut(&mut self, id: EntityTypeId) -> Result<EntityTypeBuilder<'_>> {
        self.ensure_building(|| format!("cannot mutate entity type {id:?}"))?;

        if id.0 >= self.entity_types.len() {
            return Err(Error::invalid_argument(format!(
                "entity type {id:?} does not exist"
            )));
        }

        Ok(EntityTypeBuilder { builder: self, id })
    }

    pub fn property_mut(&mut self, id: PropertyId) -> Result<PropertyBuilder<'_>> {
        self.ensure_building(|| format!("cannot mutate property {id:?}"))?;

        let entity = self
            .entity_types
            .get_mut(id.entity.0)
            .filter(|entity| id.index < entity.properties.len())
            .ok_or_else(|| Error::invalid_argument(format!("property {id:?} does not exist")))?;

        Ok(PropertyBuilder {
            entity,
            index: id.index,
        })
    }

    pub fn entity_types(&self) -> impl ExactSizeIterator<Item = &EntityType> + '_ {
        self.entity_types.iter()
    }

    /// Read-only view of an entity type that is still being built.
    #[track_caller]
    pub fn entity_type(&self, id: EntityTypeId) -> &EntityType {
        &self.entity_types[id.0]
    }

    pub fn entity_type_by_name(&self, name: &str) -> Option<&EntityType> {
        let name = self.qualify(name);
        self.entity_types.iter().find(|entity| entity.name == name)
    }

    pub fn entity_type_of<T: 'static>(&self) -> Option<&EntityType> {
        let shape = TypeId::of::<T>();
        self.entity_types
            .iter()
            .find(|entity| entity.shape == Some(shape))
    }

    /// Validate every entity type and freeze the result.
    ///
    /// All violations are reported together. On failure the builder stays in
    /// the [`Phase::Building`] phase so the model can be corrected and
    /// finalized again. On success the builder moves to
    /// [`Phase::Finalized`] and rejects any further mutation.
    pub fn finalize(&mut self) -> Result<Arc<Model>> {
        self.ensure_building(|| "cannot finalize the model again".to_string())?;

        let violations = super::verify::verify(&self.entity_types);

        if !violations.is_empty() {
            log::debug!(
                "model validation failed; entity_types={}; violations={}",
                self.entity_types.len(),
                violations.len()
            );
            for violation in &violations {
                log::trace!("  violation: {violation}");
            }
            return Err(Error::validation_failed(violations));
        }

        let mut entity_types = std::mem::take(&mut self.entity_types);

        for property in entity_types
            .iter_mut()
            .flat_map(|entity| entity.properties.iter_mut())
        {
            property.type_mapping = self.type_mappings.resolve(property);

            if property.type_mapping.is_none() {
                log::debug!(
                    "no type mapping for property; property={}; ty={}",
                    property.name,
                    property.ty
                );
            }
        }

        self.phase = Phase::Finalized;

        let model = Model::new(entity_types);
        log::debug!(
            "model finalized; entity_types={}",
            model.entity_types().len()
        );

        Ok(Arc::new(model))
    }

    fn ensure_building(&self, action: impl FnOnce() -> String) -> Result<()> {
        match self.phase {
            Phase::Building => Ok(()),
            Phase::Finalized => Err(Error::invalid_state(format!(
                "{}; the model has been finalized and is read-only",
                action()
            ))),
        }
    }

    fn qualify(&self, name: &str) -> String {
        match &self.default_schema {
            Some(schema) if !name.contains('.') => format!("{schema}.{name}"),
            _ => name.to_string(),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTypeBuilder<'_> {
    pub fn id(&self) -> EntityTypeId {
        self.id
    }

    /// Read-only view of the entity type being built.
    pub fn entity_type(&self) -> &EntityType {
        self.builder.entity_type(self.id)
    }

    /// Read-only view of every entity type declared so far.
    pub fn builder(&self) -> &Builder {
        self.builder
    }

    /// Associate the entity type with the Rust type declaring its shape.
    pub fn shape<T: 'static>(&mut self) -> &mut Self {
        self.entity_mut().shape = Some(TypeId::of::<T>());
        self
    }

    pub fn base_type(&mut self, base: EntityTypeId) -> &mut Self {
        self.entity_mut().base_type = Some(base);
        self
    }

    pub fn table_name(&mut self, table_name: &str) -> &mut Self {
        self.entity_mut().table_name = Some(table_name.to_string());
        self
    }

    /// Store the entity type in a system-versioned table.
    pub fn temporal(&mut self, temporal: TemporalTable) -> &mut Self {
        self.entity_mut().temporal = Some(temporal);
        self
    }

    pub fn annotation(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.entity_mut()
            .annotations
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Adds a property.
    ///
    /// Properties are not nullable unless configured otherwise. Declaring a
    /// name twice is reported when the model is finalized.
    pub fn property(&mut self, name: &str, ty: ValueType) -> PropertyBuilder<'_> {
        let entity = self.entity_mut();
        let index = entity.properties.len();
        let property = Property::new(entity.id.property(index), name.to_string(), ty);
        entity.push_property(name.to_string(), property);

        PropertyBuilder { entity, index }
    }

    pub fn property_id(&self, name: &str) -> Option<PropertyId> {
        self.entity_type().property_by_name(name).map(|p| p.id)
    }

    pub fn primary_key(&mut self, properties: impl IntoIterator<Item = PropertyId>) -> KeyId {
        self.push_key(properties, true)
    }

    pub fn alternate_key(&mut self, properties: impl IntoIterator<Item = PropertyId>) -> KeyId {
        self.push_key(properties, false)
    }

    pub fn index(
        &mut self,
        properties: impl IntoIterator<Item = PropertyId>,
        unique: bool,
    ) -> IndexId {
        self.push_index(None, properties, unique)
    }

    pub fn named_index(
        &mut self,
        name: &str,
        properties: impl IntoIterator<Item = PropertyId>,
        unique: bool,
    ) -> IndexId {
        self.push_index(Some(name.to_string()), properties, unique)
    }

    /// Constrain `properties` by `principal_key`, pairing them positionally.
    pub fn foreign_key(
        &mut self,
        properties: impl IntoIterator<Item = PropertyId>,
        principal_key: KeyId,
    ) -> ForeignKeyId {
        let entity = self.entity_mut();
        let id = ForeignKeyId {
            entity: entity.id,
            index: entity.foreign_keys.len(),
        };

        entity.foreign_keys.push(ForeignKey {
            id,
            properties: properties.into_iter().collect(),
            principal_key,
        });

        id
    }

    /// The primary key declared so far by `entity`, if any.
    pub fn primary_key_of(&self, entity: EntityTypeId) -> Option<KeyId> {
        self.builder
            .entity_types
            .get(entity.0)
            .and_then(|entity| entity.primary_key())
            .map(|key| key.id)
    }

    fn push_key(&mut self, properties: impl IntoIterator<Item = PropertyId>, primary: bool) -> KeyId {
        let entity = self.entity_mut();
        let id = KeyId {
            entity: entity.id,
            index: entity.keys.len(),
        };

        entity.keys.push(Key {
            id,
            properties: properties.into_iter().collect(),
            primary,
        });

        id
    }

    fn push_index(
        &mut self,
        name: Option<String>,
        properties: impl IntoIterator<Item = PropertyId>,
        unique: bool,
    ) -> IndexId {
        let entity = self.entity_mut();
        let id = IndexId {
            entity: entity.id,
            index: entity.indices.len(),
        };

        entity.indices.push(Index {
            id,
            name,
            properties: properties.into_iter().collect(),
            unique,
        });

        id
    }

    fn entity_mut(&mut self) -> &mut EntityType {
        &mut self.builder.entity_types[self.id.0]
    }
}

impl PropertyBuilder<'_> {
    pub fn id(&self) -> PropertyId {
        self.property().id
    }

    /// Read-only view of the property being built.
    pub fn property(&self) -> &Property {
        &self.entity.properties[self.index]
    }

    pub fn nullable(&mut self, nullable: bool) -> &mut Self {
        self.property_mut().nullable = nullable;
        self
    }

    pub fn field_name(&mut self, field_name: &str) -> &mut Self {
        self.property_mut().field_name = Some(field_name.to_string());
        self
    }

    pub fn shadow(&mut self, shadow: bool) -> &mut Self {
        self.property_mut().shadow = shadow;
        self
    }

    pub fn indexer(&mut self, indexer: bool) -> &mut Self {
        self.property_mut().indexer = indexer;
        self
    }

    pub fn value_generated(&mut self, value_generated: ValueGenerated) -> &mut Self {
        self.property_mut().value_generated = value_generated;
        self
    }

    pub fn concurrency_token(&mut self, concurrency_token: bool) -> &mut Self {
        self.property_mut().concurrency_token = concurrency_token;
        self
    }

    pub fn before_save(&mut self, behavior: SaveBehavior) -> &mut Self {
        self.property_mut().before_save = behavior;
        self
    }

    pub fn after_save(&mut self, behavior: SaveBehavior) -> &mut Self {
        self.property_mut().after_save = behavior;
        self
    }

    pub fn access_mode(&mut self, access_mode: PropertyAccessMode) -> &mut Self {
        self.property_mut().access_mode = access_mode;
        self
    }

    pub fn max_length(&mut self, max_length: u32) -> &mut Self {
        self.property_mut().max_length = Some(max_length);
        self
    }

    pub fn precision(&mut self, precision: u32, scale: Option<u32>) -> &mut Self {
        let property = self.property_mut();
        property.precision = Some(precision);
        property.scale = scale;
        self
    }

    pub fn unicode(&mut self, unicode: bool) -> &mut Self {
        self.property_mut().unicode = Some(unicode);
        self
    }

    pub fn store_type(&mut self, store_type: &str) -> &mut Self {
        self.property_mut().store_type = Some(store_type.to_string());
        self
    }

    pub fn annotation(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.property_mut()
            .annotations
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Renames the property. Used to resolve a name collision before
    /// finalizing again.
    pub fn rename(&mut self, name: &str) -> &mut Self {
        self.property_mut().name = name.to_string();
        self.entity.reindex_properties();
        self
    }

    fn property_mut(&mut self) -> &mut Property {
        &mut self.entity.properties[self.index]
    }
}
