use super::{Annotations, ForeignKey, Index, Key, Property, PropertyId};

use indexmap::IndexMap;
use std::{any::TypeId, fmt};

#[derive(Debug, Clone)]
pub struct EntityType {
    /// Uniquely identifies the entity type within the model
    pub id: EntityTypeId,

    /// Fully-qualified name, e.g. `Sales.Order`
    pub name: String,

    /// The Rust type declaring this entity's shape, when there is one
    pub shape: Option<TypeId>,

    /// Single-inheritance parent
    pub base_type: Option<EntityTypeId>,

    /// Properties in declaration order
    pub properties: Vec<Property>,

    /// Property name to position in `properties`. The first declaration of a
    /// name wins; later duplicates are reported when finalizing.
    pub(crate) property_index: IndexMap<String, usize>,

    /// Primary and alternate keys
    pub keys: Vec<Key>,

    pub indices: Vec<Index>,

    /// Foreign keys declared by (dependent on) this entity type
    pub foreign_keys: Vec<ForeignKey>,

    /// If the entity maps to a specific table, this is set.
    pub table_name: Option<String>,

    /// Set when the entity type is stored in a system-versioned (temporal) table
    pub temporal: Option<TemporalTable>,

    pub annotations: Annotations,
}

/// History storage of a system-versioned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalTable {
    pub history_table: String,

    /// Property holding the start of each row version's validity period
    pub period_start: String,

    /// Property holding the end of each row version's validity period
    pub period_end: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityTypeId(pub usize);

impl EntityType {
    pub(crate) fn new(id: EntityTypeId, name: String) -> EntityType {
        EntityType {
            id,
            name,
            shape: None,
            base_type: None,
            properties: vec![],
            property_index: IndexMap::new(),
            keys: vec![],
            indices: vec![],
            foreign_keys: vec![],
            table_name: None,
            temporal: None,
            annotations: Annotations::new(),
        }
    }

    pub fn id(&self) -> EntityTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the schema qualifier, `Order` for `Sales.Order`
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(_, short)| short)
            .unwrap_or(&self.name)
    }

    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or_else(|| self.short_name())
    }

    pub fn is_temporal(&self) -> bool {
        self.temporal.is_some()
    }

    #[track_caller]
    pub fn property(&self, id: impl Into<PropertyId>) -> &Property {
        let id = id.into();
        assert_eq!(self.id, id.entity);
        &self.properties[id.index]
    }

    pub fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.property_index
            .get(name)
            .map(|index| &self.properties[*index])
    }

    /// Property names in declaration order, each listed once
    pub fn property_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.property_index.keys().map(String::as_str)
    }

    pub fn primary_key(&self) -> Option<&Key> {
        self.keys.iter().find(|key| key.primary)
    }

    pub fn alternate_keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.keys.iter().filter(|key| !key.primary)
    }

    pub(crate) fn push_property(&mut self, name: String, property: Property) {
        let index = self.properties.len();
        self.property_index.entry(name).or_insert(index);
        self.properties.push(property);
    }

    pub(crate) fn reindex_properties(&mut self) {
        self.property_index.clear();
        for (index, property) in self.properties.iter().enumerate() {
            self.property_index
                .entry(property.name.clone())
                .or_insert(index);
        }
    }

    /// Properties whose name was already taken by an earlier declaration
    pub(crate) fn duplicate_properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties
            .iter()
            .enumerate()
            .filter(|(index, property)| self.property_index.get(&property.name) != Some(index))
            .map(|(_, property)| property)
    }
}

impl EntityTypeId {
    pub fn property(self, index: usize) -> PropertyId {
        PropertyId {
            entity: self,
            index,
        }
    }
}

impl From<&EntityType> for EntityTypeId {
    fn from(value: &EntityType) -> Self {
        value.id
    }
}

impl fmt::Debug for EntityTypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityTypeId({})", self.0)
    }
}
