use super::{EntityTypeId, PropertyId};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Key {
    /// Uniquely identifies the key within the model
    pub id: KeyId,

    /// Properties composing the key, in order
    pub properties: Vec<PropertyId>,

    /// When `true`, the key is the entity type's primary key. Otherwise it is
    /// an alternate key.
    pub primary: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId {
    pub entity: EntityTypeId,
    pub index: usize,
}

impl Key {
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn contains(&self, property: PropertyId) -> bool {
        self.properties.contains(&property)
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "KeyId({}/{})", self.entity.0, self.index)
    }
}
