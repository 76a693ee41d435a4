use super::{EntityTypeId, KeyId, PropertyId};

use std::fmt;

/// Constrains a list of dependent properties to the properties of a principal key.
///
/// Pairing is positional: `properties[i]` references `principal_key`'s
/// property at index `i`.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    /// Uniquely identifies the foreign key within the model
    pub id: ForeignKeyId,

    /// Dependent properties on the declaring entity type
    pub properties: Vec<PropertyId>,

    /// The key being referenced
    pub principal_key: KeyId,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForeignKeyId {
    pub entity: EntityTypeId,
    pub index: usize,
}

impl ForeignKey {
    /// The declaring (dependent) entity type
    pub fn declaring_entity(&self) -> EntityTypeId {
        self.id.entity
    }

    /// The entity type owning the principal key
    pub fn principal_entity(&self) -> EntityTypeId {
        self.principal_key.entity
    }
}

impl fmt::Debug for ForeignKeyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ForeignKeyId({}/{})", self.entity.0, self.index)
    }
}
