use super::{EntityTypeId, PropertyId};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Index {
    /// Uniquely identifies the index within the model
    pub id: IndexId,

    /// Optional database name of the index
    pub name: Option<String>,

    /// Properties included in the index, in order
    pub properties: Vec<PropertyId>,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexId {
    pub entity: EntityTypeId,
    pub index: usize,
}

impl Index {
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn contains(&self, property: PropertyId) -> bool {
        self.properties.contains(&property)
    }
}

impl fmt::Debug for IndexId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "IndexId({}/{})", self.entity.0, self.index)
    }
}
