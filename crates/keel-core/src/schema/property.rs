use super::{Annotations, EntityTypeId, TypeMapping};
use crate::{Error, Result};

use std::fmt;

#[derive(Debug, Clone)]
pub struct Property {
    /// Uniquely identifies the property within the model
    pub id: PropertyId,

    /// The property name, unique within the declaring entity type
    pub name: String,

    /// Semantic value type
    pub ty: ValueType,

    /// Name of the backing field, if the property has one
    pub field_name: Option<String>,

    /// True if the property can hold `null`
    pub nullable: bool,

    /// True if the property only exists in the model, not on the entity's shape
    pub shadow: bool,

    /// True if the property is accessed through an indexer
    pub indexer: bool,

    /// When the database generates a value for the property
    pub value_generated: ValueGenerated,

    /// True if the property takes part in optimistic concurrency checks
    pub concurrency_token: bool,

    /// What happens to an assigned value before the entity is first saved
    pub before_save: SaveBehavior,

    /// What happens to an assigned value once the entity exists in the database
    pub after_save: SaveBehavior,

    pub access_mode: PropertyAccessMode,

    pub max_length: Option<u32>,

    pub precision: Option<u32>,

    pub scale: Option<u32>,

    /// `Some(false)` stores text as ANSI; `None` leaves it to the provider
    pub unicode: Option<bool>,

    /// Explicit store type; bypasses the provider's default mapping
    pub store_type: Option<String>,

    pub annotations: Annotations,

    /// Resolved when the model is finalized
    pub(crate) type_mapping: Option<TypeMapping>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId {
    pub entity: EntityTypeId,
    pub index: usize,
}

/// The semantic type of a property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    I16,
    I32,
    I64,
    F64,
    Decimal,
    String,
    Bytes,
    Uuid,
    DateTime,

    /// A type only the application knows how to map
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueGenerated {
    #[default]
    Never,
    OnAdd,
    OnAddOrUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaveBehavior {
    /// The assigned value is saved
    #[default]
    Save,

    /// Assigning a value fails the save
    Throw,

    /// The assigned value is dropped
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyAccessMode {
    #[default]
    PreferField,
    Field,
    Property,
}

impl Property {
    pub(crate) fn new(id: PropertyId, name: String, ty: ValueType) -> Property {
        Property {
            id,
            name,
            ty,
            field_name: None,
            nullable: false,
            shadow: false,
            indexer: false,
            value_generated: ValueGenerated::Never,
            concurrency_token: false,
            before_save: SaveBehavior::Save,
            after_save: SaveBehavior::Save,
            access_mode: PropertyAccessMode::PreferField,
            max_length: None,
            precision: None,
            scale: None,
            unicode: None,
            store_type: None,
            annotations: Annotations::new(),
            type_mapping: None,
        }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ValueType {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_concurrency_token(&self) -> bool {
        self.concurrency_token
    }

    /// Returns the type mapping for this property, or `None` when none was resolved.
    pub fn find_type_mapping(&self) -> Option<&TypeMapping> {
        self.type_mapping.as_ref()
    }

    /// Returns the type mapping resolved when the model was finalized.
    ///
    /// Fails with an invalid state error when no mapping is available, either
    /// because the model is not finalized yet or because the provider has no
    /// mapping for the property's type.
    pub fn type_mapping(&self) -> Result<&TypeMapping> {
        self.find_type_mapping().ok_or_else(|| {
            Error::invalid_state(format!(
                "property `{}` has no type mapping; `type_mapping` requires a finalized model \
                 with a mapping for `{}`",
                self.name, self.ty
            ))
        })
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PropertyId({}/{})", self.entity.0, self.index)
    }
}

impl From<&Property> for PropertyId {
    fn from(value: &Property) -> Self {
        value.id
    }
}

impl ValueType {
    pub fn is_text(&self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Bool => "bool",
            ValueType::I16 => "i16",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F64 => "f64",
            ValueType::Decimal => "Decimal",
            ValueType::String => "String",
            ValueType::Bytes => "Vec<u8>",
            ValueType::Uuid => "Uuid",
            ValueType::DateTime => "DateTime<Utc>",
            ValueType::Custom(name) => name,
        })
    }
}

impl fmt::Display for ValueGenerated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for SaveBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for PropertyAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
