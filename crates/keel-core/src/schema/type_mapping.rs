use super::{Property, ValueType};

/// How a property's values are stored by the database provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// The store type as it appears in DDL, e.g. `nvarchar(256)`
    pub store_type: String,

    /// Maximum size, when the store type is sized
    pub size: Option<u32>,

    /// False when text is stored with a single-byte encoding
    pub unicode: bool,
}

/// A provider's default store types for each [`ValueType`].
///
/// Used to resolve every property's [`TypeMapping`] when the model is
/// finalized. A `None` entry means the provider has no default mapping; such
/// properties only get a mapping through an explicit store type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMappings {
    pub bool: Option<&'static str>,
    pub i16: Option<&'static str>,
    pub i32: Option<&'static str>,
    pub i64: Option<&'static str>,
    pub f64: Option<&'static str>,
    pub decimal: Option<&'static str>,

    /// Unicode text; sized as `{ty}({len})`
    pub string: Option<&'static str>,

    /// Single-byte text; falls back to `string` when `None`
    pub ansi_string: Option<&'static str>,

    pub bytes: Option<&'static str>,
    pub uuid: Option<&'static str>,
    pub date_time: Option<&'static str>,

    /// Size suffix used for unbounded text and binary, e.g. `max`. When
    /// `None`, unbounded types are written without a size.
    pub unbounded: Option<&'static str>,

    /// When `false`, sizes and precision are not written into the store type.
    pub sized: bool,

    /// Precision and scale used for decimals without explicit facets
    pub default_decimal: (u32, u32),
}

impl TypeMappings {
    /// SQL Server store types.
    pub const SQL_SERVER: Self = Self {
        bool: Some("bit"),
        i16: Some("smallint"),
        i32: Some("int"),
        i64: Some("bigint"),
        f64: Some("float"),
        decimal: Some("decimal"),
        string: Some("nvarchar"),
        ansi_string: Some("varchar"),
        bytes: Some("varbinary"),
        uuid: Some("uniqueidentifier"),
        date_time: Some("datetime2"),
        unbounded: Some("max"),
        sized: true,
        default_decimal: (18, 2),
    };

    /// SQLite type affinities.
    pub const SQLITE: Self = Self {
        bool: Some("INTEGER"),
        i16: Some("INTEGER"),
        i32: Some("INTEGER"),
        i64: Some("INTEGER"),
        f64: Some("REAL"),
        decimal: Some("TEXT"),
        string: Some("TEXT"),
        ansi_string: None,
        bytes: Some("BLOB"),
        uuid: Some("TEXT"),
        date_time: Some("TEXT"),
        unbounded: None,
        sized: false,
        ..Self::SQL_SERVER
    };

    /// Resolves the mapping for `property`, or `None` when there is none.
    pub fn resolve(&self, property: &Property) -> Option<TypeMapping> {
        let unicode = property.unicode.unwrap_or(true);

        if let Some(store_type) = &property.store_type {
            return Some(TypeMapping {
                store_type: store_type.clone(),
                size: property.max_length,
                unicode,
            });
        }

        let unsized_mapping = |ty: Option<&'static str>| {
            ty.map(|ty| TypeMapping {
                store_type: ty.to_string(),
                size: None,
                unicode: true,
            })
        };

        match &property.ty {
            ValueType::Bool => unsized_mapping(self.bool),
            ValueType::I16 => unsized_mapping(self.i16),
            ValueType::I32 => unsized_mapping(self.i32),
            ValueType::I64 => unsized_mapping(self.i64),
            ValueType::F64 => unsized_mapping(self.f64),
            ValueType::Uuid => unsized_mapping(self.uuid),
            ValueType::DateTime => unsized_mapping(self.date_time),
            ValueType::Decimal => {
                let ty = self.decimal?;
                let (default_precision, default_scale) = self.default_decimal;
                let precision = property.precision.unwrap_or(default_precision);
                let scale = property.scale.unwrap_or(default_scale);

                Some(TypeMapping {
                    store_type: if self.sized {
                        format!("{ty}({precision},{scale})")
                    } else {
                        ty.to_string()
                    },
                    size: None,
                    unicode: true,
                })
            }
            ValueType::String => {
                let ty = if unicode {
                    self.string?
                } else {
                    self.ansi_string.or(self.string)?
                };

                Some(TypeMapping {
                    store_type: self.sized_store_type(ty, property.max_length),
                    size: property.max_length,
                    unicode,
                })
            }
            ValueType::Bytes => {
                let ty = self.bytes?;

                Some(TypeMapping {
                    store_type: self.sized_store_type(ty, property.max_length),
                    size: property.max_length,
                    unicode: true,
                })
            }
            ValueType::Custom(_) => None,
        }
    }

    fn sized_store_type(&self, ty: &str, max_length: Option<u32>) -> String {
        if !self.sized {
            return ty.to_string();
        }

        match (max_length, self.unbounded) {
            (Some(len), _) => format!("{ty}({len})"),
            (None, Some(unbounded)) => format!("{ty}({unbounded})"),
            (None, None) => ty.to_string(),
        }
    }
}

impl Default for TypeMappings {
    fn default() -> Self {
        Self::SQL_SERVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EntityTypeId, Property};

    fn property(ty: ValueType) -> Property {
        Property::new(EntityTypeId(0).property(0), "Value".to_string(), ty)
    }

    #[test]
    fn sql_server_string_defaults_to_unbounded_unicode() {
        let mapping = TypeMappings::SQL_SERVER
            .resolve(&property(ValueType::String))
            .unwrap();

        assert_eq!(mapping.store_type, "nvarchar(max)");
        assert!(mapping.unicode);
    }

    #[test]
    fn sql_server_ansi_string_with_max_length() {
        let mut property = property(ValueType::String);
        property.max_length = Some(64);
        property.unicode = Some(false);

        let mapping = TypeMappings::SQL_SERVER.resolve(&property).unwrap();
        assert_eq!(mapping.store_type, "varchar(64)");
        assert_eq!(mapping.size, Some(64));
        assert!(!mapping.unicode);
    }

    #[test]
    fn decimal_uses_facets_then_defaults() {
        let mut property = property(ValueType::Decimal);
        assert_eq!(
            TypeMappings::SQL_SERVER.resolve(&property).unwrap().store_type,
            "decimal(18,2)"
        );

        property.precision = Some(10);
        property.scale = Some(4);
        assert_eq!(
            TypeMappings::SQL_SERVER.resolve(&property).unwrap().store_type,
            "decimal(10,4)"
        );
    }

    #[test]
    fn sqlite_ignores_sizes() {
        let mut property = property(ValueType::String);
        property.max_length = Some(32);

        assert_eq!(
            TypeMappings::SQLITE.resolve(&property).unwrap().store_type,
            "TEXT"
        );
    }

    #[test]
    fn custom_types_need_an_explicit_store_type() {
        let mut property = property(ValueType::Custom("Point".to_string()));
        assert!(TypeMappings::SQL_SERVER.resolve(&property).is_none());

        property.store_type = Some("geography".to_string());
        assert_eq!(
            TypeMappings::SQL_SERVER.resolve(&property).unwrap().store_type,
            "geography"
        );
    }
}
