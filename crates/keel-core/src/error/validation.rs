use super::Error;

/// Error when finalizing a model finds one or more invariant violations.
///
/// Every violation found during a finalize pass is carried, so a caller can
/// fix them all before finalizing again.
#[derive(Debug)]
pub(super) struct ValidationFailed {
    violations: Box<[Violation]>,
}

/// A single model invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A primary key includes a property that allows `null`.
    NullablePrimaryKey { entity: String, property: String },

    /// A foreign key's dependent property count does not match the principal
    /// key's property count.
    ForeignKeyArity {
        entity: String,
        properties: Vec<String>,
        dependent: usize,
        principal: usize,
    },

    /// Following base types from `entities[0]` leads back to it.
    InheritanceCycle { entities: Vec<String> },

    /// Two properties of one entity type share a name.
    DuplicateProperty { entity: String, property: String },

    /// Two entity types share a fully-qualified name.
    DuplicateEntityType { name: String },

    /// Two entity types are declared by the same Rust type.
    DuplicateShape { entity: String, first: String },

    /// An entity type declares more than one primary key.
    MultiplePrimaryKeys { entity: String, count: usize },

    /// A key, index, or foreign key lists no properties.
    EmptyPropertyList { entity: String, kind: &'static str },

    /// A key, index, or foreign key lists a property of a different entity type.
    ForeignProperty {
        entity: String,
        kind: &'static str,
        property: String,
    },

    /// A reference points at an entity type, property, or key that does not exist.
    UnknownReference { entity: String, reference: String },
}

impl std::error::Error for ValidationFailed {}

impl core::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "model validation failed with {} violation(s)",
            self.violations.len()
        )?;

        for (i, violation) in self.violations.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            core::fmt::Display::fmt(violation, f)?;
        }

        Ok(())
    }
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Violation::NullablePrimaryKey { entity, property } => write!(
                f,
                "property `{entity}.{property}` is part of the primary key and cannot be nullable"
            ),
            Violation::ForeignKeyArity {
                entity,
                properties,
                dependent,
                principal,
            } => write!(
                f,
                "foreign key {{{}}} on `{entity}` has {dependent} dependent propert{} \
                 but the principal key has {principal}",
                properties.join(", "),
                if *dependent == 1 { "y" } else { "ies" },
            ),
            Violation::InheritanceCycle { entities } => {
                write!(f, "inheritance cycle detected: {}", entities.join(" -> "))?;
                if let Some(first) = entities.first() {
                    write!(f, " -> {first}")?;
                }
                Ok(())
            }
            Violation::DuplicateProperty { entity, property } => write!(
                f,
                "property `{property}` is declared more than once on `{entity}`"
            ),
            Violation::DuplicateEntityType { name } => {
                write!(f, "entity type `{name}` is declared more than once")
            }
            Violation::DuplicateShape { entity, first } => write!(
                f,
                "entity type `{entity}` is declared by the same type as `{first}`"
            ),
            Violation::MultiplePrimaryKeys { entity, count } => write!(
                f,
                "entity type `{entity}` declares {count} primary keys; at most one is allowed"
            ),
            Violation::EmptyPropertyList { entity, kind } => {
                write!(f, "{kind} on `{entity}` has no properties")
            }
            Violation::ForeignProperty {
                entity,
                kind,
                property,
            } => write!(
                f,
                "{kind} on `{entity}` references `{property}`, which belongs to another entity type"
            ),
            Violation::UnknownReference { entity, reference } => {
                write!(f, "`{entity}` references unknown {reference}")
            }
        }
    }
}

impl Error {
    /// Creates a validation error carrying every violation found.
    pub fn validation_failed(violations: impl Into<Vec<Violation>>) -> Error {
        Error::from(super::ErrorKind::ValidationFailed(ValidationFailed {
            violations: violations.into().into_boxed_slice(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ValidationFailed(_))
    }

    /// Returns the violations carried by a validation error.
    ///
    /// Any other kind of error has no violations.
    pub fn violations(&self) -> &[Violation] {
        match self.kind() {
            super::ErrorKind::ValidationFailed(err) => &err.violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_violation() {
        let err = Error::validation_failed(vec![
            Violation::NullablePrimaryKey {
                entity: "Sales.Order".into(),
                property: "Id".into(),
            },
            Violation::DuplicateProperty {
                entity: "Sales.Order".into(),
                property: "Total".into(),
            },
        ]);

        assert!(err.is_validation());
        assert_eq!(err.violations().len(), 2);
        assert_eq!(
            err.to_string(),
            "model validation failed with 2 violation(s): \
             property `Sales.Order.Id` is part of the primary key and cannot be nullable; \
             property `Total` is declared more than once on `Sales.Order`"
        );
    }

    #[test]
    fn foreign_key_arity_message() {
        let violation = Violation::ForeignKeyArity {
            entity: "Order".into(),
            properties: vec!["CustomerId".into()],
            dependent: 1,
            principal: 2,
        };

        assert_eq!(
            violation.to_string(),
            "foreign key {CustomerId} on `Order` has 1 dependent property but the principal key has 2"
        );
    }

    #[test]
    fn inheritance_cycle_message_closes_the_loop() {
        let violation = Violation::InheritanceCycle {
            entities: vec!["A".into(), "B".into()],
        };

        assert_eq!(
            violation.to_string(),
            "inheritance cycle detected: A -> B -> A"
        );
    }
}
