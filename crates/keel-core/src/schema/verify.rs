use super::{EntityType, EntityTypeId, PropertyId};
use crate::error::Violation;

use std::collections::{hash_map::Entry, HashMap, HashSet};

struct Verify<'a> {
    entity_types: &'a [EntityType],
    violations: Vec<Violation>,
}

/// Checks every model invariant and returns all violations found.
pub(super) fn verify(entity_types: &[EntityType]) -> Vec<Violation> {
    let mut verify = Verify {
        entity_types,
        violations: vec![],
    };

    verify.verify_entity_names_are_unique();
    verify.verify_shapes_are_unique();

    for entity in entity_types {
        verify.verify_property_names_are_unique(entity);
        verify.verify_keys(entity);
        verify.verify_indices(entity);
        verify.verify_foreign_keys(entity);
    }

    verify.verify_inheritance();
    verify.violations
}

impl Verify<'_> {
    fn verify_entity_names_are_unique(&mut self) {
        let mut names = HashSet::new();
        let mut reported = HashSet::new();

        for entity in self.entity_types {
            if !names.insert(&entity.name) && reported.insert(&entity.name) {
                self.violations.push(Violation::DuplicateEntityType {
                    name: entity.name.clone(),
                });
            }
        }
    }

    fn verify_shapes_are_unique(&mut self) {
        let mut shapes = HashMap::new();

        for entity in self.entity_types {
            let Some(shape) = entity.shape else {
                continue;
            };

            match shapes.entry(shape) {
                Entry::Vacant(entry) => {
                    entry.insert(&entity.name);
                }
                Entry::Occupied(first) => {
                    self.violations.push(Violation::DuplicateShape {
                        entity: entity.name.clone(),
                        first: first.get().to_string(),
                    });
                }
            }
        }
    }

    fn verify_property_names_are_unique(&mut self, entity: &EntityType) {
        let mut reported = HashSet::new();

        for property in entity.duplicate_properties() {
            if reported.insert(&property.name) {
                self.violations.push(Violation::DuplicateProperty {
                    entity: entity.name.clone(),
                    property: property.name.clone(),
                });
            }
        }
    }

    fn verify_keys(&mut self, entity: &EntityType) {
        let primary_keys = entity.keys.iter().filter(|key| key.primary).count();

        if primary_keys > 1 {
            self.violations.push(Violation::MultiplePrimaryKeys {
                entity: entity.name.clone(),
                count: primary_keys,
            });
        }

        for key in &entity.keys {
            let kind = if key.primary {
                "primary key"
            } else {
                "alternate key"
            };

            if !self.verify_property_list(entity, kind, &key.properties) || !key.primary {
                continue;
            }

            for property in &key.properties {
                let property = entity.property(*property);

                if property.nullable {
                    self.violations.push(Violation::NullablePrimaryKey {
                        entity: entity.name.clone(),
                        property: property.name.clone(),
                    });
                }
            }
        }
    }

    fn verify_indices(&mut self, entity: &EntityType) {
        for index in &entity.indices {
            self.verify_property_list(entity, "index", &index.properties);
        }
    }

    fn verify_foreign_keys(&mut self, entity: &EntityType) {
        for foreign_key in &entity.foreign_keys {
            if !self.verify_property_list(entity, "foreign key", &foreign_key.properties) {
                continue;
            }

            let principal_key = self
                .entity_types
                .get(foreign_key.principal_key.entity.0)
                .and_then(|principal| principal.keys.get(foreign_key.principal_key.index));

            let Some(principal_key) = principal_key else {
                self.violations.push(Violation::UnknownReference {
                    entity: entity.name.clone(),
                    reference: format!("principal key {:?}", foreign_key.principal_key),
                });
                continue;
            };

            if foreign_key.properties.len() != principal_key.properties.len() {
                self.violations.push(Violation::ForeignKeyArity {
                    entity: entity.name.clone(),
                    properties: foreign_key
                        .properties
                        .iter()
                        .map(|id| entity.property(*id).name.clone())
                        .collect(),
                    dependent: foreign_key.properties.len(),
                    principal: principal_key.properties.len(),
                });
            }
        }
    }

    /// Returns `true` when every property exists on `entity`, so callers can
    /// safely resolve them.
    fn verify_property_list(
        &mut self,
        entity: &EntityType,
        kind: &'static str,
        properties: &[PropertyId],
    ) -> bool {
        if properties.is_empty() {
            self.violations.push(Violation::EmptyPropertyList {
                entity: entity.name.clone(),
                kind,
            });
            return false;
        }

        let mut valid = true;

        for property in properties {
            if property.entity != entity.id {
                let name = self
                    .entity_types
                    .get(property.entity.0)
                    .and_then(|other| {
                        let name = &other.properties.get(property.index)?.name;
                        Some(format!("{}.{}", other.name, name))
                    })
                    .unwrap_or_else(|| format!("{property:?}"));

                self.violations.push(Violation::ForeignProperty {
                    entity: entity.name.clone(),
                    kind,
                    property: name,
                });
                valid = false;
            } else if property.index >= entity.properties.len() {
                self.violations.push(Violation::UnknownReference {
                    entity: entity.name.clone(),
                    reference: format!("property {property:?}"),
                });
                valid = false;
            }
        }

        valid
    }

    fn verify_inheritance(&mut self) {
        for entity in self.entity_types {
            if let Some(base) = entity.base_type {
                if self.entity_types.get(base.0).is_none() {
                    self.violations.push(Violation::UnknownReference {
                        entity: entity.name.clone(),
                        reference: format!("base type {base:?}"),
                    });
                }
            }
        }

        for entity in self.entity_types {
            let mut chain = vec![entity.id];
            let mut seen = HashSet::from([entity.id]);
            let mut current = entity;

            while let Some(base) = current.base_type {
                let Some(next) = self.entity_types.get(base.0) else {
                    break;
                };

                if !seen.insert(base) {
                    // Report each cycle once, from its lowest member.
                    if base == entity.id && chain.iter().all(|id| *id >= entity.id) {
                        let entities = self.names(&chain);
                        self.violations
                            .push(Violation::InheritanceCycle { entities });
                    }
                    break;
                }

                chain.push(base);
                current = next;
            }
        }
    }

    fn names(&self, ids: &[EntityTypeId]) -> Vec<String> {
        ids.iter()
            .map(|id| self.entity_types[id.0].name.clone())
            .collect()
    }
}
