use crate::{
    query::{Capability, Period, Plan, QueryRoot, Row, Temporal},
    Entity, Error, Result,
};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A provider keeping every row version in memory.
///
/// Rows are stored per table along with their validity period, the way a
/// system-versioned table and its history table would hold them together.
/// Temporal roots are evaluated with [`Temporal::includes`].
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<IndexMap<String, Vec<Version>>>,
}

#[derive(Debug, Clone)]
struct Version {
    period: Period,
    row: Row,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Store a current row, valid from `valid_from` onwards.
    pub fn insert<E: Entity>(
        &self,
        table: &str,
        valid_from: DateTime<Utc>,
        entity: E,
    ) -> Result<Arc<E>> {
        self.insert_version(table, Period::open(valid_from), entity)
    }

    /// Store one row version with an explicit validity period.
    pub fn insert_version<E: Entity>(
        &self,
        table: &str,
        period: Period,
        entity: E,
    ) -> Result<Arc<E>> {
        if let Some(valid_to) = period.valid_to {
            if valid_to <= period.valid_from {
                return Err(Error::invalid_argument(format!(
                    "row version must end after it starts; table={table}; valid_from={}; valid_to={valid_to}",
                    period.valid_from
                )));
            }
        }

        let entity = Arc::new(entity);

        self.lock()?
            .entry(table.to_string())
            .or_default()
            .push(Version {
                period,
                row: entity.clone(),
            });

        Ok(entity)
    }

    /// Number of stored versions in `table`, current and historical
    pub fn versions(&self, table: &str) -> Result<usize> {
        Ok(self.lock()?.get(table).map_or(0, Vec::len))
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexMap<String, Vec<Version>>>> {
        self.tables
            .lock()
            .map_err(|_| Error::invalid_state("memory provider lock poisoned"))
    }
}

impl crate::Provider for Memory {
    fn capability(&self) -> &Capability {
        &Capability::MEMORY
    }

    fn create_query(&self, root: &QueryRoot) -> Result<Plan> {
        let entity = root.entity_type();

        let history_table = match root.temporal() {
            Temporal::Current => None,
            Temporal::AsOf { .. }
            | Temporal::FromTo(_)
            | Temporal::Between(_)
            | Temporal::ContainedIn(_)
            | Temporal::All => {
                let Some(temporal) = &entity.temporal else {
                    return Err(Error::invalid_argument(format!(
                        "entity type `{}` is not mapped to a temporal table; root={root}",
                        entity.name
                    )));
                };

                Some(temporal.history_table.clone())
            }
        };

        Ok(Plan {
            entity: entity.id,
            table: entity.table_name().to_string(),
            history_table,
            temporal: *root.temporal(),
        })
    }

    fn execute(&self, plan: &Plan) -> Result<Vec<Row>> {
        let tables = self.lock()?;

        let Some(versions) = tables.get(&plan.table) else {
            return Ok(vec![]);
        };

        Ok(versions
            .iter()
            .filter(|version| plan.temporal.includes(&version.period))
            .map(|version| version.row.clone())
            .collect())
    }
}
