/// Describes what a provider can execute, which informs query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// Display name used in diagnostics
    pub name: &'static str,

    /// When true, the provider can read system-versioned history tables and
    /// accepts temporal query roots.
    pub temporal_tables: bool,
}

impl Capability {
    /// SQL Server capabilities.
    pub const SQL_SERVER: Self = Self {
        name: "SqlServer",
        temporal_tables: true,
    };

    /// SQLite capabilities. SQLite has no system-versioned tables.
    pub const SQLITE: Self = Self {
        name: "Sqlite",
        temporal_tables: false,
    };

    /// In-memory provider capabilities
    pub const MEMORY: Self = Self {
        name: "Memory",
        ..Self::SQL_SERVER
    };
}
