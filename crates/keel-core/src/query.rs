mod capability;
pub use capability::Capability;

mod plan;
pub use plan::{Plan, Row};

mod provider;
pub use provider::Provider;

mod root;
pub use root::QueryRoot;

mod temporal;
pub use temporal::{Period, Temporal, TemporalMode, TemporalRange};

mod tracking;
pub use tracking::Tracking;
