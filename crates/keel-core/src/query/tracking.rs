/// Whether query results are attached to a change-tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tracking {
    /// Results are registered with the session for change detection
    #[default]
    TrackAll,

    /// Results are read-only and never registered
    NoTracking,
}

impl Tracking {
    pub fn is_tracking(self) -> bool {
        self == Tracking::TrackAll
    }
}
