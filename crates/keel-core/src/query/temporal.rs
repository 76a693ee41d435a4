use crate::{Error, Result};

use chrono::{DateTime, Utc};
use std::fmt;

/// The time-versioned view a query is rooted on.
///
/// Instants are taken at face value. Nothing converts from local time, so a
/// caller supplying a local wall-clock time as UTC gets silently wrong rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Temporal {
    /// Current state only
    #[default]
    Current,

    /// Rows whose validity period contains `at`
    AsOf { at: DateTime<Utc> },

    /// Rows valid at some point strictly inside the range. Rows created
    /// exactly at `from` and rows removed exactly at `to` are excluded, as
    /// are rows created at `to` or removed at `from`.
    FromTo(TemporalRange),

    /// Rows valid at some point in the range, `from` inclusive. Rows removed
    /// exactly at `to` and rows created exactly at `to` are included.
    Between(TemporalRange),

    /// Rows whose whole validity period lies within the range, boundaries
    /// included. Rows that are still current are never contained.
    ContainedIn(TemporalRange),

    /// Every historical version plus current state
    All,
}

/// A validated, non-empty range of instants, `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemporalRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

/// The validity period of one row version, `[valid_from, valid_to)`.
///
/// An open `valid_to` marks the current version of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
}

/// A temporal mode as requested by a caller, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalMode {
    Current,
    AsOf(DateTime<Utc>),
    FromTo {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    Between {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    ContainedIn {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    All,
}

impl Temporal {
    /// Validates `mode` and builds the matching variant.
    pub fn from_mode(mode: TemporalMode) -> Result<Temporal> {
        Ok(match mode {
            TemporalMode::Current => Temporal::Current,
            TemporalMode::AsOf(at) => Temporal::AsOf { at },
            TemporalMode::FromTo { from, to } => Temporal::FromTo(TemporalRange::new(from, to)?),
            TemporalMode::Between { from, to } => Temporal::Between(TemporalRange::new(from, to)?),
            TemporalMode::ContainedIn { from, to } => {
                Temporal::ContainedIn(TemporalRange::new(from, to)?)
            }
            TemporalMode::All => Temporal::All,
        })
    }

    /// True for every variant other than [`Temporal::Current`].
    pub fn is_temporal(&self) -> bool {
        !matches!(self, Temporal::Current)
    }

    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        match self {
            Temporal::AsOf { at } => Some(*at),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<&TemporalRange> {
        match self {
            Temporal::FromTo(range) | Temporal::Between(range) | Temporal::ContainedIn(range) => {
                Some(range)
            }
            _ => None,
        }
    }

    /// Returns `true` if a row version valid during `period` belongs to this view.
    pub fn includes(&self, period: &Period) -> bool {
        match self {
            Temporal::Current => period.is_current(),
            Temporal::AsOf { at } => period.valid_from <= *at && period.ends_after(*at),
            Temporal::FromTo(range) => {
                period.valid_from != range.from
                    && period.valid_from < range.to
                    && period.ends_after(range.from)
                    && period.valid_to != Some(range.to)
            }
            Temporal::Between(range) => {
                period.valid_from <= range.to && period.ends_after(range.from)
            }
            Temporal::ContainedIn(range) => {
                period.valid_from >= range.from
                    && period.valid_to.is_some_and(|valid_to| valid_to <= range.to)
            }
            Temporal::All => true,
        }
    }
}

impl TemporalRange {
    /// Fails with an invalid argument error unless `from` is strictly before `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<TemporalRange> {
        if from >= to {
            return Err(Error::invalid_argument(format!(
                "temporal range start must be strictly before its end; from={from}; to={to}"
            )));
        }

        Ok(TemporalRange { from, to })
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }
}

impl Period {
    /// A version that is still current.
    pub fn open(valid_from: DateTime<Utc>) -> Period {
        Period {
            valid_from,
            valid_to: None,
        }
    }

    /// A historical version, superseded or removed at `valid_to`.
    pub fn closed(valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> Period {
        Period {
            valid_from,
            valid_to: Some(valid_to),
        }
    }

    pub fn is_current(&self) -> bool {
        self.valid_to.is_none()
    }

    /// `valid_to > instant`, where an open end is later than every instant
    fn ends_after(&self, instant: DateTime<Utc>) -> bool {
        self.valid_to.map_or(true, |valid_to| valid_to > instant)
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Current => Ok(()),
            Temporal::AsOf { at } => write!(f, "FOR SYSTEM_TIME AS OF {}", at.to_rfc3339()),
            Temporal::FromTo(range) => write!(
                f,
                "FOR SYSTEM_TIME FROM {} TO {}",
                range.from.to_rfc3339(),
                range.to.to_rfc3339()
            ),
            Temporal::Between(range) => write!(
                f,
                "FOR SYSTEM_TIME BETWEEN {} AND {}",
                range.from.to_rfc3339(),
                range.to.to_rfc3339()
            ),
            Temporal::ContainedIn(range) => write!(
                f,
                "FOR SYSTEM_TIME CONTAINED IN ({}, {})",
                range.from.to_rfc3339(),
                range.to.to_rfc3339()
            ),
            Temporal::All => f.write_str("FOR SYSTEM_TIME ALL"),
        }
    }
}

impl fmt::Display for TemporalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemporalMode::Current => "current",
            TemporalMode::AsOf(_) => "as of",
            TemporalMode::FromTo { .. } => "from/to",
            TemporalMode::Between { .. } => "between",
            TemporalMode::ContainedIn { .. } => "contained in",
            TemporalMode::All => "all",
        })
    }
}
