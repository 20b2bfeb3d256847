// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// Converts stored UTC instants to the configured display timezone.
///
/// Construction is best-effort: an unrecognized zone name degrades to a
/// passthrough that keeps instants in UTC, so display decoration can never
/// fail a read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTimezone {
    zone: Option<Tz>,
}

impl DisplayTimezone {
    /// Builds a converter for the named IANA zone.
    ///
    /// An unrecognized name yields a UTC passthrough. Callers that care can
    /// check [`Self::is_recognized`] and log the fallback.
    #[must_use]
    pub fn new(zone: &str) -> Self {
        Self {
            zone: zone.parse::<Tz>().ok(),
        }
    }

    /// A converter that leaves instants in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { zone: None }
    }

    /// Whether construction recognized a real zone.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.zone.is_some()
    }

    /// Shifts a stored instant to the display timezone.
    ///
    /// The instant is unchanged; only the offset moves.
    #[must_use]
    pub fn adjust(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        self.zone.map_or_else(
            || instant.fixed_offset(),
            |zone| instant.with_timezone(&zone).fixed_offset(),
        )
    }
}
