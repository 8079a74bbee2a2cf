use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// `15/Jan/24 1:30 PM`
const MERIDIEM_LAYOUT: &str = "%d/%b/%y %I:%M %p";
/// `1/15/24 13:30`
const NUMERIC_LAYOUT: &str = "%m/%d/%y %H:%M";

/// Zone used to interpret export timestamps, which carry none of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeNormalizer {
    zone: TimeZoneMode,
}

impl TimeNormalizer {
    pub fn new(zone: TimeZoneMode) -> Self {
        TimeNormalizer { zone }
    }

    /// Parse an export cell. An empty cell is `None`; anything that matches
    /// neither layout is an error.
    pub fn normalize(&self, raw: &str) -> Result<Option<DateTime<Utc>>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let layout = layout_for(raw);
        let naive = NaiveDateTime::parse_from_str(raw, layout)
            .with_context(|| format!("Failed to parse time '{}' (expected {})", raw, layout))?;

        let instant = match self.zone {
            TimeZoneMode::Utc => Utc.from_utc_datetime(&naive),
            TimeZoneMode::Local => wall_clock_in(&Local, &naive, raw)?,
        };
        Ok(Some(instant))
    }
}

/// Resolve a wall-clock time in `zone`. Times repeated by a DST fall-back take
/// the earlier instant; times skipped by a spring-forward are errors.
fn wall_clock_in<Tz: TimeZone>(zone: &Tz, naive: &NaiveDateTime, raw: &str) -> Result<DateTime<Utc>> {
    let local = zone
        .from_local_datetime(naive)
        .earliest()
        .with_context(|| format!("Time '{}' does not exist in the local time zone", raw))?;
    Ok(local.with_timezone(&Utc))
}

fn layout_for(raw: &str) -> &'static str {
    if raw.contains("AM") || raw.contains("PM") {
        MERIDIEM_LAYOUT
    } else {
        NUMERIC_LAYOUT
    }
}
