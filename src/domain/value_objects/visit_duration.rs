//! Visit duration value object
//!
//! Content stores visit durations as bare numbers whose unit depends on the
//! schema version. Durations are normalized to minutes when a document is
//! ingested; nothing past the repository boundary ever sees the stored unit.

use serde::{Deserialize, Serialize};

/// Unit the content store uses for `visitDurationMin/Max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Hours,
    Minutes,
}

impl DurationUnit {
    fn to_minutes(self, value: f64) -> f64 {
        match self {
            DurationUnit::Hours => value * 60.0,
            DurationUnit::Minutes => value,
        }
    }
}

impl std::fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationUnit::Hours => write!(f, "hours"),
            DurationUnit::Minutes => write!(f, "minutes"),
        }
    }
}

impl std::str::FromStr for DurationUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "h" | "" => Ok(DurationUnit::Hours),
            "minutes" | "minute" | "min" | "m" => Ok(DurationUnit::Minutes),
            _ => Err(anyhow::anyhow!("Invalid duration unit: {}", s)),
        }
    }
}

/// How long a visit takes, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisitDuration {
    pub min_minutes: f64,
    pub max_minutes: f64,
}

impl VisitDuration {
    /// Build a duration from stored values.
    ///
    /// Returns `None` without a usable minimum. A missing maximum defaults to
    /// the minimum, and a maximum below the minimum is clamped up to it.
    pub fn from_stored(min: Option<f64>, max: Option<f64>, unit: DurationUnit) -> Option<Self> {
        let min = min.filter(|m| m.is_finite() && *m > 0.0)?;
        let min_minutes = unit.to_minutes(min);
        let max_minutes = match max.filter(|m| m.is_finite()) {
            Some(max) => {
                let max_minutes = unit.to_minutes(max);
                if max_minutes < min_minutes {
                    tracing::warn!(
                        min = min,
                        max = max,
                        "Visit duration maximum below minimum, clamping"
                    );
                    min_minutes
                } else {
                    max_minutes
                }
            }
            None => min_minutes,
        };
        Some(Self {
            min_minutes,
            max_minutes,
        })
    }

    /// Average of min and max, rounded to whole minutes
    pub fn average_minutes(&self) -> u32 {
        ((self.min_minutes + self.max_minutes) / 2.0).round() as u32
    }

    /// Human label such as `2 - 4 hours` or `45 minutes`
    pub fn label(&self) -> String {
        let in_hours = self.min_minutes % 30.0 == 0.0 && self.max_minutes % 30.0 == 0.0;
        let (min, max, unit) = if in_hours {
            (self.min_minutes / 60.0, self.max_minutes / 60.0, "hour")
        } else {
            (self.min_minutes, self.max_minutes, "minute")
        };

        if min == max && min == 1.0 {
            format!("1 {}", unit)
        } else if min == max {
            format!("{} {}s", format_amount(min), unit)
        } else {
            format!("{} - {} {}s", format_amount(min), format_amount(max), unit)
        }
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
