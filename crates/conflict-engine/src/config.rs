//! Caller-supplied engine configuration.
//!
//! Every tunable lives here so the same engine can serve views with different
//! densities. Nothing in the engine reads global state.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time_range::parse_time_of_day;

/// Explicit configuration passed to every engine operation that needs one.
///
/// Deserializes from partial JSON: absent keys take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// First visible hour of the timeline and start of the business day.
    pub day_start_hour: u32,
    /// End of the business day (exclusive). Candidates must finish by then.
    pub day_end_hour: u32,
    /// Vertical scale of the rendered timeline.
    pub pixels_per_hour: f64,
    /// Floor for rendered height so short appointments stay tappable.
    pub min_content_height: f64,
    /// Maximum number of side-by-side lanes before appointments stack.
    pub max_columns: usize,
    /// Default slot width for availability grids, in minutes.
    pub granularity_minutes: u32,
    /// `HH:MM` times offered when no derived suggestion fits the window.
    pub fallback_times: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
            pixels_per_hour: 80.0,
            min_content_height: 30.0,
            max_columns: 2,
            granularity_minutes: 30,
            fallback_times: ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Single-day timeline density.
    pub fn day_view() -> Self {
        Self::default()
    }

    /// Seven-column week timeline: tighter scale, smaller height floor.
    pub fn week_view() -> Self {
        Self {
            pixels_per_hour: 60.0,
            min_content_height: 20.0,
            ..Self::default()
        }
    }

    /// Business-day window as `(start_minute, end_minute)`.
    pub fn window(&self) -> (u32, u32) {
        (self.day_start_hour * 60, self.day_end_hour * 60)
    }

    /// Check every field, failing on the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.day_end_hour > 24 {
            return Err(EngineError::Configuration(format!(
                "day_end_hour must be at most 24, got {}",
                self.day_end_hour
            )));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(EngineError::Configuration(format!(
                "day_start_hour ({}) must be before day_end_hour ({})",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.pixels_per_hour.is_nan() || self.pixels_per_hour <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "pixels_per_hour must be positive, got {}",
                self.pixels_per_hour
            )));
        }
        if self.min_content_height.is_nan() || self.min_content_height < 0.0 {
            return Err(EngineError::Configuration(format!(
                "min_content_height must not be negative, got {}",
                self.min_content_height
            )));
        }
        if self.max_columns == 0 {
            return Err(EngineError::Configuration(
                "max_columns must be at least 1".to_string(),
            ));
        }
        validate_granularity(self.granularity_minutes)?;
        for time in &self.fallback_times {
            parse_time_of_day(time).map_err(|e| {
                EngineError::Configuration(format!("fallback time rejected: {}", e))
            })?;
        }
        Ok(())
    }
}

/// A slot width is usable only if it tiles an hour exactly.
pub fn validate_granularity(granularity_minutes: u32) -> Result<()> {
    if granularity_minutes == 0 {
        return Err(EngineError::Configuration(
            "granularity must be positive".to_string(),
        ));
    }
    if 60 % granularity_minutes != 0 {
        return Err(EngineError::Configuration(format!(
            "granularity must divide 60 evenly, got {}",
            granularity_minutes
        )));
    }
    Ok(())
}
