//! Batch scheduling configuration
//!
//! The closeout and reminder batches are triggered externally (cron hitting
//! the service endpoints); this section only carries their tunables.

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the daily closeout and reminder batches
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Hour of day (0-23, commerce-local) after which the closeout batch
    /// is expected to run
    #[serde(default = "default_closeout_hour")]
    pub closeout_hour: u8,

    /// How many days before the booking date reminders go out
    #[serde(default = "default_reminder_days_before")]
    pub reminder_days_before: u32,
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.closeout_hour > 23 {
            return Err(ValidationError::InvalidCloseoutHour);
        }
        if self.reminder_days_before == 0 || self.reminder_days_before > 30 {
            return Err(ValidationError::InvalidReminderWindow);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            closeout_hour: default_closeout_hour(),
            reminder_days_before: default_reminder_days_before(),
        }
    }
}

fn default_closeout_hour() -> u8 {
    21
}

fn default_reminder_days_before() -> u32 {
    1
}
