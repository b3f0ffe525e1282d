use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::domain::clock::SharedClock;
use crate::domain::repository::OtpRepository;
use crate::domain::types::OTP_RETENTION_HOURS;
use crate::error::AuthServiceError;
use crate::infra::db::DbOtpRepository;

/// Delete reset codes that expired or were used more than `OTP_RETENTION_HOURS` ago.
pub struct PurgeStaleCodesUseCase<O: OtpRepository> {
    pub otps: O,
    pub clock: SharedClock,
}

impl<O: OtpRepository> PurgeStaleCodesUseCase<O> {
    pub async fn execute(&self) -> Result<u64, AuthServiceError> {
        let cutoff = self.clock.now() - ChronoDuration::hours(OTP_RETENTION_HOURS);
        self.otps.purge_stale(cutoff).await
    }
}

/// Run the purge every `period` until the runtime shuts down. Failures are logged
/// and retried on the next tick.
pub fn spawn_sweeper(
    usecase: PurgeStaleCodesUseCase<DbOtpRepository>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match usecase.execute().await {
                Ok(0) => {}
                Ok(deleted) => info!(deleted, "purged stale reset codes"),
                Err(e) => error!(error = ?e, "reset code sweep failed"),
            }
        }
    })
}
