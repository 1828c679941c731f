//! Single and bulk post delivery with per-item state tracking.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::config::DeliveryConfig;
use crate::error::Error;
use crate::posts::{DeliveryState, PostItem};
use crate::telegram::TelegramClient;
use crate::Result;

/// Pause between successive bulk sends, to stay under Telegram rate limits.
const SEND_PAUSE: Duration = Duration::from_secs(1);

/// Outcome of a bulk round.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub sent: usize,
    pub skipped: usize,
    /// Post tag and error message for every item that failed.
    pub failures: Vec<(&'static str, String)>,
}

/// Sends assembled posts through the delivery adapter.
pub struct Publisher {
    telegram: TelegramClient,
    pause: Duration,
}

impl Publisher {
    pub fn new(telegram: TelegramClient) -> Self {
        Self {
            telegram,
            pause: SEND_PAUSE,
        }
    }

    /// Override the inter-message pause.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Send one post, tracking its delivery state.
    ///
    /// With incomplete credentials nothing is sent and the caller gets the
    /// configuration-required condition instead of a network error.
    pub async fn send_item(&self, config: &DeliveryConfig, item: &mut PostItem) -> Result<()> {
        if !config.is_complete() {
            return Err(Error::ConfigRequired);
        }

        item.state = DeliveryState::Sending;
        match self
            .telegram
            .send_message(&config.bot_token, &config.chat_id, &item.body)
            .await
        {
            Ok(_) => {
                item.state = DeliveryState::Sent;
                info!(post = item.id.as_str(), "post delivered");
                Ok(())
            }
            Err(e) => {
                item.state = DeliveryState::NotSent;
                error!(post = item.id.as_str(), error = %e, "delivery failed");
                Err(e)
            }
        }
    }

    /// Send every unsent post in assembled order, pausing between attempts.
    ///
    /// Not atomic: a failed item is recorded and left unsent while the
    /// remaining items are still attempted. Nothing is retried.
    pub async fn send_all(
        &self,
        config: &DeliveryConfig,
        items: &mut [PostItem],
    ) -> Result<BulkReport> {
        if !config.is_complete() {
            return Err(Error::ConfigRequired);
        }

        let mut report = BulkReport::default();
        for item in items.iter_mut() {
            if item.state == DeliveryState::Sent {
                report.skipped += 1;
                continue;
            }

            match self.send_item(config, item).await {
                Ok(()) => report.sent += 1,
                Err(e) => report.failures.push((item.id.as_str(), e.to_string())),
            }

            sleep(self.pause).await;
        }

        Ok(report)
    }
}
