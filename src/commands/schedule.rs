//! Fixed daily routines for the scheduled runner.
//!
//! Each routine sends its messages as they are produced; there is no shared
//! item list and the first failure aborts the remainder of the sequence.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::info;

use crate::config::DeliveryConfig;
use crate::integrations::gemini::SCHEDULER_MODEL;
use crate::integrations::GeminiClient;
use crate::prompts::{self, Topic};
use crate::telegram::TelegramClient;
use crate::weather::WeatherClient;
use crate::Result;

/// Gap between the two morning messages.
const MORNING_PAUSE: Duration = Duration::from_secs(2);

/// One of the three fixed daily routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 07:00 - weather, then birthdays.
    Morning,
    /// 10:00 - motivation.
    Motivation,
    /// 14:00 - education fact.
    Education,
}

impl Mode {
    /// Parse the positional selector; `None` means "print usage and exit".
    pub fn parse(selector: &str) -> Option<Mode> {
        match selector {
            "morning" => Some(Mode::Morning),
            "motivation" => Some(Mode::Motivation),
            "education" => Some(Mode::Education),
            _ => None,
        }
    }
}

/// Runs one scheduled routine to completion.
pub struct Runner {
    weather: WeatherClient,
    gemini: GeminiClient,
    telegram: TelegramClient,
    config: DeliveryConfig,
    morning_pause: Duration,
}

impl Runner {
    pub fn new(
        weather: WeatherClient,
        gemini: GeminiClient,
        telegram: TelegramClient,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            weather,
            gemini,
            telegram,
            config,
            morning_pause: MORNING_PAUSE,
        }
    }

    /// Create a runner from environment credentials.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            WeatherClient::new()?,
            GeminiClient::from_env()?.with_model(SCHEDULER_MODEL),
            TelegramClient::new()?,
            DeliveryConfig::from_env()?,
        ))
    }

    /// Override the gap between the two morning messages.
    pub fn with_morning_pause(mut self, pause: Duration) -> Self {
        self.morning_pause = pause;
        self
    }

    /// Run one routine; the first failure aborts the rest of the sequence.
    pub async fn run(&self, mode: Mode, today: NaiveDate) -> Result<()> {
        match mode {
            Mode::Morning => self.morning(today).await,
            Mode::Motivation => self.topic(Topic::Motivation, today).await,
            Mode::Education => self.topic(Topic::Education, today).await,
        }
    }

    async fn morning(&self, today: NaiveDate) -> Result<()> {
        info!("sending morning posts");
        let snapshot = self.weather.fetch_current().await?;
        self.send(&snapshot.rendered).await?;

        sleep(self.morning_pause).await;

        self.topic(Topic::Birthdays, today).await
    }

    async fn topic(&self, topic: Topic, today: NaiveDate) -> Result<()> {
        info!(topic = ?topic, "sending topic post");
        let label = prompts::date_label(today);
        let text = self.gemini.generate_text(&topic.prompt(&label)).await?;
        self.send(&prompts::topic_post(topic, &text)).await
    }

    async fn send(&self, text: &str) -> Result<()> {
        self.telegram
            .send_message(&self.config.bot_token, &self.config.chat_id, text)
            .await?;
        info!("post delivered");
        Ok(())
    }
}
