//! Daily content generation round.

use chrono::NaiveDate;
use tracing::info;

use crate::integrations::GeminiClient;
use crate::posts::{self, PostItem};
use crate::prompts;
use crate::weather::WeatherClient;
use crate::Result;

/// In-memory post list for one review session.
///
/// A generation round always replaces the whole list; a failed round leaves
/// it empty rather than showing stale posts.
#[derive(Debug, Default)]
pub struct Session {
    pub posts: Vec<PostItem>,
}

impl Session {
    pub fn new() -> Self {
        Self { posts: Vec::new() }
    }

    /// Run one generation round.
    ///
    /// Weather and content are fetched concurrently and joined
    /// all-or-nothing: if either call fails, no posts are produced.
    pub async fn generate(
        &mut self,
        weather: &WeatherClient,
        gemini: &GeminiClient,
        today: NaiveDate,
    ) -> Result<()> {
        self.posts.clear();

        let label = prompts::date_label(today);
        let (snapshot, content) = tokio::try_join!(
            weather.fetch_current(),
            gemini.generate_daily_content(&label),
        )?;

        self.posts = posts::assemble(&snapshot, &content);
        info!(count = self.posts.len(), "generation round complete");
        Ok(())
    }
}
