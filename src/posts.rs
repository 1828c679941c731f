//! The four daily posts and their delivery state.

use crate::integrations::GeneratedContent;
use crate::prompts::{self, Topic};
use crate::weather::WeatherSnapshot;

/// Identity of one of the four daily posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostId {
    Weather,
    Education,
    Motivation,
    Birthdays,
}

impl PostId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostId::Weather => "weather",
            PostId::Education => "education",
            PostId::Motivation => "motivation",
            PostId::Birthdays => "birthdays",
        }
    }

    /// Display title shown in the review list.
    pub fn title(&self) -> &'static str {
        match self {
            PostId::Weather => "Ob-havo",
            PostId::Education => "Ta’lim fakti",
            PostId::Motivation => "Motivatsiya",
            PostId::Birthdays => "Tavallud topganlar",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PostId::Weather => "🌤",
            PostId::Education => "📚",
            PostId::Motivation => "💡",
            PostId::Birthdays => "🎂",
        }
    }
}

/// Delivery state of a single post.
///
/// Only advances NotSent -> Sending -> Sent; a failed send reverts
/// Sending -> NotSent. Never regresses from Sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryState {
    #[default]
    NotSent,
    Sending,
    Sent,
}

/// One reviewable post with its delivery state.
#[derive(Debug, Clone)]
pub struct PostItem {
    pub id: PostId,
    pub title: &'static str,
    pub icon: &'static str,
    pub body: String,
    pub state: DeliveryState,
}

impl PostItem {
    pub fn new(id: PostId, body: String) -> Self {
        Self {
            id,
            title: id.title(),
            icon: id.icon(),
            body,
            state: DeliveryState::NotSent,
        }
    }
}

/// Build the four daily posts in their fixed order.
///
/// The weather text already carries its own promotional line, so only the
/// three topic posts get the shared footer appended here.
pub fn assemble(weather: &WeatherSnapshot, content: &GeneratedContent) -> Vec<PostItem> {
    vec![
        PostItem::new(PostId::Weather, weather.rendered.clone()),
        PostItem::new(
            PostId::Education,
            prompts::topic_post(Topic::Education, &content.education_fact),
        ),
        PostItem::new(
            PostId::Motivation,
            prompts::topic_post(Topic::Motivation, &content.motivation),
        ),
        PostItem::new(
            PostId::Birthdays,
            prompts::topic_post(Topic::Birthdays, &content.birthdays),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::FOOTER_TEXT;

    fn sample_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 21.0,
            humidity: 40.0,
            wind_speed: 3.0,
            precipitation: 0.0,
            condition: "Ochiq havo ☀️",
            rendered: "🌤 **Sirdaryo viloyati ob-havosi:**\n\n🌡 Harorat: 21°C\n\n\
                       @magistr_guliston sahifasini kuzatishda davom eting!"
                .to_string(),
        }
    }

    fn sample_content() -> GeneratedContent {
        GeneratedContent {
            education_fact: "Asalarilar raqsda gaplashadi 🐝".to_string(),
            motivation: "Bugun bir qadam tashlang 💪".to_string(),
            birthdays: "Abu Rayhon Beruniy 🎉".to_string(),
        }
    }

    #[test]
    fn test_assemble_order_and_state() {
        let items = assemble(&sample_weather(), &sample_content());

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, PostId::Weather);
        assert_eq!(items[1].id, PostId::Education);
        assert_eq!(items[2].id, PostId::Motivation);
        assert_eq!(items[3].id, PostId::Birthdays);
        assert!(items
            .iter()
            .all(|item| item.state == DeliveryState::NotSent));
    }

    #[test]
    fn test_weather_body_is_adapter_text_without_second_footer() {
        let weather = sample_weather();
        let items = assemble(&weather, &sample_content());

        assert_eq!(items[0].body, weather.rendered);
        // The adapter text carries its own promotional line exactly once.
        assert_eq!(items[0].body.matches("@magistr_guliston").count(), 1);
        assert!(!items[0].body.contains("📣"));
    }

    #[test]
    fn test_topic_bodies_have_header_and_footer() {
        let items = assemble(&sample_weather(), &sample_content());

        assert!(items[1].body.starts_with("📚 **Ta’lim fakti:**\n\n"));
        assert!(items[1].body.contains("Asalarilar raqsda gaplashadi 🐝"));
        assert!(items[1].body.ends_with(FOOTER_TEXT));

        assert!(items[2].body.starts_with("💡 **Motivatsiya:**\n\n"));
        assert!(items[3].body.starts_with("🎂 **Bugun tavallud topganlar:**\n\n"));
        assert!(items[3].body.ends_with(FOOTER_TEXT));
    }

    #[test]
    fn test_post_id_metadata() {
        assert_eq!(PostId::Weather.as_str(), "weather");
        assert_eq!(PostId::Weather.title(), "Ob-havo");
        assert_eq!(PostId::Birthdays.icon(), "🎂");
    }

    #[test]
    fn test_delivery_state_default() {
        assert_eq!(DeliveryState::default(), DeliveryState::NotSent);
    }
}
