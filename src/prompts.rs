//! Uzbek prompt and message text for the @magistr_guliston channel.

use chrono::{Datelike, NaiveDate};

/// Promotional footer appended to every generated post.
pub const FOOTER_TEXT: &str = "\n\n📣 @magistr_guliston sahifasini kuzatishda davom eting!";

/// Month names for the date label.
pub const MONTHS: [&str; 12] = [
    "yanvar", "fevral", "mart", "aprel", "may", "iyun", "iyul", "avgust", "sentabr", "oktabr",
    "noyabr", "dekabr",
];

/// Day-and-month label, e.g. `7-avgust`.
pub fn date_label(date: NaiveDate) -> String {
    format!("{}-{}", date.day(), MONTHS[date.month0() as usize])
}

/// Standalone post topics used by the scheduled runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Education,
    Motivation,
    Birthdays,
}

impl Topic {
    /// Bold header line of the post body.
    pub fn header(&self) -> &'static str {
        match self {
            Topic::Education => "📚 **Ta’lim fakti:**",
            Topic::Motivation => "💡 **Motivatsiya:**",
            Topic::Birthdays => "🎂 **Bugun tavallud topganlar:**",
        }
    }

    /// Prompt for generating this topic on its own.
    pub fn prompt(&self, date_label: &str) -> String {
        match self {
            Topic::Education => {
                "Qiziqarli ilmiy yoki ta'limiy faktni O'zbek tilida yozing. 2-3 gap. \
                 Emojilar bilan. Faqat matnni qaytaring."
                    .to_string()
            }
            Topic::Motivation => {
                "O'quvchilarga kuch beradigan qisqa motivatsion fikr yozing. O'zbek tilida, \
                 emojilar bilan. Faqat matnni qaytaring."
                    .to_string()
            }
            Topic::Birthdays => format!(
                "Bugun {}. Bugun tug'ilgan mashhur shaxslarni (olimlar, yozuvchilar, \
                 san'atkorlar) O'zbek tilida yozing. Emojilar bilan. Faqat matnni qaytaring.",
                date_label
            ),
        }
    }
}

/// Compose a standalone post: header, generated text, shared footer.
pub fn topic_post(topic: Topic, text: &str) -> String {
    format!("{}\n\n{}{}", topic.header(), text, FOOTER_TEXT)
}

/// Combined prompt for the structured daily-content request.
pub fn daily_content_prompt(date_label: &str) -> String {
    format!(
        "Siz Telegram kanali (@magistr_guliston) uchun kontent yaratuvchi yordamchisiz.\n\
         Bugungi sana: {}.\n\n\
         Quyidagi 4 ta bo'lim uchun O'zbek tilida (lotin alifbosida) qisqa, qiziqarli va \
         Telegram uchun tayyor formatda (Markdown) matn yozing.\n\n\
         Talablar:\n\
         1. Ta'lim fakti: Qiziqarli ilmiy yoki ta'limiy fakt. 1-2 gap.\n\
         2. Motivatsiya: O'quvchiga kuch beradigan qisqa fikr.\n\
         3. Bugun tug'ilganlar: Bugun tug'ilgan mashhur shaxslar (olimlar, yozuvchilar).\n\n\
         Har bir matn oxirida \"@magistr_guliston sahifasini kuzatishda davom eting!\" \
         so'zini QO'SHMANG (buni dastur o'zi qo'shadi).\n\
         Faqat asosiy mazmunni yozing. Emojilardan foydalaning.",
        date_label
    )
}
