use chrono::{DateTime, Utc};

use super::profile::SiteProfile;
use crate::domain::post::Post;

/// Полная календарная дата, например "January 5, 2025".
pub const DATE_FORMAT: &str = "%B %-d, %Y";

/// Отсутствующая дата превращается в пустую строку.
pub fn format_date(published_at: Option<DateTime<Utc>>) -> String {
    published_at
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn cover_image<'a>(post: &'a Post, profile: &'a SiteProfile) -> &'a str {
    post.cover_image
        .as_deref()
        .unwrap_or(profile.fallback_cover.as_str())
}

/// Ссылка с карточки ленты на страницу поста.
pub fn post_link(profile: &SiteProfile, id: &str) -> String {
    format!("{}?id={}", profile.post_page, urlencoding::encode(id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
}

impl ShareLinks {
    /// Строятся от текущего адреса читателя и не кешируются.
    pub fn build(page_url: &str, title: &str) -> Self {
        let url = urlencoding::encode(page_url);
        let text = urlencoding::encode(title);

        Self {
            twitter: format!("https://twitter.com/intent/tweet?url={url}&text={text}"),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        }
    }
}
