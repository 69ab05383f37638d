/// Значения сайта по умолчанию для пустых полей поста.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub site_name: String,
    pub fallback_cover: String,
    pub default_category: String,
    pub default_author: String,
    pub default_reading_time: String,
    /// Относительный путь страницы поста; id передаётся в `?id=`.
    pub post_page: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            site_name: "growtez Blog".to_string(),
            fallback_cover: "assets/1.jpg".to_string(),
            default_category: "General".to_string(),
            default_author: "Team Growtez".to_string(),
            default_reading_time: "5 min read".to_string(),
            post_page: "blog-post.html".to_string(),
        }
    }
}
