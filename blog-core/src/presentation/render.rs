//! Разметка постов. Чистые функции: ни сети, ни состояния вида.
//!
//! HTML собирается шаблонами `askama` из `templates/`, текст и атрибуты
//! экранируются самим шаблонизатором.

use askama::Template;
use thiserror::Error;

use super::address::PageAddress;
use super::derived::{ShareLinks, cover_image, format_date, post_link};
use super::profile::SiteProfile;
use super::surface::{Anchor, PageSurface};
use crate::domain::post::Post;

/// Класс сетки, в которой карточек достаточно для выделенной раскладки.
pub const FEATURED_CLASS: &str = "has-featured";
const FEATURED_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to render markup: {0}")]
pub struct RenderError(pub String);

impl From<askama::Error> for RenderError {
    fn from(err: askama::Error) -> Self {
        Self(err.to_string())
    }
}

/// Поля одной карточки. Пустая строка значит, что бейдж не выводится.
struct CardView<'a> {
    title: &'a str,
    cover: &'a str,
    category: &'a str,
    date: String,
    reading_time: &'a str,
    excerpt: &'a str,
    link: String,
}

impl<'a> CardView<'a> {
    fn new(post: &'a Post, profile: &'a SiteProfile) -> Self {
        Self {
            title: &post.title,
            cover: cover_image(post, profile),
            category: post.category.as_deref().unwrap_or_default(),
            date: format_date(post.published_at),
            reading_time: post.reading_time.as_deref().unwrap_or_default(),
            excerpt: &post.excerpt,
            link: post_link(profile, &post.id),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_cards.html")]
struct BlogCardsTemplate<'a> {
    cards: Vec<CardView<'a>>,
}

#[derive(Template)]
#[template(path = "tag_list.html")]
struct TagListTemplate<'a> {
    tags: &'a [String],
}

/// Карточки для ленты и виджета на главной.
pub fn render_blog_cards(posts: &[Post], profile: &SiteProfile) -> Result<String, RenderError> {
    let template = BlogCardsTemplate {
        cards: posts.iter().map(|post| CardView::new(post, profile)).collect(),
    };
    Ok(template.render()?)
}

/// Заполняет сетку карточками.
pub fn render_listing<S: PageSurface + ?Sized>(
    surface: &mut S,
    posts: &[Post],
    profile: &SiteProfile,
) -> Result<(), RenderError> {
    surface.set_html(Anchor::BlogGrid, &render_blog_cards(posts, profile)?);
    if posts.len() > FEATURED_THRESHOLD {
        surface.add_class(Anchor::BlogGrid, FEATURED_CLASS);
    }
    Ok(())
}

pub fn render_tag_list(tags: &[String]) -> Result<String, RenderError> {
    Ok(TagListTemplate { tags }.render()?)
}

/// Записывает пост в слоты страницы поста.
///
/// `content` написан автором и вставляется в тело без экранирования.
pub fn render_post_detail<S: PageSurface + ?Sized>(
    surface: &mut S,
    post: &Post,
    address: &PageAddress,
    profile: &SiteProfile,
) -> Result<(), RenderError> {
    surface.set_document_title(&format!("{} | {}", post.title, profile.site_name));
    if !post.excerpt.is_empty() {
        surface.set_meta_description(&post.excerpt);
    }

    surface.set_text(
        Anchor::PostCategory,
        post.category.as_deref().unwrap_or(&profile.default_category),
    );
    surface.set_text(Anchor::PostTitle, &post.title);

    let author = post.author.as_ref();
    if let Some(avatar) = author.and_then(|author| author.avatar.as_deref()) {
        surface.set_attribute(Anchor::AuthorAvatar, "src", avatar);
    }
    surface.set_text(
        Anchor::AuthorName,
        author
            .and_then(|author| author.name.as_deref())
            .unwrap_or(&profile.default_author),
    );

    surface.set_text(Anchor::PostDate, &format_date(post.published_at));
    surface.set_text(
        Anchor::PostReadTime,
        post.reading_time
            .as_deref()
            .unwrap_or(&profile.default_reading_time),
    );
    if let Some(cover) = post.cover_image.as_deref() {
        surface.set_attribute(Anchor::PostCover, "src", cover);
    }
    surface.set_html(Anchor::PostBody, &post.content);

    if !post.tags.is_empty() {
        surface.set_html(Anchor::PostTags, &render_tag_list(&post.tags)?);
    }

    let share = ShareLinks::build(address.href(), &post.title);
    surface.set_attribute(Anchor::ShareTwitter, "href", &share.twitter);
    surface.set_attribute(Anchor::ShareLinkedin, "href", &share.linkedin);
    surface.set_attribute(Anchor::ShareFacebook, "href", &share.facebook);
    Ok(())
}
