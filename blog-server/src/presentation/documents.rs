//! Full HTML documents assembled from a rendered `StaticPage`.

use askama::Template;
use blog_core::presentation::render::render_blog_cards;
use blog_core::{Anchor, DetailView, ListingView, Post, RenderError, SiteProfile, StaticPage};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DocumentError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Element of the page as the templates write it out.
struct Slot {
    id: &'static str,
    class: String,
    attributes: Vec<(String, String)>,
    hidden: bool,
    html: String,
    text: String,
}

impl Slot {
    fn new(page: &StaticPage, anchor: Anchor, base_class: &str) -> Self {
        let element = page.element(anchor);
        let class = std::iter::once(base_class)
            .chain(
                element
                    .into_iter()
                    .flat_map(|element| element.classes.iter().map(String::as_str)),
            )
            .filter(|class| !class.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: anchor.element_id(),
            class,
            attributes: element
                .map(|element| {
                    element
                        .attributes
                        .iter()
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            hidden: is_region(anchor) && !page.is_visible(anchor),
            html: page.html(anchor).unwrap_or_default().to_string(),
            text: page.text(anchor).unwrap_or_default().to_string(),
        }
    }

    fn with_default_attribute(mut self, name: &str, value: &str) -> Self {
        if !self.attributes.iter().any(|(existing, _)| existing == name) {
            self.attributes.push((name.to_string(), value.to_string()));
        }
        self
    }
}

#[derive(Template)]
#[template(path = "listing.html")]
struct ListingTemplate {
    title: String,
    description: String,
    loading: Slot,
    empty: Slot,
    error: Slot,
    error_message: String,
    grid: Slot,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailTemplate {
    title: String,
    description: String,
    loading: Slot,
    error: Slot,
    error_heading: String,
    error_message: String,
    content: Slot,
    category: Slot,
    post_title: Slot,
    avatar: Slot,
    author: Slot,
    date: Slot,
    read_time: Slot,
    cover: Slot,
    body: Slot,
    tags: Slot,
    twitter: Slot,
    linkedin: Slot,
    facebook: Slot,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    title: String,
    description: String,
    show_latest: bool,
    cards: String,
}

pub(crate) fn listing_document(
    page: &StaticPage,
    profile: &SiteProfile,
) -> Result<String, DocumentError> {
    let template = ListingTemplate {
        title: format!("Blog | {}", profile.site_name),
        description: String::new(),
        loading: Slot::new(page, Anchor::BlogLoading, "blog-loading"),
        empty: Slot::new(page, Anchor::BlogEmpty, "blog-empty"),
        error: Slot::new(page, Anchor::BlogError, "blog-error"),
        error_message: slot_text(page, Anchor::BlogErrorMessage),
        grid: Slot::new(page, Anchor::BlogGrid, "blog-grid"),
    };
    Ok(template.render()?)
}

pub(crate) fn detail_document(
    page: &StaticPage,
    profile: &SiteProfile,
) -> Result<String, DocumentError> {
    let share = |anchor| Slot::new(page, anchor, "").with_default_attribute("href", "#");

    let template = DetailTemplate {
        title: page
            .document_title()
            .unwrap_or(profile.site_name.as_str())
            .to_string(),
        description: page.meta_description().unwrap_or_default().to_string(),
        loading: Slot::new(page, Anchor::PostLoading, "blog-loading"),
        error: Slot::new(page, Anchor::PostError, "blog-error"),
        error_heading: slot_text(page, Anchor::PostErrorHeading),
        error_message: slot_text(page, Anchor::PostErrorMessage),
        content: Slot::new(page, Anchor::PostContent, "blog-post"),
        category: Slot::new(page, Anchor::PostCategory, "blog-post-category"),
        post_title: Slot::new(page, Anchor::PostTitle, "blog-post-title"),
        avatar: Slot::new(page, Anchor::AuthorAvatar, ""),
        author: Slot::new(page, Anchor::AuthorName, "author-name"),
        date: Slot::new(page, Anchor::PostDate, "blog-post-date"),
        read_time: Slot::new(page, Anchor::PostReadTime, "blog-post-read-time"),
        cover: Slot::new(page, Anchor::PostCover, "blog-post-cover"),
        body: Slot::new(page, Anchor::PostBody, "blog-post-body"),
        tags: Slot::new(page, Anchor::PostTags, "blog-post-tags"),
        twitter: share(Anchor::ShareTwitter),
        linkedin: share(Anchor::ShareLinkedin),
        facebook: share(Anchor::ShareFacebook),
    };
    Ok(template.render()?)
}

/// Home page with the latest posts widget. The section is left out when empty.
pub(crate) fn home_document(latest: &[Post], profile: &SiteProfile) -> Result<String, DocumentError> {
    let template = HomeTemplate {
        title: profile.site_name.clone(),
        description: String::new(),
        show_latest: !latest.is_empty(),
        cards: render_blog_cards(latest, profile)?,
    };
    Ok(template.render()?)
}

fn slot_text(page: &StaticPage, anchor: Anchor) -> String {
    page.text(anchor).unwrap_or_default().to_string()
}

fn is_region(anchor: Anchor) -> bool {
    ListingView::REGIONS.contains(&anchor) || DetailView::REGIONS.contains(&anchor)
}

#[cfg(test)]
mod tests {
    use blog_core::PageSurface;

    use super::*;

    #[test]
    fn listing_document_hides_inactive_regions() {
        let mut page = StaticPage::listing();
        page.set_visible(Anchor::BlogError, true);
        page.set_text(Anchor::BlogErrorMessage, "Error: <boom>");

        let html = listing_document(&page, &SiteProfile::default()).expect("listing must render");

        assert!(html.contains(r#"<div id="blogError" class="blog-error"><p>Error: &lt;boom&gt;</p></div>"#));
        assert!(html.contains(r#"<div id="blogLoading" class="blog-loading" hidden>"#));
        assert!(html.contains(r#"<div id="blogGrid" class="blog-grid" hidden></div>"#));
        assert!(html.contains("<title>Blog | growtez Blog</title>"));
        assert!(!html.contains(r#"name="description""#));
    }

    #[test]
    fn listing_document_keeps_grid_markup_and_classes() {
        let mut page = StaticPage::listing();
        page.set_visible(Anchor::BlogGrid, true);
        page.set_html(Anchor::BlogGrid, "<article class=\"blog-card\"></article>");
        page.add_class(Anchor::BlogGrid, "has-featured");

        let html = listing_document(&page, &SiteProfile::default()).expect("listing must render");

        assert!(html.contains(
            r#"<div id="blogGrid" class="blog-grid has-featured"><article class="blog-card"></article></div>"#
        ));
    }

    #[test]
    fn detail_document_uses_page_title_and_description() {
        let mut page = StaticPage::detail();
        page.set_document_title("Hello | growtez Blog");
        page.set_meta_description("Short <intro>");
        page.set_visible(Anchor::PostContent, true);
        page.set_text(Anchor::PostTitle, "Hello");
        page.set_attribute(Anchor::ShareTwitter, "href", "https://twitter.com/intent/tweet?url=a&text=b");

        let html = detail_document(&page, &SiteProfile::default()).expect("detail must render");

        assert!(html.contains("<title>Hello | growtez Blog</title>"));
        assert!(html.contains(r#"<meta name="description" content="Short &lt;intro&gt;">"#));
        assert!(html.contains(r#"<h1 id="postTitle" class="blog-post-title">Hello</h1>"#));
        assert!(html.contains(r#"<article id="postContent" class="blog-post">"#));
        assert!(html.contains(r#"href="https://twitter.com/intent/tweet?url=a&amp;text=b""#));
        assert!(html.contains(r##"<a id="shareLinkedin" href="#""##));
        assert!(html.contains(r#"<div id="postError" class="blog-error" hidden>"#));
    }

    #[test]
    fn detail_document_escapes_text_slots() {
        let mut page = StaticPage::detail();
        page.set_text(Anchor::AuthorName, "<b>Ann</b>");
        page.set_html(Anchor::PostBody, "<p>trusted</p>");

        let html = detail_document(&page, &SiteProfile::default()).expect("detail must render");

        assert!(html.contains("&lt;b&gt;Ann"));
        assert!(!html.contains("<b>Ann"));
        assert!(html.contains("<p>trusted</p>"));
    }

    #[test]
    fn home_document_omits_empty_widget() {
        let html = home_document(&[], &SiteProfile::default()).expect("home must render");
        assert!(!html.contains("latest-posts"));
        assert!(html.contains(r#"href="/blog""#));
    }
}
