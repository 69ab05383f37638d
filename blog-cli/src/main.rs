use std::fmt::Write as _;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use blog_core::{
    Anchor, DEFAULT_COLLECTION, DetailFailure, DetailState, DocumentStore, MemoryStore,
    PageAddress, Post, PostRepository, SiteProfile, StaticPage, load_detail,
};
use blog_core::presentation::derived::{format_date, post_link};
use blog_firestore::{FirestoreConfig, FirestoreStore};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_SITE_URL: &str = "https://growtez.com";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI для чтения постов блога из Firestore")]
struct Cli {
    /// JSON-файл с массивом документов вместо Firestore.
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Идентификатор проекта Firestore.
    #[arg(long, global = true, env = "FIRESTORE_PROJECT_ID")]
    project: Option<String>,

    /// API-ключ веб-приложения Firebase.
    #[arg(long, global = true, env = "FIRESTORE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Базовый URL Firestore REST API (например, эмулятора).
    #[arg(long, global = true, env = "FIRESTORE_BASE_URL")]
    base_url: Option<String>,

    /// Коллекция с постами.
    #[arg(long, global = true, env = "BLOG_COLLECTION", default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Вывод в JSON вместо текста.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Все опубликованные посты, сначала новые.
    List,
    /// Последние опубликованные посты.
    ///
    /// При ошибке хранилища возвращается пустой список, как в виджете на главной.
    Latest {
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=50))]
        count: u32,
    },
    /// Пост по id документа.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Отрисовка страницы поста: заголовок страницы и содержимое каждого якоря.
    RenderPost {
        #[arg(long)]
        id: String,
        /// Адрес страницы для ссылок «поделиться».
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Fixture(PathBuf),
    Firestore(FirestoreConfig),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    let source = resolve_source(
        cli.fixture,
        cli.project,
        cli.api_key,
        cli.base_url,
    )?;
    let store = open_store(&source, &cli.collection)?;
    let repo = PostRepository::with_collection(store, cli.collection);

    let output = execute(cli.command, &repo, cli.json).await?;
    print!("{output}");
    Ok(())
}

/// Логи идут в stderr, чтобы не смешиваться с выводом команд.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            let level = std::env::var("LOG_LEVEL").ok()?;
            EnvFilter::try_new(level).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn resolve_source(
    fixture: Option<PathBuf>,
    project: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<Source> {
    if let Some(path) = fixture {
        return Ok(Source::Fixture(path));
    }

    let project = non_blank(project).ok_or_else(|| {
        anyhow!("укажите --fixture или --project (переменная FIRESTORE_PROJECT_ID)")
    })?;
    let mut config = FirestoreConfig::new(project);
    if let Some(key) = non_blank(api_key) {
        config = config.with_api_key(key);
    }
    if let Some(url) = non_blank(base_url) {
        config = config.with_base_url(url);
    }
    Ok(Source::Firestore(config))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn open_store(source: &Source, collection: &str) -> Result<Arc<dyn DocumentStore>> {
    match source {
        Source::Fixture(path) => Ok(Arc::new(load_fixture(path, collection)?)),
        Source::Firestore(config) => {
            debug!(project_id = %config.project_id, "using firestore");
            let store = FirestoreStore::new(config.clone())
                .map_err(|err| anyhow!("не удалось настроить Firestore: {err}"))?;
            Ok(Arc::new(store))
        }
    }
}

fn load_fixture(path: &Path, collection: &str) -> Result<MemoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("не удалось прочитать {}", path.display()))?;
    MemoryStore::from_json(collection, &raw)
        .map_err(|err| anyhow!("некорректный файл {}: {err}", path.display()))
}

async fn execute<S: DocumentStore>(
    command: Command,
    repo: &PostRepository<S>,
    json: bool,
) -> Result<String> {
    let profile = SiteProfile::default();

    match command {
        Command::List => {
            let posts = repo.fetch_published_posts().await.map_err(|err| anyhow!(err.message))?;
            render_posts(&posts, &profile, json)
        }
        Command::Latest { count } => {
            let count = NonZeroU32::new(count).ok_or_else(|| anyhow!("--count должен быть > 0"))?;
            let posts = repo.fetch_latest_posts(count).await;
            render_posts(&posts, &profile, json)
        }
        Command::Get { id } => {
            let post = repo
                .fetch_post_by_id(&id)
                .await
                .map_err(|err| anyhow!(err.message))?
                .ok_or_else(|| anyhow!("пост не найден: {id}"))?;
            if json {
                return Ok(format!("{}\n", serde_json::to_string_pretty(&post)?));
            }
            Ok(format_post(&post))
        }
        Command::RenderPost { id, url } => {
            let url = url.unwrap_or_else(|| {
                format!("{DEFAULT_SITE_URL}/{}", post_link(&profile, &id))
            });
            let mut page = StaticPage::detail();
            let address = PageAddress::new(url);

            match load_detail(repo, &mut page, &address, &profile).await? {
                Some(DetailState::Ready(_)) => Ok(format_surface(&page)),
                Some(DetailState::Error(DetailFailure::NotFound)) => Err(anyhow!("пост не найден: {id}")),
                Some(DetailState::Error(DetailFailure::Fetch(message))) => Err(anyhow!(message)),
                Some(DetailState::Loading) | None => Err(anyhow!("в адресе нет id поста")),
            }
        }
    }
}

fn render_posts(posts: &[Post], profile: &SiteProfile, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(posts)?));
    }
    Ok(format_list(posts, profile))
}

fn format_list(posts: &[Post], profile: &SiteProfile) -> String {
    let mut out = format!("Постов: {}\n", posts.len());
    for post in posts {
        let date = format_date(post.published_at);
        let date = if date.is_empty() { "без даты".to_string() } else { date };
        let _ = writeln!(
            out,
            "- [{}] {} ({}, {})",
            post.id,
            post.title,
            date,
            post.category.as_deref().unwrap_or(&profile.default_category)
        );
    }
    out
}

fn format_post(post: &Post) -> String {
    let mut out = String::from("Пост\n");
    let _ = writeln!(out, "id: {}", post.id);
    let _ = writeln!(out, "title: {}", post.title);
    let _ = writeln!(out, "published_at: {}", format_date(post.published_at));
    let _ = writeln!(out, "is_published: {}", post.is_published);
    if let Some(category) = &post.category {
        let _ = writeln!(out, "category: {category}");
    }
    if !post.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", post.tags.join(", "));
    }
    if !post.excerpt.is_empty() {
        let _ = writeln!(out, "excerpt: {}", post.excerpt);
    }
    let _ = writeln!(out, "content: {}", post.content);
    out
}

/// Один якорь на строку: `#id [attr=value ...] содержимое`.
fn format_surface(page: &StaticPage) -> String {
    let mut out = String::new();
    if let Some(title) = page.document_title() {
        let _ = writeln!(out, "title: {title}");
    }
    if let Some(description) = page.meta_description() {
        let _ = writeln!(out, "description: {description}");
    }

    for anchor in Anchor::DETAIL {
        let Some(element) = page.element(anchor) else {
            continue;
        };
        let attributes: String = element
            .attributes
            .iter()
            .map(|(name, value)| format!(" {name}={value}"))
            .collect();
        let Some(inner) = element.inner().filter(|inner| !inner.is_empty()) else {
            if !attributes.is_empty() {
                let _ = writeln!(out, "{}{attributes}", anchor.selector());
            }
            continue;
        };
        let _ = writeln!(out, "{}{attributes} {inner}", anchor.selector());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FIXTURE: &str = r#"[
        {"id": "jan-1", "title": "First", "isPublished": true, "publishedAt": "2025-01-01T00:00:00Z"},
        {"id": "jan-5", "title": "Fifth", "isPublished": true, "publishedAt": "2025-01-05T00:00:00Z", "category": "SEO"},
        {"id": "jan-3", "title": "Third", "isPublished": true, "publishedAt": "2025-01-03T00:00:00Z"}
    ]"#;

    fn repo() -> PostRepository<MemoryStore> {
        PostRepository::new(MemoryStore::from_json(DEFAULT_COLLECTION, FIXTURE).expect("fixture must load"))
    }

    #[test]
    fn resolve_source_prefers_fixture() {
        let source = resolve_source(
            Some(PathBuf::from("posts.json")),
            Some("growtez".to_string()),
            None,
            None,
        )
        .expect("source must resolve");
        assert_eq!(source, Source::Fixture(PathBuf::from("posts.json")));
    }

    #[test]
    fn resolve_source_builds_firestore_config() {
        let source = resolve_source(
            None,
            Some(" growtez ".to_string()),
            Some("key".to_string()),
            Some("http://127.0.0.1:8080".to_string()),
        )
        .expect("source must resolve");
        assert_eq!(
            source,
            Source::Firestore(
                FirestoreConfig::new("growtez")
                    .with_api_key("key")
                    .with_base_url("http://127.0.0.1:8080")
            )
        );
    }

    #[test]
    fn resolve_source_requires_project_or_fixture() {
        assert!(resolve_source(None, None, None, None).is_err());
        assert!(resolve_source(None, Some("  ".to_string()), None, None).is_err());
    }

    #[test]
    fn load_fixture_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file must be created");
        file.write_all(FIXTURE.as_bytes()).expect("fixture must be written");

        let store = load_fixture(file.path(), DEFAULT_COLLECTION).expect("fixture must load");
        assert_eq!(store.len(DEFAULT_COLLECTION), 3);
    }

    #[tokio::test]
    async fn list_prints_newest_first() {
        let output = execute(Command::List, &repo(), false)
            .await
            .expect("list must succeed");

        assert_eq!(
            output,
            "Постов: 3\n\
             - [jan-5] Fifth (January 5, 2025, SEO)\n\
             - [jan-3] Third (January 3, 2025, General)\n\
             - [jan-1] First (January 1, 2025, General)\n"
        );
    }

    #[tokio::test]
    async fn latest_json_respects_count() {
        let output = execute(Command::Latest { count: 2 }, &repo(), true)
            .await
            .expect("latest must succeed");

        let posts: serde_json::Value = serde_json::from_str(&output).expect("output must be json");
        assert_eq!(posts.as_array().map(Vec::len), Some(2));
        assert_eq!(posts[0]["id"], "jan-5");
    }

    #[tokio::test]
    async fn get_missing_post_fails() {
        let err = execute(Command::Get { id: "ghost".to_string() }, &repo(), false)
            .await
            .expect_err("missing post must fail");
        assert_eq!(err.to_string(), "пост не найден: ghost");
    }

    #[tokio::test]
    async fn list_reports_store_failure() {
        let repo = PostRepository::new(MemoryStore::failing("offline"));
        let err = execute(Command::List, &repo, false)
            .await
            .expect_err("failing store must fail");
        assert_eq!(err.to_string(), "transport error: offline");
    }

    #[tokio::test]
    async fn render_post_prints_filled_anchors() {
        let output = execute(
            Command::RenderPost {
                id: "jan-5".to_string(),
                url: None,
            },
            &repo(),
            false,
        )
        .await
        .expect("render must succeed");

        assert!(output.starts_with("title: Fifth | growtez Blog\n"));
        assert!(output.contains("#postTitle Fifth\n"));
        assert!(output.contains("#postCategory SEO\n"));
        assert!(output.contains("#postDate January 5, 2025\n"));
        assert!(output.contains(
            "#shareFacebook href=https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fgrowtez.com%2Fblog-post.html%3Fid%3Djan-5"
        ));
    }
}
