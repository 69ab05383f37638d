use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::record::{FieldValue, Record, StoredDocument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// Запись блога, прошедшая проверку полей.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub author: Option<Author>,
    pub tags: Vec<String>,
    pub reading_time: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
}

impl Post {
    /// Строит пост из сырого документа хранилища.
    ///
    /// Неизвестные поля игнорируются, отсутствующие необязательные поля
    /// получают значения по умолчанию, а поле неверного типа отклоняет
    /// весь документ.
    pub fn from_document(document: StoredDocument) -> Result<Self, DomainError> {
        if document.id.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "id",
                message: "must not be empty",
            });
        }
        let StoredDocument { id, fields } = document;
        let fields = &fields;

        let title = optional_string(fields, "title")?.ok_or(DomainError::Validation {
            field: "title",
            message: "must be a non-empty string",
        })?;

        Ok(Self {
            id,
            title,
            slug: optional_string(fields, "slug")?,
            excerpt: optional_string(fields, "excerpt")?.unwrap_or_default(),
            content: optional_string(fields, "content")?.unwrap_or_default(),
            cover_image: optional_string(fields, "coverImage")?,
            category: optional_string(fields, "category")?,
            author: author(fields)?,
            tags: tags(fields)?,
            reading_time: optional_string(fields, "readingTime")?,
            published_at: published_at(fields)?,
            is_published: is_published(fields)?,
        })
    }

    /// Порядок ленты: сначала новые, посты без даты публикации в конце.
    pub fn newest_first(a: &Post, b: &Post) -> Ordering {
        match (a.published_at, b.published_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn optional_string(fields: &Record, field: &'static str) -> Result<Option<String>, DomainError> {
    match fields.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::String(value)) => {
            let value = value.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Some(_) => Err(DomainError::Validation {
            field,
            message: "must be a string",
        }),
    }
}

fn author(fields: &Record) -> Result<Option<Author>, DomainError> {
    match fields.get("author") {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Map(author)) => {
            let name = optional_string(author, "name").map_err(|_| DomainError::Validation {
                field: "author.name",
                message: "must be a string",
            })?;
            let avatar =
                optional_string(author, "avatar").map_err(|_| DomainError::Validation {
                    field: "author.avatar",
                    message: "must be a string",
                })?;

            if name.is_none() && avatar.is_none() {
                return Ok(None);
            }
            Ok(Some(Author { name, avatar }))
        }
        Some(_) => Err(DomainError::Validation {
            field: "author",
            message: "must be a map",
        }),
    }
}

fn tags(fields: &Record) -> Result<Vec<String>, DomainError> {
    match fields.get("tags") {
        None | Some(FieldValue::Null) => Ok(Vec::new()),
        Some(FieldValue::Array(values)) => {
            let mut tags = Vec::with_capacity(values.len());
            for value in values {
                let Some(tag) = value.as_str() else {
                    return Err(DomainError::Validation {
                        field: "tags",
                        message: "must contain only strings",
                    });
                };
                let tag = tag.trim();
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
            }
            Ok(tags)
        }
        Some(_) => Err(DomainError::Validation {
            field: "tags",
            message: "must be an array",
        }),
    }
}

fn published_at(fields: &Record) -> Result<Option<DateTime<Utc>>, DomainError> {
    match fields.get("publishedAt") {
        None | Some(FieldValue::Null) => Ok(None),
        Some(value @ (FieldValue::Timestamp(_) | FieldValue::String(_) | FieldValue::Integer(_))) => {
            value.as_instant().map(Some).ok_or(DomainError::Validation {
                field: "publishedAt",
                message: "must be an RFC 3339 timestamp or epoch milliseconds",
            })
        }
        Some(_) => Err(DomainError::Validation {
            field: "publishedAt",
            message: "must be a timestamp",
        }),
    }
}

fn is_published(fields: &Record) -> Result<bool, DomainError> {
    match fields.get("isPublished") {
        None | Some(FieldValue::Null) => Ok(false),
        Some(value) => value.as_bool().ok_or(DomainError::Validation {
            field: "isPublished",
            message: "must be a bool",
        }),
    }
}
