//! Формат Firestore REST: наружу структурированные запросы, внутрь типизированные документы.
//!
//! Только кодирование, без транспорта. Общий для нативного адаптера на `reqwest`
//! и браузерного на `gloo-net`.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use crate::data::document_store::{CollectionQuery, Direction, StoreError};
use crate::domain::record::{FieldValue, Record, StoredDocument};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";

/// `projects/{project}/databases/{database}/documents`
pub fn documents_root(project_id: &str, database: &str) -> String {
    format!("projects/{project_id}/databases/{database}/documents")
}

/// URL метода `:runQuery` для корня документов.
pub fn run_query_url(base_url: &str, project_id: &str, database: &str) -> String {
    format!(
        "{}/v1/{}:runQuery",
        base_url.trim_end_matches('/'),
        documents_root(project_id, database)
    )
}

/// URL одного документа. Id кодируется как один сегмент пути.
pub fn document_url(
    base_url: &str,
    project_id: &str,
    database: &str,
    collection: &str,
    id: &str,
) -> String {
    format!(
        "{}/v1/{}/{}/{}",
        base_url.trim_end_matches('/'),
        documents_root(project_id, database),
        urlencoding::encode(collection),
        urlencoding::encode(id)
    )
}

/// Тело запроса `:runQuery`: `{"structuredQuery": {...}}`.
pub fn run_query_body(query: &CollectionQuery) -> Value {
    json!({ "structuredQuery": encode_structured_query(query) })
}

/// Ресурс `StructuredQuery` без обёртки.
pub fn encode_structured_query(query: &CollectionQuery) -> Value {
    let mut structured = Map::new();
    structured.insert(
        "from".to_string(),
        json!([{ "collectionId": query.collection }]),
    );

    if let Some(filter) = &query.filter {
        structured.insert(
            "where".to_string(),
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": filter.field },
                    "op": "EQUAL",
                    "value": encode_value(&filter.value),
                }
            }),
        );
    }

    if let Some(order) = &query.order_by {
        let direction = match order.direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        structured.insert(
            "orderBy".to_string(),
            json!([{ "field": { "fieldPath": order.field }, "direction": direction }]),
        );
    }

    if let Some(limit) = query.limit {
        structured.insert("limit".to_string(), json!(limit));
    }

    Value::Object(structured)
}

pub fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Bool(value) => json!({ "booleanValue": value }),
        FieldValue::Integer(value) => json!({ "integerValue": value.to_string() }),
        FieldValue::Double(value) => json!({ "doubleValue": value }),
        FieldValue::String(value) => json!({ "stringValue": value }),
        FieldValue::Timestamp(value) => {
            json!({ "timestampValue": value.to_rfc3339_opts(SecondsFormat::AutoSi, true) })
        }
        FieldValue::Array(values) => {
            json!({ "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        FieldValue::Map(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

fn encode_fields(fields: &Record) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

pub fn decode_value(value: &Value) -> Result<FieldValue, StoreError> {
    let Some(object) = value.as_object() else {
        return Err(decode_error("field value must be an object"));
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Err(decode_error("field value must not be empty"));
    };

    match kind.as_str() {
        "nullValue" => Ok(FieldValue::Null),
        "booleanValue" => inner
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| decode_error("booleanValue must be a bool")),
        // int64 передаётся десятичной строкой
        "integerValue" => match inner {
            Value::String(raw) => raw
                .parse()
                .map(FieldValue::Integer)
                .map_err(|_| decode_error("integerValue must be an int64 string")),
            Value::Number(number) => number
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| decode_error("integerValue out of range")),
            _ => Err(decode_error("integerValue must be an int64 string")),
        },
        "doubleValue" => match inner {
            Value::Number(number) => number
                .as_f64()
                .map(FieldValue::Double)
                .ok_or_else(|| decode_error("doubleValue must be a number")),
            Value::String(raw) => raw
                .parse()
                .map(FieldValue::Double)
                .map_err(|_| decode_error("doubleValue must be a number")),
            _ => Err(decode_error("doubleValue must be a number")),
        },
        "timestampValue" => {
            let raw = inner
                .as_str()
                .ok_or_else(|| decode_error("timestampValue must be a string"))?;
            DateTime::parse_from_rfc3339(raw)
                .map(|value| FieldValue::Timestamp(value.with_timezone(&Utc)))
                .map_err(|_| decode_error("timestampValue must be RFC 3339"))
        }
        "stringValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|value| FieldValue::String(value.to_string()))
            .ok_or_else(|| decode_error("string-like value must be a string")),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values,
                Some(_) => return Err(decode_error("arrayValue.values must be an array")),
                None => return Ok(FieldValue::Array(Vec::new())),
            };
            values
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Array)
        }
        "mapValue" => decode_fields(inner.get("fields")).map(FieldValue::Map),
        "geoPointValue" => {
            let mut point = BTreeMap::new();
            for axis in ["latitude", "longitude"] {
                let coordinate = inner.get(axis).and_then(Value::as_f64).unwrap_or_default();
                point.insert(axis.to_string(), FieldValue::Double(coordinate));
            }
            Ok(FieldValue::Map(point))
        }
        other => Err(StoreError::Decode(format!("unsupported value type '{other}'"))),
    }
}

fn decode_fields(fields: Option<&Value>) -> Result<Record, StoreError> {
    match fields {
        None | Some(Value::Null) => Ok(Record::new()),
        Some(Value::Object(fields)) => fields
            .iter()
            .map(|(key, value)| decode_value(value).map(|value| (key.clone(), value)))
            .collect(),
        Some(_) => Err(decode_error("fields must be an object")),
    }
}

/// Декодирует ресурс `Document`. Id это последний сегмент `name`.
pub fn decode_document(document: &Value) -> Result<StoredDocument, StoreError> {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| decode_error("document.name is missing"))?;
    let id = name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| decode_error("document.name has no id segment"))?;

    let fields = decode_fields(document.get("fields"))?;
    Ok(StoredDocument::new(id, fields))
}

/// Декодирует ответ `runQuery` (JSON-массив результатов).
///
/// Записи без `document` несут только служебные поля и пропускаются;
/// запись с `error` проваливает весь запрос.
pub fn decode_run_query_response(body: &Value) -> Result<Vec<StoredDocument>, StoreError> {
    let Some(entries) = body.as_array() else {
        return Err(decode_error("runQuery response must be an array"));
    };

    let mut documents = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(message) = decode_error_message(entry) {
            return Err(StoreError::Query(message));
        }
        if let Some(document) = entry.get("document") {
            documents.push(decode_document(document)?);
        }
    }
    Ok(documents)
}

/// Достаёт `error.message` из ошибки Google API.
pub fn decode_error_message(body: &Value) -> Option<String> {
    let envelope = match body {
        Value::Array(entries) => entries.first()?,
        other => other,
    };
    let error = envelope.get("error")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| error.get("status").and_then(Value::as_str).map(str::to_string))?;
    Some(message)
}

fn decode_error(message: &str) -> StoreError {
    StoreError::Decode(message.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn run_query_body_matches_rest_shape() {
        let query = CollectionQuery::new("blog_posts")
            .where_eq("isPublished", true)
            .order_by("publishedAt", Direction::Descending)
            .limit(3);

        let body = run_query_body(&query);

        assert_eq!(
            body,
            json!({
                "structuredQuery": {
                    "from": [{ "collectionId": "blog_posts" }],
                    "where": {
                        "fieldFilter": {
                            "field": { "fieldPath": "isPublished" },
                            "op": "EQUAL",
                            "value": { "booleanValue": true }
                        }
                    },
                    "orderBy": [
                        { "field": { "fieldPath": "publishedAt" }, "direction": "DESCENDING" }
                    ],
                    "limit": 3
                }
            })
        );
    }

    #[test]
    fn run_query_body_wraps_query_once() {
        let body = run_query_body(&CollectionQuery::new("blog_posts"));
        let top_level: Vec<_> = body.as_object().expect("body must be an object").keys().collect();
        assert_eq!(top_level, vec!["structuredQuery"]);
        assert!(body.pointer("/structuredQuery/structuredQuery").is_none());
        assert_eq!(
            body.pointer("/structuredQuery/from/0/collectionId"),
            Some(&json!("blog_posts"))
        );
    }

    #[test]
    fn encode_structured_query_omits_unset_clauses() {
        let structured = encode_structured_query(&CollectionQuery::new("blog_posts"));
        assert!(structured.get("from").is_some());
        assert!(structured.get("where").is_none());
        assert!(structured.get("orderBy").is_none());
        assert!(structured.get("limit").is_none());
    }

    #[test]
    fn decode_document_reads_typed_fields() {
        let raw = json!({
            "name": "projects/p/databases/(default)/documents/blog_posts/post-42",
            "fields": {
                "title": { "stringValue": "Hello" },
                "isPublished": { "booleanValue": true },
                "views": { "integerValue": "1200" },
                "publishedAt": { "timestampValue": "2025-01-05T10:00:00.123456Z" },
                "tags": { "arrayValue": { "values": [{ "stringValue": "seo" }] } },
                "emptyTags": { "arrayValue": {} },
                "author": { "mapValue": { "fields": { "name": { "stringValue": "Ann" } } } }
            },
            "createTime": "2025-01-01T00:00:00Z",
            "updateTime": "2025-01-02T00:00:00Z"
        });

        let doc = decode_document(&raw).expect("document must decode");

        assert_eq!(doc.id, "post-42");
        assert_eq!(doc.field("title"), Some(&FieldValue::from("Hello")));
        assert_eq!(doc.field("views"), Some(&FieldValue::Integer(1200)));
        assert_eq!(doc.field("emptyTags"), Some(&FieldValue::Array(Vec::new())));
        let Some(FieldValue::Timestamp(published)) = doc.field("publishedAt") else {
            panic!("publishedAt must decode as timestamp");
        };
        assert_eq!(
            published.date_naive(),
            Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap().date_naive()
        );
        assert!(matches!(doc.field("author"), Some(FieldValue::Map(_))));
    }

    #[test]
    fn decode_run_query_response_skips_metadata_only_entries() {
        let raw = json!([
            { "readTime": "2025-01-05T10:00:00Z" }
        ]);
        let docs = decode_run_query_response(&raw).expect("empty result must decode");
        assert!(docs.is_empty());

        let raw = json!([
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/blog_posts/a",
                    "fields": { "title": { "stringValue": "A" } }
                },
                "readTime": "2025-01-05T10:00:00Z"
            },
            { "readTime": "2025-01-05T10:00:00Z", "skippedResults": 1 }
        ]);
        let docs = decode_run_query_response(&raw).expect("results must decode");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a");
    }

    #[test]
    fn decode_run_query_response_surfaces_embedded_error() {
        let raw = json!([
            { "error": { "code": 9, "message": "The query requires an index.", "status": "FAILED_PRECONDITION" } }
        ]);
        let err = decode_run_query_response(&raw).expect_err("error entry must fail");
        assert_eq!(err, StoreError::Query("The query requires an index.".to_string()));
    }

    #[test]
    fn decode_error_message_falls_back_to_status() {
        let raw = json!({ "error": { "code": 403, "status": "PERMISSION_DENIED" } });
        assert_eq!(
            decode_error_message(&raw).as_deref(),
            Some("PERMISSION_DENIED")
        );
        assert!(decode_error_message(&json!({ "ok": true })).is_none());
    }

    #[test]
    fn decode_value_rejects_unknown_kind() {
        let err = decode_value(&json!({ "fancyValue": 1 })).expect_err("unknown kind");
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn document_url_encodes_id_segment() {
        let url = document_url(
            "https://firestore.googleapis.com/",
            "growtez-site",
            DEFAULT_DATABASE,
            "blog_posts",
            "a b/c",
        );
        assert_eq!(
            url,
            "https://firestore.googleapis.com/v1/projects/growtez-site/databases/(default)/documents/blog_posts/a%20b%2Fc"
        );
    }

    #[test]
    fn run_query_url_targets_documents_root() {
        assert_eq!(
            run_query_url("http://localhost:8081", "demo", DEFAULT_DATABASE),
            "http://localhost:8081/v1/projects/demo/databases/(default)/documents:runQuery"
        );
    }
}
