use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Набор полей документа в том виде, в каком его отдаёт хранилище.
pub type Record = BTreeMap<String, FieldValue>;

/// Типизированное значение поля документа.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(Record),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Момент времени, если значение его описывает: нативный timestamp,
    /// строка RFC 3339 или целое число миллисекунд от эпохи.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(value) => Some(*value),
            Self::String(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|value| value.with_timezone(&Utc)),
            Self::Integer(millis) => DateTime::from_timestamp_millis(*millis),
            _ => None,
        }
    }

    /// Сравнение для сортировки внутри хранилища.
    ///
    /// Значения разных типов несравнимы (`None`), кроме чисел между собой и
    /// всего, что можно трактовать как момент времени.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Double(a), Self::Double(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Double(b)) => (*a as f64).partial_cmp(b),
            (Self::Double(a), Self::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) => match (self.as_instant(), other.as_instant()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => Some(a.cmp(b)),
            },
            _ => match (self.as_instant(), other.as_instant()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => None,
            },
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Integer(value),
                None => Self::Double(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(value) => Self::String(value),
            Value::Array(values) => Self::Array(values.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Документ хранилища: сгенерированный идентификатор плюс поля.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Record,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Record) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
