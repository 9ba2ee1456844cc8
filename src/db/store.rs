use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::error::StoreError;

/// Named collections held by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    LateUploadRequests,
    UploadedSheets,
    Attendance,
    DailyReports,
    Schools,
    Users,
    Sessions,
    Meetings,
    MeetingClicks,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::LateUploadRequests => "late_upload_requests",
            Collection::UploadedSheets => "uploaded_sheets",
            Collection::Attendance => "attendance",
            Collection::DailyReports => "daily_reports",
            Collection::Schools => "schools",
            Collection::Users => "users",
            Collection::Sessions => "sessions",
            Collection::Meetings => "meetings",
            Collection::MeetingClicks => "meeting_clicks",
        }
    }
}

/// One predicate on a top-level document field.
///
/// Missing fields compare as JSON `null`. Range predicates compare numbers
/// numerically and strings lexicographically; mixed types never match.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(String, Value),
    In(String, Vec<Value>),
    Gte(String, Value),
    Lt(String, Value),
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

fn to_json<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.conditions
            .push(Condition::Eq(field.to_string(), to_json(value)));
        self
    }

    pub fn eq_opt<T: Serialize>(self, field: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    pub fn is_in<T: Serialize>(mut self, field: &str, values: impl IntoIterator<Item = T>) -> Self {
        let values = values.into_iter().map(to_json).collect();
        self.conditions.push(Condition::In(field.to_string(), values));
        self
    }

    pub fn gte<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.conditions
            .push(Condition::Gte(field.to_string(), to_json(value)));
        self
    }

    pub fn lt<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.conditions
            .push(Condition::Lt(field.to_string(), to_json(value)));
        self
    }

    /// Restricts a timestamp field to whole calendar days, both ends inclusive.
    pub fn within_days(
        self,
        field: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        let mut filter = self;
        if let Some(start) = start {
            filter = filter.gte(field, NaiveDateTime::new(start, NaiveTime::MIN));
        }
        if let Some(next) = end.and_then(|end| end.checked_add_days(Days::new(1))) {
            filter = filter.lt(field, NaiveDateTime::new(next, NaiveTime::MIN));
        }
        filter
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Eq(field, expected) => field_value(document, field) == expected,
            Condition::In(field, candidates) => {
                let actual = field_value(document, field);
                candidates.iter().any(|candidate| candidate == actual)
            }
            Condition::Gte(field, bound) => matches!(
                compare_values(field_value(document, field), bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Condition::Lt(field, bound) => matches!(
                compare_values(field_value(document, field), bound),
                Some(Ordering::Less)
            ),
        })
    }
}

fn field_value<'a>(document: &'a Value, field: &str) -> &'a Value {
    document.get(field).unwrap_or(&Value::Null)
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// Collection-oriented storage the domain treats as its only source of truth.
///
/// No transactions span calls. `find` returns documents in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn find(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Value>, StoreError>;

    async fn insert(
        &self,
        collection: Collection,
        id: Uuid,
        document: Value,
    ) -> Result<(), StoreError>;

    /// Shallow-merges the top-level fields of `changes` into the document.
    /// Returns `false` when no document has that id.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<bool, StoreError>;

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, StoreError> {
        (**self).find(collection, filter).await
    }

    async fn insert(
        &self,
        collection: Collection,
        id: Uuid,
        document: Value,
    ) -> Result<(), StoreError> {
        (**self).insert(collection, id, document).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<bool, StoreError> {
        (**self).update_by_id(collection, id, changes).await
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        (**self).count(collection, filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}

pub fn encode<T: Serialize>(document: &T) -> Result<Value, StoreError> {
    serde_json::to_value(document).map_err(|e| StoreError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(
    collection: Collection,
    document: Value,
) -> Result<T, StoreError> {
    serde_json::from_value(document).map_err(|e| StoreError::Decode {
        collection: collection.name(),
        reason: e.to_string(),
    })
}

/// Typed `find`: decodes every matching document.
pub async fn find_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<T>, StoreError> {
    store
        .find(collection, filter)
        .await?
        .into_iter()
        .map(|document| decode(collection, document))
        .collect()
}

pub async fn find_one_as<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> Result<Option<T>, StoreError> {
    let mut documents = store.find(collection, filter).await?;
    if documents.is_empty() {
        return Ok(None);
    }
    decode(collection, documents.swap_remove(0)).map(Some)
}
