//! Record field values in the shape the Bitable API expects.
//!
//! Each `encode_*` function maps one strongly-typed input to the JSON value
//! the table-field API accepts for that field kind. They know nothing about
//! the destination field's declared type: sending a value to a field of the
//! wrong kind is rejected remotely, not here.

use chrono::{DateTime, TimeZone};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A user reference inside a person field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
}

/// One encoded cell value.
///
/// Serializes untagged, i.e. straight to the wire shape: a text value is a
/// JSON string, a multi-select is an array of option labels, a URL is a
/// `{"link", "text"}` object and so on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Epoch milliseconds.
    DateTimeMillis(i64),
    Checkbox(bool),
    /// Option label. Not validated against the remote schema.
    SingleSelect(String),
    /// Option labels in caller order, duplicates kept.
    MultiSelect(Vec<String>),
    Url { link: String, text: String },
    UserRefs(Vec<UserRef>),
    Phone(String),
    Location(String),
}

impl FieldValue {
    /// The table field type this value shape is meant for.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::DateTimeMillis(_) => FieldType::DateTime,
            FieldValue::Checkbox(_) => FieldType::Checkbox,
            FieldValue::SingleSelect(_) => FieldType::SingleSelect,
            FieldValue::MultiSelect(_) => FieldType::MultiSelect,
            FieldValue::Url { .. } => FieldType::Url,
            FieldValue::UserRefs(_) => FieldType::User,
            FieldValue::Phone(_) => FieldType::Phone,
            FieldValue::Location(_) => FieldType::Location,
        }
    }
}

pub fn encode_text(s: impl Into<String>) -> FieldValue {
    FieldValue::Text(s.into())
}

/// Passed through as given; the caller rounds if the field has a precision.
pub fn encode_number(n: f64) -> FieldValue {
    FieldValue::Number(n)
}

/// Epoch seconds to the millisecond timestamps date fields store.
///
/// Saturates at the `i64` bounds instead of overflowing.
pub fn encode_datetime_from_epoch_seconds(secs: i64) -> FieldValue {
    FieldValue::DateTimeMillis(secs.saturating_mul(1000))
}

/// Same as [`encode_datetime_from_epoch_seconds`] for a chrono timestamp in
/// any time zone. Sub-second precision is dropped.
pub fn encode_datetime_from_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> FieldValue {
    encode_datetime_from_epoch_seconds(ts.timestamp())
}

pub fn encode_url(link: impl Into<String>, text: impl Into<String>) -> FieldValue {
    FieldValue::Url {
        link: link.into(),
        text: text.into(),
    }
}

pub fn encode_single_select(option: impl Into<String>) -> FieldValue {
    FieldValue::SingleSelect(option.into())
}

pub fn encode_multi_select<I, S>(options: I) -> FieldValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldValue::MultiSelect(options.into_iter().map(Into::into).collect())
}

pub fn encode_checkbox(checked: bool) -> FieldValue {
    FieldValue::Checkbox(checked)
}

/// Wraps each id as `{"id": ..}`. No ids gives an empty list.
pub fn encode_user_refs<I, S>(ids: I) -> FieldValue
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FieldValue::UserRefs(ids.into_iter().map(|id| UserRef { id: id.into() }).collect())
}

pub fn encode_phone(s: impl Into<String>) -> FieldValue {
    FieldValue::Phone(s.into())
}

pub fn encode_location(s: impl Into<String>) -> FieldValue {
    FieldValue::Location(s.into())
}

// ---------------------------------------------------------------------------
// Record payload
// ---------------------------------------------------------------------------

/// Field name -> value mapping sent as a record's `fields` object.
///
/// Keeps insertion order so request bodies read in the order the caller
/// wrote them. Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Fields {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Field type tags used when declaring a table's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Number,
    SingleSelect,
    MultiSelect,
    DateTime,
    Checkbox,
    User,
    Phone,
    Url,
    Location,
}

impl FieldType {
    pub fn tag(self) -> u16 {
        match self {
            FieldType::Text => 1,
            FieldType::Number => 2,
            FieldType::SingleSelect => 3,
            FieldType::MultiSelect => 4,
            FieldType::DateTime => 5,
            FieldType::Checkbox => 7,
            FieldType::User => 11,
            FieldType::Phone => 13,
            FieldType::Url => 15,
            FieldType::Location => 22,
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.tag())
    }
}

/// A column declaration for table creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(field_name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field_name: field_name.into(),
            field_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    #[test]
    fn test_datetime_seconds_become_millis() {
        for t in [0i64, 1, -1, 1_700_000_000, -86_400] {
            assert_eq!(
                encode_datetime_from_epoch_seconds(t),
                FieldValue::DateTimeMillis(t * 1000)
            );
        }
    }

    #[test]
    fn test_datetime_saturates_instead_of_overflowing() {
        assert_eq!(
            encode_datetime_from_epoch_seconds(i64::MAX),
            FieldValue::DateTimeMillis(i64::MAX)
        );
        assert_eq!(
            encode_datetime_from_epoch_seconds(i64::MIN),
            FieldValue::DateTimeMillis(i64::MIN)
        );
    }

    #[test]
    fn test_datetime_from_timestamp_ignores_zone_and_subseconds() {
        let utc = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        let shanghai = utc.with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());

        assert_eq!(
            encode_datetime_from_timestamp(&utc),
            FieldValue::DateTimeMillis(1_700_000_000_000)
        );
        assert_eq!(
            encode_datetime_from_timestamp(&shanghai),
            FieldValue::DateTimeMillis(1_700_000_000_000)
        );
    }

    #[test]
    fn test_multi_select_keeps_order_and_duplicates() {
        let value = encode_multi_select(["hot", "new", "hot"]);
        assert_eq!(
            value,
            FieldValue::MultiSelect(vec!["hot".into(), "new".into(), "hot".into()])
        );
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(["hot", "new", "hot"]));

        let empty = encode_multi_select(Vec::<String>::new());
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!([]));
    }

    #[test]
    fn test_user_refs_wraps_ids() {
        let value = encode_user_refs(["ou_1", "ou_2"]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([{"id": "ou_1"}, {"id": "ou_2"}])
        );
    }

    #[test]
    fn test_empty_user_refs_is_empty_list() {
        let value = encode_user_refs(Vec::<&str>::new());
        assert_eq!(value, FieldValue::UserRefs(vec![]));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([]));
    }

    #[test]
    fn test_wire_shapes() {
        let cases = [
            (encode_text("iPhone"), json!("iPhone")),
            (encode_number(7999.5), json!(7999.5)),
            (encode_checkbox(true), json!(true)),
            (encode_single_select("on sale"), json!("on sale")),
            (encode_phone("+86 138 0000 0000"), json!("+86 138 0000 0000")),
            (encode_location("116.397755,39.903179"), json!("116.397755,39.903179")),
            (
                encode_url("https://open.feishu.cn", "docs"),
                json!({"link": "https://open.feishu.cn", "text": "docs"}),
            ),
            (encode_datetime_from_epoch_seconds(1), json!(1000)),
        ];
        for (value, expected) in cases {
            assert_eq!(serde_json::to_value(&value).unwrap(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_fields_preserve_insertion_order() {
        let fields = Fields::new()
            .with("name", encode_text("A"))
            .with("count", encode_number(1.0))
            .with("active", encode_checkbox(false));

        let body = serde_json::to_string(&fields).unwrap();
        assert_eq!(body, r#"{"name":"A","count":1.0,"active":false}"#);
    }

    #[test]
    fn test_fields_insert_replaces_in_place() {
        let mut fields = Fields::new()
            .with("a", encode_text("1"))
            .with("b", encode_text("2"));
        fields.insert("a", encode_text("3"));

        assert_eq!(fields.len(), 2);
        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(fields.get("a"), Some(&encode_text("3")));
    }

    #[test]
    fn test_field_spec_serializes_type_tag() {
        let spec = FieldSpec::new("status", FieldType::SingleSelect);
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"field_name": "status", "type": 3})
        );
    }

    #[test]
    fn test_value_reports_matching_field_type() {
        assert_eq!(encode_url("a", "b").field_type(), FieldType::Url);
        assert_eq!(encode_user_refs(["x"]).field_type().tag(), 11);
        assert_eq!(encode_datetime_from_epoch_seconds(0).field_type().tag(), 5);
    }
}
