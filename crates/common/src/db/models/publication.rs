//! Publication entity and its request-side input

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publications")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub authors: Option<String>,

    /// Kept as text, never parsed
    #[sea_orm(column_type = "Text", nullable)]
    pub year: Option<String>,

    #[sea_orm(column_name = "type", column_type = "Text", nullable)]
    #[serde(rename = "type")]
    pub kind: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub doi: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub const PLACEHOLDER_AUTHORS: &str = "Jane Researcher, John Scholar";
pub const PLACEHOLDER_TYPE: &str = "Journal";
pub const PLACEHOLDER_SUMMARY: &str = "Auto-generated metadata placeholder.";

/// Fields a client may supply when creating a publication.
///
/// Unknown keys are ignored. Each field goes through [`coerce_text`], so
/// numbers and booleans are stored as their textual form while arrays and
/// objects reject the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublicationInput {
    #[serde(default, deserialize_with = "coerce_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "coerce_text")]
    pub authors: Option<String>,

    #[serde(default, deserialize_with = "coerce_text")]
    pub year: Option<String>,

    #[serde(default, rename = "type", deserialize_with = "coerce_text")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "coerce_text")]
    pub doi: Option<String>,

    #[serde(default, deserialize_with = "coerce_text")]
    pub summary: Option<String>,
}

impl PublicationInput {
    /// Stub metadata for a DOI import; no external lookup happens
    pub fn placeholder_for_doi(doi: &str, year: i32) -> Self {
        Self {
            title: Some(format!("Imported publication for DOI: {}", doi)),
            authors: Some(PLACEHOLDER_AUTHORS.to_string()),
            year: Some(year.to_string()),
            kind: Some(PLACEHOLDER_TYPE.to_string()),
            doi: Some(doi.to_string()),
            summary: Some(PLACEHOLDER_SUMMARY.to_string()),
        }
    }

    /// Build the row to insert, with store-assigned id and timestamp
    pub fn into_record(self, id: Uuid, created_at: DateTimeUtc) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            title: Set(self.title),
            authors: Set(self.authors),
            year: Set(self.year),
            kind: Set(self.kind),
            doi: Set(self.doi),
            summary: Set(self.summary),
            created_at: Set(created_at),
        }
    }
}

/// Coerce a scalar JSON value into optional text.
///
/// `null` becomes `None`; strings pass through; numbers and booleans are
/// rendered as text. Arrays and objects are an error.
pub fn coerce_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_)) => Err(de::Error::custom("cannot coerce an array to text")),
        Some(Value::Object(_)) => Err(de::Error::custom("cannot coerce an object to text")),
    }
}
