use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content classification. Wire values are the server's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Financeiro")]
    Financial,
    #[serde(rename = "RH")]
    HumanResources,
    #[serde(rename = "Técnico")]
    Technical,
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Legal")]
    Legal,
    #[default]
    #[serde(rename = "Geral")]
    General,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Financial,
        Category::HumanResources,
        Category::Technical,
        Category::Marketing,
        Category::Legal,
        Category::General,
    ];

    /// Label used on the wire and in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Category::Financial => "Financeiro",
            Category::HumanResources => "RH",
            Category::Technical => "Técnico",
            Category::Marketing => "Marketing",
            Category::Legal => "Legal",
            Category::General => "Geral",
        }
    }

    /// Chart and badge color.
    pub fn color(self) -> &'static str {
        match self {
            Category::Financial => "#10b981",
            Category::HumanResources => "#f59e0b",
            Category::Technical => "#3b82f6",
            Category::Marketing => "#ec4899",
            Category::Legal => "#8b5cf6",
            Category::General => "#6b7280",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts wire labels case-insensitively, plus `Tecnico` without the accent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "tecnico" {
            return Ok(Category::Technical);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A managed document as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Category,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Editable fields. Absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query parameters for listing documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub category: Option<String>,
    pub file_type: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl DocumentQuery {
    /// Query pairs in a fixed order; empty strings and zero numbers are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("category", &self.category),
            ("file_type", &self.file_type),
            ("search", &self.search),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        for (key, value) in [("limit", self.limit), ("offset", self.offset)] {
            if let Some(v) = value.filter(|v| *v > 0) {
                pairs.push((key, v.to_string()));
            }
        }
        pairs
    }
}

/// Suggested metadata from the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub suggested_title: Option<String>,
    #[serde(default)]
    pub suggested_author: Option<String>,
    #[serde(default)]
    pub suggested_category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggested_tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl AiAnalysis {
    /// Confidence as a rounded percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Update applying every suggestion, with the summary as description.
    pub fn to_update(&self) -> DocumentUpdate {
        DocumentUpdate {
            title: self.suggested_title.clone(),
            author: self.suggested_author.clone(),
            category: self.suggested_category,
            tags: Some(self.suggested_tags.clone()),
            description: self.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub count: u64,
}

/// Aggregate statistics over the whole document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub total_size: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<CategoryCount>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub top_tags: Vec<TagCount>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timeline: Vec<TimelinePoint>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents_by_type: BTreeMap<String, u64>,
}

/// Body of both upload endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub document: Option<Document>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Server error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses RFC 3339, or a naive ISO-8601 timestamp taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn deserialize_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
        None => Ok(None),
    }
}
