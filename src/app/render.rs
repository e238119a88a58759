//! Text rendering of the view state.

use chrono::TimeZone;
use std::fmt::Display;

use super::analysis::AiReview;
use super::list::DocumentList;
use crate::api::{Category, Document};
use crate::ui::{file_icon, format_date, format_file_size};

/// Author shown when a document has none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Analyze,
    Edit,
    Delete,
}

impl CardAction {
    pub fn icon(self) -> &'static str {
        match self {
            CardAction::Analyze => "🤖",
            CardAction::Edit => "✏️",
            CardAction::Delete => "🗑️",
        }
    }
}

/// Everything one document card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCard {
    pub id: String,
    pub icon: &'static str,
    pub title: String,
    pub author: String,
    pub date: String,
    pub size: String,
    pub tags: Vec<String>,
    pub category: Category,
    pub color: &'static str,
    pub actions: [CardAction; 3],
}

impl DocumentCard {
    pub fn new<Tz>(doc: &Document, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: doc.id.clone(),
            icon: file_icon(&doc.file_type),
            title: doc.title.clone(),
            author: doc
                .author
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date: format_date(&doc.created_at, tz),
            size: format_file_size(doc.file_size),
            tags: doc.tags.clone(),
            category: doc.category,
            color: doc.category.color(),
            actions: [CardAction::Analyze, CardAction::Edit, CardAction::Delete],
        }
    }

    pub fn render(&self) -> String {
        let actions: Vec<&str> = self.actions.iter().map(|a| a.icon()).collect();
        let mut out = format!(
            "{} {}  [{}]  {}\n   👤 {}  📅 {}  💾 {}\n",
            self.icon,
            self.title,
            self.category,
            actions.join(" "),
            self.author,
            self.date,
            self.size
        );
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("#{t}")).collect();
            out.push_str(&format!("   {}\n", tags.join(" ")));
        }
        out.push_str(&format!("   id: {}\n", self.id));
        out
    }
}

pub fn render_list<Tz>(list: &DocumentList, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = format!("{}\n", list.count_label());
    if list.documents().is_empty() {
        if list.empty_state().is_visible() {
            out.push_str("\n  📭 No documents yet. Upload a file to get started.\n");
        }
        return out;
    }
    for doc in list.documents() {
        out.push('\n');
        out.push_str(&DocumentCard::new(doc, tz).render());
    }
    out
}

pub fn render_document<Tz>(doc: &Document, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = DocumentCard::new(doc, tz).render();
    if let Some(description) = doc.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("   {description}\n"));
    }
    if let Some(name) = &doc.file_name {
        out.push_str(&format!("   file: {name}\n"));
    }
    if let Some(url) = &doc.file_url {
        out.push_str(&format!("   url: {url}\n"));
    }
    out
}

pub fn render_review(review: &AiReview) -> String {
    if review.loading.is_visible() {
        return "🤖 Analyzing...\n".to_string();
    }
    if !review.results.is_visible() {
        return String::new();
    }
    let mut out = String::from("🤖 AI suggestions\n");
    for (label, value) in review.rows() {
        out.push_str(&format!("  {label:<9} {value}\n"));
    }
    out.push_str(&format!("  {:<9} {}\n", "Confidence", review.confidence.render(20)));
    out
}
