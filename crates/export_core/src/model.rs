use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Visibility flag shared by articles and tags in the CMS export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Members,
    Paid,
    Tiers,
    Internal,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
    pub slug: Option<String>,
    pub visibility: Visibility,
}

/// One post from the CMS export. Every field tolerates absence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorialArticle {
    pub slug: String,
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub primary_author: Option<Author>,
    pub tags: Vec<Tag>,
    pub visibility: Visibility,
    pub custom_excerpt: Option<String>,
    pub excerpt: Option<String>,
    pub feature_image: Option<String>,
    pub html: Option<String>,
}

impl EditorialArticle {
    pub fn is_members_only(&self) -> bool {
        self.visibility == Visibility::Members
    }

    /// True when there is no body worth converting.
    pub fn has_blank_html(&self) -> bool {
        self.html.as_deref().map_or(true, |html| html.trim().is_empty())
    }

    pub fn public_tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| tag.visibility == Visibility::Public)
            .map(|tag| tag.name.clone())
            .collect()
    }

    /// `custom_excerpt` wins over the generated `excerpt`; empty strings count as absent.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.custom_excerpt.as_deref()).or_else(|| non_empty(self.excerpt.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Container written by the CMS export step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleExport {
    pub posts: Vec<EditorialArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaticPageDescriptor {
    pub route_path: String,
    pub title: String,
    pub description: String,
}

impl StaticPageDescriptor {
    pub fn new(
        route_path: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            route_path: route_path.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySentiment {
    pub score: f64,
    pub category: Option<String>,
    pub total: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlySentiment {
    pub avg_score: f64,
    pub category: Option<String>,
    pub total_sources: u64,
    pub days: u64,
    pub fear_days: u64,
    pub neutral_days: u64,
    pub greed_days: u64,
}

/// Sentiment cache keyed by period (`YYYY-MM-DD` daily, `YYYY-MM` monthly).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentCache {
    pub daily: BTreeMap<String, DailySentiment>,
    pub monthly: BTreeMap<String, MonthlySentiment>,
}
