use std::collections::BTreeSet;
use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed category set a listing belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Furniture,
    Clothing,
    Electronics,
    Books,
    Toys,
    Kitchenware,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Furniture,
        Category::Clothing,
        Category::Electronics,
        Category::Books,
        Category::Toys,
        Category::Kitchenware,
        Category::Sports,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Furniture => "furniture",
            Category::Clothing => "clothing",
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Toys => "toys",
            Category::Kitchenware => "kitchenware",
            Category::Sports => "sports",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Category {
    /// Unknown values map to the neutral variant.
    fn from(s: &str) -> Self {
        match s {
            "furniture" => Category::Furniture,
            "clothing" => Category::Clothing,
            "electronics" => Category::Electronics,
            "books" => Category::Books,
            "toys" => Category::Toys,
            "kitchenware" => Category::Kitchenware,
            "sports" => Category::Sports,
            _ => Category::Other,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Physical condition of a listed item.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    LikeNew,
    Good,
    Worn,
    Broken,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::LikeNew,
        Condition::Good,
        Condition::Worn,
        Condition::Broken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::LikeNew => "LIKE_NEW",
            Condition::Good => "GOOD",
            Condition::Worn => "WORN",
            Condition::Broken => "BROKEN",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Condition {
    /// Unknown values map to the neutral variant.
    fn from(s: &str) -> Self {
        match s {
            "LIKE_NEW" => Condition::LikeNew,
            "GOOD" => Condition::Good,
            "WORN" => Condition::Worn,
            "BROKEN" => Condition::Broken,
            _ => Condition::Good,
        }
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Display name and avatar of the profile that listed an item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ListerSummary {
    pub name: String,
    pub avatar_url: Option<String>,
}

/// A donation listing as read by search consumers. Never mutated locally.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: i32,
    pub profile_id: i32,
    pub title: String,
    pub description: String,
    /// Photo URLs in display order.
    pub photos: Vec<String>,
    pub category: Category,
    pub condition: Condition,
    pub tags: Vec<String>,
    pub price: i32,
    pub location: String,
    pub created_at: NaiveDateTime,
    pub lister: ListerSummary,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewListing {
    pub profile_id: i32,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub price: i32,
    pub location: String,
    pub photos: Vec<String>,
    pub tags: Vec<String>,
}

impl NewListing {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_id: i32,
        title: String,
        description: String,
        category: Category,
        condition: Condition,
        price: i32,
        location: String,
        photos: Vec<String>,
        tags: Vec<String>,
    ) -> Self {
        let tags: BTreeSet<String> = tags
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            profile_id,
            title: title.trim().to_string(),
            description: ammonia::clean(&description),
            category,
            condition,
            price: price.max(0),
            location: location.trim().to_string(),
            photos: photos
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            tags: tags.into_iter().collect(),
        }
    }
}
