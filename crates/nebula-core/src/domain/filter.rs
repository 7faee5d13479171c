use std::cmp::Ordering;

use super::{Category, Post};

/// Category value meaning "no category filter".
const ALL_CATEGORIES: &str = "all";

/// Category criterion of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Known(Category),
    /// A label outside the closed set. Matches no post.
    Unknown(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::Known(category) => category.as_str(),
            CategoryFilter::Unknown(label) => label,
        }
    }
}

/// Listing filter. Both criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<CategoryFilter>,
    /// Case-insensitive substring matched against title, excerpt and tags.
    pub search: Option<String>,
}

impl PostFilter {
    /// Build a filter from raw query values.
    ///
    /// Empty values and the `all` category are ignored. An unknown category
    /// is kept as is and simply matches nothing.
    pub fn parse(category: Option<&str>, search: Option<&str>) -> Self {
        let category = match category.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(label) => Some(match label.parse::<Category>() {
                Ok(category) => CategoryFilter::Known(category),
                Err(_) => CategoryFilter::Unknown(label.to_string()),
            }),
        };

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self { category, search }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match &self.category {
            Some(CategoryFilter::Known(category)) if post.category != *category => return false,
            Some(CategoryFilter::Unknown(_)) => return false,
            _ => {}
        }

        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                let hit = |s: &str| s.to_lowercase().contains(&needle);
                hit(&post.title) || hit(&post.excerpt) || post.tags.iter().any(|t| hit(t))
            }
        }
    }

    /// Filter and order posts newest-first.
    pub fn apply<'a>(&self, posts: impl IntoIterator<Item = &'a Post>) -> Vec<Post> {
        let mut matched: Vec<Post> = posts
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        matched.sort_by(newest_first);
        matched
    }
}

/// Ordering used by every listing: created_at descending, then id descending.
pub(crate) fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
