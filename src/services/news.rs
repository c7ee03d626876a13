//! News feed with client-side search and category filtering

use crate::error::UpscaleResult;
use crate::models::{Article, NewsCategory};

/// Whether an article passes both filters.
///
/// The search text matches title, description or source name; the
/// category keyword matches the title and description joined together.
pub fn matches(article: &Article, search: &str, category: NewsCategory) -> bool {
    let search_ok = search.trim().is_empty() || {
        let search = search.to_lowercase();
        article.title().to_lowercase().contains(&search)
            || article.description().to_lowercase().contains(&search)
            || article.source_name().to_lowercase().contains(&search)
    };

    let category_ok = match category.keyword() {
        None => true,
        Some(keyword) => format!("{} {}", article.title(), article.description())
            .to_lowercase()
            .contains(keyword),
    };

    search_ok && category_ok
}

/// Articles for the current session plus the filter state over them
#[derive(Debug, Clone, Default)]
pub struct NewsFeed {
    articles: Vec<Article>,
    search: String,
    category: NewsCategory,
    loading: bool,
    error: Option<String>,
}

impl NewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> NewsCategory {
        self.category
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category: NewsCategory) {
        self.category = category;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.category = NewsCategory::All;
    }

    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || self.category != NewsCategory::All
    }

    /// Articles passing the current filters, in feed order
    pub fn filtered(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| matches(a, &self.search, self.category))
            .collect()
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a fetch result; a failure keeps the previous articles
    pub fn finish(&mut self, result: UpscaleResult<Vec<Article>>) {
        self.loading = false;
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
