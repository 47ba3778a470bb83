use serde::Deserialize;

use super::config::SelectorConfig;

/// Query-параметры постраничного поиска: `?page=1&page_size=50&query=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub query: Option<String>,
}

/// Нормализованные параметры страницы (страницы с 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

impl PageWindow {
    pub fn from_query(query: &OptionsQuery, limits: &SelectorConfig) -> Self {
        let page_size = query
            .page_size
            .unwrap_or(limits.default_page_size)
            .clamp(1, limits.max_page_size.max(1));
        let search = query
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Self {
            page: query.page.unwrap_or(1).max(1),
            page_size,
            search,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as u32
}

/// LIKE-шаблон для поиска подстроки в колонке `search_text` (хранится в нижнем регистре).
/// Спецсимволы LIKE экранируются обратным слэшем.
pub fn search_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Текст, по которому ищет селектор: код, наименование, артикул
pub fn build_search_text(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
