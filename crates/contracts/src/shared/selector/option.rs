use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Элемент выпадающего списка
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Уникальный ключ (обычно UUID агрегата)
    pub value: String,
    /// Отображаемый текст
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Результат одного запроса страницы
///
/// Отсутствующие поля в ответе сервера не считаются ошибкой:
/// `items` становится пустым списком, а `total_pages` равен `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionPage {
    #[serde(default)]
    pub items: Vec<SelectOption>,
    #[serde(default, rename = "totalPages", skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl OptionPage {
    pub fn new(items: Vec<SelectOption>, total_pages: Option<u32>) -> Self {
        Self { items, total_pages }
    }
}

/// Параметры запроса страницы (страницы нумеруются с 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub query: String,
}

impl SearchRequest {
    pub fn first_page(page_size: u32, query: impl Into<String>) -> Self {
        Self {
            page: 1,
            page_size,
            query: query.into(),
        }
    }
}

/// Упорядоченный по вставке список опций без дублей по `value`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionList {
    items: Vec<SelectOption>,
    keys: HashSet<String>,
}

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<SelectOption>) -> Self {
        let mut list = Self::new();
        list.merge(items);
        list
    }

    /// Добавляет элементы в конец, пропуская уже известные `value`.
    /// Возвращает количество реально добавленных.
    pub fn merge(&mut self, items: impl IntoIterator<Item = SelectOption>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.keys.insert(item.value.clone()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Вставляет элемент в начало. Если такой `value` уже есть, ничего не меняет.
    pub fn prepend(&mut self, item: SelectOption) -> bool {
        if !self.keys.insert(item.value.clone()) {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    /// Полностью заменяет содержимое (первая страница нового поиска)
    pub fn replace(&mut self, items: Vec<SelectOption>) {
        self.clear();
        self.merge(items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
    }

    pub fn contains(&self, value: &str) -> bool {
        self.keys.contains(value)
    }

    pub fn find(&self, value: &str) -> Option<&SelectOption> {
        if !self.contains(value) {
            return None;
        }
        self.items.iter().find(|o| o.value == value)
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(v: &str) -> SelectOption {
        SelectOption::new(v, format!("Label {v}"))
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let mut list = OptionList::from_items(vec![opt("a"), opt("b")]);
        let added = list.merge(vec![opt("b"), opt("c"), opt("a"), opt("c")]);

        assert_eq!(added, 1);
        let values: Vec<&str> = list.as_slice().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_keeps_first_label() {
        let mut list = OptionList::from_items(vec![SelectOption::new("a", "first")]);
        list.merge(vec![SelectOption::new("a", "second")]);
        assert_eq!(list.find("a").map(|o| o.label.as_str()), Some("first"));
    }

    #[test]
    fn test_prepend() {
        let mut list = OptionList::from_items(vec![opt("b")]);
        assert!(list.prepend(opt("a")));
        assert!(!list.prepend(opt("b")));
        assert_eq!(list.as_slice()[0].value, "a");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_replace_resets_keys() {
        let mut list = OptionList::from_items(vec![opt("a"), opt("b")]);
        list.replace(vec![opt("c")]);
        assert!(!list.contains("a"));
        assert!(list.contains("c"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_malformed_page_defaults() {
        let page: OptionPage = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, None);

        let page: OptionPage =
            serde_json::from_str(r#"{"items":[{"value":"1","label":"One"}],"totalPages":3}"#)
                .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, Some(3));
    }
}
