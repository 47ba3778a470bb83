use crate::shared::selector::SelectOption;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub description: String,
    pub article: String,
}

impl Product {
    /// Подпись в селекторе: "Наименование [артикул]"
    pub fn display_label(&self) -> String {
        if self.article.trim().is_empty() {
            self.description.clone()
        } else {
            format!("{} [{}]", self.description, self.article)
        }
    }
}

impl From<&Product> for SelectOption {
    fn from(p: &Product) -> Self {
        SelectOption::new(p.id.as_string(), p.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_label() {
        let p = Product {
            id: ProductId::new(Uuid::nil()),
            code: "P-001".into(),
            description: "Кружка".into(),
            article: "MUG-300".into(),
        };
        let opt = SelectOption::from(&p);
        assert_eq!(opt.value, Uuid::nil().to_string());
        assert_eq!(opt.label, "Кружка [MUG-300]");
    }

    #[test]
    fn test_id_parse_error() {
        assert!(ProductId::from_string("not-a-uuid").is_err());
    }
}
