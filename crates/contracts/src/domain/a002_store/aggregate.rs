use crate::shared::selector::SelectOption;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Уникальный идентификатор магазина/склада
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub Uuid);

impl StoreId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StoreId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Магазин или склад
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub code: String,
    pub description: String,
    pub city: String,
}

impl From<&Store> for SelectOption {
    fn from(s: &Store) -> Self {
        let label = if s.city.is_empty() {
            s.description.clone()
        } else {
            format!("{} ({})", s.description, s.city)
        };
        SelectOption::new(s.id.as_string(), label)
    }
}
