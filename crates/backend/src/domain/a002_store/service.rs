use contracts::domain::a002_store::aggregate::{Store, StoreId};
use contracts::shared::selector::{OptionPage, SelectOption};

use super::repository;
use crate::shared::error::CatalogError;
use crate::shared::paging::{total_pages, PageWindow};

pub async fn search_options(window: PageWindow) -> Result<OptionPage, CatalogError> {
    let (items, total) = repository::search_page(&window).await?;
    Ok(OptionPage::new(
        items.iter().map(SelectOption::from).collect(),
        Some(total_pages(total, window.page_size)),
    ))
}

pub async fn get_option(id: &str) -> Result<SelectOption, CatalogError> {
    let id = StoreId::from_string(id).map_err(CatalogError::InvalidId)?;
    match repository::get_by_id(id.0).await? {
        Some(store) => Ok(SelectOption::from(&store)),
        None => Err(CatalogError::NotFound(id.as_string())),
    }
}

pub async fn create(code: &str, description: &str, city: &str) -> anyhow::Result<Store> {
    let store = Store {
        id: StoreId::new_v4(),
        code: code.to_string(),
        description: description.to_string(),
        city: city.to_string(),
    };
    repository::insert(&store).await?;
    Ok(store)
}
