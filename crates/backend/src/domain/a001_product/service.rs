use contracts::domain::a001_product::aggregate::{Product, ProductId};
use contracts::shared::selector::{OptionPage, SelectOption};

use super::repository;
use crate::shared::error::CatalogError;
use crate::shared::paging::{total_pages, PageWindow};

pub async fn search_options(window: PageWindow) -> Result<OptionPage, CatalogError> {
    let (items, total) = repository::search_page(&window).await?;
    tracing::debug!(
        "a001 options: page={} size={} query={:?} -> {} of {}",
        window.page,
        window.page_size,
        window.search,
        items.len(),
        total
    );
    Ok(OptionPage::new(
        items.iter().map(SelectOption::from).collect(),
        Some(total_pages(total, window.page_size)),
    ))
}

pub async fn get_option(id: &str) -> Result<SelectOption, CatalogError> {
    let id = ProductId::from_string(id).map_err(CatalogError::InvalidId)?;
    match repository::get_by_id(id.value()).await? {
        Some(product) => Ok(SelectOption::from(&product)),
        None => Err(CatalogError::NotFound(id.as_string())),
    }
}

pub async fn create(code: &str, description: &str, article: &str) -> anyhow::Result<Product> {
    let product = Product {
        id: ProductId::new_v4(),
        code: code.to_string(),
        description: description.to_string(),
        article: article.to_string(),
    };
    repository::insert(&product).await?;
    Ok(product)
}
