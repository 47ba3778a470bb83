use contracts::shared::selector::{FetchError, OptionPage, SearchRequest, SelectOption};
use std::future::Future;
use std::pin::Pin;

use crate::shared::api_utils::{api_base, get_json, search_url};

pub type SourceFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>>>>;

/// Откуда селектор берёт опции
pub trait OptionSource {
    /// Страница результатов поиска
    fn search(&self, request: SearchRequest) -> SourceFuture<OptionPage>;

    /// Один элемент по ключу (для подписи уже выбранного значения)
    fn lookup(&self, id: String) -> SourceFuture<SelectOption>;
}

/// Источник поверх стандартных эндпоинтов `{path}?page=..` и `{path}/{id}`
#[derive(Debug, Clone)]
pub struct RemoteSource {
    path: &'static str,
}

impl RemoteSource {
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }
}

impl OptionSource for RemoteSource {
    fn search(&self, request: SearchRequest) -> SourceFuture<OptionPage> {
        let path = self.path;
        Box::pin(async move {
            let url = search_url(&api_base(), path, &request)?;
            get_json::<OptionPage>(&url).await
        })
    }

    fn lookup(&self, id: String) -> SourceFuture<SelectOption> {
        let url = format!("{}{}/{}", api_base(), self.path, id);
        Box::pin(async move { get_json::<SelectOption>(&url).await })
    }
}
