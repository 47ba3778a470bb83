use crate::shared::components::{OptionSource, RemoteSelect, RemoteSource};
use contracts::shared::selector::SelectOption;
use leptos::prelude::*;
use std::rc::Rc;

const OPTIONS_PATH: &str = "/api/a001/product/options";

/// Выбор товара из каталога с серверным поиском по названию и артикулу
#[component]
pub fn ProductSelect(
    /// ID выбранного товара
    #[prop(optional, into)]
    value: MaybeProp<String>,
    on_select: Callback<SelectOption>,
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
) -> impl IntoView {
    let source: Rc<dyn OptionSource> = Rc::new(RemoteSource::new(OPTIONS_PATH));

    view! {
        <RemoteSelect
            source=source
            value=value
            on_select=on_select
            on_clear=on_clear
            placeholder="Все товары"
        />
    }
}
