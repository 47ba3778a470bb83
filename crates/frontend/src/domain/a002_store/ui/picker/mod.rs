use crate::shared::components::{OptionSource, RemoteSelect, RemoteSource};
use contracts::shared::selector::{SelectOption, SelectorConfig};
use leptos::prelude::*;
use std::rc::Rc;

const OPTIONS_PATH: &str = "/api/a002/store/options";

/// Выбор магазина. Магазинов немного, поэтому страница крупнее и ввод
/// отрабатывает быстрее, чем в каталоге товаров.
#[component]
pub fn StoreSelect(
    #[prop(optional, into)] value: MaybeProp<String>,
    on_select: Callback<SelectOption>,
    #[prop(optional)] on_clear: Option<Callback<()>>,
) -> impl IntoView {
    let source: Rc<dyn OptionSource> = Rc::new(RemoteSource::new(OPTIONS_PATH));
    let config = SelectorConfig {
        page_size: 100,
        debounce_ms: 250,
        ..SelectorConfig::default()
    };

    view! {
        <RemoteSelect
            source=source
            value=value
            on_select=on_select
            on_clear=on_clear
            placeholder="Все магазины"
            config=config
        />
    }
}
