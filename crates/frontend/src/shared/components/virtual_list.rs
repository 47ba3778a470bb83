use contracts::shared::selector::{compute_window, WindowConfig};
use leptos::html::Div;
use leptos::prelude::*;

/// Виртуализированный список с фиксированной высотой строки.
///
/// В DOM попадают только строки видимого окна (плюс overscan), а распорка
/// высотой `len * row_height` сохраняет правильный размер полосы прокрутки.
#[component]
pub fn VirtualList<T, F, IV>(
    /// Полный список элементов
    #[prop(into)]
    items: Signal<Vec<T>>,
    /// Геометрия списка
    config: WindowConfig,
    /// Рендер строки: (индекс в полном списке, элемент)
    render_row: F,
    /// Вызывается на каждое событие прокрутки с новым scrollTop
    #[prop(optional)]
    on_scroll: Option<Callback<f64>>,
    /// Ссылка на прокручиваемый контейнер
    #[prop(optional)]
    container_ref: Option<NodeRef<Div>>,
    /// Текст для пустого списка
    #[prop(optional, into)]
    empty_text: MaybeProp<String>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(usize, T) -> IV + Clone + Send + Sync + 'static,
    IV: IntoView + 'static,
{
    let (scroll_top, set_scroll_top) = signal(0.0_f64);
    let container_ref = container_ref.unwrap_or_else(NodeRef::new);

    let window = Memo::new(move |_| {
        let len = items.with(|v| v.len());
        compute_window(len, scroll_top.get(), &config)
    });

    // Новый список (например, другой поиск) начинается сверху
    Effect::new(move |_| {
        if items.with(|v| v.is_empty()) {
            set_scroll_top.set(0.0);
        }
    });

    let handle_scroll = move |ev: web_sys::Event| {
        let top = event_target::<web_sys::Element>(&ev).scroll_top() as f64;
        set_scroll_top.set(top);
        if let Some(cb) = on_scroll {
            cb.run(top);
        }
    };

    let rows = move || {
        let w = window.get();
        let render_row = render_row.clone();
        items.with(|v| {
            v.get(w.range())
                .unwrap_or(&[])
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, item)| render_row(w.start + i, item))
                .collect_view()
        })
    };

    view! {
        <div
            class="virtual-list"
            node_ref=container_ref
            style=format!("height: {}px; overflow-y: auto; position: relative;", config.viewport_height)
            on:scroll=handle_scroll
        >
            {move || {
                if items.with(|v| v.is_empty()) {
                    let text = empty_text.get().unwrap_or_else(|| "Нет результатов".to_string());
                    view! { <div class="virtual-list__empty">{text}</div> }.into_any()
                } else {
                    view! {
                        <div
                            class="virtual-list__spacer"
                            style=move || format!("height: {}px; position: relative;", window.get().total_height)
                        >
                            <div
                                class="virtual-list__window"
                                style=move || format!(
                                    "position: absolute; left: 0; right: 0; top: 0; transform: translateY({}px);",
                                    window.get().offset_top,
                                )
                            >
                                {rows.clone()}
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
