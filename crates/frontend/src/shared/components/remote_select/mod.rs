//! Remote Select
//!
//! Выпадающий список с удалённым поиском, бесконечной прокруткой и
//! виртуализацией строк. Вся логика переходов живёт в
//! `contracts::shared::selector::SelectorState`, компонент только выполняет
//! возвращаемые команды: запросы страниц, таймер debounce, lookup по id.
//!
//! ## Использование
//!
//! ```rust,ignore
//! view! {
//!     <RemoteSelect
//!         source=Rc::new(RemoteSource::new("/api/a002/store/options"))
//!         value=selected_id
//!         on_select=Callback::new(move |opt: SelectOption| set_selected_id.set(Some(opt.value)))
//!         placeholder="Выберите магазин"
//!     />
//! }
//! ```

pub mod source;

pub use source::{OptionSource, RemoteSource, SourceFuture};

use chrono::Duration;
use contracts::shared::cache::TtlCache;
use contracts::shared::selector::{
    place_overlay, DebounceTicket, FetchCommand, OverlayDescriptor, PageOutcome, Phase, Rect,
    SelectOption, SelectorConfig, SelectorState,
};
use gloo_timers::future::TimeoutFuture;
use leptos::html::Div;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

use super::virtual_list::VirtualList;

/// Высота строки поиска над списком, px
const SEARCH_BOX_HEIGHT: f64 = 40.0;

/// Сколько помнить подписи, найденные по id
const LABEL_TTL_MINUTES: i64 = 5;

/// Что показывать в теле меню. Idle и LoadingMore рисуют один и тот же
/// список, чтобы догрузка не пересоздавала его и не сбрасывала прокрутку.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuBody {
    Loading,
    Failed,
    List,
}

fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

#[component]
pub fn RemoteSelect(
    /// Источник опций (поиск страниц и lookup по id)
    source: Rc<dyn OptionSource>,
    /// Текущее значение (id). Если подписи нет в загруженных опциях,
    /// выполняется один lookup.
    #[prop(optional, into)]
    value: MaybeProp<String>,
    /// Callback при выборе опции
    on_select: Callback<SelectOption>,
    /// Callback при сбросе значения (кнопка ×). Без него кнопки нет.
    #[prop(optional_no_strip)]
    on_clear: Option<Callback<()>>,
    /// Placeholder для пустого значения
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Размер страницы, геометрия списка, задержка debounce
    #[prop(optional)]
    config: Option<SelectorConfig>,
) -> impl IntoView {
    let cfg = config.unwrap_or_default();
    let state = RwSignal::new(SelectorState::new(cfg));
    let source = StoredValue::new_local(source);
    let labels = StoredValue::new(TtlCache::<String, SelectOption>::new(Duration::minutes(
        LABEL_TTL_MINUTES,
    )));
    let overlay = RwSignal::new(None::<OverlayDescriptor>);

    let trigger_ref = NodeRef::<Div>::new();
    let list_ref = NodeRef::<Div>::new();

    // Выполнение запроса страницы; устаревший ответ отбрасывается машиной состояний
    let run_fetch = move |cmd: FetchCommand| {
        let fut = source.with_value(|s| s.search(cmd.request.clone()));
        spawn_local(async move {
            let result = fut.await;
            if let Err(e) = &result {
                log::warn!(
                    "Option page {} (query {:?}) failed: {}",
                    cmd.request.page,
                    cmd.request.query,
                    e
                );
            }
            if state.try_update(|s| s.apply_page(cmd.handle, result)) == Some(PageOutcome::Stale) {
                log::debug!("Stale option page dropped (token {})", cmd.handle.token());
            }
        });
    };

    let reset_list_scroll = move || {
        if let Some(el) = list_ref.get_untracked() {
            el.set_scroll_top(0);
        }
    };

    let schedule_debounce = move |ticket: DebounceTicket| {
        spawn_local(async move {
            TimeoutFuture::new(cfg.debounce_ms).await;
            // Компонент мог быть уже размонтирован: try_update вернёт None
            if let Some(Some(cmd)) = state.try_update(|s| s.debounce_elapsed(ticket)) {
                reset_list_scroll();
                run_fetch(cmd);
            }
        });
    };

    let update_overlay = move || {
        let Some(trigger) = trigger_ref.get_untracked() else {
            return;
        };
        let r = trigger.get_bounding_client_rect();
        let anchor = Rect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        };
        let (vw, vh) = viewport_size();
        let menu_height = cfg.window.viewport_height + SEARCH_BOX_HEIGHT;
        overlay.set(Some(place_overlay(anchor, vw, vh, menu_height)));
    };

    let open = move || {
        if state.with_untracked(|s| s.is_open()) {
            return;
        }
        update_overlay();
        if let Some(cmd) = state.try_update(|s| s.open()) {
            run_fetch(cmd);
        }
    };

    let close = move || {
        state.update(|s| s.close());
    };

    let select = move |value: String| {
        if let Some(Some(opt)) = state.try_update(|s| s.select(&value)) {
            labels.update_value(|c| c.insert(opt.value.clone(), opt.clone()));
            on_select.run(opt);
        }
    };

    // Подпись для начального/внешнего значения
    Effect::new(move |_| {
        let current = value.get();
        let Some(id) = state.try_update(|s| s.hydrate(current.as_deref())).flatten() else {
            return;
        };
        if let Some(cached) = labels.with_value(|c| c.get(&id)) {
            state.update(|s| s.apply_lookup(Ok(cached)));
            return;
        }
        log::debug!("Hydrating selector label for {}", id);
        let fut = source.with_value(|s| s.lookup(id.clone()));
        spawn_local(async move {
            let result = fut.await;
            match &result {
                Ok(opt) => labels.update_value(|c| c.insert(opt.value.clone(), opt.clone())),
                Err(e) => log::warn!("Lookup for {} failed: {}", id, e),
            }
            state.try_update(|s| s.apply_lookup(result));
        });
    });

    // Таймер debounce не должен срабатывать в уничтоженный компонент
    on_cleanup(move || {
        state.try_update(|s| s.close());
    });

    let is_open = Memo::new(move |_| state.with(|s| s.is_open()));
    let body = Memo::new(move |_| match state.with(|s| s.phase()) {
        Phase::LoadingInitial => MenuBody::Loading,
        Phase::Failed => MenuBody::Failed,
        _ => MenuBody::List,
    });
    let loading_more = Memo::new(move |_| state.with(|s| s.phase() == Phase::LoadingMore));
    let items = Memo::new(move |_| state.with(|s| s.options().as_slice().to_vec()));
    let selected_value = Memo::new(move |_| state.with(|s| s.selected().map(|o| o.value.clone())));

    let trigger_text = move || {
        state
            .with(|s| s.selected_label().map(str::to_string))
            .or_else(|| placeholder.get())
            .unwrap_or_default()
    };

    let row_height = cfg.window.row_height;
    let render_row = move |_idx: usize, opt: SelectOption| {
        let value_for_class = opt.value.clone();
        let value_for_click = opt.value.clone();
        let title = opt.label.clone();
        view! {
            <div
                class="remote-select__option"
                class:remote-select__option--selected=move || {
                    selected_value.get().as_deref() == Some(value_for_class.as_str())
                }
                style=format!("height: {}px; line-height: {}px;", row_height, row_height)
                title=title
                on:mousedown=move |ev| {
                    // Не отдаём фокус полю поиска до выбора
                    ev.prevent_default();
                    select(value_for_click.clone());
                }
            >
                {opt.label}
            </div>
        }
    };

    // Сама прокрутка подписчиков не будит: окно считает VirtualList,
    // а уведомление нужно только когда началась догрузка
    let on_scroll = Callback::new(move |offset: f64| {
        if let Some(Some(cmd)) = state.try_update_untracked(|s| s.scroll(offset)) {
            state.notify();
            run_fetch(cmd);
        }
    });

    let handle_trigger_key = move |ev: leptos::ev::KeyboardEvent| {
        if matches!(ev.key().as_str(), "Enter" | " " | "ArrowDown") {
            ev.prevent_default();
            open();
        }
    };

    let handle_search_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    let handle_search_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        if let Some(Some(ticket)) = state.try_update(|s| s.type_query(text)) {
            schedule_debounce(ticket);
        }
    };

    let clear_button = move || {
        let on_clear = on_clear?;
        let has_value = state.with(|s| s.selected().is_some());
        has_value.then(|| {
            view! {
                <button
                    class="remote-select__clear"
                    title="Очистить"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        state.update(|s| s.clear_selection());
                        on_clear.run(());
                    }
                >
                    "×"
                </button>
            }
        })
    };

    view! {
        <div class="remote-select">
            <div
                class="remote-select__trigger"
                class:remote-select__trigger--open=move || is_open.get()
                node_ref=trigger_ref
                tabindex="0"
                on:click=move |_| open()
                on:keydown=handle_trigger_key
            >
                <span
                    class="remote-select__value"
                    class:remote-select__value--placeholder=move || state.with(|s| s.selected().is_none())
                >
                    {trigger_text}
                </span>
                {clear_button}
                <span class="remote-select__arrow">"▾"</span>
            </div>

            <Show when=move || is_open.get()>
                <div class="remote-select__backdrop" on:mousedown=move |_| close()></div>
                <div
                    class="remote-select__menu"
                    style=move || overlay.get().map(|o| o.to_style()).unwrap_or_default()
                >
                    <input
                        class="remote-select__search"
                        type="text"
                        placeholder="Поиск..."
                        autofocus=true
                        prop:value=move || state.with(|s| s.query().to_string())
                        on:input=handle_search_input
                        on:keydown=handle_search_key
                    />
                    {move || match body.get() {
                        MenuBody::Loading => {
                            view! { <div class="remote-select__status">"Загрузка..."</div> }.into_any()
                        }
                        MenuBody::Failed => {
                            view! {
                                <div class="remote-select__status remote-select__status--error">
                                    "Не удалось загрузить. Измените запрос или откройте список заново."
                                </div>
                            }
                            .into_any()
                        }
                        MenuBody::List => {
                            view! {
                                <VirtualList
                                    items=items
                                    config=cfg.window
                                    render_row=render_row
                                    on_scroll=on_scroll
                                    container_ref=list_ref
                                    empty_text="Ничего не найдено"
                                />
                            }
                            .into_any()
                        }
                    }}
                    <Show when=move || loading_more.get()>
                        <div class="remote-select__more">"Загрузка..."</div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
