use crate::dashboards::d400_stock_summary::api;
use crate::domain::a001_product::ui::picker::ProductSelect;
use crate::domain::a002_store::ui::picker::StoreSelect;
use crate::shared::components::VirtualList;
use crate::shared::number_format::format_quantity;
use contracts::domain::a003_stock_balance::aggregate::StockBalanceRow;
use contracts::shared::selector::{SelectOption, WindowConfig};
use contracts::shared::stock_summary::{ExpansionState, StockTree, StockTreeRow};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Отступ одного уровня дерева, px
const INDENT_PX: u32 = 20;

fn tree_window() -> WindowConfig {
    WindowConfig {
        row_height: 32.0,
        viewport_height: 560.0,
        overscan: 8,
    }
}

fn filter_rows(
    rows: &[StockBalanceRow],
    product_id: Option<&str>,
    store_id: Option<&str>,
) -> Vec<StockBalanceRow> {
    rows.iter()
        .filter(|r| product_id.map_or(true, |id| r.product_id == id))
        .filter(|r| store_id.map_or(true, |id| r.store_id == id))
        .cloned()
        .collect()
}

/// Остатки: товар → вариант → магазин, с фильтрами по товару и магазину
#[component]
pub fn StockSummaryDashboard() -> impl IntoView {
    let (rows, set_rows) = signal(Vec::<StockBalanceRow>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (reload, set_reload) = signal(0u32);

    let (product_id, set_product_id) = signal(None::<String>);
    let (store_id, set_store_id) = signal(None::<String>);
    let expansion = RwSignal::new(ExpansionState::new());

    // Загрузка данных (и повтор по кнопке)
    Effect::new(move |_| {
        reload.track();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_stock_rows().await {
                Ok(data) => {
                    log::debug!("D400: loaded {} stock rows", data.len());
                    set_rows.set(data);
                }
                Err(e) => {
                    log::error!("D400: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let tree = Memo::new(move |_| {
        let product = product_id.get();
        let store = store_id.get();
        rows.with(|all| StockTree::build(&filter_rows(all, product.as_deref(), store.as_deref())))
    });

    let visible = Memo::new(move |_| {
        let t = tree.get();
        expansion.with(|e| t.visible_rows(e))
    });

    let total = Memo::new(move |_| tree.with(|t| t.total_quantity()));

    let render_row = move |_idx: usize, row: StockTreeRow| {
        let key = row.key.clone();
        let padding = u32::from(row.depth) * INDENT_PX;
        let marker = match (row.has_children, row.expanded) {
            (true, true) => "▾",
            (true, false) => "▸",
            (false, _) => "",
        };
        view! {
            <div
                class="stock-tree__row"
                class:stock-tree__row--branch=row.has_children
                style=format!("height: {}px;", tree_window().row_height)
                on:click=move |_| {
                    if row.has_children {
                        expansion.update(|e| {
                            e.toggle(&key);
                        });
                    }
                }
            >
                <span class="stock-tree__label" style=format!("padding-left: {}px;", padding)>
                    <span class="stock-tree__marker">{marker}</span>
                    {row.label}
                </span>
                <span class="stock-tree__qty">{format_quantity(row.quantity)}</span>
            </div>
        }
    };

    view! {
        <div class="dashboard d400-stock-summary">
            <div class="dashboard__header">
                <h2>"Остатки по магазинам"</h2>
            </div>

            <div class="dashboard__filters">
                <ProductSelect
                    value=product_id
                    on_select=Callback::new(move |opt: SelectOption| set_product_id.set(Some(opt.value)))
                    on_clear=Callback::new(move |_| set_product_id.set(None))
                />
                <StoreSelect
                    value=store_id
                    on_select=Callback::new(move |opt: SelectOption| set_store_id.set(Some(opt.value)))
                    on_clear=Callback::new(move |_| set_store_id.set(None))
                />
                <button on:click=move |_| expansion.update(|e| tree.with(|t| e.expand_all(t)))>
                    "Развернуть всё"
                </button>
                <button on:click=move |_| expansion.update(|e| e.collapse_all())>
                    "Свернуть всё"
                </button>
            </div>

            {move || {
                error
                    .get()
                    .map(|e| {
                        view! {
                            <div class="dashboard__error">
                                <span>{e}</span>
                                <button on:click=move |_| set_reload.update(|n| *n += 1)>
                                    "Повторить"
                                </button>
                            </div>
                        }
                    })
            }}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="dashboard__loading">"Загрузка..."</div> }
            >
                <div class="stock-tree">
                    <div class="stock-tree__header">
                        <span>"Товар / вариант / магазин"</span>
                        <span>"Количество"</span>
                    </div>
                    <VirtualList
                        items=visible
                        config=tree_window()
                        render_row=render_row
                        empty_text="Нет остатков"
                    />
                    <div class="stock-tree__total">
                        <span>"Итого"</span>
                        <span>{move || format_quantity(total.get())}</span>
                    </div>
                </div>
            </Show>
        </div>
    }
}
