//! Демонстрационный каталог для пустой базы.
//!
//! Товаров достаточно много, чтобы селектор реально листал страницы.

use crate::domain::a003_stock_balance::repository::{insert as insert_balance, BalanceEntry};
use crate::domain::{a001_product, a002_store};

const PRODUCT_KINDS: &[(&str, &str)] = &[
    ("MUG", "Кружка керамическая"),
    ("TSH", "Футболка хлопковая"),
    ("NTB", "Блокнот в линейку"),
    ("PEN", "Ручка шариковая"),
    ("BAG", "Сумка-шоппер"),
    ("CAP", "Бейсболка"),
    ("UMB", "Зонт складной"),
    ("BTL", "Бутылка для воды"),
    ("SCK", "Носки"),
    ("TWL", "Полотенце"),
];

const COLORS: &[&str] = &[
    "белый", "чёрный", "красный", "синий", "зелёный", "жёлтый", "серый", "бежевый",
];

const LINES: &[&str] = &["Basic", "Premium", "Eco"];

const SIZES: &[&str] = &["S", "M", "L", "XL"];

const STORES: &[(&str, &str, &str)] = &[
    ("ST-01", "Центральный склад", "Москва"),
    ("ST-02", "Магазин на Тверской", "Москва"),
    ("ST-03", "Магазин на Невском", "Санкт-Петербург"),
    ("ST-04", "ТЦ Мега", "Казань"),
    ("ST-05", "ТЦ Галерея", "Екатеринбург"),
    ("ST-06", "Пункт выдачи Север", "Новосибирск"),
    ("ST-07", "Магазин у вокзала", "Самара"),
    ("ST-08", "Склад возвратов", "Москва"),
];

pub async fn seed_if_empty() -> anyhow::Result<()> {
    if a001_product::repository::count_all().await? > 0 {
        tracing::info!("Catalog already has data, seeding skipped");
        return Ok(());
    }

    let mut stores = Vec::with_capacity(STORES.len());
    for (code, description, city) in STORES {
        stores.push(a002_store::service::create(code, description, city).await?);
    }

    let mut created = 0usize;
    let mut balances = 0usize;
    for (kind_idx, (prefix, name)) in PRODUCT_KINDS.iter().enumerate() {
        for (line_idx, line) in LINES.iter().enumerate() {
            for (color_idx, color) in COLORS.iter().enumerate() {
                let code = format!("{}-{}{:02}", prefix, line_idx + 1, color_idx + 1);
                let description = format!("{} {}, {}", name, line, color);
                let article = format!("{}{}{}{}", prefix, kind_idx + 1, line_idx + 1, color_idx + 1);
                let product = a001_product::service::create(&code, &description, &article).await?;
                created += 1;

                // Остатки по размерам в нескольких магазинах
                for (size_idx, size) in SIZES.iter().enumerate() {
                    let store = &stores[(kind_idx + line_idx + color_idx + size_idx) % stores.len()];
                    let quantity = ((kind_idx * 7 + color_idx * 3 + size_idx * 5) % 40) as f64;
                    insert_balance(&BalanceEntry {
                        product_id: product.id.as_string(),
                        variant_id: format!("{}-{}", code, size),
                        variant_name: format!("Размер {}", size),
                        store_id: store.id.as_string(),
                        quantity,
                    })
                    .await?;
                    balances += 1;
                }
            }
        }
    }

    tracing::info!(
        "Seeded demo catalog: {} products, {} stores, {} balances",
        created,
        stores.len(),
        balances
    );
    Ok(())
}
