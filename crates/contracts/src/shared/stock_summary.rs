//! Сводка остатков в виде дерева: товар → вариант → магазин.
//!
//! Дерево строится из плоских строк остатков, количества суммируются на
//! каждом уровне. Раскрытые узлы хранятся отдельно в [`ExpansionState`],
//! а [`StockTree::visible_rows`] превращает дерево обратно в плоский список
//! для виртуализированного рендера.

use crate::domain::a003_stock_balance::aggregate::StockBalanceRow;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct StoreNode {
    pub store_id: String,
    pub store_name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantNode {
    pub variant_id: String,
    pub variant_name: String,
    pub quantity: f64,
    pub stores: Vec<StoreNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductNode {
    pub product_id: String,
    pub product_name: String,
    pub quantity: f64,
    pub variants: Vec<VariantNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockTree {
    pub products: Vec<ProductNode>,
}

/// Строка развёрнутого дерева
#[derive(Debug, Clone, PartialEq)]
pub struct StockTreeRow {
    pub key: String,
    pub depth: u8,
    pub label: String,
    pub quantity: f64,
    pub has_children: bool,
    pub expanded: bool,
}

pub fn product_key(product_id: &str) -> String {
    format!("p:{product_id}")
}

pub fn variant_key(product_id: &str, variant_id: &str) -> String {
    format!("v:{product_id}/{variant_id}")
}

fn store_key(product_id: &str, variant_id: &str, store_id: &str) -> String {
    format!("s:{product_id}/{variant_id}/{store_id}")
}

fn cmp_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl StockTree {
    pub fn build(rows: &[StockBalanceRow]) -> Self {
        let mut products: Vec<ProductNode> = Vec::new();
        let mut product_idx: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let p = *product_idx.entry(row.product_id.as_str()).or_insert_with(|| {
                products.push(ProductNode {
                    product_id: row.product_id.clone(),
                    product_name: row.product_name.clone(),
                    quantity: 0.0,
                    variants: Vec::new(),
                });
                products.len() - 1
            });
            let product = &mut products[p];
            product.quantity += row.quantity;

            let position = product
                .variants
                .iter()
                .position(|v| v.variant_id == row.variant_id);
            let v = match position {
                Some(i) => i,
                None => {
                    product.variants.push(VariantNode {
                        variant_id: row.variant_id.clone(),
                        variant_name: row.variant_name.clone(),
                        quantity: 0.0,
                        stores: Vec::new(),
                    });
                    product.variants.len() - 1
                }
            };
            let variant = &mut product.variants[v];
            variant.quantity += row.quantity;

            match variant.stores.iter_mut().find(|s| s.store_id == row.store_id) {
                Some(store) => store.quantity += row.quantity,
                None => variant.stores.push(StoreNode {
                    store_id: row.store_id.clone(),
                    store_name: row.store_name.clone(),
                    quantity: row.quantity,
                }),
            }
        }

        products.sort_by(|a, b| cmp_names(&a.product_name, &b.product_name));
        for product in &mut products {
            product
                .variants
                .sort_by(|a, b| cmp_names(&a.variant_name, &b.variant_name));
            for variant in &mut product.variants {
                variant
                    .stores
                    .sort_by(|a, b| cmp_names(&a.store_name, &b.store_name));
            }
        }

        Self { products }
    }

    pub fn total_quantity(&self) -> f64 {
        self.products.iter().map(|p| p.quantity).sum()
    }

    /// Ключи всех узлов, у которых есть дети
    pub fn branch_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for p in &self.products {
            keys.push(product_key(&p.product_id));
            for v in &p.variants {
                keys.push(variant_key(&p.product_id, &v.variant_id));
            }
        }
        keys
    }

    pub fn visible_rows(&self, expansion: &ExpansionState) -> Vec<StockTreeRow> {
        let mut rows = Vec::new();
        for p in &self.products {
            let pk = product_key(&p.product_id);
            let p_expanded = expansion.is_expanded(&pk);
            rows.push(StockTreeRow {
                key: pk,
                depth: 0,
                label: p.product_name.clone(),
                quantity: p.quantity,
                has_children: !p.variants.is_empty(),
                expanded: p_expanded,
            });
            if !p_expanded {
                continue;
            }
            for v in &p.variants {
                let vk = variant_key(&p.product_id, &v.variant_id);
                let v_expanded = expansion.is_expanded(&vk);
                rows.push(StockTreeRow {
                    key: vk,
                    depth: 1,
                    label: v.variant_name.clone(),
                    quantity: v.quantity,
                    has_children: !v.stores.is_empty(),
                    expanded: v_expanded,
                });
                if !v_expanded {
                    continue;
                }
                for s in &v.stores {
                    rows.push(StockTreeRow {
                        key: store_key(&p.product_id, &v.variant_id, &s.store_id),
                        depth: 2,
                        label: s.store_name.clone(),
                        quantity: s.quantity,
                        has_children: false,
                        expanded: false,
                    });
                }
            }
        }
        rows
    }
}

/// Набор раскрытых узлов
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Возвращает новое состояние узла
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn expand_all(&mut self, tree: &StockTree) {
        self.expanded.extend(tree.branch_keys());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(p: &str, v: &str, s: &str, qty: f64) -> StockBalanceRow {
        StockBalanceRow {
            product_id: p.to_string(),
            product_name: format!("Товар {p}"),
            variant_id: v.to_string(),
            variant_name: format!("Вариант {v}"),
            store_id: s.to_string(),
            store_name: format!("Магазин {s}"),
            quantity: qty,
        }
    }

    fn sample() -> StockTree {
        StockTree::build(&[
            row("b", "b1", "s2", 5.0),
            row("a", "a2", "s1", 1.0),
            row("a", "a1", "s2", 2.0),
            row("a", "a1", "s1", 3.0),
            row("a", "a1", "s1", 4.0),
        ])
    }

    #[test]
    fn test_build_sums_levels() {
        let tree = sample();
        assert_eq!(tree.products.len(), 2);

        let a = &tree.products[0];
        assert_eq!(a.product_id, "a");
        assert_eq!(a.quantity, 10.0);
        assert_eq!(a.variants[0].variant_id, "a1");
        assert_eq!(a.variants[0].quantity, 9.0);
        assert_eq!(a.variants[0].stores.len(), 2);
        assert_eq!(a.variants[0].stores[0].store_id, "s1");
        assert_eq!(a.variants[0].stores[0].quantity, 7.0);
        assert_eq!(tree.total_quantity(), 15.0);
    }

    #[test]
    fn test_collapsed_tree_shows_products_only() {
        let tree = sample();
        let rows = tree.visible_rows(&ExpansionState::new());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.depth == 0 && r.has_children && !r.expanded));
    }

    #[test]
    fn test_toggle_drill_down() {
        let tree = sample();
        let mut exp = ExpansionState::new();

        assert!(exp.toggle(&product_key("a")));
        let rows = tree.visible_rows(&exp);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Товар a", "Вариант a1", "Вариант a2", "Товар b"]);

        exp.toggle(&variant_key("a", "a1"));
        let rows = tree.visible_rows(&exp);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2].depth, 2);
        assert_eq!(rows[2].label, "Магазин s1");

        assert!(!exp.toggle(&product_key("a")));
        // Вложенное раскрытие запоминается, но скрыто под свернутым родителем
        assert_eq!(tree.visible_rows(&exp).len(), 2);
    }

    #[test]
    fn test_expand_collapse_all() {
        let tree = sample();
        let mut exp = ExpansionState::new();
        exp.expand_all(&tree);
        assert_eq!(tree.visible_rows(&exp).len(), 2 + 3 + 4);

        exp.collapse_all();
        assert_eq!(tree.visible_rows(&exp).len(), 2);
    }

    #[test]
    fn test_empty_rows() {
        let tree = StockTree::build(&[]);
        assert!(tree.products.is_empty());
        assert!(tree.visible_rows(&ExpansionState::new()).is_empty());
    }
}
