//! Общие типы и чистая логика, разделяемые frontend и backend.
//!
//! Всё, что здесь лежит, не зависит от wasm/DOM и тестируется нативно.

pub mod domain;
pub mod shared;
