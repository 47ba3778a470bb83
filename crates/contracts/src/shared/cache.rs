use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

/// Источник текущего времени
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Кэш с временем жизни записей.
///
/// Принадлежит конкретному компоненту, глобального экземпляра нет.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V: Clone, C: Clock> TtlCache<K, V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        let fetched_at = self.clock.now();
        self.entries.insert(key, Entry { value, fetched_at });
    }

    /// Значение, если оно ещё не устарело
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.entries.get(key)?;
        if self.is_fresh(entry.fetched_at) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Удаляет устаревшие записи, возвращает сколько удалено
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, e| now - e.fetched_at < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        self.clock.now() - fetched_at < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<DateTime<Utc>>>);

    impl ManualClock {
        fn advance(&self, d: Duration) {
            self.0.set(self.0.get() + d);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    fn clock() -> ManualClock {
        let start = DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        ManualClock(Rc::new(Cell::new(start)))
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = clock();
        let mut cache = TtlCache::with_clock(Duration::minutes(10), clock.clone());
        cache.insert("usd", 92.5_f64);

        clock.advance(Duration::minutes(9));
        assert_eq!(cache.get(&"usd"), Some(92.5));

        clock.advance(Duration::minutes(1));
        assert_eq!(cache.get(&"usd"), None);
    }

    #[test]
    fn test_insert_refreshes_timestamp() {
        let clock = clock();
        let mut cache = TtlCache::with_clock(Duration::seconds(30), clock.clone());
        cache.insert(1, "a");
        clock.advance(Duration::seconds(20));
        cache.insert(1, "b");
        clock.advance(Duration::seconds(20));
        assert_eq!(cache.get(&1), Some("b"));
    }

    #[test]
    fn test_purge_and_invalidate() {
        let clock = clock();
        let mut cache = TtlCache::with_clock(Duration::seconds(30), clock.clone());
        cache.insert("old", 1);
        clock.advance(Duration::seconds(40));
        cache.insert("new", 2);

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidate(&"new"), Some(2));
        assert!(cache.is_empty());
    }
}
