/// Билет взведённого таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Отменяемый таймер debounce, принадлежащий одному экземпляру виджета.
///
/// Сам таймер не знает о времени: хост ждёт задержку и вызывает `fire`.
/// Срабатывает только последний взведённый и не отменённый билет.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: u64,
    armed: Option<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> DebounceTicket {
        self.generation += 1;
        self.armed = Some(self.generation);
        DebounceTicket(self.generation)
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Возвращает `true` ровно один раз для актуального билета
    pub fn fire(&mut self, ticket: DebounceTicket) -> bool {
        if self.armed == Some(ticket.0) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_fires() {
        let mut d = Debouncer::new();
        let first = d.arm();
        let second = d.arm();

        assert!(!d.fire(first));
        assert!(d.fire(second));
        assert!(!d.fire(second));
    }

    #[test]
    fn test_cancel() {
        let mut d = Debouncer::new();
        let t = d.arm();
        d.cancel();
        assert!(!d.is_armed());
        assert!(!d.fire(t));
    }
}
