//! Защита от устаревших ответов.
//!
//! Каждый запрос захватывает текущее значение счётчика. Ответ применяется,
//! только если захваченное значение всё ещё совпадает со счётчиком.

/// Вид запроса: новая выборка с первой страницы или догрузка следующей
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Replace,
    Append,
}

/// Дескриптор выданного запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHandle {
    token: u64,
    kind: RequestKind,
    page: u32,
}

impl RequestHandle {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Номер страницы, для которой выдан запрос
    pub fn page(&self) -> u32 {
        self.page
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    counter: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Увеличивает счётчик и возвращает дескриптор, привязанный к новому значению
    pub fn next_handle(&mut self, kind: RequestKind, page: u32) -> RequestHandle {
        self.counter += 1;
        RequestHandle {
            token: self.counter,
            kind,
            page,
        }
    }

    /// Выдаёт новый дескриптор и сразу вызывает `request_fn` с ним
    pub fn issue<R>(
        &mut self,
        kind: RequestKind,
        page: u32,
        request_fn: impl FnOnce(RequestHandle) -> R,
    ) -> (RequestHandle, R) {
        let handle = self.next_handle(kind, page);
        let result = request_fn(handle);
        (handle, result)
    }

    pub fn is_current(&self, handle: &RequestHandle) -> bool {
        handle.token == self.counter
    }

    pub fn current(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = RequestSequence::new();
        let a = seq.next_handle(RequestKind::Replace, 1);
        let b = seq.next_handle(RequestKind::Replace, 1);

        assert!(!seq.is_current(&a));
        assert!(seq.is_current(&b));
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_issue_invokes_request_fn_with_handle() {
        let mut seq = RequestSequence::new();
        let mut seen = None;
        let (handle, out) = seq.issue(RequestKind::Append, 3, |h| {
            seen = Some(h.token());
            "sent"
        });

        assert_eq!(out, "sent");
        assert_eq!(seen, Some(handle.token()));
        assert_eq!(handle.page(), 3);
        assert_eq!(handle.kind(), RequestKind::Append);
        assert!(seq.is_current(&handle));
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let mut seq = RequestSequence::new();
        let tokens: Vec<u64> = (0..5)
            .map(|_| seq.next_handle(RequestKind::Replace, 1).token())
            .collect();
        assert_eq!(tokens, vec![1, 2, 3, 4, 5]);
    }
}
