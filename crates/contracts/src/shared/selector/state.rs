use super::debounce::{DebounceTicket, Debouncer};
use super::error::FetchError;
use super::option::{OptionList, OptionPage, SearchRequest, SelectOption};
use super::sequence::{RequestHandle, RequestKind, RequestSequence};
use super::window::{compute_window, is_near_bottom, VisibleWindow, WindowConfig};

/// Настройки селектора
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    pub page_size: u32,
    pub debounce_ms: u32,
    pub window: WindowConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            debounce_ms: 350,
            window: WindowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    LoadingInitial,
    Idle,
    LoadingMore,
    /// Первая страница не загрузилась, показываем "не удалось загрузить"
    Failed,
}

/// Запрос страницы, который хост должен выполнить
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub handle: RequestHandle,
    pub request: SearchRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    Stale,
}

/// Состояние селектора с удалённым поиском.
///
/// Машина состояний ничего не выполняет сама: переходы возвращают команды
/// (запрос страницы, билет debounce, id для поиска по ключу), а результаты
/// сетевых вызовов возвращаются через `apply_page` / `apply_lookup`.
#[derive(Debug, Clone)]
pub struct SelectorState {
    config: SelectorConfig,
    open: bool,
    /// Текст в поле ввода
    query: String,
    /// Текст, с которым реально выполнялся последний поиск
    search_term: String,
    scroll_offset: f64,
    /// Последняя успешно загруженная страница (0, если ничего не загружено)
    page: u32,
    has_more: bool,
    load_failed: bool,
    options: OptionList,
    selected: Option<SelectOption>,
    pending_lookup: Option<String>,
    sequence: RequestSequence,
    debounce: Debouncer,
    in_flight: Option<RequestHandle>,
}

impl SelectorState {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            open: false,
            query: String::new(),
            search_term: String::new(),
            scroll_offset: 0.0,
            page: 0,
            has_more: false,
            load_failed: false,
            options: OptionList::new(),
            selected: None,
            pending_lookup: None,
            sequence: RequestSequence::new(),
            debounce: Debouncer::new(),
            in_flight: None,
        }
    }

    // ------------------------------------------------------------------
    // Переходы
    // ------------------------------------------------------------------

    pub fn open(&mut self) -> FetchCommand {
        self.open = true;
        self.query.clear();
        self.scroll_offset = 0.0;
        self.debounce.cancel();
        self.start_search(String::new())
    }

    /// Обновляет текст сразу, а поиск откладывает до `debounce_elapsed`
    pub fn type_query(&mut self, text: impl Into<String>) -> Option<DebounceTicket> {
        if !self.open {
            return None;
        }
        self.query = text.into();
        Some(self.debounce.arm())
    }

    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<FetchCommand> {
        if !self.debounce.fire(ticket) || !self.open {
            return None;
        }
        self.scroll_offset = 0.0;
        let term = self.query.trim().to_string();
        Some(self.start_search(term))
    }

    pub fn scroll(&mut self, offset: f64) -> Option<FetchCommand> {
        self.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        if !self.open {
            return None;
        }
        if is_near_bottom(self.options.len(), self.scroll_offset, &self.config.window) {
            self.load_more()
        } else {
            None
        }
    }

    pub fn load_more(&mut self) -> Option<FetchCommand> {
        // Пока идёт любой запрос, догрузку не начинаем: новый токен сделал бы
        // текущий ответ устаревшим.
        if !self.open || !self.has_more || self.page == 0 || self.in_flight.is_some() {
            return None;
        }
        let next_page = self.page + 1;
        let handle = self.sequence.next_handle(RequestKind::Append, next_page);
        self.in_flight = Some(handle);
        Some(FetchCommand {
            handle,
            request: SearchRequest {
                page: next_page,
                page_size: self.config.page_size,
                query: self.search_term.clone(),
            },
        })
    }

    /// Возвращает выбранную опцию, которую хост передаёт в callback выбора
    pub fn select(&mut self, value: &str) -> Option<SelectOption> {
        if !self.open {
            return None;
        }
        let option = self.options.find(value)?.clone();
        self.selected = Some(option.clone());
        self.pending_lookup = None;
        self.close();
        Some(option)
    }

    /// Закрытие не трогает счётчик запросов: поздний ответ на тот же поиск
    /// может ещё дополнить список.
    pub fn close(&mut self) {
        self.open = false;
        self.debounce.cancel();
    }

    /// Сбрасывает выбор
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pending_lookup = None;
    }

    /// Начальное значение (редактирование существующей записи).
    /// Возвращает id, который нужно найти через lookup, если подписи ещё нет.
    pub fn hydrate(&mut self, value: Option<&str>) -> Option<String> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            self.clear_selection();
            return None;
        };

        if self.selected.as_ref().map(|s| s.value.as_str()) == Some(value) {
            return None;
        }
        if let Some(known) = self.options.find(value) {
            self.selected = Some(known.clone());
            self.pending_lookup = None;
            return None;
        }

        self.selected = None;
        self.pending_lookup = Some(value.to_string());
        Some(value.to_string())
    }

    // ------------------------------------------------------------------
    // Результаты сетевых вызовов
    // ------------------------------------------------------------------

    pub fn apply_page(
        &mut self,
        handle: RequestHandle,
        result: Result<OptionPage, FetchError>,
    ) -> PageOutcome {
        if !self.sequence.is_current(&handle) {
            return PageOutcome::Stale;
        }
        if self.in_flight == Some(handle) {
            self.in_flight = None;
        }

        match (handle.kind(), result) {
            (RequestKind::Replace, Ok(page)) => {
                self.has_more = self.compute_has_more(handle.page(), &page);
                self.options.replace(page.items);
                self.page = handle.page();
                self.load_failed = false;
            }
            (RequestKind::Append, Ok(page)) => {
                self.has_more = self.compute_has_more(handle.page(), &page);
                self.options.merge(page.items);
                self.page = handle.page();
            }
            (RequestKind::Replace, Err(_)) => {
                self.options.clear();
                self.page = 0;
                self.has_more = false;
                self.load_failed = true;
            }
            (RequestKind::Append, Err(_)) => {
                self.has_more = false;
            }
        }
        PageOutcome::Applied
    }

    pub fn apply_lookup(&mut self, result: Result<SelectOption, FetchError>) {
        let Ok(option) = result else {
            self.pending_lookup = None;
            return;
        };
        // Ответ на уже неактуальный lookup ничего не меняет
        if self.pending_lookup.as_deref() != Some(option.value.as_str()) {
            return;
        }
        self.selected = Some(option.clone());
        self.pending_lookup = None;
        self.options.prepend(option);
    }

    // ------------------------------------------------------------------
    // Чтение
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        if !self.open {
            return Phase::Closed;
        }
        match self.in_flight.map(|h| h.kind()) {
            Some(RequestKind::Replace) => Phase::LoadingInitial,
            Some(RequestKind::Append) => Phase::LoadingMore,
            None if self.load_failed => Phase::Failed,
            None => Phase::Idle,
        }
    }

    pub fn visible_window(&self) -> VisibleWindow {
        compute_window(self.options.len(), self.scroll_offset, &self.config.window)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.label.as_str())
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn selected(&self) -> Option<&SelectOption> {
        self.selected.as_ref()
    }

    pub fn pending_lookup(&self) -> Option<&str> {
        self.pending_lookup.as_deref()
    }

    fn start_search(&mut self, term: String) -> FetchCommand {
        self.search_term = term;
        let handle = self.sequence.next_handle(RequestKind::Replace, 1);
        self.in_flight = Some(handle);
        FetchCommand {
            handle,
            request: SearchRequest::first_page(self.config.page_size, self.search_term.clone()),
        }
    }

    fn compute_has_more(&self, page_no: u32, page: &OptionPage) -> bool {
        match page.total_pages {
            Some(total) => page_no < total,
            None => page.items.len() as u32 >= self.config.page_size,
        }
    }
}

impl Default for SelectorState {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(page_size: u32) -> SelectorConfig {
        SelectorConfig {
            page_size,
            ..SelectorConfig::default()
        }
    }

    fn page(values: &[&str], total_pages: Option<u32>) -> OptionPage {
        OptionPage::new(
            values
                .iter()
                .map(|v| SelectOption::new(*v, format!("Товар {v}")))
                .collect(),
            total_pages,
        )
    }

    fn values(state: &SelectorState) -> Vec<String> {
        state
            .options()
            .as_slice()
            .iter()
            .map(|o| o.value.clone())
            .collect()
    }

    fn search(state: &mut SelectorState, text: &str) -> FetchCommand {
        let ticket = state.type_query(text).unwrap();
        state.debounce_elapsed(ticket).unwrap()
    }

    #[test]
    fn test_open_issues_first_page() {
        let mut s = SelectorState::new(cfg(20));
        let cmd = s.open();

        assert!(s.is_open());
        assert_eq!(cmd.request, SearchRequest::first_page(20, ""));
        assert_eq!(s.phase(), Phase::LoadingInitial);

        assert_eq!(s.apply_page(cmd.handle, Ok(page(&["1", "2"], Some(1)))), PageOutcome::Applied);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(values(&s), vec!["1", "2"]);
        assert!(!s.has_more());
    }

    #[test]
    fn test_racing_first_pages_keep_latest() {
        let mut s = SelectorState::new(cfg(20));
        s.open();
        let slow_a = search(&mut s, "a");
        let fast_b = search(&mut s, "b");

        // Быстрый ответ на "b" приходит первым, медленный "a" после него
        assert_eq!(s.apply_page(fast_b.handle, Ok(page(&["b1"], Some(1)))), PageOutcome::Applied);
        assert_eq!(s.apply_page(slow_a.handle, Ok(page(&["a1"], Some(1)))), PageOutcome::Stale);
        assert_eq!(values(&s), vec!["b1"]);

        // Обратный порядок
        let slow_c = search(&mut s, "c");
        let fast_d = search(&mut s, "d");
        assert_eq!(s.apply_page(slow_c.handle, Ok(page(&["c1"], Some(1)))), PageOutcome::Stale);
        assert_eq!(s.apply_page(fast_d.handle, Ok(page(&["d1"], Some(1)))), PageOutcome::Applied);
        assert_eq!(values(&s), vec!["d1"]);
    }

    #[test]
    fn test_load_more_never_duplicates() {
        let mut s = SelectorState::new(cfg(3));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2", "3"], Some(4))));

        let pages: [&[&str]; 3] = [&["3", "4", "5"], &["5", "6", "1"], &["7", "7", "8"]];
        for items in pages {
            let cmd = s.load_more().unwrap();
            assert_eq!(cmd.request.page, s.page() + 1);
            s.apply_page(cmd.handle, Ok(page(items, Some(4))));
        }

        let vals = values(&s);
        let mut dedup = vals.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(vals.len(), dedup.len());
        assert_eq!(vals, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(s.page(), 4);
        assert!(!s.has_more());
        assert!(s.load_more().is_none());
    }

    #[test]
    fn test_has_more_without_total_pages() {
        let mut s = SelectorState::new(cfg(2));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], None)));
        assert!(s.has_more());

        let more = s.load_more().unwrap();
        s.apply_page(more.handle, Ok(page(&["3"], None)));
        assert!(!s.has_more());
    }

    #[test]
    fn test_reopen_resets_query_and_scroll() {
        let mut s = SelectorState::new(cfg(20));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1"], Some(1))));
        s.type_query("abc");
        s.scroll(100.0);
        s.close();

        let cmd = s.open();
        assert_eq!(s.query(), "");
        assert_eq!(s.scroll_offset(), 0.0);
        assert_eq!(cmd.request.page, 1);
        assert_eq!(cmd.request.query, "");
        assert!(cmd.handle.token() > first.handle.token());
    }

    #[test]
    fn test_debounce_coalesces_typing() {
        let mut s = SelectorState::new(cfg(20));
        s.open();

        let t1 = s.type_query("a").unwrap();
        let t2 = s.type_query("ab").unwrap();
        assert_eq!(s.query(), "ab");

        let fetches: Vec<FetchCommand> = [t1, t2]
            .into_iter()
            .filter_map(|t| s.debounce_elapsed(t))
            .collect();

        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].request.query, "ab");
        assert_eq!(s.search_term(), "ab");
    }

    #[test]
    fn test_close_cancels_pending_debounce() {
        let mut s = SelectorState::new(cfg(20));
        s.open();
        let t = s.type_query("x").unwrap();
        s.close();
        assert!(s.debounce_elapsed(t).is_none());
        assert!(s.type_query("y").is_none());
    }

    #[test]
    fn test_typing_stales_in_flight_append() {
        let mut s = SelectorState::new(cfg(2));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], Some(5))));
        let append = s.load_more().unwrap();

        let replace = search(&mut s, "new");
        assert_eq!(s.apply_page(append.handle, Ok(page(&["3", "4"], Some(5)))), PageOutcome::Stale);
        s.apply_page(replace.handle, Ok(page(&["n1"], Some(1))));
        assert_eq!(values(&s), vec!["n1"]);
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn test_select_fires_once_and_closes() {
        let mut s = SelectorState::new(cfg(20));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], Some(1))));

        let mut fired = Vec::new();
        for _ in 0..2 {
            if let Some(opt) = s.select("2") {
                fired.push(opt);
            }
        }

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].value, "2");
        assert!(!s.is_open());
        assert_eq!(s.selected_label(), Some("Товар 2"));
    }

    #[test]
    fn test_select_unknown_value() {
        let mut s = SelectorState::new(cfg(20));
        s.open();
        assert!(s.select("missing").is_none());
        assert!(s.is_open());
    }

    #[test]
    fn test_load_more_failure_stops_paging() {
        let mut s = SelectorState::new(cfg(2));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], Some(3))));
        let more = s.load_more().unwrap();

        let outcome = s.apply_page(more.handle, Err(FetchError::Status(500)));
        assert_eq!(outcome, PageOutcome::Applied);
        assert!(!s.has_more());
        assert_eq!(values(&s), vec!["1", "2"]);
        assert_eq!(s.page(), 1);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.load_more().is_none());
    }

    #[test]
    fn test_initial_failure_clears_options() {
        let mut s = SelectorState::new(cfg(2));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1"], Some(1))));

        let retry = search(&mut s, "zzz");
        s.apply_page(retry.handle, Err(FetchError::Network("offline".into())));
        assert!(s.options().is_empty());
        assert_eq!(s.phase(), Phase::Failed);

        // Повторный ввод снимает состояние ошибки
        let again = search(&mut s, "zz");
        s.apply_page(again.handle, Ok(page(&["z"], Some(1))));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_scroll_near_bottom_loads_once() {
        let mut s = SelectorState::new(cfg(10));
        let first = s.open();
        let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        s.apply_page(first.handle, Ok(page(&refs, Some(3))));

        // 10 строк * 36 = 360, вьюпорт 240
        assert!(s.scroll(0.0).is_none());
        let cmd = s.scroll(60.0).expect("near bottom");
        assert_eq!(cmd.request.page, 2);
        assert!(s.scroll(80.0).is_none());
        assert_eq!(s.phase(), Phase::LoadingMore);
    }

    #[test]
    fn test_no_load_more_while_initial_in_flight() {
        let mut s = SelectorState::new(cfg(2));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], Some(3))));
        let _pending = search(&mut s, "q");
        assert!(s.scroll(10_000.0).is_none());
    }

    #[test]
    fn test_late_response_after_close_still_applies() {
        let mut s = SelectorState::new(cfg(20));
        let first = s.open();
        s.close();
        assert_eq!(s.apply_page(first.handle, Ok(page(&["1"], Some(1)))), PageOutcome::Applied);
        assert_eq!(values(&s), vec!["1"]);
    }

    #[test]
    fn test_hydration_prepends_lookup_result() {
        let mut s = SelectorState::new(cfg(20));
        let id = s.hydrate(Some("42")).expect("needs lookup");
        assert_eq!(id, "42");
        assert_eq!(s.pending_lookup(), Some("42"));

        s.apply_lookup(Ok(SelectOption::new("42", "Склад Север")));
        assert_eq!(s.selected_label(), Some("Склад Север"));
        assert_eq!(values(&s), vec!["42"]);

        // Уже известное значение повторного lookup не требует
        assert!(s.hydrate(Some("42")).is_none());
    }

    #[test]
    fn test_hydration_uses_known_option() {
        let mut s = SelectorState::new(cfg(20));
        let first = s.open();
        s.apply_page(first.handle, Ok(page(&["1", "2"], Some(1))));
        assert!(s.hydrate(Some("2")).is_none());
        assert_eq!(s.selected().map(|o| o.value.as_str()), Some("2"));

        assert!(s.hydrate(None).is_none());
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_lookup_failure_is_ignored() {
        let mut s = SelectorState::new(cfg(20));
        s.hydrate(Some("7"));
        s.apply_lookup(Err(FetchError::Status(404)));
        assert!(s.selected().is_none());
        assert!(s.pending_lookup().is_none());
        assert!(s.options().is_empty());
    }

    #[test]
    fn test_stale_lookup_is_dropped() {
        let mut s = SelectorState::new(cfg(20));
        s.hydrate(Some("7"));
        // Значение сменилось до прихода ответа
        s.hydrate(Some("8"));
        s.apply_lookup(Ok(SelectOption::new("7", "Старый магазин")));

        assert!(s.selected().is_none());
        assert_eq!(s.pending_lookup(), Some("8"));
        assert!(s.options().is_empty());
    }

    #[test]
    fn test_visible_window_with_offset_past_content() {
        let mut s = SelectorState::new(cfg(50));
        let first = s.open();
        let ids: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        s.apply_page(first.handle, Ok(page(&refs, Some(1))));

        assert!(s.scroll(10_000.0).is_none());
        let w = s.visible_window();
        assert!(!w.is_empty());
        assert_eq!(w.end, 30);
    }

    #[test]
    fn test_scroll_mid_list_only_moves_offset() {
        let mut s = SelectorState::new(cfg(50));
        let first = s.open();
        let ids: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        s.apply_page(first.handle, Ok(page(&refs, Some(3))));
        let before = values(&s);

        assert!(s.scroll(300.0).is_none());
        assert_eq!(s.scroll_offset(), 300.0);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(values(&s), before);
        assert_eq!(s.page(), 1);
    }
}
