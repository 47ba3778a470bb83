//! Расчёт видимого окна для виртуализированного списка с фиксированной высотой строки.

/// Геометрия списка
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub row_height: f64,
    pub viewport_height: f64,
    /// Сколько строк рендерить за краями вьюпорта
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            row_height: 36.0,
            viewport_height: 240.0,
            overscan: 4,
        }
    }
}

/// Срез строк, который нужно отрисовать
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
    /// Смещение среза внутри контейнера, px
    pub offset_top: f64,
    /// Высота распорки (вся прокручиваемая высота), px
    pub total_height: f64,
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

fn sanitize_offset(scroll_offset: f64) -> f64 {
    if scroll_offset.is_finite() && scroll_offset > 0.0 {
        scroll_offset
    } else {
        0.0
    }
}

pub fn compute_window(len: usize, scroll_offset: f64, cfg: &WindowConfig) -> VisibleWindow {
    if len == 0 || !(cfg.row_height > 0.0) {
        return VisibleWindow {
            start: 0,
            end: 0,
            offset_top: 0.0,
            total_height: 0.0,
        };
    }

    // Устаревший offset (список стал короче) не должен давать пустой срез
    let max_offset = (len as f64 * cfg.row_height - cfg.viewport_height).max(0.0);
    let offset = sanitize_offset(scroll_offset).min(max_offset);
    let first_visible = (offset / cfg.row_height).floor() as usize;
    let start = first_visible.saturating_sub(cfg.overscan).min(len);
    let visible_count = (cfg.viewport_height.max(0.0) / cfg.row_height).ceil() as usize;
    let end = (start + visible_count + 2 * cfg.overscan).min(len);

    VisibleWindow {
        start,
        end,
        offset_top: start as f64 * cfg.row_height,
        total_height: len as f64 * cfg.row_height,
    }
}

/// Прокрутка находится в пределах двух строк от низа контента
pub fn is_near_bottom(len: usize, scroll_offset: f64, cfg: &WindowConfig) -> bool {
    let content = len as f64 * cfg.row_height;
    let bottom = sanitize_offset(scroll_offset) + cfg.viewport_height;
    bottom >= content - 2.0 * cfg.row_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_window() {
        let cfg = WindowConfig {
            row_height: 36.0,
            viewport_height: 240.0,
            overscan: 4,
        };
        let w = compute_window(100, 720.0, &cfg);

        assert_eq!(w.start, 16);
        assert!(w.len() <= 15);
        assert_eq!(w.end, 31);
        assert_eq!(w.offset_top, 16.0 * 36.0);
        assert_eq!(w.total_height, 3600.0);
    }

    #[test]
    fn test_short_list_renders_everything() {
        let cfg = WindowConfig::default();
        let w = compute_window(3, 0.0, &cfg);
        assert_eq!(w.range(), 0..3);
        assert_eq!(w.offset_top, 0.0);
    }

    #[test]
    fn test_empty_list() {
        let w = compute_window(0, 500.0, &WindowConfig::default());
        assert!(w.is_empty());
        assert_eq!(w.total_height, 0.0);
    }

    #[test]
    fn test_offset_past_end_shows_last_rows() {
        let cfg = WindowConfig::default();
        // 20 * 36 = 720, максимум прокрутки 720 - 240 = 480 -> первая видимая 13
        let w = compute_window(20, 10_000.0, &cfg);
        assert_eq!(w.range(), 9..20);
        assert_eq!(w.offset_top, 9.0 * 36.0);
        assert!(!w.is_empty());
    }

    #[test]
    fn test_short_list_with_stale_offset() {
        let cfg = WindowConfig::default();
        let w = compute_window(3, 500.0, &cfg);
        assert_eq!(w.range(), 0..3);
        assert_eq!(w.offset_top, 0.0);
    }

    #[test]
    fn test_bad_inputs() {
        let cfg = WindowConfig::default();
        assert_eq!(compute_window(10, f64::NAN, &cfg).start, 0);
        assert_eq!(compute_window(10, -50.0, &cfg).start, 0);

        let zero = WindowConfig {
            row_height: 0.0,
            ..cfg
        };
        assert!(compute_window(10, 0.0, &zero).is_empty());
    }

    #[test]
    fn test_near_bottom() {
        let cfg = WindowConfig::default();
        // 50 строк * 36 = 1800; низ вьюпорта = offset + 240
        assert!(!is_near_bottom(50, 0.0, &cfg));
        assert!(!is_near_bottom(50, 1400.0, &cfg));
        assert!(is_near_bottom(50, 1488.0, &cfg));
        assert!(is_near_bottom(50, 1560.0, &cfg));
        // список короче вьюпорта всегда "у дна"
        assert!(is_near_bottom(3, 0.0, &cfg));
    }
}
