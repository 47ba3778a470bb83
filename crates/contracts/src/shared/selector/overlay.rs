//! Позиционирование выпадающего меню относительно кнопки-триггера.
//!
//! Меню рендерится поверх страницы (position: fixed), поэтому координаты
//! считаются в системе координат вьюпорта.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Above,
}

/// Описание оверлея, которое UI-слой превращает в стили
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayDescriptor {
    pub placement: Placement,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub max_height: f64,
}

impl OverlayDescriptor {
    pub fn to_style(&self) -> String {
        format!(
            "position: fixed; left: {}px; top: {}px; width: {}px; max-height: {}px;",
            self.left, self.top, self.width, self.max_height
        )
    }
}

const GAP: f64 = 4.0;

pub fn place_overlay(anchor: Rect, viewport_width: f64, viewport_height: f64, menu_height: f64) -> OverlayDescriptor {
    let space_below = (viewport_height - anchor.bottom() - GAP).max(0.0);
    let space_above = (anchor.top - GAP).max(0.0);

    let placement = if menu_height <= space_below || space_below >= space_above {
        Placement::Below
    } else {
        Placement::Above
    };

    let max_height = match placement {
        Placement::Below => menu_height.min(space_below),
        Placement::Above => menu_height.min(space_above),
    };

    let top = match placement {
        Placement::Below => anchor.bottom() + GAP,
        Placement::Above => anchor.top - GAP - max_height,
    };

    // Не даём меню уехать за правый край
    let width = anchor.width.min(viewport_width.max(0.0));
    let left = anchor.left.min(viewport_width - width).max(0.0);

    OverlayDescriptor {
        placement,
        left,
        top,
        width,
        max_height,
    }
}
