//! Selector with remote search
//!
//! Платформонезависимое ядро выпадающего списка с удалённым поиском,
//! бесконечной прокруткой и виртуализацией.
//!
//! ## Состав
//!
//! - [`sequence`]: отбрасывает ответы, которые пришли не на последний запрос
//! - [`window`]: расчёт видимого среза строк
//! - [`debounce`]: отменяемый таймер ввода
//! - [`state`]: машина состояний виджета
//! - [`overlay`]: позиционирование меню относительно триггера
//!
//! ## Использование
//!
//! ```rust
//! use contracts::shared::selector::{OptionPage, SelectOption, SelectorState};
//!
//! let mut state = SelectorState::default();
//! let cmd = state.open();
//! // ... выполнить cmd.request, затем:
//! state.apply_page(cmd.handle, Ok(OptionPage::new(vec![SelectOption::new("1", "Один")], Some(1))));
//! assert_eq!(state.options().len(), 1);
//! ```

pub mod debounce;
pub mod error;
pub mod option;
pub mod overlay;
pub mod sequence;
pub mod state;
pub mod window;

pub use debounce::{DebounceTicket, Debouncer};
pub use error::FetchError;
pub use option::{OptionList, OptionPage, SearchRequest, SelectOption};
pub use overlay::{place_overlay, OverlayDescriptor, Placement, Rect};
pub use sequence::{RequestHandle, RequestKind, RequestSequence};
pub use state::{FetchCommand, PageOutcome, Phase, SelectorConfig, SelectorState};
pub use window::{compute_window, is_near_bottom, VisibleWindow, WindowConfig};
