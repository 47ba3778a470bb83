pub mod remote_select;
pub mod virtual_list;

pub use remote_select::{OptionSource, RemoteSelect, RemoteSource};
pub use virtual_list::VirtualList;
