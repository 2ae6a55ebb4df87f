pub mod action_menu;
pub mod data_table;
pub mod filter_bar;
pub mod import_panel;
pub mod pagination;
pub mod toasts;

pub use action_menu::{MenuEvent, action_menu};
pub use data_table::{TableEvent, data_table};
pub use filter_bar::filter_bar;
pub use import_panel::{ImportRequest, import_panel};
pub use pagination::pagination;
pub use toasts::toasts;
