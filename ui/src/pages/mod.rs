//! Pages shown in the central panel, one per [`estate_business::Route`] variant.

pub mod columns;
mod edit_page;
mod invoice_page;
mod resource_page;

pub use columns::Columns;
pub use edit_page::edit_page;
pub use invoice_page::{invoice_page, invoice_text};
pub use resource_page::{importable_page, resource_page};
