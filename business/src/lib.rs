//! Domain layer of the estate back-office: records, the table engine, the REST client and
//! the commands that move data between them.

pub mod api;
mod config;
mod error;
pub mod form;
pub mod http;
pub mod import;
pub mod invoice;
pub mod models;
pub mod mutation;
mod notifications;
pub mod resource;
mod route;
pub mod screen;
pub mod table;

pub use api::ApiClient;
pub use config::{AppEnv, BusinessConfig, ConfigError};
pub use error::ApiError;
pub use form::{EditForm, FormErrors};
pub use import::{ImportBatch, Importable};
pub use invoice::{Invoice, InvoiceError};
pub use mutation::{Decision, Mutation, MutationKind};
pub use notifications::{Notifications, Toast, ToastKind};
pub use resource::{FetchStatus, Resource, ResourceCompute, ResourceKind, ResourceQuery};
pub use route::Route;
pub use screen::{ResourceScreen, register_shared};
pub use table::{DataTable, RowAction, TableConfig};
