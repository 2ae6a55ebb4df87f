//! What makes a record type a screen: its endpoints, actions and server-side query.

use std::fmt::Debug;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::api::ApiClient;
use crate::invoice::{Invoice, InvoiceError};
use crate::mutation::{Mutation, MutationRequest};
use crate::table::{RowAction, Searchable, TableConfig};
use estate_states::{Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResourceKind {
    Listings,
    Leads,
    Subscriptions,
    PropertyLinks,
    Places,
    Media,
}

impl ResourceKind {
    pub const ALL: [Self; 6] = [
        Self::Listings,
        Self::Leads,
        Self::Subscriptions,
        Self::PropertyLinks,
        Self::Places,
        Self::Media,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Listings => "Listings",
            Self::Leads => "Leads",
            Self::Subscriptions => "Subscriptions",
            Self::PropertyLinks => "Property Links",
            Self::Places => "Places",
            Self::Media => "Media",
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Self::Listings => "Listing",
            Self::Leads => "Lead",
            Self::Subscriptions => "Subscription",
            Self::PropertyLinks => "Property link",
            Self::Places => "Place",
            Self::Media => "Media file",
        }
    }
}

pub trait Resource:
    Clone + PartialEq + Debug + Send + Sync + Serialize + DeserializeOwned + Searchable + 'static
{
    /// Server-side filter sent with the list request.
    type Query: Clone + Default + PartialEq + Debug + Send + Sync + Serialize + 'static;

    const KIND: ResourceKind;
    const LIST_PATH: &'static str;
    const TABLE: TableConfig;
    const ACTIONS: &'static [RowAction];
    /// Fields the edit form refuses to submit blank.
    const REQUIRED_FIELDS: &'static [&'static str] = &[];
    const INSERT_PATH: Option<&'static str> = None;
    /// Header of the category selector, when the screen has one.
    const CATEGORY_TITLE: Option<&'static str> = None;

    fn row_id(&self) -> Ustr;

    /// `None` when the resource does not support this mutation.
    fn mutation_request(&self, mutation: &Mutation) -> Option<MutationRequest>;

    fn external_url(&self, _action: RowAction, _site_url: &str) -> Option<String> {
        None
    }

    fn invoice(&self) -> Option<Result<Invoice, InvoiceError>> {
        None
    }

    /// Values offered by the category selector.
    fn categories() -> Vec<String> {
        Vec::new()
    }

    /// Queries that cannot be sent yet (a required id is blank) suppress the fetch.
    fn query_ready(_query: &Self::Query) -> bool {
        true
    }
}

/// Server-side query for `R`, edited by the UI.
#[derive(Debug)]
pub struct ResourceQuery<R: Resource> {
    pub query: R::Query,
}

impl<R: Resource> Default for ResourceQuery<R> {
    fn default() -> Self {
        Self {
            query: R::Query::default(),
        }
    }
}

impl<R: Resource> Clone for ResourceQuery<R> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
        }
    }
}

impl<R: Resource> State for ResourceQuery<R> {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Last fetched rows for `R`.
///
/// Rows stay in place while a re-fetch is loading or after it fails, so the table does
/// not flash empty.
#[derive(Debug)]
pub struct ResourceCompute<R> {
    pub rows: Vec<R>,
    pub status: FetchStatus,
    /// Bumped on every successful load.
    pub version: u64,
}

impl<R> Default for ResourceCompute<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            status: FetchStatus::Idle,
            version: 0,
        }
    }
}

impl<R: Clone> Clone for ResourceCompute<R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            status: self.status.clone(),
            version: self.version,
        }
    }
}

impl<R: Resource> Compute for ResourceCompute<R> {}

impl<R> ResourceCompute<R> {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// Fetches the rows for the current [`ResourceQuery`].
///
/// Latest-only: a newer dispatch cancels this one and its late results are discarded.
#[derive(Debug)]
pub struct FetchResourceCommand<R>(PhantomData<fn() -> R>);

impl<R> Default for FetchResourceCommand<R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<R: Resource> Command for FetchResourceCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let query = snap.state::<ResourceQuery<R>>().query.clone();
        let client = ApiClient::from_config(snap.state::<BusinessConfig>());

        Box::pin(async move {
            updater.update::<ResourceCompute<R>>(|compute| compute.status = FetchStatus::Loading);

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    log::debug!("{} fetch superseded", R::KIND.title());
                    return;
                }
                result = client.list::<R, _>(R::LIST_PATH, &query) => result,
            };

            match result {
                Ok(rows) => {
                    log::info!("fetched {} {}", rows.len(), R::KIND.title());
                    updater.update::<ResourceCompute<R>>(move |compute| {
                        compute.rows = rows;
                        compute.status = FetchStatus::Loaded;
                        compute.version += 1;
                    });
                }
                Err(err) => {
                    log::error!("fetching {} failed: {err}", R::KIND.title());
                    let message = err.user_message();
                    updater.update::<ResourceCompute<R>>(move |compute| {
                        compute.status = FetchStatus::Error(message);
                    });
                }
            }
        })
    }
}
