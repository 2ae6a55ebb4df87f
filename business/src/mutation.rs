//! Row mutations: approve, reject, delete, update and insert.
//!
//! The UI fills [`MutationInput`] and enqueues [`MutateRowCommand`]. The command posts the
//! request built by the resource and appends a [`MutationOutcome`] to
//! [`RowActionCompute`]; the screen drains those outcomes on the UI thread.

use std::marker::PhantomData;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::api::ApiClient;
use crate::resource::Resource;
use estate_states::{Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetStatus(Decision),
    Delete,
    /// Submit an edited record. The payload is the full record as JSON.
    Update(Value),
    Insert(Value),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::SetStatus(Decision::Approve) => MutationKind::Approve,
            Self::SetStatus(Decision::Reject) => MutationKind::Reject,
            Self::Delete => MutationKind::Delete,
            Self::Update(_) => MutationKind::Update,
            Self::Insert(_) => MutationKind::Insert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Approve,
    Reject,
    Delete,
    Update,
    Insert,
}

impl MutationKind {
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Delete => "deleted",
            Self::Update => "updated",
            Self::Insert => "created",
        }
    }

    /// Edits and inserts come from the form screen, which closes on success.
    pub const fn is_form_submission(self) -> bool {
        matches!(self, Self::Update | Self::Insert)
    }
}

/// A POST the resource wants sent for a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub path: &'static str,
    pub body: Value,
}

impl MutationRequest {
    pub fn new(path: &'static str, body: Value) -> Self {
        Self { path, body }
    }
}

/// Build the request for `mutation`, against `target` unless it is an insert.
pub fn request_for<R: Resource>(target: Option<&R>, mutation: &Mutation) -> Option<MutationRequest> {
    match (mutation, target) {
        (Mutation::Insert(body), _) => {
            R::INSERT_PATH.map(|path| MutationRequest::new(path, body.clone()))
        }
        (mutation, Some(record)) => record.mutation_request(mutation),
        (_, None) => None,
    }
}

/// What the UI wants mutated next.
#[derive(Debug)]
pub struct MutationInput<R> {
    pub target: Option<R>,
    pub mutation: Option<Mutation>,
}

impl<R> Default for MutationInput<R> {
    fn default() -> Self {
        Self {
            target: None,
            mutation: None,
        }
    }
}

impl<R: Clone> Clone for MutationInput<R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            mutation: self.mutation.clone(),
        }
    }
}

impl<R: Resource> State for MutationInput<R> {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub row: Option<Ustr>,
    pub kind: MutationKind,
    /// Success message or error message.
    pub result: Result<String, String>,
}

/// Outcomes not yet consumed by the screen.
#[derive(Debug)]
pub struct RowActionCompute<R> {
    pub outcomes: Vec<MutationOutcome>,
    _rows: PhantomData<fn() -> R>,
}

impl<R> Default for RowActionCompute<R> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
            _rows: PhantomData,
        }
    }
}

impl<R> Clone for RowActionCompute<R> {
    fn clone(&self) -> Self {
        Self {
            outcomes: self.outcomes.clone(),
            _rows: PhantomData,
        }
    }
}

impl<R: Resource> Compute for RowActionCompute<R> {}

impl<R> RowActionCompute<R> {
    pub fn take(&mut self) -> Vec<MutationOutcome> {
        std::mem::take(&mut self.outcomes)
    }
}

/// Sends one mutation. Every run reports; none is superseded by a later one.
#[derive(Debug)]
pub struct MutateRowCommand<R>(PhantomData<fn() -> R>);

impl<R> Default for MutateRowCommand<R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<R: Resource> Command for MutateRowCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<MutationInput<R>>().clone();
        let client = ApiClient::from_config(snap.state::<BusinessConfig>());

        Box::pin(async move {
            let Some(mutation) = input.mutation else {
                return;
            };
            let kind = mutation.kind();
            let row = input.target.as_ref().map(Resource::row_id);
            let noun = R::KIND.singular();

            let result = match request_for(input.target.as_ref(), &mutation) {
                None => Err(format!("{noun} cannot be {}", kind.past_tense())),
                Some(request) => match client.post(request.path, &request.body).await {
                    Ok(message) => {
                        Ok(message.unwrap_or_else(|| format!("{noun} {}", kind.past_tense())))
                    }
                    Err(err) => Err(err.user_message()),
                },
            };

            match &result {
                Ok(_) => log::info!("{noun} {row:?} {}", kind.past_tense()),
                Err(err) => log::error!("{noun} {row:?} could not be {}: {err}", kind.past_tense()),
            }

            updater.update::<RowActionCompute<R>>(move |compute| {
                compute.outcomes.push(MutationOutcome { row, kind, result });
            });
        })
    }

    fn latest_only(&self) -> bool {
        false
    }
}
