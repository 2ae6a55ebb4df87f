//! Spreadsheet import and export by column contract.
//!
//! Decoding spreadsheet files is someone else's job; rows arrive here as header-to-cell
//! maps, or as pasted tab/comma separated text. Rows missing any contract column are
//! dropped and only counted.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use futures::future::join_all;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::BusinessConfig;
use crate::api::ApiClient;
use crate::resource::Resource;
use estate_states::{Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State};

pub type SheetRow = BTreeMap<String, String>;

/// A resource that can be bulk-inserted from, and exported to, a sheet.
pub trait Importable: Resource {
    /// Required columns, in export order.
    const COLUMNS: &'static [&'static str];

    /// Cells in [`Importable::COLUMNS`] order.
    fn export_row(&self) -> Vec<String>;

    fn insert_payload(row: &SheetRow) -> Value {
        Value::Object(
            row.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<String, Value>>(),
        )
    }
}

/// "Link Title " and "link_title" name the same column.
fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub rows: Vec<SheetRow>,
    pub accepted: usize,
    pub dropped: usize,
}

impl ImportBatch {
    pub fn from_rows(columns: &[&str], rows: impl IntoIterator<Item = SheetRow>) -> Self {
        let mut batch = Self::default();
        for raw in rows {
            let row: SheetRow = raw
                .into_iter()
                .map(|(k, v)| (normalize_header(&k), v.trim().to_owned()))
                .collect();
            let complete = columns
                .iter()
                .all(|column| row.get(*column).is_some_and(|cell| !cell.is_empty()));
            if complete {
                batch.rows.push(row);
                batch.accepted += 1;
            } else {
                batch.dropped += 1;
            }
        }
        if batch.dropped > 0 {
            log::warn!(
                "import dropped {} incomplete rows of {}",
                batch.dropped,
                batch.accepted + batch.dropped
            );
        }
        batch
    }

    /// Pasted cells: first non-blank line is the header. Tabs win over commas when the
    /// header has any. Quoted fields are not supported.
    pub fn from_delimited(columns: &[&str], text: &str) -> Self {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let Some(header_line) = lines.next() else {
            return Self::default();
        };
        let delimiter = if header_line.contains('\t') { '\t' } else { ',' };
        let header: Vec<&str> = header_line.split(delimiter).collect();

        let rows = lines.map(|line| {
            header
                .iter()
                .zip(line.split(delimiter))
                .map(|(name, cell)| ((*name).to_owned(), cell.to_owned()))
                .collect::<SheetRow>()
        });
        Self::from_rows(columns, rows)
    }

    pub fn for_resource<R: Importable>(rows: impl IntoIterator<Item = SheetRow>) -> Self {
        Self::from_rows(R::COLUMNS, rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Header row followed by one row per record.
pub fn export_rows<'a, R: Importable>(records: impl IntoIterator<Item = &'a R>) -> Vec<Vec<String>> {
    std::iter::once(R::COLUMNS.iter().map(|c| (*c).to_owned()).collect())
        .chain(records.into_iter().map(Importable::export_row))
        .collect()
}

/// Tab-separated text for the clipboard.
pub fn to_tsv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The batch the UI wants inserted next.
#[derive(Debug)]
pub struct BulkInsertInput<R> {
    pub batch: ImportBatch,
    _rows: PhantomData<fn() -> R>,
}

impl<R> BulkInsertInput<R> {
    pub fn new(batch: ImportBatch) -> Self {
        Self {
            batch,
            _rows: PhantomData,
        }
    }
}

impl<R> Default for BulkInsertInput<R> {
    fn default() -> Self {
        Self::new(ImportBatch::default())
    }
}

impl<R> Clone for BulkInsertInput<R> {
    fn clone(&self) -> Self {
        Self::new(self.batch.clone())
    }
}

impl<R: Importable> State for BulkInsertInput<R> {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkInsertStatus {
    #[default]
    Idle,
    Running {
        total: usize,
    },
    Done {
        inserted: usize,
        failed: usize,
    },
}

#[derive(Debug)]
pub struct BulkInsertCompute<R> {
    pub status: BulkInsertStatus,
    _rows: PhantomData<fn() -> R>,
}

impl<R> BulkInsertCompute<R> {
    pub fn new(status: BulkInsertStatus) -> Self {
        Self {
            status,
            _rows: PhantomData,
        }
    }
}

impl<R> Default for BulkInsertCompute<R> {
    fn default() -> Self {
        Self::new(BulkInsertStatus::Idle)
    }
}

impl<R> Clone for BulkInsertCompute<R> {
    fn clone(&self) -> Self {
        Self::new(self.status)
    }
}

impl<R: Importable> Compute for BulkInsertCompute<R> {}

/// Posts every accepted row at once and waits for all of them.
#[derive(Debug)]
pub struct BulkInsertCommand<R>(PhantomData<fn() -> R>);

impl<R> Default for BulkInsertCommand<R> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<R: Importable> Command for BulkInsertCommand<R> {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let batch = snap.state::<BulkInsertInput<R>>().batch.clone();
        let client = ApiClient::from_config(snap.state::<BusinessConfig>());

        Box::pin(async move {
            let total = batch.rows.len();
            let Some(path) = R::INSERT_PATH else {
                log::error!("{} does not support inserts", R::KIND.title());
                updater.set(BulkInsertCompute::<R>::new(BulkInsertStatus::Done {
                    inserted: 0,
                    failed: total,
                }));
                return;
            };
            updater.set(BulkInsertCompute::<R>::new(BulkInsertStatus::Running { total }));

            let payloads: Vec<Value> = batch.rows.iter().map(R::insert_payload).collect();
            let results = join_all(payloads.iter().map(|body| client.post(path, body))).await;

            let failed = results.iter().filter(|r| r.is_err()).count();
            let inserted = total - failed;
            if let Some(Err(first)) = results.iter().find(|r| r.is_err()) {
                log::error!(
                    "{failed} of {total} {} inserts failed, first error: {first}",
                    R::KIND.title()
                );
            }
            log::info!("inserted {inserted} {}", R::KIND.title());

            updater.set(BulkInsertCompute::<R>::new(BulkInsertStatus::Done {
                inserted,
                failed,
            }));
        })
    }

    fn latest_only(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Place, PropertyLink};

    fn row(cells: &[(&str, &str)]) -> SheetRow {
        cells
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn incomplete_rows_are_dropped_and_counted() {
        let batch = ImportBatch::for_resource::<Place>(vec![
            row(&[
                ("locality", "Madhapur"),
                ("city", "Hyderabad"),
                ("state", "Telangana"),
                ("status", "1"),
            ]),
            row(&[("locality", "Banjara Hills"), ("city", "Hyderabad")]),
            row(&[
                ("locality", "  "),
                ("city", "Hyderabad"),
                ("state", "Telangana"),
                ("status", "1"),
            ]),
        ]);
        assert_eq!(batch.accepted, 1);
        assert_eq!(batch.dropped, 2);
        assert_eq!(batch.rows[0]["locality"], "Madhapur");
    }

    #[test]
    fn headers_are_normalized_and_cells_trimmed() {
        let batch = ImportBatch::for_resource::<Place>(vec![row(&[
            (" Locality ", " Madhapur "),
            ("CITY", "Hyderabad"),
            ("State", "Telangana"),
            ("Status", "Active"),
        ])]);
        assert_eq!(batch.accepted, 1);
        assert_eq!(batch.rows[0]["locality"], "Madhapur");
    }

    #[test]
    fn pasted_tsv_is_parsed() {
        let text = "state\tcity\tlocation\tlink title\tproperty_for\tproperty_in\tsub_type\n\
                    Telangana\tHyderabad\tKondapur\t2 BHK for rent\tRent\tResidential\tApartment\n\
                    \n\
                    Telangana\tHyderabad\t\t\tRent\tResidential\tApartment\n";
        let batch = ImportBatch::from_delimited(PropertyLink::COLUMNS, text);
        assert_eq!(batch.accepted, 1);
        assert_eq!(batch.dropped, 1);
        assert_eq!(batch.rows[0]["link_title"], "2 BHK for rent");
    }

    #[test]
    fn pasted_csv_is_parsed() {
        let text = "locality,city,state,status\nMadhapur,Hyderabad,Telangana,1";
        let batch = ImportBatch::from_delimited(Place::COLUMNS, text);
        assert_eq!(batch.accepted, 1);
    }

    #[test]
    fn empty_paste_is_an_empty_batch() {
        assert!(ImportBatch::from_delimited(Place::COLUMNS, "  \n").is_empty());
    }

    #[test]
    fn export_starts_with_the_header() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "locality": "Madhapur", "city": "Hyderabad", "state": "Telangana", "status": 1
        }))
        .unwrap();
        let rows = export_rows(&[place]);
        assert_eq!(rows[0], vec!["locality", "city", "state", "status"]);
        assert_eq!(rows[1], vec!["Madhapur", "Hyderabad", "Telangana", "Active"]);
        assert_eq!(
            to_tsv(&rows),
            "locality\tcity\tstate\tstatus\nMadhapur\tHyderabad\tTelangana\tActive"
        );
    }
}
