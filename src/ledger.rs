//! The harvest ledger: an ordered list of daily egg counts backed by a [`Store`].
//!
//! Days are positions, not identifiers. Every mutation keeps
//! `records[i].day == i + 1` and then saves a full snapshot. A failed save
//! leaves the in-memory change in place and is reported as
//! [`LedgerError::PersistenceWriteFailure`].

use crate::config::DateLocale;
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::models::{HarvestRecord, LedgerView, RawQuantity, Summary};
use crate::quantity::in_range;
use crate::report::{render_report, report_filename};
use crate::stats::summarize;
use crate::storage::Store;
use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

pub struct HarvestLedger<S: Store> {
    records: Vec<HarvestRecord>,
    store: S,
    locale: DateLocale,
}

impl<S: Store> HarvestLedger<S> {
    /// Empty ledger that has not read anything from `store`.
    pub fn new(store: S, locale: DateLocale) -> Self {
        Self {
            records: Vec::new(),
            store,
            locale,
        }
    }

    /// Ledger hydrated from `store`. Missing, unreadable or corrupt data all
    /// yield an empty ledger.
    pub fn open(store: S, locale: DateLocale) -> Self {
        let mut ledger = Self::new(store, locale);
        match ledger.store.load() {
            Ok(Some(snapshot)) => match ledger.deserialize(&snapshot) {
                Ok(()) => info!("loaded {} harvest records", ledger.records.len()),
                Err(err) => warn!("starting with an empty ledger: {err}"),
            },
            Ok(None) => info!("no saved harvest data, starting empty"),
            Err(err) => error!("failed to read saved harvest data: {err}"),
        }
        ledger
    }

    pub fn records(&self) -> &[HarvestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add(&mut self, raw: impl Into<RawQuantity>) -> LedgerResult<HarvestRecord> {
        self.add_on(Local::now().date_naive(), raw)
    }

    pub fn add_on(
        &mut self,
        today: NaiveDate,
        raw: impl Into<RawQuantity>,
    ) -> LedgerResult<HarvestRecord> {
        let raw = raw.into();
        let quantity = raw
            .parse()
            .filter(|value| in_range(*value))
            .ok_or_else(|| LedgerError::InvalidQuantity {
                input: raw.to_string(),
            })?;

        let record = HarvestRecord {
            day: self.records.len() as u32 + 1,
            quantity,
            date: self.locale.format(today),
        };
        self.records.push(record.clone());
        debug!("added day {} with {} eggs", record.day, record.quantity);

        self.persist()?;
        Ok(record)
    }

    /// Replaces the quantity at `index`. Unparseable, negative or oversized
    /// input stores `0`.
    pub fn edit(
        &mut self,
        index: usize,
        raw: impl Into<RawQuantity>,
    ) -> LedgerResult<HarvestRecord> {
        self.check_index(index)?;
        let quantity = raw
            .into()
            .parse()
            .filter(|value| in_range(*value))
            .unwrap_or(0.0);

        let record = &mut self.records[index];
        record.quantity = quantity;
        let record = record.clone();
        debug!("edited day {} to {} eggs", record.day, record.quantity);

        self.persist()?;
        Ok(record)
    }

    pub fn remove(&mut self, index: usize) -> LedgerResult<HarvestRecord> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        self.renumber();
        debug!("removed day {}, {} records left", removed.day, self.records.len());

        self.persist()?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> LedgerResult<()> {
        self.records.clear();
        debug!("cleared all records");
        self.persist()
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.records)
    }

    pub fn view(&self) -> LedgerView {
        LedgerView {
            records: self.records.clone(),
            summary: self.summary(),
        }
    }

    pub fn serialize(&self) -> LedgerResult<String> {
        serde_json::to_string(&self.records)
            .map_err(|err| LedgerError::PersistenceWriteFailure(StoreError::Encoding(err)))
    }

    /// Replaces the records with a snapshot produced by [`serialize`](Self::serialize).
    /// On failure the ledger is left empty.
    pub fn deserialize(&mut self, input: &str) -> LedgerResult<()> {
        match parse_snapshot(input) {
            Ok(records) => {
                self.records = records;
                self.renumber();
                Ok(())
            }
            Err(reason) => {
                self.records.clear();
                Err(LedgerError::CorruptData(reason))
            }
        }
    }

    pub fn export_report(&self) -> LedgerResult<String> {
        if self.records.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        Ok(render_report(&self.records, &self.summary()))
    }

    pub fn export_filename(&self) -> String {
        self.export_filename_on(Local::now().date_naive())
    }

    pub fn export_filename_on(&self, today: NaiveDate) -> String {
        report_filename(self.locale, today)
    }

    fn check_index(&self, index: usize) -> LedgerResult<()> {
        if index >= self.records.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (position, record) in self.records.iter_mut().enumerate() {
            record.day = position as u32 + 1;
        }
    }

    fn persist(&mut self) -> LedgerResult<()> {
        let snapshot = self.serialize()?;
        self.store.save(&snapshot).map_err(|err| {
            error!("failed to save harvest data: {err}");
            LedgerError::PersistenceWriteFailure(err)
        })
    }
}

fn parse_snapshot(input: &str) -> Result<Vec<HarvestRecord>, String> {
    let records: Option<Vec<HarvestRecord>> =
        serde_json::from_str(input).map_err(|err| err.to_string())?;
    let records = records.unwrap_or_default();

    if let Some(bad) = records
        .iter()
        .find(|record| !in_range(record.quantity))
    {
        return Err(format!("day {} has invalid quantity {}", bad.day, bad.quantity));
    }
    Ok(records)
}
