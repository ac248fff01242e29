//! Main export pipeline orchestration

use super::config::ExportConfig;
use super::rows::{format_row, ListingRows, TableRow};
use super::tables::{Table, TableSink};
use crate::ebay;
use crate::model::Listing;
use anyhow::{Context, Result};
use std::path::Path;

/// Row counts accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Documents loaded and written
    pub documents: usize,

    /// Paths skipped because they do not end in the document suffix
    pub skipped: usize,

    pub listings: usize,
    pub participants: usize,
    pub bids: usize,
    pub categories: usize,
}

impl ExportSummary {
    fn record(&mut self, table: Table) {
        match table {
            Table::Listings => self.listings += 1,
            Table::Participants => self.participants += 1,
            Table::Bids => self.bids += 1,
            Table::Categories => self.categories += 1,
        }
    }
}

/// Main export pipeline
///
/// The sink is opened and closed by the caller; every document processed by
/// one pipeline appends to the same four tables.
pub struct ExportPipeline<S: TableSink> {
    config: ExportConfig,
    sink: S,
    summary: ExportSummary,
}

impl<S: TableSink> ExportPipeline<S> {
    /// Create a new export pipeline writing into `sink`
    pub fn new(config: ExportConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            summary: ExportSummary::default(),
        }
    }

    /// Process every export document among `paths`, in order
    ///
    /// `on_success` is called after each document has been fully written.
    /// The first failure aborts the run; rows from earlier documents stay.
    pub fn run<P, F>(&mut self, paths: &[P], mut on_success: F) -> Result<ExportSummary>
    where
        P: AsRef<Path>,
        F: FnMut(&Path),
    {
        log::info!("Starting auction export");
        log::info!("Target: {:?}", self.config.output_dir);

        for path in paths {
            let path = path.as_ref();
            if self.process_path(path)? {
                on_success(path);
            }
        }

        log::info!(
            "Export complete: {} document(s), {} listing(s), {} bid row(s), {} participant row(s), {} category row(s)",
            self.summary.documents,
            self.summary.listings,
            self.summary.bids,
            self.summary.participants,
            self.summary.categories
        );
        Ok(self.summary.clone())
    }

    /// Load and write one document; returns false if the path was skipped
    pub fn process_path(&mut self, path: &Path) -> Result<bool> {
        if !self.config.is_source_document(path) {
            log::debug!("Skipping {:?}: not a {} document", path, self.config.extension);
            self.summary.skipped += 1;
            return Ok(false);
        }

        log::info!("Loading {:?}", path);
        let listings = ebay::load_document(path)
            .with_context(|| format!("Failed to load export document {:?}", path))?;

        self.write_listings(&listings)
            .with_context(|| format!("Failed to export {:?}", path))?;
        self.sink
            .flush()
            .with_context(|| format!("Failed to flush tables after {:?}", path))?;

        self.summary.documents += 1;
        log::info!("Wrote {} listing(s) from {:?}", listings.len(), path);
        Ok(true)
    }

    /// Write all rows for a batch of listings, in order
    pub fn write_listings(&mut self, listings: &[Listing]) -> Result<()> {
        for (i, listing) in listings.iter().enumerate() {
            log::debug!(
                "[{}/{}] Listing {} ({} bid(s))",
                i + 1,
                listings.len(),
                listing.item_id,
                listing.bid_count()
            );

            let rows = ListingRows::build(listing)
                .with_context(|| format!("Invalid value in listing {}", listing.item_id))?;

            self.emit_listing(&rows)?;
            self.emit_categories(&rows)?;
            self.emit_seller(&rows)?;
            self.emit_bids(&rows)?;
        }
        Ok(())
    }

    fn emit_listing(&mut self, rows: &ListingRows) -> Result<()> {
        self.append(&rows.listing)
    }

    fn emit_categories(&mut self, rows: &ListingRows) -> Result<()> {
        for row in &rows.categories {
            self.append(row)?;
        }
        Ok(())
    }

    fn emit_seller(&mut self, rows: &ListingRows) -> Result<()> {
        self.append(&rows.seller)
    }

    /// Bid rows, plus one participants row per bidder
    fn emit_bids(&mut self, rows: &ListingRows) -> Result<()> {
        for row in &rows.bids {
            self.append(row)?;
        }
        for row in &rows.bidders {
            self.append(row)?;
        }
        Ok(())
    }

    fn append<R: TableRow>(&mut self, row: &R) -> Result<()> {
        let line = format_row(row, self.config.delimiter);
        self.sink.append(R::TABLE, &line)?;
        self.summary.record(R::TABLE);
        Ok(())
    }

    /// Counts so far
    pub fn summary(&self) -> &ExportSummary {
        &self.summary
    }

    /// Give the sink back to the caller for closing
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Combine the outcome of a run with the outcome of closing its tables
///
/// A run failure takes precedence; a close failure on top of it is attached
/// as context so neither is lost.
pub fn finish_run(run: Result<ExportSummary>, close: Result<()>) -> Result<ExportSummary> {
    match (run, close) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(close_err)) => Err(close_err.context("Failed to close output tables")),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(close_err)) => Err(run_err.context(format!(
            "Export failed; closing output tables also failed: {:#}",
            close_err
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemoryTables;
    use crate::model::{Bid, Participant};
    use std::path::PathBuf;

    fn listing(item_id: &str, bidders: &[&str]) -> Listing {
        Listing {
            item_id: item_id.to_string(),
            name: format!("Item {}", item_id),
            categories: vec!["Electronics".to_string(), "Cameras".to_string()],
            currently: "$3,453.23".to_string(),
            buy_price: None,
            first_bid: "$1.00".to_string(),
            number_of_bids: bidders.len().to_string(),
            started: "Dec-10-01 20:49:54".to_string(),
            ends: "Dec-17-01 20:49:54".to_string(),
            seller: Participant::new("seller", "10").with_location("Here", "USA"),
            bids: bidders
                .iter()
                .map(|b| Bid {
                    bidder: Participant::new(*b, "1"),
                    time: "Dec-11-01 10:00:00".to_string(),
                    amount: "$2.00".to_string(),
                })
                .collect(),
        }
    }

    fn pipeline() -> ExportPipeline<MemoryTables> {
        ExportPipeline::new(ExportConfig::new(PathBuf::from(".")), MemoryTables::new())
    }

    #[test]
    fn test_zero_bids_writes_placeholder_only() {
        let mut pipeline = pipeline();
        pipeline.write_listings(&[listing("1", &[])]).unwrap();

        let summary = pipeline.summary().clone();
        let tables = pipeline.into_sink();

        assert_eq!(
            tables.lines(Table::Bids),
            ["1|\"seller\"|\"NULL\"|\"NULL\"|\"NULL\"\n".to_string()]
        );
        // Only the seller; no bidder rows
        assert_eq!(tables.lines(Table::Participants).len(), 1);
        assert_eq!(summary.bids, 1);
        assert_eq!(summary.participants, 1);
    }

    #[test]
    fn test_categories_one_row_per_label() {
        let mut pipeline = pipeline();
        pipeline.write_listings(&[listing("42", &[])]).unwrap();
        let tables = pipeline.into_sink();

        assert_eq!(
            tables.lines(Table::Categories),
            ["Electronics|42\n".to_string(), "Cameras|42\n".to_string()]
        );
    }

    #[test]
    fn test_bidders_become_participants() {
        let mut pipeline = pipeline();
        pipeline.write_listings(&[listing("7", &["a", "b", "a"])]).unwrap();
        let tables = pipeline.into_sink();

        assert_eq!(tables.lines(Table::Bids).len(), 3);
        // Seller first, then one row per bid with no deduplication
        let participants = tables.lines(Table::Participants);
        assert_eq!(participants.len(), 4);
        assert!(participants[0].starts_with("\"seller\""));
        assert_eq!(participants[1], "\"a\"|\"NULL\"|\"NULL\"|1\n");
        assert_eq!(participants[3], "\"a\"|\"NULL\"|\"NULL\"|1\n");
    }

    #[test]
    fn test_listing_order_preserved() {
        let mut pipeline = pipeline();
        pipeline
            .write_listings(&[listing("1", &[]), listing("2", &["x"]), listing("3", &[])])
            .unwrap();
        let tables = pipeline.into_sink();

        let ids: Vec<_> = tables
            .lines(Table::Listings)
            .iter()
            .map(|l| l.split('|').next().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_bad_timestamp_writes_nothing_for_listing() {
        let mut bad = listing("9", &["x"]);
        bad.bids[0].time = "garbage".to_string();

        let mut pipeline = pipeline();
        assert!(pipeline.write_listings(&[listing("8", &[]), bad]).is_err());
        let tables = pipeline.into_sink();

        // Earlier listing kept, failing listing contributes no rows
        assert_eq!(tables.lines(Table::Listings).len(), 1);
        assert_eq!(tables.lines(Table::Bids).len(), 1);
    }

    #[test]
    fn test_non_json_paths_skipped() {
        let mut pipeline = pipeline();
        let mut seen = Vec::new();
        let summary = pipeline
            .run(&["notes.txt", "README.md"][..], |p| seen.push(p.to_path_buf()))
            .unwrap();

        assert!(seen.is_empty());
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.documents, 0);
    }

    #[test]
    fn test_finish_run_keeps_run_error_when_close_fails() {
        let run = Err(anyhow::anyhow!("listing 1 is missing required field Seller"));
        let close = Err(anyhow::anyhow!("disk full"));

        let err = finish_run(run, close).unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            "listing 1 is missing required field Seller"
        );
        assert!(format!("{:#}", err).contains("disk full"));
    }

    #[test]
    fn test_finish_run_outcomes() {
        let summary = ExportSummary {
            documents: 1,
            ..ExportSummary::default()
        };
        assert_eq!(finish_run(Ok(summary.clone()), Ok(())).unwrap(), summary);

        let err = finish_run(Ok(summary), Err(anyhow::anyhow!("disk full"))).unwrap_err();
        assert_eq!(err.root_cause().to_string(), "disk full");

        let err = finish_run(Err(anyhow::anyhow!("bad json")), Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "bad json");
    }

    #[test]
    fn test_missing_document_fails() {
        let mut pipeline = pipeline();
        let result = pipeline.run(&["/nonexistent/items-0.json"][..], |_| {});
        assert!(result.is_err());
    }
}
