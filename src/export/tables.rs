//! Output tables and where their rows go

use super::config::ExportConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};

/// The four flat tables produced by an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// One row per listing
    Listings,

    /// Sellers and bidders, not deduplicated
    Participants,

    /// One row per bid, or a placeholder row for a listing without bids
    Bids,

    /// One row per (category, listing) membership
    Categories,
}

impl Table {
    /// All tables, in the order their files are opened
    pub const ALL: [Table; 4] = [
        Table::Listings,
        Table::Participants,
        Table::Bids,
        Table::Categories,
    ];

    /// File name of the table inside the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Listings => "items.dat",
            Table::Participants => "user.dat",
            Table::Bids => "bids.dat",
            Table::Categories => "category.dat",
        }
    }

    /// Column names, in row order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Listings => &[
                "ItemID",
                "Name",
                "Currently",
                "Buy_Price",
                "First_Bid",
                "Number_of_Bids",
                "Started",
                "Ends",
            ],
            Table::Participants => &["UserID", "Location", "Country", "Rating"],
            Table::Bids => &["ItemID", "SellerID", "BidderID", "Time", "Amount"],
            Table::Categories => &["Category", "ItemID"],
        }
    }

    /// Human-readable table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Listings => "listings",
            Table::Participants => "participants",
            Table::Bids => "bids",
            Table::Categories => "categories",
        }
    }
}

/// Destination for formatted rows
///
/// Lines arrive fully formatted, newline included.
pub trait TableSink {
    /// Append one formatted line to a table
    fn append(&mut self, table: Table, line: &str) -> Result<()>;

    /// Push buffered rows to their destination
    fn flush(&mut self) -> Result<()>;
}

/// Append-mode table files in the output directory
///
/// Opened once per run; rows from every processed document accumulate
/// in the same four files.
pub struct FileTables {
    listings: BufWriter<File>,
    participants: BufWriter<File>,
    bids: BufWriter<File>,
    categories: BufWriter<File>,
}

impl FileTables {
    /// Create the output directory if needed and open all four tables for appending
    pub fn open(config: &ExportConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", config.output_dir)
        })?;

        let open = |table: Table| -> Result<BufWriter<File>> {
            let path = config.table_path(table);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open {} table at {:?}", table.name(), path))?;
            log::debug!("Opened {} table: {:?}", table.name(), path);
            Ok(BufWriter::new(file))
        };

        Ok(Self {
            listings: open(Table::Listings)?,
            participants: open(Table::Participants)?,
            bids: open(Table::Bids)?,
            categories: open(Table::Categories)?,
        })
    }

    fn writer(&mut self, table: Table) -> &mut BufWriter<File> {
        match table {
            Table::Listings => &mut self.listings,
            Table::Participants => &mut self.participants,
            Table::Bids => &mut self.bids,
            Table::Categories => &mut self.categories,
        }
    }

    /// Flush and close all four files
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        log::debug!("Closed output tables");
        Ok(())
    }
}

impl TableSink for FileTables {
    fn append(&mut self, table: Table, line: &str) -> Result<()> {
        self.writer(table)
            .write_all(line.as_bytes())
            .with_context(|| format!("Failed to write to {} table", table.name()))
    }

    fn flush(&mut self) -> Result<()> {
        for table in Table::ALL {
            self.writer(table)
                .flush()
                .with_context(|| format!("Failed to flush {} table", table.name()))?;
        }
        Ok(())
    }
}

/// In-memory tables, useful for inspecting rows without touching disk
#[derive(Debug, Default)]
pub struct MemoryTables {
    lines: HashMap<Table, Vec<String>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended to a table so far
    pub fn lines(&self, table: Table) -> &[String] {
        self.lines.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl TableSink for MemoryTables {
    fn append(&mut self, table: Table, line: &str) -> Result<()> {
        self.lines.entry(table).or_default().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
