//! Commodity symbol → display name table, loaded once from the reference CSVs.
//!
//! The game writes commodity symbols (`lowtemperaturediamond`) into
//! `Cargo.json`; the CSVs map them to readable names (`Low Temperature
//! Diamonds`). Both files carry a header row.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{EdxError, Result};
use crate::core::paths::resolve_absolute_path;

/// Column layout of one reference table.
#[derive(Debug, Clone, Copy)]
pub struct TableColumns {
    /// Zero-based index of the symbol column.
    pub symbol: usize,
    /// Zero-based index of the display name column.
    pub name: usize,
}

/// `commodity.csv`: `id,symbol,category,name`.
pub const COMMODITY_COLUMNS: TableColumns = TableColumns { symbol: 1, name: 3 };
/// `rare_commodity.csv`: `id,symbol,market,category,name`.
pub const RARE_COMMODITY_COLUMNS: TableColumns = TableColumns { symbol: 1, name: 4 };

/// Case-insensitive symbol lookup. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct NameLookupTable {
    names: HashMap<String, String>,
}

impl NameLookupTable {
    /// Load both reference tables. Rare commodities win on duplicate symbols.
    pub fn load(commodity_file: &Path, rare_commodity_file: &Path) -> Result<Self> {
        let mut table = Self::default();
        table.load_table(commodity_file, COMMODITY_COLUMNS)?;
        table.load_table(rare_commodity_file, RARE_COMMODITY_COLUMNS)?;
        debug!(entries = table.len(), "commodity name table loaded");
        Ok(table)
    }

    /// Build a table directly from symbol/name pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(symbol, name)| (symbol.as_ref().to_lowercase(), name.into()))
                .collect(),
        }
    }

    /// Display name for `symbol`, ignoring case.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<&str> {
        self.names.get(&symbol.to_lowercase()).map(String::as_str)
    }

    /// Number of symbols known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn load_table(&mut self, path: &Path, columns: TableColumns) -> Result<()> {
        let table_error = |details: String| EdxError::NameTable {
            path: resolve_absolute_path(path),
            details,
        };
        let text = fs::read_to_string(path).map_err(|err| table_error(err.to_string()))?;
        let rows = parse_csv(&text).map_err(table_error)?;
        if rows.is_empty() {
            return Err(table_error("no header row".to_string()));
        }

        for (idx, row) in rows.iter().enumerate().skip(1) {
            let (Some(symbol), Some(name)) = (row.get(columns.symbol), row.get(columns.name))
            else {
                return Err(table_error(format!(
                    "row {} has {} columns, need {}",
                    idx + 1,
                    row.len(),
                    columns.symbol.max(columns.name) + 1
                )));
            };
            self.names.insert(symbol.to_lowercase(), name.clone());
        }
        Ok(())
    }
}

/// Minimal RFC 4180 reader: comma separated, `"` quoting with `""` escapes,
/// CRLF or LF row ends. Blank lines are skipped.
fn parse_csv(text: &str) -> std::result::Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                }
                row.clear();
            }
            _ => field.push(ch),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
