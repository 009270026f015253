use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SymbolListError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("no 'symbol' column in header")]
    MissingColumn,
}

/// The reference list of selectable symbols, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolList {
    symbols: Vec<String>,
}

impl SymbolList {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let symbols = symbols
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();
        Self { symbols }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// First entry, used as the initial selection
    pub fn first(&self) -> Option<&str> {
        self.symbols.first().map(String::as_str)
    }

    /// Canonical spelling of `input` if it is on the list (case-insensitive)
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        self.symbols
            .iter()
            .find(|s| s.as_str() == input)
            .or_else(|| self.symbols.iter().find(|s| s.eq_ignore_ascii_case(input)))
            .map(String::as_str)
    }

    /// Entries containing `filter` (case-insensitive)
    pub fn filtered(&self, filter: &str) -> Vec<String> {
        let needle = filter.to_uppercase();
        self.symbols
            .iter()
            .filter(|s| s.to_uppercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Read the `symbol` column of the reference CSV
pub fn load_symbol_list(path: &Path) -> Result<SymbolList, SymbolListError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == "symbol")
        .ok_or(SymbolListError::MissingColumn)?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(symbol) = record.get(column) {
            symbols.push(symbol.to_string());
        }
    }

    let list = SymbolList::new(symbols);
    info!("Loaded {} symbols from {}", list.len(), path.display());
    Ok(list)
}

/// Load the reference list, turning any failure into the message shown on every frame
pub fn load_symbols_or_banner(path: &Path) -> (SymbolList, Option<String>) {
    match load_symbol_list(path) {
        Ok(list) => (list, None),
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            (SymbolList::default(), Some(format!("Failed to load {}: {}", file_name, e)))
        }
    }
}
