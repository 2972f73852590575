use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::{PriceError, Symbol};

/// File-name suffix for per-symbol price files, e.g. `BTC_values.csv`.
pub const FILE_SUFFIX: &str = "_values.csv";

/// Resolves a symbol to the raw CSV bytes of its price series.
pub trait PriceSource: Send + Sync {
    /// Returns [`PriceError::NotFound`] when no series exists for `symbol`.
    fn read(&self, symbol: &Symbol) -> Result<Vec<u8>, PriceError>;
}

/// Enumerates the symbols currently known to a store.
pub trait SymbolCatalog: Send + Sync {
    fn list_symbols(&self) -> Result<BTreeSet<Symbol>, PriceError>;
}

/// A store that can both resolve and enumerate symbols.
pub trait PriceStore: PriceSource + SymbolCatalog {}

impl<T: PriceSource + SymbolCatalog> PriceStore for T {}

/// Directory of `<SYMBOL>_values.csv` files.
#[derive(Debug, Clone)]
pub struct FsPriceStore {
    root: PathBuf,
}

impl FsPriceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.root.join(format!("{symbol}{FILE_SUFFIX}"))
    }
}

impl PriceSource for FsPriceStore {
    fn read(&self, symbol: &Symbol) -> Result<Vec<u8>, PriceError> {
        let path = self.path_for(symbol);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == ErrorKind::NotFound => Err(PriceError::NotFound {
                symbol: symbol.to_string(),
            }),
            Err(error) => Err(PriceError::io(path, error)),
        }
    }
}

impl SymbolCatalog for FsPriceStore {
    fn list_symbols(&self) -> Result<BTreeSet<Symbol>, PriceError> {
        let entries = fs::read_dir(&self.root).map_err(|error| PriceError::io(&self.root, error))?;

        let mut symbols = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|error| PriceError::io(&self.root, error))?;
            let is_file = entry
                .file_type()
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            let file_name = entry.file_name();
            let Some(stem) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(FILE_SUFFIX))
            else {
                continue;
            };

            match Symbol::parse(stem) {
                // Only canonical (upper-case) stems resolve back through `path_for`.
                Ok(symbol) if symbol.as_str() == stem => {
                    symbols.insert(symbol);
                }
                _ => debug!(file = ?file_name, "ignoring file with non-canonical symbol stem"),
            }
        }

        Ok(symbols)
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryPriceStore {
    series: BTreeMap<Symbol, Vec<u8>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: Symbol, csv: impl Into<Vec<u8>>) -> Self {
        self.insert(symbol, csv);
        self
    }

    pub fn insert(&mut self, symbol: Symbol, csv: impl Into<Vec<u8>>) {
        self.series.insert(symbol, csv.into());
    }
}

impl PriceSource for MemoryPriceStore {
    fn read(&self, symbol: &Symbol) -> Result<Vec<u8>, PriceError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| PriceError::NotFound {
                symbol: symbol.to_string(),
            })
    }
}

impl SymbolCatalog for MemoryPriceStore {
    fn list_symbols(&self) -> Result<BTreeSet<Symbol>, PriceError> {
        Ok(self.series.keys().cloned().collect())
    }
}
