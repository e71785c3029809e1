pub mod builtins;
pub mod scan;
pub mod symbols;

pub const SOURCE_EXTENSION: &str = "mira";
pub const PACKAGE_INIT_FILE: &str = "__init__.mira";

pub use scan::LineScanner;
pub use symbols::{extract_symbols, SymbolTable};

pub fn is_source_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}
