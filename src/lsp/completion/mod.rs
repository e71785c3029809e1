use std::collections::BTreeSet;

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

use crate::language::{builtins, SymbolTable};

use super::text::is_ident_char;

mod context;
mod items;

pub use context::{classify_line, LineContext};
pub use items::{
    decorator_completion_items, from_import_completion_items, general_completion_items,
    import_completion_items, member_completion_items,
};

// Assembles the candidate list for a classified context. `workspace` is
// the index snapshot, sorted by module name; `document_table` is the
// entry for the module the request came from, when it resolves to one.
pub fn resolve(
    context: &LineContext,
    document_table: Option<&SymbolTable>,
    workspace: &[(String, SymbolTable)],
) -> Vec<CompletionItem> {
    match context {
        LineContext::Member { target, partial } => {
            let members = document_table
                .map(|table| member_completion_items(table, target, partial.as_deref()))
                .unwrap_or_default();
            if members.is_empty() {
                general_completion_items(workspace)
            } else {
                members
            }
        }
        LineContext::Decorator { partial } => decorator_completion_items(partial),
        LineContext::Import { partial } => {
            let names: Vec<String> = workspace.iter().map(|(name, _)| name.clone()).collect();
            import_completion_items(partial, &names)
        }
        LineContext::FromImport { module, partial } => workspace
            .iter()
            .find(|(name, _)| name == module)
            .map(|(_, table)| from_import_completion_items(table, partial.as_deref()))
            .unwrap_or_default(),
        LineContext::General => general_completion_items(workspace),
    }
}

pub fn completion_trigger_characters() -> Vec<String> {
    // identifiers re-trigger as they grow; `.` and `@` open member and
    // decorator contexts
    const TRIGGER_CHARS: &str =
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_.@";
    TRIGGER_CHARS.chars().map(|ch| ch.to_string()).collect()
}
