use super::*;

fn item(label: &str, kind: CompletionItemKind, detail: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(kind),
        detail: Some(detail.to_string()),
        ..CompletionItem::default()
    }
}

fn prefix_matches(name: &str, prefix: Option<&str>) -> bool {
    match prefix {
        Some(prefix) => name.starts_with(prefix),
        None => true,
    }
}

// Candidates for `target.` from the current document's table only:
// methods of the inferred (or named) class, plus recorded object keys.
pub fn member_completion_items(
    table: &SymbolTable,
    target: &str,
    partial: Option<&str>,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    let class_name = table
        .variable_types
        .get(target)
        .map(String::as_str)
        .or_else(|| table.classes.contains(target).then_some(target));
    if let Some(class_name) = class_name {
        if let Some(methods) = table.class_methods.get(class_name) {
            for name in methods {
                if prefix_matches(name, partial) {
                    items.push(item(
                        name,
                        CompletionItemKind::METHOD,
                        &format!("method of {class_name}"),
                    ));
                }
            }
        }
    }
    if let Some(keys) = table.object_properties.get(target) {
        for key in keys {
            if prefix_matches(key, partial) {
                items.push(item(
                    key,
                    CompletionItemKind::PROPERTY,
                    &format!("property of {target}"),
                ));
            }
        }
    }
    items
}

pub fn decorator_completion_items(partial: &str) -> Vec<CompletionItem> {
    builtins::DECORATORS
        .iter()
        .filter(|name| name.starts_with(partial))
        .map(|name| item(name, CompletionItemKind::FUNCTION, "built-in decorator"))
        .collect()
}

// Built-in module names merged with every indexed module name, filtered
// by the typed dotted prefix.
pub fn import_completion_items(partial: &str, workspace_modules: &[String]) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    let mut seen = BTreeSet::new();
    for name in builtins::MODULES {
        if name.starts_with(partial) && seen.insert(name.to_string()) {
            items.push(item(name, CompletionItemKind::MODULE, "built-in module"));
        }
    }
    for name in workspace_modules {
        if name.starts_with(partial) && seen.insert(name.clone()) {
            items.push(item(name, CompletionItemKind::MODULE, "workspace module"));
        }
    }
    items
}

// Exports of one module: functions, classes and top-level variables.
pub fn from_import_completion_items(
    table: &SymbolTable,
    partial: Option<&str>,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for name in &table.functions {
        if prefix_matches(name, partial) {
            items.push(item(name, CompletionItemKind::FUNCTION, "function"));
        }
    }
    for name in &table.classes {
        if prefix_matches(name, partial) {
            items.push(item(name, CompletionItemKind::CLASS, "class"));
        }
    }
    for name in &table.variables {
        if prefix_matches(name, partial) {
            items.push(item(name, CompletionItemKind::VARIABLE, "variable"));
        }
    }
    items
}

// The general fallback: built-ins plus every indexed module's top-level
// symbols, collapsed by name per category. The editor applies its own
// filtering and ranking on top.
pub fn general_completion_items(modules: &[(String, SymbolTable)]) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    for name in builtins::KEYWORDS {
        items.push(item(name, CompletionItemKind::KEYWORD, "keyword"));
    }
    for name in builtins::TYPES {
        items.push(item(name, CompletionItemKind::CLASS, "built-in type"));
    }
    for name in builtins::FUNCTIONS {
        items.push(item(name, CompletionItemKind::FUNCTION, "built-in function"));
    }

    let mut seen_functions = BTreeSet::new();
    let mut seen_classes = BTreeSet::new();
    let mut seen_variables = BTreeSet::new();
    for (module, table) in modules {
        for name in &table.functions {
            if seen_functions.insert(name.clone()) {
                items.push(item(
                    name,
                    CompletionItemKind::FUNCTION,
                    &format!("from {module}"),
                ));
            }
        }
        for name in &table.classes {
            if seen_classes.insert(name.clone()) {
                items.push(item(
                    name,
                    CompletionItemKind::CLASS,
                    &format!("from {module}"),
                ));
            }
        }
        for name in &table.variables {
            if seen_variables.insert(name.clone()) {
                items.push(item(
                    name,
                    CompletionItemKind::VARIABLE,
                    &format!("from {module}"),
                ));
            }
        }
    }
    items
}
