use super::*;

// Classification of the text before the cursor, tested in this order:
// member access, decorator, import, from-import, then the general
// fallback. The first matching shape wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContext {
    Member {
        target: String,
        partial: Option<String>,
    },
    Decorator {
        partial: String,
    },
    Import {
        partial: String,
    },
    FromImport {
        module: String,
        partial: Option<String>,
    },
    General,
}

pub fn classify_line(prefix: &str) -> LineContext {
    if let Some((target, partial)) = member_access(prefix) {
        return LineContext::Member { target, partial };
    }
    if let Some(partial) = decorator(prefix) {
        return LineContext::Decorator { partial };
    }
    if let Some(partial) = import_statement(prefix) {
        return LineContext::Import { partial };
    }
    if let Some((module, partial)) = from_import(prefix) {
        return LineContext::FromImport { module, partial };
    }
    LineContext::General
}

// `<identifier>.` optionally followed by the partially typed member
fn member_access(prefix: &str) -> Option<(String, Option<String>)> {
    let bytes = prefix.as_bytes();
    let mut end = prefix.len();
    while end > 0 && is_ident_char(bytes[end - 1]) {
        end -= 1;
    }
    let partial = if end < prefix.len() {
        Some(prefix[end..].to_string())
    } else {
        None
    };
    if end == 0 || bytes[end - 1] != b'.' {
        return None;
    }
    let dot = end - 1;
    let mut start = dot;
    while start > 0 && is_ident_char(bytes[start - 1]) {
        start -= 1;
    }
    if start == dot || bytes[start].is_ascii_digit() {
        return None;
    }
    Some((prefix[start..dot].to_string(), partial))
}

// `@partial` at the start of the line
fn decorator(prefix: &str) -> Option<String> {
    let rest = prefix.trim_start().strip_prefix('@')?;
    rest.bytes()
        .all(is_ident_char)
        .then(|| rest.to_string())
}

// `import partial.dotted`
fn import_statement(prefix: &str) -> Option<String> {
    let rest = prefix.trim_start().strip_prefix("import")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let partial = rest.trim_start();
    if partial.contains(char::is_whitespace) {
        return None;
    }
    Some(partial.to_string())
}

// `from module import partial, list`
fn from_import(prefix: &str) -> Option<(String, Option<String>)> {
    let rest = prefix.trim_start().strip_prefix("from")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let module_end = rest
        .find(char::is_whitespace)
        .unwrap_or(rest.len());
    let module = &rest[..module_end];
    if module.is_empty() {
        return None;
    }
    let rest = rest[module_end..].trim_start();
    let rest = rest.strip_prefix("import")?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let list = rest.trim_start();
    let last_item = list.rsplit(',').next().unwrap_or("").trim();
    let partial = if last_item.is_empty() {
        None
    } else {
        Some(last_item.to_string())
    };
    Some((module.to_string(), partial))
}
