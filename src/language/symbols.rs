use std::collections::{BTreeMap, BTreeSet};

use super::scan::LineScanner;

pub const INDENT_UNIT: usize = 4;
pub const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    pub functions: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    pub variables: BTreeSet<String>,
    pub class_methods: BTreeMap<String, BTreeSet<String>>,
    pub variable_types: BTreeMap<String, String>,
    pub object_properties: BTreeMap<String, BTreeSet<String>>,
}

impl SymbolTable {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.variables.is_empty()
            && self.class_methods.is_empty()
            && self.variable_types.is_empty()
            && self.object_properties.is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        self.functions.len()
            + self.classes.len()
            + self.variables.len()
            + self.class_methods.values().map(BTreeSet::len).sum::<usize>()
    }
}

#[derive(Debug)]
struct ActiveObject {
    name: String,
    indent: usize,
}

pub fn extract_symbols(text: &str) -> SymbolTable {
    let mut table = SymbolTable::default();
    let mut scanner = LineScanner::new();
    // innermost open class body last; entries are (name, declaration indent)
    let mut class_stack: Vec<(String, usize)> = Vec::new();
    let mut active_object: Option<ActiveObject> = None;

    for raw in text.lines() {
        let line = scanner.scrub(raw);
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_level(&line);
        while class_stack
            .last()
            .is_some_and(|(_, depth)| *depth >= indent)
        {
            class_stack.pop();
        }
        let stripped = line.trim_start();

        if let Some(name) = match_class_decl(stripped) {
            // a redeclared name belongs to whichever kind came last
            table.functions.remove(name);
            table.classes.insert(name.to_string());
            class_stack.push((name.to_string(), indent));
            continue;
        }
        if let Some(name) = match_fun_decl(stripped) {
            match class_stack.last() {
                Some((class_name, _)) => {
                    table
                        .class_methods
                        .entry(class_name.clone())
                        .or_default()
                        .insert(name.to_string());
                }
                None => {
                    table.classes.remove(name);
                    table.functions.insert(name.to_string());
                }
            }
            continue;
        }
        if indent == 0 {
            if let Some((lhs, rhs)) = match_ctor_assignment(stripped) {
                // last assignment wins
                table
                    .variable_types
                    .insert(lhs.to_string(), rhs.to_string());
                continue;
            }
        }

        let object_open = match_object_open(stripped);
        if object_open.is_none() {
            if active_object
                .as_ref()
                .is_some_and(|active| indent <= active.indent)
            {
                active_object = None;
            }
            if let Some(active) = active_object.as_ref() {
                let keys = table
                    .object_properties
                    .entry(active.name.clone())
                    .or_default();
                collect_object_keys(&line, keys);
                if line.contains('}') {
                    active_object = None;
                }
                continue;
            }
        }
        if let Some(name) = object_open {
            if indent == 0 {
                table.variables.insert(name.to_string());
            }
            let keys = table
                .object_properties
                .entry(name.to_string())
                .or_default();
            collect_object_keys(&line, keys);
            let after_open = line.find('{').map(|at| &line[at..]).unwrap_or("");
            active_object = if after_open.contains('}') {
                None
            } else {
                Some(ActiveObject {
                    name: name.to_string(),
                    indent,
                })
            };
            continue;
        }
        if indent == 0 {
            if let Some(name) = match_plain_assignment(stripped) {
                table.variables.insert(name.to_string());
            }
        }
    }
    table
}

fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width
}

// discrete level, rounded to the nearest unit with ties rounding up
pub fn indent_level(line: &str) -> usize {
    (indent_width(line) + INDENT_UNIT / 2) / INDENT_UNIT
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn leading_identifier(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with(is_ident_start) {
        return None;
    }
    let end = text
        .char_indices()
        .find(|(_, ch)| !is_ident_char(*ch))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    Some((&text[..end], &text[end..]))
}

fn keyword_then_identifier<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (name, _) = leading_identifier(rest.trim_start())?;
    Some(name)
}

pub fn match_class_decl(line: &str) -> Option<&str> {
    keyword_then_identifier(line, "class")
}

pub fn match_fun_decl(line: &str) -> Option<&str> {
    let line = match line.strip_prefix("async") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        Some(_) => return None,
        None => line,
    };
    keyword_then_identifier(line, "fun")
}

// `<lhs> = <rhs>(` with the call paren immediately after the callee
pub fn match_ctor_assignment(line: &str) -> Option<(&str, &str)> {
    let (lhs, rest) = assignment_lhs(line)?;
    let (rhs, tail) = leading_identifier(rest)?;
    if tail.starts_with('(') {
        Some((lhs, rhs))
    } else {
        None
    }
}

pub fn match_object_open(line: &str) -> Option<&str> {
    let (lhs, rest) = assignment_lhs(line)?;
    rest.starts_with('{').then_some(lhs)
}

pub fn match_plain_assignment(line: &str) -> Option<&str> {
    assignment_lhs(line).map(|(lhs, _)| lhs)
}

// `<identifier> =` where `=` is a plain assignment, not `==`;
// returns the identifier and the trimmed right-hand side
fn assignment_lhs(line: &str) -> Option<(&str, &str)> {
    let (lhs, rest) = leading_identifier(line)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=')?;
    if rest.starts_with('=') {
        return None;
    }
    Some((lhs, rest.trim_start()))
}

// bare `key:` and quoted `"key":` occurrences anywhere on the line
fn collect_object_keys(line: &str, keys: &mut BTreeSet<String>) {
    let chars: Vec<char> = line.chars().collect();
    let mut idx = 0;
    while idx < chars.len() {
        let ch = chars[idx];
        if ch == '"' {
            let mut end = idx + 1;
            while end < chars.len() && chars[end] != '"' {
                end += 1;
            }
            if end >= chars.len() {
                return;
            }
            let key: String = chars[idx + 1..end].iter().collect();
            if followed_by_colon(&chars, end + 1) && !key.is_empty() {
                keys.insert(key);
            }
            idx = end + 1;
            continue;
        }
        if is_ident_start(ch) {
            let mut end = idx + 1;
            while end < chars.len() && is_ident_char(chars[end]) {
                end += 1;
            }
            if followed_by_colon(&chars, end) {
                keys.insert(chars[idx..end].iter().collect());
            }
            idx = end;
            continue;
        }
        idx += 1;
    }
}

fn followed_by_colon(chars: &[char], mut idx: usize) -> bool {
    while idx < chars.len() && chars[idx].is_whitespace() {
        idx += 1;
    }
    chars.get(idx) == Some(&':')
}
