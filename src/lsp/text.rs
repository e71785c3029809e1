use std::path::PathBuf;

use tower_lsp::lsp_types::{Position, Url};

pub fn is_ident_char(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

pub fn url_to_path(url: &Url) -> Option<PathBuf> {
    url.to_file_path().ok()
}

// Text of the cursor's line up to the cursor column. Columns count
// characters the same way offsets are produced for the client.
pub fn line_prefix_at(text: &str, position: Position) -> String {
    for (current_line, line) in text.split('\n').enumerate() {
        let current_line: u32 = current_line.try_into().unwrap_or(u32::MAX);
        if current_line == position.line {
            let line = line.strip_suffix('\r').unwrap_or(line);
            return line.chars().take(position.character as usize).collect();
        }
    }
    String::new()
}
