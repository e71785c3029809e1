pub const LINE_COMMENT: char = '#';
pub const BLOCK_MARKER: &str = "##";

// Carries the block-comment flag across lines. Feed every line of a file
// in order; the flag threads through line boundaries.
#[derive(Debug, Default)]
pub struct LineScanner {
    in_block: bool,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_block_comment(&self) -> bool {
        self.in_block
    }

    pub fn scrub(&mut self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut in_string = false;
        let mut escaped = false;
        let mut idx = 0;
        while idx < chars.len() {
            if self.in_block {
                if chars[idx] == '#' && chars.get(idx + 1) == Some(&'#') {
                    self.in_block = false;
                    idx += 2;
                } else {
                    idx += 1;
                }
                continue;
            }
            let ch = chars[idx];
            if escaped {
                out.push(ch);
                escaped = false;
                idx += 1;
                continue;
            }
            if ch == '\\' {
                out.push(ch);
                escaped = true;
                idx += 1;
                continue;
            }
            if in_string {
                if ch == '"' {
                    in_string = false;
                }
                out.push(ch);
                idx += 1;
                continue;
            }
            if ch == '#' {
                if chars.get(idx + 1) == Some(&'#') {
                    self.in_block = true;
                    idx += 2;
                    continue;
                }
                // line comment: drop the remainder
                break;
            }
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            idx += 1;
        }
        out
    }
}
