//! 自动命令数据契约：事件、组、模式匹配

use regex::Regex;
use std::fmt;
use std::rc::Rc;

use super::host::{BufferId, EditorHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AutocmdEvent {
    TextYankPost,
    TermOpen,
    ModeChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

#[derive(Debug, Clone)]
pub struct EventArgs {
    pub event: AutocmdEvent,
    pub buf: BufferId,
    /// 与模式匹配的字符串；ModeChanged 为 `old:new`，TermOpen 为终端缓冲区名
    pub matched: String,
}

pub type AutocmdCallback = Rc<dyn Fn(&mut dyn EditorHost, &EventArgs)>;

#[derive(Clone)]
pub struct Autocommand {
    pub event: AutocmdEvent,
    pub pattern: String,
    pub desc: String,
    pub callback: AutocmdCallback,
}

impl Autocommand {
    pub fn new(
        event: AutocmdEvent,
        pattern: &str,
        desc: &str,
        callback: impl Fn(&mut dyn EditorHost, &EventArgs) + 'static,
    ) -> Self {
        Self {
            event,
            pattern: pattern.to_string(),
            desc: desc.to_string(),
            callback: Rc::new(callback),
        }
    }
}

impl fmt::Debug for Autocommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocommand")
            .field("event", &self.event)
            .field("pattern", &self.pattern)
            .field("desc", &self.desc)
            .finish_non_exhaustive()
    }
}

/// 自动命令文件模式（`*`、`?`、`[...]`），编译为锚定的正则
#[derive(Debug, Clone)]
pub struct AutocmdPattern {
    glob: String,
    regex: Regex,
}

impl AutocmdPattern {
    pub fn new(glob: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&glob_to_regex(glob))?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let chars: Vec<char> = glob.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match chars[i + 1..].iter().position(|&c| c == ']') {
                Some(len) if len > 0 => {
                    out.push_str(&class_to_regex(&chars[i + 1..i + 1 + len]));
                    i += len + 1;
                }
                _ => out.push_str(r"\["),
            },
            ch => out.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4]))),
        }
        i += 1;
    }

    out.push('$');
    out
}

fn class_to_regex(body: &[char]) -> String {
    let mut out = String::from("[");
    let mut rest = body;
    if let Some(&first) = rest.first() {
        if first == '^' || first == '!' {
            out.push('^');
            rest = &rest[1..];
        }
    }
    for (idx, &ch) in rest.iter().enumerate() {
        let is_range = ch == '-' && idx > 0 && idx + 1 < rest.len();
        if is_range || ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            out.push_str(&format!("\\x{{{:x}}}", ch as u32));
        }
    }
    out.push(']');
    out
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/autocmd.rs"]
mod tests;
