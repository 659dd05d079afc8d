//! 快捷键数据契约：模式、按键序列、映射动作

use compact_str::CompactString;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Mode {
    Normal,
    Visual,
    Insert,
    CommandLine,
    Terminal,
}

impl Mode {
    pub fn short_name(self) -> &'static str {
        match self {
            Mode::Normal => "n",
            Mode::Visual => "x",
            Mode::Insert => "i",
            Mode::CommandLine => "c",
            Mode::Terminal => "t",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineDirection {
    Above,
    Below,
}

/// 可通过前缀快捷键切换的目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToggleTarget {
    Background,
    CursorLine,
    CursorColumn,
    Diagnostic,
    SearchHighlight,
    IgnoreCase,
    List,
    Number,
    RelativeNumber,
    Spell,
    Wrap,
}

/// 由预设层自身处理的命令（映射右侧不是按键序列时）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BasicsCommand {
    Toggle(ToggleTarget),
    /// 第一阶段：记录方向并请求宿主回调 operatorfunc
    PutEmptyLine(LineDirection),
    /// 第二阶段：由宿主的 operator 机制触发
    PutEmptyLineApply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeymapRhs {
    Keys(String),
    /// 表达式映射，由宿主求值
    Expr(String),
    Command(BasicsCommand),
}

impl KeymapRhs {
    pub fn text(&self) -> &str {
        match self {
            KeymapRhs::Keys(s) | KeymapRhs::Expr(s) => s.as_str(),
            KeymapRhs::Command(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keymap {
    pub lhs: CompactString,
    pub rhs: KeymapRhs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub silent: bool,
    pub noremap: bool,
}

impl Keymap {
    pub fn new(lhs: &str, rhs: KeymapRhs) -> Self {
        Self {
            lhs: canonical_lhs(lhs),
            rhs,
            desc: None,
            silent: true,
            noremap: true,
        }
    }

    pub fn keys(lhs: &str, keys: &str) -> Self {
        Self::new(lhs, KeymapRhs::Keys(keys.to_string()))
    }

    pub fn expr(lhs: &str, expr: &str) -> Self {
        Self::new(lhs, KeymapRhs::Expr(expr.to_string()))
    }

    pub fn command(lhs: &str, command: BasicsCommand) -> Self {
        Self::new(lhs, KeymapRhs::Command(command))
    }

    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = Some(desc.to_string());
        self
    }

    pub fn loud(mut self) -> Self {
        self.silent = false;
        self
    }

    pub fn remap(mut self) -> Self {
        self.noremap = false;
        self
    }
}

/// 规范化按键记法，与宿主报告的 lhs 形式一致
///
/// - 修饰符大写：`<c-l>` → `<C-L>`
/// - 仅 Ctrl 修饰的字母大写；Alt/Meta 保留字母大小写：`<m-h>` → `<M-h>`
/// - 具名键统一写法：`<cr>` → `<CR>`，`<up>` → `<Up>`
pub fn canonical_lhs(lhs: &str) -> CompactString {
    let mut out = CompactString::default();
    let mut rest = lhs;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        match after.find('>') {
            Some(end) if end > 1 => {
                out.push_str(&canonical_special(&after[1..end]));
                rest = &after[end + 1..];
            }
            _ => {
                out.push('<');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn canonical_special(inner: &str) -> String {
    let mut modifiers: Vec<char> = Vec::new();
    let mut key = inner;

    // `<C-->`、`<M-->` 这类以 '-' 作为按键的写法
    loop {
        let mut chars = key.chars();
        let (Some(m), Some('-')) = (chars.next(), chars.next()) else {
            break;
        };
        let rest = chars.as_str();
        if rest.is_empty() {
            break;
        }
        match m.to_ascii_uppercase() {
            'C' | 'M' | 'A' | 'S' | 'D' => {
                let m = m.to_ascii_uppercase();
                modifiers.push(if m == 'A' { 'M' } else { m });
                key = rest;
            }
            _ => break,
        }
    }

    let key = canonical_key_name(key, &modifiers);
    let mut out = String::with_capacity(inner.len() + 2);
    out.push('<');
    for m in modifiers {
        out.push(m);
        out.push('-');
    }
    out.push_str(&key);
    out.push('>');
    out
}

fn canonical_key_name(key: &str, modifiers: &[char]) -> String {
    let mut chars = key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if modifiers == ['C'] && ch.is_ascii_alphabetic() {
            return ch.to_ascii_uppercase().to_string();
        }
        return ch.to_string();
    }

    const NAMES: &[&str] = &[
        "CR", "Esc", "Tab", "BS", "Del", "Space", "Up", "Down", "Left", "Right", "Home", "End",
        "PageUp", "PageDown", "Insert", "Leader", "LocalLeader", "Cmd", "Plug", "Nop", "lt",
        "Bar", "Bslash", "NL",
    ];
    if let Some(name) = NAMES.iter().find(|n| n.eq_ignore_ascii_case(key)) {
        return (*name).to_string();
    }
    if key.eq_ignore_ascii_case("return") || key.eq_ignore_ascii_case("enter") {
        return "CR".to_string();
    }
    if key.eq_ignore_ascii_case("escape") {
        return "Esc".to_string();
    }
    let lower = key.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f') {
        if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) {
            return format!("F{}", n);
        }
    }
    key.to_string()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/keymap.rs"]
mod tests;
