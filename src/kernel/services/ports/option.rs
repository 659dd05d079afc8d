//! 选项值与逗号列表/标志位追加

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            OptionValue::Int(v) => Some(*v != 0),
            OptionValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

/// 标志位选项（如 `shortmess`）追加：只补充缺失的字符
pub fn append_flags(current: &str, flags: &str) -> String {
    let mut out = current.to_string();
    for ch in flags.chars() {
        if !out.contains(ch) {
            out.push(ch);
        }
    }
    out
}

/// `key:value` 逗号列表（如 `fillchars`）追加
///
/// 同名 key 原位替换，其余条目保持顺序不变。
pub fn append_map_entries(current: &str, entries: &str) -> String {
    let mut items: Vec<(String, String)> = split_entries(current);

    for (key, value) in split_entries(entries) {
        match items.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => items.push((key, value)),
        }
    }

    items
        .into_iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

/// 解析 `key:value` 列表；值本身可以是空格，不做 trim
pub fn split_entries(value: &str) -> Vec<(String, String)> {
    value
        .split(',')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(':') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (item.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/option.rs"]
mod tests;
