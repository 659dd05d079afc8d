//! 预设配置：默认值 + 用户覆盖（深度合并）+ 类型校验

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicsConfig {
    pub options: OptionsConfig,
    pub mappings: MappingsConfig,
    pub autocommands: AutocommandsConfig,
    /// 关闭切换类命令的非错误反馈
    pub silent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsConfig {
    pub basic: bool,
    pub extra_ui: bool,
    pub win_borders: WinBorders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingsConfig {
    pub basic: bool,
    /// 空字符串表示不生成切换快捷键
    pub option_toggle_prefix: String,
    pub windows: bool,
    pub move_with_alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocommandsConfig {
    pub basic: bool,
    pub relnum_in_visual_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinBorders {
    Default,
    Bold,
    Dot,
    Double,
    Single,
    Solid,
}

impl WinBorders {
    pub const ALL: [WinBorders; 6] = [
        WinBorders::Default,
        WinBorders::Bold,
        WinBorders::Dot,
        WinBorders::Double,
        WinBorders::Single,
        WinBorders::Solid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WinBorders::Default => "default",
            WinBorders::Bold => "bold",
            WinBorders::Dot => "dot",
            WinBorders::Double => "double",
            WinBorders::Single => "single",
            WinBorders::Solid => "solid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.name() == value)
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            basic: true,
            extra_ui: false,
            win_borders: WinBorders::Default,
        }
    }
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            basic: true,
            option_toggle_prefix: "\\".to_string(),
            windows: false,
            move_with_alt: false,
        }
    }
}

impl Default for AutocommandsConfig {
    fn default() -> Self {
        Self {
            basic: true,
            relnum_in_visual_mode: false,
        }
    }
}

impl Default for BasicsConfig {
    fn default() -> Self {
        Self {
            options: OptionsConfig::default(),
            mappings: MappingsConfig::default(),
            autocommands: AutocommandsConfig::default(),
            silent: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    WrongType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    UnknownBorderStyle(String),
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WrongType {
                field,
                expected,
                actual,
            } => write!(f, "`{}` should be {}, not {}", field, expected, actual),
            ConfigError::UnknownBorderStyle(style) => write!(
                f,
                "`options.win_borders` should be one of default, bold, dot, double, single, solid; got {:?}",
                style
            ),
            ConfigError::Malformed(msg) => write!(f, "malformed config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Copy)]
enum Expected {
    Object,
    Bool,
    String,
}

impl Expected {
    fn name(self) -> &'static str {
        match self {
            Expected::Object => "table",
            Expected::Bool => "boolean",
            Expected::String => "string",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Expected::Object => value.is_object(),
            Expected::Bool => value.is_boolean(),
            Expected::String => value.is_string(),
        }
    }
}

const FIELDS: &[(&str, Expected)] = &[
    ("options", Expected::Object),
    ("mappings", Expected::Object),
    ("autocommands", Expected::Object),
    ("options.basic", Expected::Bool),
    ("options.extra_ui", Expected::Bool),
    ("options.win_borders", Expected::String),
    ("mappings.basic", Expected::Bool),
    ("mappings.option_toggle_prefix", Expected::String),
    ("mappings.windows", Expected::Bool),
    ("mappings.move_with_alt", Expected::Bool),
    ("autocommands.basic", Expected::Bool),
    ("autocommands.relnum_in_visual_mode", Expected::Bool),
    ("silent", Expected::Bool),
];

impl BasicsConfig {
    /// 将用户覆盖合并到默认值之上并校验；任何宿主调用之前执行
    pub fn from_overrides(overrides: Option<&Value>) -> Result<Self, ConfigError> {
        let mut merged = serde_json::to_value(Self::default())
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;

        if let Some(overrides) = overrides {
            match overrides {
                Value::Null => {}
                Value::Object(_) => deep_merge(&mut merged, overrides),
                other => {
                    return Err(ConfigError::WrongType {
                        field: "config",
                        expected: "table",
                        actual: json_type_name(other),
                    })
                }
            }
        }

        validate(&merged)?;
        serde_json::from_value(merged).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}

/// 对象递归合并，其余类型直接替换
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                // null 视为未指定，保留默认值
                if value.is_null() {
                    continue;
                }
                let nested = value.is_object() && base.get(key).is_some_and(Value::is_object);
                if nested {
                    if let Some(slot) = base.get_mut(key) {
                        deep_merge(slot, value);
                    }
                } else {
                    base.insert(key.clone(), value.clone());
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

fn validate(config: &Value) -> Result<(), ConfigError> {
    for &(field, expected) in FIELDS {
        let value = lookup(config, field).unwrap_or(&Value::Null);
        if !expected.accepts(value) {
            return Err(ConfigError::WrongType {
                field,
                expected: expected.name(),
                actual: json_type_name(value),
            });
        }
    }

    if let Some(style) = lookup(config, "options.win_borders").and_then(Value::as_str) {
        if WinBorders::parse(style).is_none() {
            return Err(ConfigError::UnknownBorderStyle(style.to_string()));
        }
    }

    Ok(())
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
