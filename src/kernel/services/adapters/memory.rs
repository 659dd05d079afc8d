//! 内存宿主：测试与命令行试运行使用
//!
//! 模拟编辑器的选项表、按模式的全局映射、自动命令组、
//! 缓冲区/窗口、延迟回调队列与 operator 重复机制。

use compact_str::CompactString;
use ropey::Rope;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use slotmap::SlotMap;
use std::collections::{BTreeMap, VecDeque};

use crate::kernel::basics::{Basics, BasicsError, CommandOutcome};
use crate::kernel::services::ports::{
    canonical_lhs, AutocmdCallback, AutocmdEvent, AutocmdPattern, Autocommand, BasicsCommand,
    BufferId, BufferType, DeferredCallback, EditorHost, EventArgs, GroupId, HostError,
    HostResult, HostVersion, Keymap, KeymapRhs, Mode, OptionValue, WindowId,
};

/// 宿主内置选项及其默认值
const DEFAULT_OPTIONS: &[(&str, DefaultValue)] = &[
    ("background", DefaultValue::Str("dark")),
    ("backup", DefaultValue::Bool(false)),
    ("breakindent", DefaultValue::Bool(false)),
    ("completeopt", DefaultValue::Str("menu,preview")),
    ("cursorcolumn", DefaultValue::Bool(false)),
    ("cursorline", DefaultValue::Bool(false)),
    ("fillchars", DefaultValue::Str("")),
    ("formatoptions", DefaultValue::Str("tcqj")),
    ("ignorecase", DefaultValue::Bool(false)),
    ("incsearch", DefaultValue::Bool(true)),
    ("infercase", DefaultValue::Bool(false)),
    ("linebreak", DefaultValue::Bool(false)),
    ("list", DefaultValue::Bool(false)),
    ("listchars", DefaultValue::Str("tab:> ,trail:-,nbsp:+")),
    ("mouse", DefaultValue::Str("nvi")),
    ("number", DefaultValue::Bool(false)),
    ("pumblend", DefaultValue::Int(0)),
    ("pumheight", DefaultValue::Int(0)),
    ("relativenumber", DefaultValue::Bool(false)),
    ("ruler", DefaultValue::Bool(true)),
    ("shortmess", DefaultValue::Str("ltToOCF")),
    ("showmode", DefaultValue::Bool(true)),
    ("signcolumn", DefaultValue::Str("auto")),
    ("smartcase", DefaultValue::Bool(false)),
    ("smartindent", DefaultValue::Bool(false)),
    ("spell", DefaultValue::Bool(false)),
    ("splitbelow", DefaultValue::Bool(false)),
    ("splitkeep", DefaultValue::Str("cursor")),
    ("splitright", DefaultValue::Bool(false)),
    ("termguicolors", DefaultValue::Bool(false)),
    ("undofile", DefaultValue::Bool(false)),
    ("virtualedit", DefaultValue::Str("")),
    ("winblend", DefaultValue::Int(0)),
    ("wrap", DefaultValue::Bool(true)),
    ("writebackup", DefaultValue::Bool(true)),
];

/// 较新版本才有的选项
const OPTION_SINCE: &[(&str, HostVersion)] = &[("splitkeep", HostVersion::new(0, 9, 0))];

#[derive(Clone, Copy)]
enum DefaultValue {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl From<DefaultValue> for OptionValue {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Bool(v) => OptionValue::Bool(v),
            DefaultValue::Int(v) => OptionValue::Int(v),
            DefaultValue::Str(v) => OptionValue::Str(v.to_string()),
        }
    }
}

#[derive(Debug)]
struct Buffer {
    name: String,
    kind: BufferType,
    /// 每行都以 '\n' 结尾；空缓冲区为单个空行
    text: Rope,
    diagnostics: bool,
}

#[derive(Debug)]
struct Window {
    buf: BufferId,
    cursor_line: usize,
    locals: FxHashMap<String, OptionValue>,
}

struct Group {
    name: String,
    autocmds: Vec<(AutocmdPattern, Autocommand)>,
}

pub struct MemoryHost {
    version: HostVersion,
    options: FxHashMap<String, OptionValue>,
    was_set: FxHashSet<String>,
    vars: FxHashMap<String, OptionValue>,
    filetype_plugins: bool,
    syntax: bool,
    keymaps: BTreeMap<Mode, BTreeMap<CompactString, Keymap>>,
    groups: Vec<Group>,
    deferred: VecDeque<DeferredCallback>,
    buffers: SlotMap<BufferId, Buffer>,
    windows: SlotMap<WindowId, Window>,
    current_win: WindowId,
    mode: String,
    count: usize,
    operator_func: Option<BasicsCommand>,
    last_change: Option<BasicsCommand>,
    yank_highlights: usize,
    terminal_seq: u32,
}

impl MemoryHost {
    pub fn new(version: HostVersion) -> Self {
        let mut buffers = SlotMap::with_key();
        let buf = buffers.insert(Buffer::new("", BufferType::Normal, &[]));
        let mut windows = SlotMap::with_key();
        let current_win = windows.insert(Window::new(buf));

        let options = DEFAULT_OPTIONS
            .iter()
            .filter(|(name, _)| option_since(name).map_or(true, |since| version >= since))
            .map(|&(name, value)| (name.to_string(), OptionValue::from(value)))
            .collect();

        let mut host = Self {
            version,
            options,
            was_set: FxHashSet::default(),
            vars: FxHashMap::default(),
            filetype_plugins: false,
            syntax: false,
            keymaps: BTreeMap::new(),
            groups: Vec::new(),
            deferred: VecDeque::new(),
            buffers,
            windows,
            current_win,
            mode: "n".to_string(),
            count: 0,
            operator_func: None,
            last_change: None,
            yank_highlights: 0,
            terminal_seq: 0,
        };
        host.seed_default_keymaps();
        host
    }

    fn seed_default_keymaps(&mut self) {
        let version = self.version;
        let mut seed = |mode: Mode, keymap: Keymap| {
            self.keymaps
                .entry(mode)
                .or_default()
                .insert(keymap.lhs.clone(), keymap);
        };

        seed(Mode::Normal, Keymap::keys("Y", "y$").with_desc("Yank to end of line"));
        if version.at_least(0, 6) {
            seed(
                Mode::Normal,
                Keymap::keys("<C-L>", "<Cmd>nohlsearch|diffupdate|normal! <C-L><CR>"),
            );
        }
        if version.at_least(0, 8) {
            seed(Mode::Visual, Keymap::keys("*", r#"y/\V<C-R>"<CR>"#));
            seed(Mode::Visual, Keymap::keys("#", r#"y?\V<C-R>"<CR>"#));
        }
        if version.at_least(0, 11) {
            seed(
                Mode::Insert,
                Keymap::keys("<C-S>", "<Cmd>lua vim.lsp.buf.signature_help()<CR>")
                    .with_desc("vim.lsp.buf.signature_help()"),
            );
        }
    }

    // ==================== 模拟用户配置 ====================

    /// 模拟用户配置里的 `:set`
    pub fn user_set(&mut self, name: &str, value: impl Into<OptionValue>) -> HostResult<()> {
        self.set_option(name, value.into())
    }

    /// 模拟用户配置里的全局映射
    pub fn user_map(&mut self, mode: Mode, keymap: Keymap) -> HostResult<()> {
        self.set_keymap(mode, keymap)
    }

    /// 模拟不认识该选项的宿主
    pub fn remove_option(&mut self, name: &str) {
        self.options.remove(name);
        self.was_set.remove(name);
    }

    // ==================== 缓冲区/窗口 ====================

    pub fn new_buffer(&mut self, lines: &[&str]) -> BufferId {
        self.buffers.insert(Buffer::new("", BufferType::Normal, lines))
    }

    pub fn switch_to_buffer(&mut self, buf: BufferId) -> HostResult<()> {
        if !self.buffers.contains_key(buf) {
            return Err(HostError::UnknownBuffer);
        }
        let win = self.current_window_mut();
        win.buf = buf;
        win.cursor_line = 1;
        Ok(())
    }

    /// 分割当前窗口，新窗口成为当前窗口
    pub fn split_window(&mut self) -> WindowId {
        let win = &self.windows[self.current_win];
        let split = Window {
            buf: win.buf,
            cursor_line: win.cursor_line,
            locals: win.locals.clone(),
        };
        let id = self.windows.insert(split);
        self.current_win = id;
        id
    }

    /// 模拟 `:bwipeout`；显示它的窗口保留失效的 id
    pub fn wipe_buffer(&mut self, buf: BufferId) -> bool {
        self.buffers.remove(buf).is_some()
    }

    pub fn lines(&self, buf: BufferId) -> Vec<String> {
        let Some(buffer) = self.buffers.get(buf) else {
            return Vec::new();
        };
        let count = line_count(&buffer.text);
        (0..count)
            .map(|idx| {
                let line = buffer.text.line(idx).to_string();
                line.trim_end_matches('\n').to_string()
            })
            .collect()
    }

    pub fn set_cursor_line(&mut self, line: usize) {
        let buf = self.current_window_ref().buf;
        let max = self.buffers.get(buf).map_or(1, |b| line_count(&b.text));
        self.current_window_mut().cursor_line = line.clamp(1, max.max(1));
    }

    /// 设置下一条命令的计数；0 表示无计数
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn buffer_name(&self, buf: BufferId) -> Option<&str> {
        self.buffers.get(buf).map(|b| b.name.as_str())
    }

    pub fn diagnostics_enabled(&self, buf: BufferId) -> bool {
        self.buffers.get(buf).is_some_and(|b| b.diagnostics)
    }

    pub fn filetype_plugins_enabled(&self) -> bool {
        self.filetype_plugins
    }

    pub fn yank_highlights(&self) -> usize {
        self.yank_highlights
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    // ==================== 事件模拟 ====================

    pub fn yank(&mut self) {
        let buf = self.current_buffer();
        self.fire(AutocmdEvent::TextYankPost, buf, "");
    }

    /// 在当前窗口打开终端缓冲区并触发 TermOpen
    pub fn open_terminal(&mut self) -> BufferId {
        self.terminal_seq += 1;
        let name = format!("term://~//{}:/bin/sh", 1000 + self.terminal_seq);
        let buf = self.buffers.insert(Buffer::new(&name, BufferType::Terminal, &[]));
        self.current_window_mut().buf = buf;
        self.fire(AutocmdEvent::TermOpen, buf, &name);
        buf
    }

    /// 切换模式并触发 ModeChanged（匹配串为 `old:new`）
    pub fn set_mode(&mut self, mode: &str) {
        if self.mode == mode {
            return;
        }
        let matched = format!("{}:{}", self.mode, mode);
        self.mode = mode.to_string();
        let buf = self.current_buffer();
        self.fire(AutocmdEvent::ModeChanged, buf, &matched);
    }

    /// 执行到当前为止排队的延迟回调
    pub fn run_deferred(&mut self) {
        while let Some(callback) = self.deferred.pop_front() {
            let host: &mut dyn EditorHost = &mut *self;
            callback(host);
        }
    }

    pub fn fire(&mut self, event: AutocmdEvent, buf: BufferId, matched: &str) {
        let callbacks: Vec<AutocmdCallback> = self
            .groups
            .iter()
            .flat_map(|group| group.autocmds.iter())
            .filter(|(pattern, autocmd)| autocmd.event == event && pattern.matches(matched))
            .map(|(_, autocmd)| autocmd.callback.clone())
            .collect();

        let args = EventArgs {
            event,
            buf,
            matched: matched.to_string(),
        };
        for callback in callbacks {
            let host: &mut dyn EditorHost = &mut *self;
            callback(host, &args);
        }
    }

    // ==================== 按键 ====================

    /// 模拟在 `mode` 下按下 `lhs`；命令类映射交给 `basics` 执行
    ///
    /// 返回命令的反馈文本。按键序列/表达式映射不做求值。
    pub fn press(
        &mut self,
        basics: &mut Basics,
        mode: Mode,
        lhs: &str,
    ) -> Result<Option<String>, BasicsError> {
        let Some(keymap) = self.find_keymap(mode, lhs) else {
            return Ok(None);
        };
        let KeymapRhs::Command(command) = keymap.rhs else {
            return Ok(None);
        };

        let feedback = match basics.execute(self, command)? {
            CommandOutcome::Done(feedback) => feedback,
            CommandOutcome::Operator => self.run_operator(basics)?,
        };
        self.count = 0;
        Ok(feedback)
    }

    /// 模拟 `.`：以当前计数重新调用最近一次 operatorfunc
    pub fn repeat_last_change(&mut self, basics: &mut Basics) -> Result<(), BasicsError> {
        if let Some(command) = self.last_change {
            basics.execute(self, command)?;
        }
        self.count = 0;
        Ok(())
    }

    fn run_operator(&mut self, basics: &mut Basics) -> Result<Option<String>, BasicsError> {
        let Some(command) = self.operator_func else {
            return Ok(None);
        };
        self.last_change = Some(command);
        match basics.execute(self, command)? {
            CommandOutcome::Done(feedback) => Ok(feedback),
            CommandOutcome::Operator => Ok(None),
        }
    }

    // ==================== 快照 ====================

    pub fn snapshot(&self) -> HostSnapshot {
        let win = self.current_window_ref();
        HostSnapshot {
            version: self.version.to_string(),
            options: self
                .options
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            was_set: self.was_set.iter().cloned().collect(),
            window_options: win
                .locals
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            vars: self
                .vars
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            filetype_plugins: self.filetype_plugins,
            syntax: self.syntax,
            keymaps: self
                .keymaps
                .iter()
                .map(|(mode, maps)| (mode.short_name(), maps.values().cloned().collect()))
                .collect(),
            autocommand_groups: self
                .groups
                .iter()
                .map(|group| GroupSnapshot {
                    name: group.name.clone(),
                    autocommands: group
                        .autocmds
                        .iter()
                        .map(|(_, a)| AutocmdSnapshot {
                            event: a.event,
                            pattern: a.pattern.clone(),
                            desc: a.desc.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn current_window_ref(&self) -> &Window {
        &self.windows[self.current_win]
    }

    fn current_window_mut(&mut self) -> &mut Window {
        &mut self.windows[self.current_win]
    }

    fn check_option(&self, name: &str) -> HostResult<()> {
        if let Some(since) = option_since(name) {
            if self.version < since {
                return Err(HostError::UnsupportedOption {
                    name: name.to_string(),
                    since,
                });
            }
        }
        if !self.options.contains_key(name) {
            return Err(HostError::UnknownOption(name.to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(HostVersion::default())
    }
}

impl Buffer {
    fn new(name: &str, kind: BufferType, lines: &[&str]) -> Self {
        let mut text = String::new();
        if lines.is_empty() {
            text.push('\n');
        }
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        Self {
            name: name.to_string(),
            kind,
            text: Rope::from_str(&text),
            diagnostics: true,
        }
    }
}

impl Window {
    fn new(buf: BufferId) -> Self {
        Self {
            buf,
            cursor_line: 1,
            locals: FxHashMap::default(),
        }
    }
}

fn option_since(name: &str) -> Option<HostVersion> {
    OPTION_SINCE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, since)| *since)
}

/// ropey 会把末尾 '\n' 之后算作一行
fn line_count(text: &Rope) -> usize {
    text.len_lines().saturating_sub(1).max(1)
}

impl EditorHost for MemoryHost {
    fn version(&self) -> HostVersion {
        self.version
    }

    fn get_option(&self, name: &str) -> Option<OptionValue> {
        self.options.get(name).cloned()
    }

    fn set_option(&mut self, name: &str, value: OptionValue) -> HostResult<()> {
        self.check_option(name)?;
        // 全局设置同时清掉当前窗口的局部值
        self.current_window_mut().locals.remove(name);
        self.options.insert(name.to_string(), value);
        self.was_set.insert(name.to_string());
        Ok(())
    }

    fn was_explicitly_set(&self, name: &str) -> bool {
        self.was_set.contains(name)
    }

    fn get_local_option(&self, win: WindowId, name: &str) -> Option<OptionValue> {
        self.windows
            .get(win)
            .and_then(|w| w.locals.get(name).cloned())
            .or_else(|| self.get_option(name))
    }

    fn set_local_option(
        &mut self,
        win: WindowId,
        name: &str,
        value: OptionValue,
    ) -> HostResult<()> {
        self.check_option(name)?;
        let window = self.windows.get_mut(win).ok_or(HostError::UnknownWindow)?;
        window.locals.insert(name.to_string(), value);
        Ok(())
    }

    fn get_var(&self, name: &str) -> Option<OptionValue> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: OptionValue) {
        self.vars.insert(name.to_string(), value);
    }

    fn enable_filetype_plugins(&mut self) {
        self.filetype_plugins = true;
    }

    fn syntax_enabled(&self) -> bool {
        self.syntax
    }

    fn enable_syntax(&mut self) {
        self.syntax = true;
        self.vars.insert("syntax_on".to_string(), OptionValue::Int(1));
    }

    fn get_keymaps(&self, mode: Mode) -> Vec<Keymap> {
        self.keymaps
            .get(&mode)
            .map(|maps| maps.values().cloned().collect())
            .unwrap_or_default()
    }

    fn set_keymap(&mut self, mode: Mode, mut keymap: Keymap) -> HostResult<()> {
        // 以规范记法为键，`<c-l>` 与 `<C-L>` 是同一个映射
        keymap.lhs = canonical_lhs(&keymap.lhs);
        if keymap.lhs.is_empty() {
            return Err(HostError::InvalidKeymap(String::new()));
        }
        self.keymaps
            .entry(mode)
            .or_default()
            .insert(keymap.lhs.clone(), keymap);
        Ok(())
    }

    fn create_autocommand_group(&mut self, name: &str, clear: bool) -> GroupId {
        if let Some(idx) = self.groups.iter().position(|g| g.name == name) {
            if clear {
                self.groups[idx].autocmds.clear();
            }
            return GroupId(idx as u32);
        }
        self.groups.push(Group {
            name: name.to_string(),
            autocmds: Vec::new(),
        });
        GroupId((self.groups.len() - 1) as u32)
    }

    fn register_autocommand(&mut self, group: GroupId, autocmd: Autocommand) -> HostResult<()> {
        let pattern =
            AutocmdPattern::new(&autocmd.pattern).map_err(|e| HostError::InvalidPattern {
                pattern: autocmd.pattern.clone(),
                reason: e.to_string(),
            })?;
        let Some(group) = self.groups.get_mut(group.0 as usize) else {
            return Err(HostError::InvalidPattern {
                pattern: autocmd.pattern.clone(),
                reason: format!("unknown autocommand group {}", group.0),
            });
        };
        group.autocmds.push((pattern, autocmd));
        Ok(())
    }

    fn defer_callback(&mut self, callback: DeferredCallback) {
        self.deferred.push_back(callback);
    }

    fn current_buffer(&self) -> BufferId {
        self.current_window_ref().buf
    }

    fn current_window(&self) -> WindowId {
        self.current_win
    }

    fn buffer_type(&self, buf: BufferId) -> Option<BufferType> {
        self.buffers.get(buf).map(|b| b.kind)
    }

    fn mode(&self) -> String {
        self.mode.clone()
    }

    fn cursor_line(&self) -> usize {
        self.current_window_ref().cursor_line
    }

    fn count1(&self) -> usize {
        self.count.max(1)
    }

    fn append_lines(&mut self, buf: BufferId, after_line: usize, count: usize) -> HostResult<()> {
        let buffer = self.buffers.get_mut(buf).ok_or(HostError::UnknownBuffer)?;
        let after_line = after_line.min(line_count(&buffer.text));
        let char_idx = buffer.text.line_to_char(after_line);
        buffer.text.insert(char_idx, &"\n".repeat(count));

        // 光标跟随原来的文本
        for (_, win) in self.windows.iter_mut() {
            if win.buf == buf && win.cursor_line > after_line {
                win.cursor_line += count;
            }
        }
        Ok(())
    }

    fn set_operator_func(&mut self, command: BasicsCommand) {
        self.operator_func = Some(command);
    }

    fn start_insert(&mut self) {
        let terminal = self.buffer_type(self.current_buffer()) == Some(BufferType::Terminal);
        self.set_mode(if terminal { "t" } else { "i" });
    }

    fn highlight_yank(&mut self) {
        self.yank_highlights += 1;
    }

    fn set_diagnostics_enabled(&mut self, buf: BufferId, enabled: bool) {
        if let Some(buffer) = self.buffers.get_mut(buf) {
            buffer.diagnostics = enabled;
        }
    }
}

/// 宿主状态的可序列化快照；字段有序，便于比较
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostSnapshot {
    pub version: String,
    pub options: BTreeMap<String, OptionValue>,
    pub was_set: std::collections::BTreeSet<String>,
    pub window_options: BTreeMap<String, OptionValue>,
    pub vars: BTreeMap<String, OptionValue>,
    pub filetype_plugins: bool,
    pub syntax: bool,
    pub keymaps: BTreeMap<&'static str, Vec<Keymap>>,
    pub autocommand_groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub autocommands: Vec<AutocmdSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocmdSnapshot {
    pub event: AutocmdEvent,
    pub pattern: String,
    pub desc: String,
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/memory.rs"]
mod tests;
