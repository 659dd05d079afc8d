//! 可重复（`.`）的空行插入
//!
//! 两阶段流程：
//! 1. `arm`：记录方向，把自身注册为宿主的 operatorfunc，
//!    返回后由宿主以当前行为目标再次调用
//! 2. `apply`：读取记录的方向，在光标行上方/下方插入 count 个空行
//!
//! 前置条件：两个阶段都在宿主的单线程事件循环中串行执行，
//! 第二阶段总是在下一次 `arm` 之前完成，因此单个状态槽足够。

use crate::kernel::services::ports::{BasicsCommand, EditorHost, HostResult, LineDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyLineState {
    #[default]
    Idle,
    Armed(LineDirection),
}

#[derive(Debug, Default)]
pub struct EmptyLineOperator {
    state: EmptyLineState,
    /// 最近一次完成的方向，供 `.` 重复时使用
    last: Option<LineDirection>,
}

impl EmptyLineOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EmptyLineState {
        self.state
    }

    pub fn arm(&mut self, host: &mut dyn EditorHost, direction: LineDirection) {
        self.state = EmptyLineState::Armed(direction);
        host.set_operator_func(BasicsCommand::PutEmptyLineApply);
    }

    /// 返回是否插入了空行；从未 arm 过时什么都不做
    ///
    /// 插入失败时状态回到 `Idle`，且不记为可重复的方向。
    pub fn apply(&mut self, host: &mut dyn EditorHost) -> HostResult<bool> {
        let direction = match std::mem::take(&mut self.state) {
            EmptyLineState::Armed(direction) => direction,
            EmptyLineState::Idle => match self.last {
                Some(direction) => direction,
                None => return Ok(false),
            },
        };
        let line = host.cursor_line();
        let after = match direction {
            LineDirection::Above => line.saturating_sub(1),
            LineDirection::Below => line,
        };
        let count = host.count1().max(1);
        let buf = host.current_buffer();
        host.append_lines(buf, after, count)?;
        self.last = Some(direction);
        Ok(true)
    }
}
