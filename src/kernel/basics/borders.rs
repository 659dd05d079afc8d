//! 窗口分隔线字形表

use crate::kernel::services::ports::WinBorders;

/// 追加到 `fillchars` 的字形赋值；`Default` 不做修改
pub fn fillchars(style: WinBorders) -> Option<&'static str> {
    match style {
        WinBorders::Default => None,
        WinBorders::Bold => Some("vert:┃,horiz:━,horizdown:┳,horizup:┻,verthoriz:╋,vertleft:┫,vertright:┣"),
        WinBorders::Dot => Some("vert:·,horiz:·,horizdown:·,horizup:·,verthoriz:·,vertleft:·,vertright:·"),
        WinBorders::Double => Some("vert:║,horiz:═,horizdown:╦,horizup:╩,verthoriz:╬,vertleft:╣,vertright:╠"),
        WinBorders::Single => Some("vert:│,horiz:─,horizdown:┬,horizup:┴,verthoriz:┼,vertleft:┤,vertright:├"),
        WinBorders::Solid => Some("vert: ,horiz: ,horizdown: ,horizup: ,verthoriz: ,vertleft: ,vertright: "),
    }
}
