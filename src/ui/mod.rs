//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 结构体及其状态数据
//! - View (view/): 纯函数，将 State 映射为 UI
//! - Intent (actions.rs): 用户交互转化为明确的语义化 Action
//!
//! list.rs 是虚拟列表引擎，text.rs 是换行/截断工具

pub mod actions;
pub mod input;
pub mod list;
pub mod logic;
pub mod state;
pub mod text;
pub mod view;

// Re-export for convenience
pub use actions::Action;
pub use input::handle_event;
pub use state::App;
pub use view::render;
