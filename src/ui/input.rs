//! 输入事件映射 (Input -> Action)
//!
//! 将按键与鼠标事件转换为 Action

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::actions::Action;
use super::state::App;

/// 按键对应的 Action
pub fn get_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollBottom),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('r') => Some(Action::ToggleHeader),
        KeyCode::Char('R') => Some(Action::Reload),
        _ => None,
    }
}

/// 鼠标事件对应的 Action
pub fn get_mouse_action(event: MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::ScrollDown => Some(Action::ScrollDown),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp),
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: event.column,
            row: event.row,
        }),
        _ => None,
    }
}

/// 处理终端事件，返回是否退出
pub fn handle_event(app: &mut App, event: Event) -> bool {
    let action = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => get_action(key.code),
        Event::Mouse(mouse) => get_mouse_action(mouse),
        _ => None,
    };
    action.is_some_and(|action| app.dispatch(action))
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(get_action(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(get_action(KeyCode::Down), Some(Action::ScrollDown));
        assert_eq!(get_action(KeyCode::Char(' ')), Some(Action::ToggleHeader));
        assert_eq!(get_action(KeyCode::Char('R')), Some(Action::Reload));
        assert_eq!(get_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_left_click_maps_to_position() {
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            get_mouse_action(event),
            Some(Action::Click { column: 7, row: 3 })
        );

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..event
        };
        assert_eq!(get_mouse_action(right), None);
    }
}
