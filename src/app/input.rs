use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::app::model::{InputMode, Model};
use crate::nav::Key;

/// Map a terminal event to a message.
pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.mode == InputMode::Search {
        return handle_search_key(key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Some(Message::Quit),
        KeyCode::Char('q') => return Some(Message::Quit),
        _ => {}
    }
    if model.document.is_empty() {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(Message::ClearOutput),
        KeyCode::Char('/') => Some(Message::StartSearch),
        KeyCode::Char('e') if ctrl => Some(Message::ExecuteCode),
        KeyCode::Char('n') if ctrl => Some(Message::SearchNext),
        KeyCode::Char('N') => Some(Message::SearchPrev),
        KeyCode::Char('y') if !ctrl => Some(Message::YankCode),
        _ => Some(Message::Navigate(nav_key(key))),
    }
}

fn handle_search_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Enter => Some(Message::SearchSubmit),
        KeyCode::Esc => Some(Message::SearchCancel),
        KeyCode::Backspace => Some(Message::SearchBackspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::SearchInput(ch))
        }
        _ => None,
    }
}

/// Decode a key press into the navigation alphabet.
fn nav_key(key: KeyEvent) -> Key {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Key::Other;
    }
    let name = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        _ => return Key::Other,
    };
    Key::from_name(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::render::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn model() -> Model {
        Model::new(Document::parse("# A\n---\n# B"), Theme::Dark, (80, 24))
    }

    #[test]
    fn test_navigation_keys() {
        let model = model();
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), &model),
            Some(Message::Navigate(Key::Forward))
        );
        assert_eq!(
            handle_key(key(KeyCode::PageUp), &model),
            Some(Message::Navigate(Key::Backward))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('G')), &model),
            Some(Message::Navigate(Key::Last))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('7')), &model),
            Some(Message::Navigate(Key::Digit(7)))
        );
        assert_eq!(
            handle_key(key(KeyCode::Tab), &model),
            Some(Message::Navigate(Key::Other))
        );
    }

    #[test]
    fn test_command_keys() {
        let model = model();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));
        assert_eq!(handle_key(ctrl('c'), &model), Some(Message::Quit));
        assert_eq!(handle_key(key(KeyCode::Esc), &model), Some(Message::ClearOutput));
        assert_eq!(handle_key(key(KeyCode::Char('/')), &model), Some(Message::StartSearch));
        assert_eq!(handle_key(ctrl('e'), &model), Some(Message::ExecuteCode));
        assert_eq!(handle_key(ctrl('n'), &model), Some(Message::SearchNext));
        assert_eq!(handle_key(key(KeyCode::Char('N')), &model), Some(Message::SearchPrev));
        assert_eq!(handle_key(key(KeyCode::Char('y')), &model), Some(Message::YankCode));
    }

    #[test]
    fn test_plain_n_is_forward_not_search() {
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &model()),
            Some(Message::Navigate(Key::Forward))
        );
    }

    #[test]
    fn test_search_mode_keys() {
        let mut model = model();
        model.mode = InputMode::Search;
        assert_eq!(handle_key(key(KeyCode::Char('q')), &model), Some(Message::SearchInput('q')));
        assert_eq!(handle_key(key(KeyCode::Char(' ')), &model), Some(Message::SearchInput(' ')));
        assert_eq!(handle_key(key(KeyCode::Enter), &model), Some(Message::SearchSubmit));
        assert_eq!(handle_key(key(KeyCode::Esc), &model), Some(Message::SearchCancel));
        assert_eq!(handle_key(key(KeyCode::Backspace), &model), Some(Message::SearchBackspace));
        assert_eq!(handle_key(key(KeyCode::Up), &model), None);
    }

    #[test]
    fn test_empty_deck_only_quits() {
        let model = Model::new(Document::empty(), Theme::Dark, (80, 24));
        assert_eq!(handle_key(key(KeyCode::Char(' ')), &model), None);
        assert_eq!(handle_key(key(KeyCode::Char('/')), &model), None);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_event(&Event::Key(release), &model()), None);
        assert_eq!(
            handle_event(&Event::Resize(100, 40), &model()),
            Some(Message::Resize(100, 40))
        );
    }
}
