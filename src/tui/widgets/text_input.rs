use ratatui::prelude::*;

use crate::tui::dialogs::TextInput;

/// Render a text field as a line, with a block cursor when focused.
pub fn input_line<'a>(input: &'a TextInput, focused: bool) -> Line<'a> {
    if !focused {
        return Line::from(Span::raw(input.value.as_str()));
    }

    let (before, at, after) = input.split_at_cursor();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().bg(Color::White).fg(Color::Black)),
        Span::raw(after),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_line_has_cursor_span() {
        let mut input = TextInput::new("cat");
        input.move_cursor_left();
        let line = input_line(&input, true);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, ["ca", "t", ""]);
    }

    #[test]
    fn unfocused_line_is_plain() {
        let input = TextInput::new("cat");
        assert_eq!(input_line(&input, false).spans.len(), 1);
    }
}
