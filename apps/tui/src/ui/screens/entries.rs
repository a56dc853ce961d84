use crate::app::{App, InputState};
use crate::ui::effects::to_color;
use crate::ui::screens::{key_hint, render_status_section};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use spinny_core::palette::segment_color;

pub fn render_entries_screen(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Entry table
            Constraint::Length(3), // Prompt
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_entry_table(app, f, layout[0]);
    render_prompt(app, f, layout[1]);
    render_status_section(app, f, layout[2]);

    let shortcuts = if app.input_state.is_text_entry() {
        TextLine::from(
            [key_hint("Enter", ": Confirm   "), key_hint("Esc", ": Cancel")].concat(),
        )
    } else {
        TextLine::from(
            [
                key_hint("a", ": Add   "),
                key_hint("b", ": Bulk   "),
                key_hint("Enter", ": Edit   "),
                key_hint("d", ": Delete   "),
                key_hint("c", ": Clear   "),
                key_hint("g", ": Range   "),
                key_hint("r", ": Roulette   "),
                key_hint("Esc", ": Wheel"),
            ]
            .concat(),
        )
    };
    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        layout[3],
    );
}

/// First row to draw so `selected` stays inside a window of `visible` rows.
pub const fn scroll_offset(total_rows: usize, visible: usize, selected: usize) -> usize {
    if total_rows <= visible || visible == 0 {
        return 0;
    }
    if selected >= visible {
        return selected + 1 - visible;
    }
    0
}

fn render_entry_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let policy = app.entries.policy();
    let title = format!(
        " Entries ({} of max {}) ",
        app.entries.len(),
        policy.max_entries
    );
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.entries.is_empty() {
        let paragraph = Paragraph::new("No entries. Press 'a' to add one or 'r' for roulette numbers.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![Cell::from("#"), Cell::from(" "), Cell::from("Entry")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let visible = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.entries.len(), visible, app.selected_entry_index);

    let rows = app
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, entry)| {
            let style = if i == app.selected_entry_index {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(Span::styled(
                    "██",
                    Style::default().fg(to_color(segment_color(i))),
                )),
                Cell::from(entry.to_string()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

const fn prompt_label(state: InputState) -> &'static str {
    match state {
        InputState::Browsing => "Select an entry or press a key below",
        InputState::AddingEntry => "New entry:",
        InputState::AddingBulk => "Entries separated by ';':",
        InputState::EditingEntry(_) => "Edit entry:",
        InputState::EnteringRange => "Number range (min-max):",
    }
}

fn render_prompt(app: &App, f: &mut Frame<'_>, area: Rect) {
    let active = app.input_state.is_text_entry();
    let border = if active { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" {} ", prompt_label(app.input_state)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let line = if active {
        TextLine::from(vec![
            Span::raw(app.current_input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        TextLine::from("")
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(10, 20, 9), 0);
        assert_eq!(scroll_offset(100, 10, 3), 0);
        assert_eq!(scroll_offset(100, 10, 10), 1);
        assert_eq!(scroll_offset(100, 10, 99), 90);
        assert_eq!(scroll_offset(100, 0, 5), 0);
    }
}
