use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;
use spinny_core::WinnerHistory;

pub fn render_history(f: &mut Frame<'_>, area: Rect, history: &WinnerHistory) {
    let block = Block::default()
        .title(" Winners ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let items: Vec<ListItem<'_>> = if history.is_empty() {
        vec![ListItem::new(Span::styled(
            "No spins yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        history
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let style = if i == 0 {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(TextLine::from(vec![
                    Span::styled(
                        record.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(record.winner.to_string(), style),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(block), area);
}
