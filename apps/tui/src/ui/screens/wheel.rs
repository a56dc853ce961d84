use crate::app::App;
use crate::ui::screens::{key_hint, render_status_section};
use crate::ui::widgets::history::render_history;
use crate::ui::widgets::wheel::{render_wheel, WheelView};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_EIGHT};

pub fn render_wheel_screen(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(8),    // Wheel and side panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title(f, layout[0]);
    render_content(app, f, layout[1]);
    render_status_section(app, f, layout[2]);

    let shortcuts = TextLine::from(
        [
            key_hint("Space", ": Spin   "),
            key_hint("e", ": Entries   "),
            key_hint("F1", ": Help   "),
            key_hint("q", ": Quit"),
        ]
        .concat(),
    );
    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        layout[3],
    );
}

fn render_title(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Spinny ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Wheel",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_content(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(area);

    let now = app.session_time();
    let confetti = app
        .confetti
        .as_ref()
        .map(|burst| burst.positions(now))
        .unwrap_or_default();

    render_wheel(
        f,
        columns[0],
        &WheelView {
            entries: app.entries.as_slice(),
            rotation: app.wheel.displayed_rotation(now),
            winner: app.highlighted_segment(),
            confetti: &confetti,
        },
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(columns[1]);

    render_winner_banner(app, f, side[0]);
    render_history(f, side[1], &app.history);
}

fn render_winner_banner(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Result ")
        .title_style(Style::default().fg(Color::Magenta))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.wheel.is_spinning() {
        let throbber = Throbber::default()
            .label("Spinning...")
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .throbber_set(BRAILLE_EIGHT)
            .use_type(WhichUse::Spin);
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, inner.inner(Margin::new(1, 1)), &mut state);
        return;
    }

    let text = app.wheel.last_winner().map_or_else(
        || {
            Text::from(Span::styled(
                "Press Space to spin",
                Style::default().fg(Color::Gray),
            ))
        },
        |winner| {
            Text::from(vec![
                TextLine::from(Span::styled("Winner", Style::default().fg(Color::Gray))),
                TextLine::from(Span::styled(
                    winner.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ])
        },
    );
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );

    if let Ok(mut effect) = app.completion_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, inner, app.last_tick);
        }
    }
}
