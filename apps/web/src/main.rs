mod animation;
mod state;

use std::cell::RefCell;
use std::io;
use std::num::NonZeroUsize;
use std::rc::Rc;

use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders, List, ListItem, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use spinny_core::geometry::{
    screen_point, segment_at_screen_angle, segment_layout, FULL_TURN, LABEL_RADIUS_FRACTION,
    POINTER_SCREEN_ANGLE,
};
use spinny_core::palette::segment_color;
use spinny_core::{Entry, Rgb};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::animation::sparkle_points;
use crate::state::{EntriesFile, WebWheel};

const RIM_RADIUS: f64 = 0.9;
const SPOKES: usize = 360;
const MAX_LABELLED_SEGMENTS: usize = 24;

fn main() -> io::Result<()> {
    let app = Rc::new(RefCell::new(WebWheel::from_entropy()));

    spawn_local(fetch_entries(app.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let app = app.clone();
        move |event| {
            if matches!(
                event.code,
                ratzilla::event::KeyCode::Char(' ') | ratzilla::event::KeyCode::Enter
            ) {
                app.borrow_mut().spin(js_sys::Date::now());
            }
        }
    });

    terminal.draw_web(move |f| {
        let now_ms = js_sys::Date::now();
        let mut app = app.borrow_mut();
        app.tick(now_ms);

        let area = f.area();
        let block = Block::default()
            .title("Spinny Wheel")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        render_dashboard(&mut app, now_ms, f, inner);
    });

    Ok(())
}

fn render_dashboard(app: &mut WebWheel, now_ms: f64, f: &mut Frame<'_>, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(1)])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main_layout[0]);

    let rotation = app.rotation(now_ms);
    let sparkles = app
        .celebration()
        .map(|celebration| sparkle_points(app.phase, celebration.pieces, &celebration.colors))
        .unwrap_or_default();
    render_wheel_panel(
        app.entries.as_slice(),
        rotation,
        app.winner_index(),
        &sparkles,
        f,
        content[0],
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(content[1]);

    render_winner(app, f, side[0]);
    render_history(app, f, side[1]);

    let footer = TextLine::from(vec![
        Span::styled("Space/Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Spin  "),
        Span::styled(app.status.as_str(), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center),
        main_layout[1],
    );
}

fn render_wheel_panel(
    entries: &[Entry],
    rotation: f64,
    winner: Option<usize>,
    sparkles: &[(f64, f64, Rgb)],
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(format!("Wheel ({} entries)", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(count) = NonZeroUsize::new(entries.len()) else {
        let paragraph = Paragraph::new("No entries")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    };

    let height = inner.height.min(inner.width / 2);
    let square = Rect {
        x: inner.x + (inner.width - height * 2) / 2,
        y: inner.y + (inner.height - height) / 2,
        width: height * 2,
        height,
    };

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                paint_segments(ctx, entries, rotation, winner, count);
                paint_pointer(ctx);
                if !sparkles.is_empty() {
                    ctx.layer();
                    for &(x, y, color) in sparkles {
                        ctx.draw(&Points {
                            coords: &[(x, y)],
                            color: rgb(color),
                        });
                    }
                }
            })
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0]),
        square,
    );
}

fn paint_segments(
    ctx: &mut Context<'_>,
    entries: &[Entry],
    rotation: f64,
    winner: Option<usize>,
    count: NonZeroUsize,
) {
    let step = FULL_TURN / SPOKES as f64;
    for spoke in 0..SPOKES {
        let angle = (spoke as f64 + 0.5) * step;
        let index = segment_at_screen_angle(angle, rotation, count);
        let rim = if winner == Some(index) { 1.0 } else { RIM_RADIUS };
        let (x, y) = screen_point((0.0, 0.0), rim, angle);
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: 0.0,
            x2: x,
            y2: y,
            color: rgb(segment_color(index)),
        });
    }

    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: 0.08,
        color: Color::White,
    });

    if count.get() > MAX_LABELLED_SEGMENTS {
        return;
    }

    ctx.layer();
    for segment in segment_layout(count) {
        let Some(entry) = entries.get(segment.index) else {
            continue;
        };
        let (x, y) = screen_point(
            (0.0, 0.0),
            RIM_RADIUS * LABEL_RADIUS_FRACTION,
            segment.screen_mid_angle(rotation),
        );
        let fg = if segment.color.is_dark() {
            Color::White
        } else {
            Color::Black
        };
        ctx.print(
            x,
            y,
            Span::styled(
                entry.as_str().chars().take(8).collect::<String>(),
                Style::default().fg(fg).bg(rgb(segment.color)),
            ),
        );
    }
}

fn paint_pointer(ctx: &mut Context<'_>) {
    let (tip_x, tip_y) = screen_point((0.0, 0.0), RIM_RADIUS - 0.05, POINTER_SCREEN_ANGLE);
    for i in 0..=8 {
        ctx.draw(&CanvasLine {
            x1: f64::from(i).mul_add(0.01, tip_x - 0.04),
            y1: 1.0,
            x2: tip_x,
            y2: tip_y,
            color: Color::White,
        });
    }
}

fn render_winner(app: &WebWheel, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Result")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let text = if app.wheel.is_spinning() {
        Text::from(Span::styled("Spinning...", Style::default().fg(Color::Cyan)))
    } else {
        app.wheel.last_winner().map_or_else(
            || {
                Text::from(Span::styled(
                    "Press Space to spin",
                    Style::default().fg(Color::Gray),
                ))
            },
            |winner| {
                Text::from(Span::styled(
                    winner.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            },
        )
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_history(app: &WebWheel, f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .history
        .iter()
        .map(|record| {
            ListItem::new(TextLine::from(vec![
                Span::styled(
                    record.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(record.winner.to_string()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Winners")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(list, area);
}

const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

async fn fetch_entries(store: Rc<RefCell<WebWheel>>) {
    match request_entries().await {
        Ok(file) => store.borrow_mut().load_entries(file),
        Err(reason) => {
            web_sys::console::warn_1(&reason.as_str().into());
            store.borrow_mut().use_fallback("No entries.json");
        }
    }
}

async fn request_entries() -> Result<EntriesFile, String> {
    let window = web_sys::window().ok_or("No window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init("entries.json", &opts)
        .map_err(|_| "Failed to build entries.json request".to_string())?;

    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Failed to fetch entries.json".to_string())?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| "Failed to read response".to_string())?;
    if !response.ok() {
        return Err(format!("entries.json returned {}", response.status()));
    }

    let body = response
        .json()
        .map_err(|_| "Failed to read entries.json body".to_string())?;
    let json = wasm_bindgen_futures::JsFuture::from(body)
        .await
        .map_err(|_| "Failed to read entries.json body".to_string())?;

    serde_wasm_bindgen::from_value::<EntriesFile>(json)
        .map_err(|error| format!("Failed to parse entries.json: {error}"))
}
