use crate::ui::effects::to_color;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points};
use ratatui::Frame;
use spinny_core::geometry::{
    screen_point, segment_at_screen_angle, segment_layout, FULL_TURN, LABEL_RADIUS_FRACTION,
    POINTER_SCREEN_ANGLE,
};
use spinny_core::palette::segment_color;
use spinny_core::{Entry, Rgb};
use std::num::NonZeroUsize;

const RIM_RADIUS: f64 = 0.9;
const HUB_RADIUS: f64 = 0.08;
const SPOKES: usize = 720;
/// Above this many entries labels would overlap, so only colors are drawn.
pub const MAX_LABELLED_SEGMENTS: usize = 24;
const MAX_LABEL_CHARS: usize = 8;

/// Everything needed to paint one frame of the wheel.
#[derive(Debug, Clone, Copy)]
pub struct WheelView<'a> {
    pub entries: &'a [Entry],
    pub rotation: f64,
    /// Segment to outline once the wheel has stopped.
    pub winner: Option<usize>,
    pub confetti: &'a [(f64, f64, Rgb)],
}

/// Largest rect inside `area` whose cells cover a square canvas.
///
/// Terminal cells are roughly twice as tall as they are wide.
pub fn wheel_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Screen angle of every spoke together with the segment it is painted in.
pub fn spokes(rotation: f64, count: NonZeroUsize) -> impl Iterator<Item = (f64, usize)> {
    let step = FULL_TURN / SPOKES as f64;
    (0..SPOKES).map(move |spoke| {
        let angle = (spoke as f64 + 0.5) * step;
        (angle, segment_at_screen_angle(angle, rotation, count))
    })
}

pub fn render_wheel(f: &mut Frame<'_>, area: Rect, view: &WheelView<'_>) {
    let square = wheel_rect(area);
    if square.width < 4 || square.height < 2 {
        return;
    }

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            match NonZeroUsize::new(view.entries.len()) {
                Some(count) => paint_segments(ctx, view, count),
                None => paint_empty(ctx),
            }
            paint_pointer(ctx);
            paint_confetti(ctx, view.confetti);
        });

    f.render_widget(canvas, square);
}

fn paint_segments(ctx: &mut Context<'_>, view: &WheelView<'_>, count: NonZeroUsize) {
    let step = FULL_TURN / SPOKES as f64;
    for (angle, index) in spokes(view.rotation, count) {
        let (x, y) = screen_point((0.0, 0.0), RIM_RADIUS, angle);
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: 0.0,
            x2: x,
            y2: y,
            color: to_color(segment_color(index)),
        });

        if view.winner == Some(index) {
            let (inner_x, inner_y) = screen_point((0.0, 0.0), RIM_RADIUS, angle - step / 2.0);
            let (outer_x, outer_y) = screen_point((0.0, 0.0), 1.0, angle - step / 2.0);
            ctx.draw(&CanvasLine {
                x1: inner_x,
                y1: inner_y,
                x2: outer_x,
                y2: outer_y,
                color: Color::White,
            });
        }
    }

    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: HUB_RADIUS,
        color: Color::White,
    });

    if count.get() > MAX_LABELLED_SEGMENTS {
        return;
    }

    ctx.layer();
    for segment in segment_layout(count) {
        let Some(entry) = view.entries.get(segment.index) else {
            continue;
        };
        let (x, y) = screen_point(
            (0.0, 0.0),
            RIM_RADIUS * LABEL_RADIUS_FRACTION,
            segment.screen_mid_angle(view.rotation),
        );
        let text_color = if segment.color.is_dark() {
            Color::White
        } else {
            Color::Black
        };
        ctx.print(
            x,
            y,
            Span::styled(
                truncate_label(entry.as_str()),
                Style::default()
                    .fg(text_color)
                    .bg(to_color(segment.color))
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }
}

fn paint_empty(ctx: &mut Context<'_>) {
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: RIM_RADIUS,
        color: Color::DarkGray,
    });
    ctx.print(
        -0.25,
        0.0,
        Span::styled("No entries", Style::default().fg(Color::Gray)),
    );
}

/// Fixed marker at the top of the wheel, tip pointing at the rim.
fn paint_pointer(ctx: &mut Context<'_>) {
    let (tip_x, tip_y) = screen_point((0.0, 0.0), RIM_RADIUS - 0.05, POINTER_SCREEN_ANGLE);
    for i in 0..=8 {
        let offset = f64::from(i).mul_add(0.01, -0.04);
        ctx.draw(&CanvasLine {
            x1: tip_x + offset,
            y1: 1.0,
            x2: tip_x,
            y2: tip_y,
            color: Color::White,
        });
    }
}

fn paint_confetti(ctx: &mut Context<'_>, confetti: &[(f64, f64, Rgb)]) {
    if confetti.is_empty() {
        return;
    }
    ctx.layer();
    let mut colors: Vec<Rgb> = confetti.iter().map(|&(_, _, color)| color).collect();
    colors.sort_by_key(|color| color.hex());
    colors.dedup();
    for color in colors {
        let coords: Vec<(f64, f64)> = confetti
            .iter()
            .filter(|&&(_, _, piece)| piece == color)
            .map(|&(x, y, _)| (x, y))
            .collect();
        ctx.draw(&Points {
            coords: &coords,
            color: to_color(color),
        });
    }
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use spinny_core::entries::{number_range, parse_entries};
    use spinny_core::geometry::segment_under_pointer;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn spokes_next_to_pointer_show_resolved_segment() {
        for n in 1..=60 {
            for rotation in [0.0, 1800.0, 1937.5, 3605.0] {
                let expected = segment_under_pointer(rotation, count(n));
                let (_, first) = spokes(rotation, count(n)).next().unwrap();
                let (_, last) = spokes(rotation, count(n)).last().unwrap();
                // The pointer sits between the last and first spoke
                assert!(first == expected || last == expected, "n={n} rotation={rotation}");
            }
        }
    }

    #[test]
    fn every_segment_gets_spokes() {
        let n = count(100);
        let mut seen = vec![false; 100];
        for (_, index) in spokes(123.0, n) {
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn wheel_rect_is_twice_as_wide_as_tall() {
        let rect = wheel_rect(Rect::new(0, 0, 100, 30));
        assert_eq!((rect.width, rect.height), (60, 30));
        assert_eq!(rect.x, 20);
        let narrow = wheel_rect(Rect::new(0, 0, 20, 30));
        assert_eq!((narrow.width, narrow.height), (20, 10));
        assert_eq!(narrow.y, 10);
    }

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(truncate_label("Bob"), "Bob");
        assert_eq!(truncate_label("Bartholomew"), "Barthol…");
    }

    #[test]
    fn renders_small_and_large_wheels() {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let entries = parse_entries("Alice\nBob\nCarol");
        let confetti = [(0.0, 0.5, Rgb(255, 0, 0)), (0.2, 0.1, Rgb(0, 255, 0))];
        terminal
            .draw(|f| {
                render_wheel(
                    f,
                    f.area(),
                    &WheelView {
                        entries: &entries,
                        rotation: 1900.0,
                        winner: Some(2),
                        confetti: &confetti,
                    },
                );
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("Alice"));

        let many = number_range(0, 99);
        terminal
            .draw(|f| {
                render_wheel(
                    f,
                    f.area(),
                    &WheelView {
                        entries: &many,
                        rotation: 0.0,
                        winner: None,
                        confetti: &[],
                    },
                );
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(!screen.contains("42"));
    }

    #[test]
    fn empty_wheel_says_so() {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|f| {
                render_wheel(
                    f,
                    f.area(),
                    &WheelView {
                        entries: &[],
                        rotation: 0.0,
                        winner: None,
                        confetti: &[],
                    },
                );
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("No entries"));
    }
}
