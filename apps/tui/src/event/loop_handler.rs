use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::ui;

/// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// What a headless run prints, either as text or as JSON.
#[derive(Debug, Serialize, PartialEq)]
pub struct HeadlessSpin {
    pub winner: String,
    pub index: usize,
    pub entries: usize,
    pub spin_angle: f64,
    pub rotation: f64,
    pub spun_at: String,
}

/// Run one spin without a UI and print the result.
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    let request_time = chrono::Local::now();
    let from_rotation = app.wheel.cumulative_rotation();
    app.spin();
    if !app.wheel.is_spinning() {
        return Err(eyre!("There are no entries to spin"));
    }

    let duration = app.wheel.options().spin_duration;
    tracing::info!(ms = duration.as_millis() as u64, "waiting for the wheel to stop");
    while app.wheel.is_spinning() {
        let remaining = app
            .wheel
            .progress(app.session_time())
            .map_or(Duration::ZERO, |progress| duration.mul_f64(1.0 - progress));
        tokio::time::sleep(remaining.max(Duration::from_millis(1))).await;
        app.update();
    }

    let result = build_headless_spin(app, from_rotation, request_time)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Winner: {}", result.winner);
        println!("Segment {} of {}", result.index + 1, result.entries);
        println!("Rotation: {:.1}°", result.rotation);
    }
    Ok(())
}

fn build_headless_spin(
    app: &App,
    from_rotation: f64,
    spun_at: chrono::DateTime<chrono::Local>,
) -> Result<HeadlessSpin> {
    let record = app
        .history
        .latest()
        .ok_or_else(|| eyre!("The wheel stopped without a winner"))?;
    let rotation = app.wheel.cumulative_rotation();
    Ok(HeadlessSpin {
        winner: record.winner.to_string(),
        index: record.index,
        entries: app.entries.len(),
        spin_angle: rotation - from_rotation,
        rotation,
        spun_at: spun_at.to_rfc3339(),
    })
}

/// Run the main application event loop
pub fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Update animations and reveal finished spins
        app.update();

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        tracing::warn!("redraw after resize failed: {e}");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("failed to read terminal event: {e}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spinny_core::entries::parse_entries;

    fn quick_app(entries: &str) -> App {
        let config = AppConfig {
            initial_entries: parse_entries(entries),
            spin_duration: Duration::from_millis(5),
            ..AppConfig::default()
        };
        App::with_rng(config, StdRng::seed_from_u64(99))
    }

    #[tokio::test]
    async fn headless_spin_records_a_winner() {
        let mut app = quick_app("Red\nBlack");
        run_headless(&mut app, true).await.unwrap();
        assert!(!app.wheel.is_spinning());
        assert_eq!(app.history.len(), 1);

        let result = build_headless_spin(&app, 0.0, chrono::Local::now()).unwrap();
        assert!(["Red", "Black"].contains(&result.winner.as_str()));
        assert_eq!(result.entries, 2);
        assert!(result.spin_angle >= 1800.0 && result.spin_angle < 2160.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["entries"], 2);
    }

    #[tokio::test]
    async fn headless_spin_without_entries_fails() {
        let mut app = quick_app("");
        assert!(run_headless(&mut app, false).await.is_err());
    }
}
