use clap::Parser;
use color_eyre::Result;
use spinny_wheel::app::App;
use spinny_wheel::cli::CliArgs;
use spinny_wheel::config::init_app_config;
use spinny_wheel::logging::init_logging;
use spinny_wheel::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let headless = args.headless || !is_terminal();
    let config = init_app_config()?;
    init_logging(&config, headless)?;

    // Initialize application state
    let mut app = App::new(config);

    if headless {
        return event::run_headless(&mut app, args.json).await;
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app);

    // Restore terminal
    terminal::cleanup(true, true);

    if let Some(winner) = app.history.latest() {
        tracing::info!(winner = %winner.winner, spins = app.history.len(), "session ended");
    }

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
