mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod server;
mod ui;

use app::{App, Screen};
use chrono::{Datelike, Local};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use error::{Result, SapcastError};
use logic::{format_display_date, get_season_info, score_day, ReportService};
use models::TapReport;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{DashboardScreen, ForecastScreen, SeasonScreen};

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        Some(Commands::Init) => {
            init_tracing(cli.verbose, "warn", None)?;
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => {
            init_tracing(cli.verbose, "warn", None)?;
            let config = Config::load(cli.config)?;
            run_check(&config, data_dir).await
        }
        Some(Commands::Report {
            lat,
            lon,
            json,
            refresh,
        }) => {
            init_tracing(cli.verbose, "warn", None)?;
            let config = Config::load(cli.config)?;
            let service = ReportService::new(&config, Database::open(data_dir)?);

            let report = match (lat, lon) {
                (Some(lat), Some(lon)) => service.report_for(lat, lon, refresh).await?,
                _ => service.home_report(refresh).await?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let heading = match (lat, lon) {
                    (Some(lat), Some(lon)) => format!("{:.2}, {:.2}", lat, lon),
                    _ => service.location().name.clone(),
                };
                print_report(&heading, &report);
            }
            Ok(())
        }
        Some(Commands::Season { lat, year }) => {
            init_tracing(cli.verbose, "warn", None)?;
            let year = year.unwrap_or_else(|| Local::now().year());
            let info = get_season_info(lat, year)?;
            println!("Latitude {:.2}, {}", lat, year);
            println!("  Tap by:      {}", format_display_date(info.tap_by_date));
            println!("  Season ends: {}", format_display_date(info.season_end_date));
            println!();
            println!("{}", info.message);
            Ok(())
        }
        Some(Commands::Rate { low, high }) => {
            init_tracing(cli.verbose, "warn", None)?;
            let (rating, score) = score_day(low, high);
            println!(
                "Low {:.1}°C / High {:.1}°C: {} {} (score {})",
                low,
                high,
                rating.symbol(),
                rating,
                score
            );
            Ok(())
        }
        Some(Commands::Serve { bind }) => {
            init_tracing(cli.verbose, "info", None)?;
            let config = Config::load(cli.config)?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let service = ReportService::new(&config, Database::open(data_dir)?);
            server::serve(service, &bind).await
        }
        None => {
            // The terminal belongs to the TUI, so logs go to a file
            init_tracing(cli.verbose, "warn", Some(Config::log_path(data_dir)?))?;

            let config = if cli.config.is_none() && !Config::exists(None) {
                Config::setup_interactive()?.0
            } else {
                Config::load(cli.config)?
            };
            let service = ReportService::new(&config, Database::open(data_dir)?);
            run_tui(config, service).await
        }
    }
}

fn init_tracing(verbose: u8, default_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

async fn run_check(config: &Config, data_dir: Option<&PathBuf>) -> Result<()> {
    println!(
        "Config OK: {} ({:.4}, {:.4})",
        config.location.name, config.location.latitude, config.location.longitude
    );

    let db = Database::open(data_dir)?;
    println!("Database: {}", db.path().display());

    let service = ReportService::new(config, db);
    let status = service.check_connections().await;

    println!(
        "  SQLite cache:   {}",
        if status.database { "OK" } else { "FAILED" }
    );
    let owm = if !status.openweathermap_configured {
        "NOT CONFIGURED (set openweathermap.api_key or OPENWEATHERMAP_API_KEY)"
    } else if status.openweathermap {
        "OK"
    } else {
        "FAILED"
    };
    println!("  OpenWeatherMap: {}", owm);

    if status.all_connected() {
        Ok(())
    } else {
        Err(SapcastError::DataSourceUnavailable(
            "one or more checks failed".into(),
        ))
    }
}

fn print_report(heading: &str, report: &TapReport) {
    println!("{}", heading);
    if let Some(ref current) = report.current {
        println!("Now: {:.1}°C, {}", current.temp_c, current.summary);
    }
    println!();
    println!(
        "[{}] {}",
        report.recommendation.kind.title(),
        report.recommendation.message
    );

    match report.best_window {
        Some(ref w) => println!(
            "Best window: {} to {} ({} days, avg score {:.1})",
            format_display_date(w.start_date),
            format_display_date(w.end_date),
            w.days,
            w.avg_score
        ),
        None => println!("Best window: none"),
    }

    println!();
    for day in &report.days {
        let temp = |t: Option<f64>| {
            t.map(|v| format!("{:>5.1}", v))
                .unwrap_or_else(|| "    -".into())
        };
        println!(
            "  {:<12} {} / {} °C  {:<4} {:<10} {}",
            format_display_date(day.date),
            temp(day.low_c),
            temp(day.high_c),
            day.rating.symbol(),
            day.rating.as_str(),
            day.summary
        );
    }

    println!();
    println!("{}", report.season.message);
}

async fn run_tui(config: Config, service: ReportService) -> Result<()> {
    let mut app = App::new(config);

    match service.home_report(false).await {
        Ok(report) => {
            app.update_report(report);
            app.set_status("Forecast loaded");
        }
        Err(e) => {
            tracing::warn!("Initial forecast load failed: {}", e);
            app.set_status(&format!("Forecast load failed: {}", e));
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &ReportService,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen =
                        DashboardScreen::new(&app.config.location.name, app.report.as_ref())
                            .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Forecast => {
                    let screen = ForecastScreen::new(app.report.as_ref())
                        .with_selection(app.forecast_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Season => {
                    let screen =
                        SeasonScreen::new(app.config.location.latitude, app.season_state.year);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Poll with a timeout so refreshes run between key presses
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                    KeyCode::Char('r') => app.request_refresh(),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        }
                    }
                    code => handle_screen_input(app, code),
                }
            }
        }

        if app.needs_refresh {
            app.needs_refresh = false;
            match service.home_report(true).await {
                Ok(report) => {
                    app.update_report(report);
                    app.set_status("Forecast refreshed");
                }
                Err(e) => {
                    tracing::warn!("Forecast refresh failed: {}", e);
                    app.set_status(&format!("Refresh failed: {}", e));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input(app: &mut App, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => {}
        Screen::Forecast => {
            let count = app.day_count();
            match code {
                KeyCode::Up => app.forecast_state.prev(),
                KeyCode::Down => app.forecast_state.next(count),
                _ => {}
            }
        }
        Screen::Season => match code {
            KeyCode::Left => app.season_state.prev_year(),
            KeyCode::Right => app.season_state.next_year(),
            _ => {}
        },
    }
}
