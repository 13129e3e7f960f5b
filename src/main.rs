//! Demo binary.
//!
//! Usage:
//!   painter3d [--config <file.json>] [--headless <out.png>] [--width N] [--height N]
//!
//! Without `--headless` a window opens and the scene runs interactively.
//! With it, a single frame of the default scene is written to the PNG and
//! the program exits.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use painter3d::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    headless: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                cli.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--headless" if i + 1 < args.len() => {
                cli.headless = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--width" if i + 1 < args.len() => {
                cli.width = Some(args[i + 1].parse().context("--width expects a number")?);
                i += 2;
            }
            "--height" if i + 1 < args.len() => {
                cli.height = Some(args[i + 1].parse().context("--height expects a number")?);
                i += 2;
            }
            other => {
                warn!(arg = other, "ignoring unrecognised argument");
                i += 1;
            }
        }
    }
    Ok(cli)
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = parse_args()?;
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(width) = cli.width {
        config.window_width = width;
    }
    if let Some(height) = cli.height {
        config.window_height = height;
    }
    config.validate()?;
    info!(
        width = config.window_width,
        height = config.window_height,
        fov = config.fov_degrees,
        "configuration loaded"
    );

    match cli.headless {
        Some(path) => render_headless(&config, &path),
        None => run_interactive(&config),
    }
}

fn render_headless(config: &AppConfig, path: &std::path::Path) -> anyhow::Result<()> {
    let mut app = App::new(config);
    let mut frame = FrameBuffer::new(config.window_width, config.window_height);
    let viewport = Viewport::full(frame.width(), frame.height());
    let stats = app.render(&mut frame, viewport);
    frame.save_png(path)?;
    info!(
        path = %path.display(),
        objects = stats.object_count,
        faces = stats.face_count,
        "frame written"
    );
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_interactive(_config: &AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("built without the `window` feature; pass --headless <out.png>")
}

#[cfg(feature = "window")]
fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    use std::time::Duration;

    use painter3d::window::{Window, WindowEvent};
    use tracing::debug;

    const TITLE_REFRESH: Duration = Duration::from_millis(250);

    let mut window = Window::new("painter3d", config.window_width, config.window_height)?;
    let mut app = App::new(config);
    let mut frame = FrameBuffer::new(window.width(), window.height());
    let mut input = InputState::new();
    let mut timer = FrameTimer::default();
    let mut limiter = FrameLimiter::new(config.target_fps, timer.clock().now());
    let mut last_title = Duration::ZERO;
    let mut screenshots = 0u32;

    timer.start();
    loop {
        match window.poll_events(&mut input) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                window.resize(width, height)?;
                frame.resize(width, height);
            }
            WindowEvent::None => {}
        }

        let dt = timer.tick();
        app.update(&mut input, dt);
        let viewport = Viewport::full(frame.width(), frame.height());
        app.render(&mut frame, viewport);

        if input.take_pressed(Action::Screenshot) {
            screenshots += 1;
            let path = format!("screenshot-{screenshots:03}.png");
            match frame.save_png(&path) {
                Ok(()) => info!(%path, "screenshot saved"),
                Err(err) => warn!(error = %format!("{err:#}"), "screenshot failed"),
            }
        }
        input.end_frame();

        window.present(&frame)?;

        let now = timer.clock().now();
        if now.saturating_sub(last_title) >= TITLE_REFRESH {
            last_title = now;
            if app.show_hud() {
                let hud = app.hud(timer.fps());
                window.set_title(&hud.title())?;
                for line in hud.lines().iter().filter(|l| !l.is_empty()) {
                    debug!("{line}");
                }
            } else {
                window.set_title("painter3d")?;
            }
        }

        if let Some(wait) = limiter.remaining(timer.clock().now()) {
            std::thread::sleep(wait);
        }
        limiter.mark(timer.clock().now());
    }

    info!(spawned = app.spawned_count(), "shutting down");
    Ok(())
}
