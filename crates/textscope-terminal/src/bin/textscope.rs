//! textscope: ASCII art and system strip charts in the terminal
//!
//! Run: cargo run -p textscope-terminal --bin textscope

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use tracing_subscriber::EnvFilter;

use textscope_terminal::{
    ArtColorMode, ColorMode, Dashboard, GridPresenter, MetricKey, PaletteTheme, ScopeError,
    Settings,
};

/// Textscope - ASCII art and CPU/RAM/GPU strip charts
#[derive(Parser)]
#[command(name = "textscope", version, about, long_about = None)]
struct Cli {
    /// Path to custom config file (YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Dump default configuration to stdout and exit
    #[arg(long)]
    dump_config: bool,

    /// Image to render as art (path or file:/// URI)
    #[arg(short, long, value_name = "IMAGE")]
    image: Option<String>,

    /// Media thumbnail tried before the configured image
    #[arg(long, value_name = "IMAGE")]
    thumbnail: Option<String>,

    /// Art sample columns
    #[arg(long)]
    resolution: Option<u32>,

    /// Art color saturation (0 = grayscale)
    #[arg(long)]
    saturation: Option<f32>,

    /// Art color mode: theme or direct
    #[arg(long, value_name = "MODE")]
    color_mode: Option<String>,

    /// Palette theme
    #[arg(long)]
    theme: Option<String>,

    /// Disable colors (use plain text)
    #[arg(long)]
    no_color: bool,

    /// Render once to stdout and exit
    #[arg(long)]
    render_once: bool,

    /// Terminal width for render-once mode
    #[arg(long, default_value = "120")]
    width: u16,

    /// Refresh interval in milliseconds (overrides the config)
    #[arg(short, long)]
    refresh: Option<u64>,
}

impl Cli {
    fn settings(&self) -> Result<Settings, ScopeError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::load(),
        };
        if let Some(image) = &self.image {
            settings.art.default_image = Some(image.clone());
        }
        if let Some(resolution) = self.resolution {
            settings.art.resolution = resolution;
        }
        if let Some(saturation) = self.saturation {
            settings.art.saturation = saturation;
        }
        if let Some(mode) = self.color_mode.as_deref() {
            match ArtColorMode::from_name(mode) {
                Some(mode) => settings.art.color_mode = mode,
                None => tracing::warn!(mode, "unknown color mode, keeping configured one"),
            }
        }
        if let Some(theme) = &self.theme {
            settings.palette.theme = theme.clone();
        }
        if self.no_color {
            settings.art.colored = false;
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_ms = refresh;
        }
        Ok(settings.sanitized())
    }
}

fn main() -> Result<(), ScopeError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.dump_config {
        println!("{}", Settings::default_yaml());
        return Ok(());
    }

    let settings = cli.settings()?;
    let color_mode = if cli.no_color {
        ColorMode::Mono
    } else {
        ColorMode::detect()
    };

    let now = Instant::now();
    let mut dash = Dashboard::new(settings);
    dash.set_media_thumbnail(cli.thumbnail.clone(), now);

    if cli.render_once {
        return render_once(&mut dash, cli.width, color_mode);
    }

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )?;

    let result = run_app(&mut stdout, dash, color_mode);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

/// Print art and graph once as plain lines.
fn render_once(dash: &mut Dashboard, width: u16, color_mode: ColorMode) -> Result<(), ScopeError> {
    let start = Instant::now();
    let refresh = Duration::from_millis(dash.settings().refresh_ms);
    // Enough history to fill the widest panel.
    let ticks = dash.settings().graph.max_panel_width as u32;
    for tick in 0..ticks {
        dash.sample(refresh * tick);
    }
    dash.render_art_now();
    tracing::debug!(elapsed = ?start.elapsed(), "render-once prepared");

    let palette = dash.palette();
    let mut presenter = GridPresenter::with_color_mode(color_mode);
    let mut stdout = io::stdout();
    presenter.write_lines(dash.art(), &palette, &mut stdout)?;
    writeln!(stdout)?;
    match dash.render_system_graph(usize::from(width)) {
        Some(graph) => {
            presenter.write_lines(&graph, &palette, &mut stdout)?;
        }
        None => writeln!(stdout, "[ terminal too narrow for the graph ]")?,
    }
    stdout.flush()?;
    Ok(())
}

/// What the lower half of the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphView {
    System,
    Stock(usize),
}

impl GraphView {
    const STOCK_KEYS: [&'static str; 3] = ["cpu", "ram", "gpu"];

    fn next(self) -> Self {
        match self {
            Self::System => Self::Stock(0),
            Self::Stock(i) if i + 1 < Self::STOCK_KEYS.len() => Self::Stock(i + 1),
            Self::Stock(_) => Self::System,
        }
    }
}

fn run_app(
    stdout: &mut io::Stdout,
    mut dash: Dashboard,
    color_mode: ColorMode,
) -> Result<(), ScopeError> {
    let mut presenter = GridPresenter::with_color_mode(color_mode);
    let started = Instant::now();
    let refresh = Duration::from_millis(dash.settings().refresh_ms);
    let mut next_sample = started;
    let mut view = GraphView::System;
    let mut dirty = true;

    dash.render_art_now();

    loop {
        let now = Instant::now();
        if now >= next_sample {
            dash.sample(now - started);
            next_sample = now + refresh;
            dirty = true;
        }
        if dash.poll(now) {
            dirty = true;
        }

        if dirty {
            draw(stdout, &dash, &mut presenter, view)?;
            dirty = false;
        }

        let mut timeout = next_sample.saturating_duration_since(Instant::now());
        if let Some(due) = dash.art_due_in(Instant::now()) {
            timeout = timeout.min(due);
        }
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let now = Instant::now();
                let ctrl_c =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c {
                    break;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        adjust(&mut dash, now, |s| s.art.resolution += 4);
                    }
                    KeyCode::Char('-') => {
                        adjust(&mut dash, now, |s| {
                            s.art.resolution = s.art.resolution.saturating_sub(4);
                        });
                    }
                    KeyCode::Char('c') => adjust(&mut dash, now, |s| s.art.colored = !s.art.colored),
                    KeyCode::Char('m') => adjust(&mut dash, now, |s| {
                        s.art.color_mode = match s.art.color_mode {
                            ArtColorMode::Theme => ArtColorMode::Direct,
                            ArtColorMode::Direct => ArtColorMode::Theme,
                        };
                    }),
                    KeyCode::Char('s') => adjust(&mut dash, now, |s| {
                        s.art.saturation = if s.art.saturation >= 2.0 {
                            0.0
                        } else {
                            s.art.saturation + 0.5
                        };
                    }),
                    KeyCode::Char('t') => adjust(&mut dash, now, |s| {
                        let current = s.palette.theme();
                        let index = PaletteTheme::ALL
                            .iter()
                            .position(|t| *t == current)
                            .unwrap_or(0);
                        let next = PaletteTheme::ALL[(index + 1) % PaletteTheme::ALL.len()];
                        s.palette.theme = next.name().to_string();
                    }),
                    KeyCode::Char('g') => view = view.next(),
                    _ => continue,
                }
                dirty = true;
            }
            Event::Resize(_, _) => {
                execute!(stdout, terminal::Clear(ClearType::All))?;
                dirty = true;
            }
            _ => {}
        }
    }

    Ok(())
}

fn adjust(dash: &mut Dashboard, now: Instant, edit: impl FnOnce(&mut Settings)) {
    let mut settings = dash.settings().clone();
    edit(&mut settings);
    dash.set_settings(settings, now);
}

fn draw(
    stdout: &mut io::Stdout,
    dash: &Dashboard,
    presenter: &mut GridPresenter,
    view: GraphView,
) -> Result<(), ScopeError> {
    let (cols, rows) = terminal::size()?;
    let palette = dash.palette();
    queue!(stdout, terminal::Clear(ClearType::All))?;

    let art = dash.art();
    presenter.draw(art, (0, 0), &palette, stdout)?;
    let graph_top = u16::try_from(art.height() + 1).unwrap_or(u16::MAX);

    let graph = match view {
        GraphView::System => dash.render_system_graph(usize::from(cols)),
        GraphView::Stock(i) => {
            let key = MetricKey::new(GraphView::STOCK_KEYS[i]);
            Some(dash.render_stock_graph(&key, usize::from(cols)))
        }
    };
    match graph {
        Some(graph) if graph_top < rows => {
            presenter.draw(&graph, (0, graph_top), &palette, stdout)?;
        }
        Some(_) => {}
        None => {
            queue!(
                stdout,
                cursor::MoveTo(0, graph_top),
                Print("[ terminal too narrow for the graph ]")
            )?;
        }
    }

    queue!(
        stdout,
        cursor::MoveTo(0, rows.saturating_sub(1)),
        Print("q quit  +/- resolution  c color  m mode  s saturation  t theme  g graph")
    )?;
    stdout.flush()?;
    Ok(())
}
