use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use skyburst::config::{self, Command, Options};
use skyburst::{Result, Show, ShowError, TerminalCanvas};
use std::env;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const FIXED_DT: f32 = 1.0 / 60.0;

// The terminal is the display, so logs only go to a file when asked for
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn run(options: &Options) -> Result<()> {
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode().map_err(|e| ShowError::surface("raw mode", e))?;
    if let Err(e) = execute!(
        stdout,
        EnterAlternateScreen,
        cursor::Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    ) {
        let _ = terminal::disable_raw_mode();
        return Err(ShowError::surface("alternate screen", e));
    }

    let result = frame_loop(&mut stdout, options);

    let restored = execute!(stdout, cursor::Show, LeaveAlternateScreen, DisableMouseCapture)
        .and_then(|_| terminal::disable_raw_mode());

    result?;
    restored?;
    Ok(())
}

fn frame_loop<W: Write>(out: &mut W, options: &Options) -> Result<()> {
    let (cols, rows) = terminal::size().map_err(|e| ShowError::surface("terminal size", e))?;
    if cols == 0 || rows == 0 {
        return Err(ShowError::SurfaceUnavailable(format!(
            "terminal reports a {cols}x{rows} window"
        )));
    }

    let mut canvas = TerminalCanvas::new(cols, rows, options.scale, options.background);
    let mut show = Show::new(fastrand::Rng::new(), options.max_fireworks);
    info!(cols, rows, scale = options.scale, "display ready");

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => break,
                Event::Resize(cols, rows) => {
                    canvas.resize(cols, rows);
                    execute!(out, Clear(ClearType::All))?;
                    info!(cols, rows, "terminal resized");
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = canvas.to_world(column, row);
                    show.launch(&canvas, x, y);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        let mut ticked = false;
        while accumulator >= FIXED_DT {
            show.tick(&mut canvas);
            accumulator -= FIXED_DT;
            ticked = true;
        }

        if ticked {
            canvas.present(out)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match config::parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            config::print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!();
            config::print_usage();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(options.log_file.as_deref()) {
        eprintln!("skyburst: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    info!("skyburst starting");
    match run(&options) {
        Ok(()) => {
            info!("skyburst stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "skyburst failed");
            eprintln!("skyburst error: {e}");
            ExitCode::FAILURE
        }
    }
}
