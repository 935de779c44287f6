use crate::canvas::Rgb;
use crate::error::{Result, ShowError};
use std::path::PathBuf;

pub const DEFAULT_SCALE: f32 = 4.0;
pub const DEFAULT_MAX_FIREWORKS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub background: Rgb,
    /// World units per half-block pixel.
    pub scale: f32,
    pub max_fireworks: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            background: (0, 0, 0),
            scale: DEFAULT_SCALE,
            max_fireworks: Some(DEFAULT_MAX_FIREWORKS),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
}

pub fn print_usage() {
    eprintln!("skyburst - fireworks in your terminal");
    eprintln!();
    eprintln!("Usage: skyburst [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB     Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!("  --scale N             World units per half-block pixel (default {DEFAULT_SCALE})");
    eprintln!("  --max-fireworks N     Cap on fireworks in flight, 0 for no cap (default {DEFAULT_MAX_FIREWORKS})");
    eprintln!("  --log-file PATH       Write logs to PATH (filter with RUST_LOG)");
    eprintln!();
    eprintln!("Click anywhere to launch a rocket there.");
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Parses the arguments that follow the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        match arg {
            "help" | "--help" | "-h" => return Ok(Command::Help),
            "--bg-color" => {
                let value = flag_value(args, i)?;
                options.background = parse_hex_color(value).ok_or_else(|| {
                    ShowError::InvalidArgument(format!(
                        "Invalid hex color: {value}\nExpected format: RRGGBB (e.g., 1a1b26)"
                    ))
                })?;
                i += 2;
            }
            "--scale" => {
                let value = flag_value(args, i)?;
                options.scale = value
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| {
                        ShowError::InvalidArgument(format!("--scale expects a positive number, got {value}"))
                    })?;
                i += 2;
            }
            "--max-fireworks" => {
                let value = flag_value(args, i)?;
                let max = value.parse::<usize>().map_err(|_| {
                    ShowError::InvalidArgument(format!("--max-fireworks expects a whole number, got {value}"))
                })?;
                options.max_fireworks = (max > 0).then_some(max);
                i += 2;
            }
            "--log-file" => {
                options.log_file = Some(PathBuf::from(flag_value(args, i)?));
                i += 2;
            }
            _ => {
                return Err(ShowError::InvalidArgument(format!("Unknown option: {arg}")));
            }
        }
    }

    Ok(Command::Run(options))
}

fn flag_value<S: AsRef<str>>(args: &[S], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_ref()),
        None => Err(ShowError::InvalidArgument(format!(
            "{} requires a value",
            args[i].as_ref()
        ))),
    }
}
