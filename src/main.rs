use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::PossibleValuesParser;
use std::ffi::OsString;
use typio::error::invalid_non_negative_number;
use typio::{
    DEFAULT_DELAY, DEFAULT_END, DEFAULT_JITTER, EmissionRequest, Mode, Text, TypioError, VERSION,
};

const OVERVIEW: &str = "Typio makes your terminal type like a human. \
Text appears character by character, word by word or line by line, \
at the pace you choose, with a little randomness if you want it.";

#[derive(Parser, Debug)]
#[command(
    name = "typio",
    about = "Typio: Make Your Terminal Type Like a Human",
    disable_version_flag = true
)]
struct Args {
    /// Print the version and exit
    #[arg(long)]
    version: bool,

    /// Text to be printed (defaults to a short overview)
    #[arg(long)]
    text: Option<OsString>,

    /// Base delay (seconds) between emitted units
    #[arg(long, default_value_t = DEFAULT_DELAY, value_parser = non_negative, allow_negative_numbers = true)]
    delay: f64,

    /// Random delay variation (seconds)
    #[arg(long, default_value_t = DEFAULT_JITTER, value_parser = non_negative, allow_negative_numbers = true)]
    jitter: f64,

    /// End character(s)
    #[arg(long, allow_hyphen_values = true)]
    end: Option<OsString>,

    /// Typing mode
    #[arg(long, default_value = "char", value_parser = PossibleValuesParser::new(Mode::NAMES))]
    mode: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TYPIO_LOG", "warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();

    if args.version {
        println!("{VERSION}");
        return Ok(());
    }

    let text = match args.text {
        Some(text) => os_text(text)?.decode()?.into_owned(),
        None => OVERVIEW.to_string(),
    };
    let mode: Mode = args.mode.parse()?;
    let end = match args.end {
        Some(end) => end.into_string().map_err(|_| TypioError::InvalidTerminator)?,
        None => DEFAULT_END.to_string(),
    };

    log::debug!(
        "typing {} bytes (mode={mode}, delay={}, jitter={})",
        text.len(),
        args.delay,
        args.jitter
    );

    EmissionRequest::new(text)
        .delay(args.delay)
        .jitter(args.jitter)
        .end(end)
        .mode(mode)
        .run()
        .context("Failed to type text")?;

    Ok(())
}

/// Accept a finite, non-negative number of seconds.
fn non_negative(value: &str) -> std::result::Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number >= 0.0 => Ok(number),
        _ => Err(invalid_non_negative_number(value)),
    }
}

#[cfg(unix)]
fn os_text(text: OsString) -> std::result::Result<Text<'static>, TypioError> {
    use std::os::unix::ffi::OsStringExt;
    Ok(Text::from(text.into_vec()))
}

#[cfg(not(unix))]
fn os_text(text: OsString) -> std::result::Result<Text<'static>, TypioError> {
    text.into_string()
        .map(Text::from)
        .map_err(|_| TypioError::InvalidText)
}
