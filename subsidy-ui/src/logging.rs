use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    Layer, // needed for .with_filter() on the stdout layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

/// Where and how much to log, merged from the config file and CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// EnvFilter directive. `RUST_LOG`, then `info`, when unset.
    pub filter: Option<String>,
    pub file: Option<PathBuf>,
    pub quiet: bool,
}

// --- Formatter ---

/// `HH:MM:SS.mmm LEVEL target: message fields`, local time.
struct LocalTimeFormat;

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        if ansi {
            let color = match *meta.level() {
                Level::ERROR => "31",
                Level::WARN => "33",
                Level::INFO => "32",
                Level::DEBUG => "34",
                Level::TRACE => "35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[1;{color}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

/// Discards records until a file is attached with [`enable_file_logging`].
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// --- Runtime controls ---

type ReloadFn<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

struct Controls {
    set_level: ReloadFn<EnvFilter>,
    set_stdout: ReloadFn<bool>,
    file: SharedFile,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow::anyhow!("logging not yet initialized"))
}

fn reloader<S, T>(
    handle: reload::Handle<EnvFilter, S>,
    make: impl Fn(T) -> EnvFilter + Send + Sync + 'static,
) -> ReloadFn<T>
where
    S: Subscriber + Send + Sync + 'static,
    T: 'static,
{
    Box::new(move |value| {
        handle
            .reload(make(value))
            .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
    })
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{directive}': {e}"))
}

/// Changes the active filter. Accepts a bare level or any EnvFilter directive.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = parse_filter(directive)?;
    (controls()?.set_level)(filter)
}

/// Shows or hides stdout output; file logging is unaffected.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    (controls()?.set_stdout)(enabled)
}

/// Appends every record to `path`, replacing any file already attached.
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *controls()?
        .file
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber and applies `options`. Call once at startup;
/// later calls only re-apply the options.
///
/// - Stdout: colored on a terminal, plain when piped.
/// - File: attached when `options.file` is set.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    if CONTROLS.get().is_none() {
        install()?;
    }

    if let Some(directive) = &options.filter {
        set_log_level(directive)?;
    }
    if options.quiet {
        set_stdout_enabled(false)?;
    }
    if let Some(path) = &options.file {
        enable_file_logging(path)?;
    }
    Ok(())
}

fn install() -> Result<()> {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file: SharedFile = Arc::new(Mutex::new(None));

    // The level filter is the ceiling for both layers; the stdout gate only switches stdout off.
    let (level_filter, level_handle) = reload::Layer::new(base);
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;

    let _ = CONTROLS.set(Controls {
        set_level: reloader(level_handle, |filter: EnvFilter| filter),
        set_stdout: reloader(stdout_handle, |enabled: bool| {
            EnvFilter::new(if enabled { "trace" } else { "off" })
        }),
        file,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filter_accepts_levels_and_directives() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("info,subsidy_core=trace").is_ok());
    }

    #[test]
    fn controls_fail_before_init() {
        if CONTROLS.get().is_none() {
            assert!(set_stdout_enabled(true).is_err());
        }
    }
}
