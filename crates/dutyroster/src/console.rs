//! Colorful console output for scheduling events.
//!
//! Installs a `tracing` subscriber with a layer that renders the
//! lifecycle events of a scheduling run (model built, solve start and end,
//! outcome) as single colored lines. Enable with the `console` feature.

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "dutyroster=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ScheduleConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats scheduling events with colors.
pub struct ScheduleConsoleLayer;

impl<S: Subscriber> Layer<S> for ScheduleConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("dutyroster") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*event.metadata().level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    error: Option<String>,
    backend: Option<String>,
    employees: Option<u64>,
    days: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    admin_constraints: Option<u64>,
    assignments: Option<u64>,
    nodes: Option<u64>,
    duration_ms: Option<u64>,
    speed: Option<u64>,
    objective: Option<i64>,
    year: Option<i64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "error" => self.error = Some(s),
            "backend" => self.backend = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "employees" => self.employees = Some(value),
            "days" => self.days = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "admin_constraints" => self.admin_constraints = Some(value),
            "assignments" => self.assignments = Some(value),
            "nodes" => self.nodes = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "speed" => self.speed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "year" => self.year = Some(value),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("schedule_year") => format!(
            "{} {} {} year {} with {} employees, {} admin constraints",
            timestamp().bright_black(),
            level_tag(level),
            "[Roster]".bright_cyan(),
            v.year.unwrap_or(0).to_string().white().bold(),
            count(v.employees).bright_yellow(),
            count(v.admin_constraints).bright_yellow(),
        ),
        Some("model_built") => format!(
            "{} {} {} {} employees x {} days: {} variables, {} constraints",
            timestamp().bright_black(),
            level_tag(level),
            "[Model]".bright_cyan(),
            count(v.employees).bright_yellow(),
            count(v.days).bright_yellow(),
            count(v.variables).bright_yellow(),
            count(v.constraints).bright_yellow(),
        ),
        Some("solve_start") => format!(
            "{} {} {} solving with {}",
            timestamp().bright_black(),
            level_tag(level),
            "[Solver]".bright_cyan(),
            v.backend.as_deref().unwrap_or("unknown").white().bold(),
        ),
        Some("solve_end") => format!(
            "{} {} {} {}: objective ({}), nodes ({}), speed ({}/sec), time spent ({})",
            timestamp().bright_black(),
            level_tag(level),
            "[Solver]".bright_cyan(),
            format_status(v.status.as_deref().unwrap_or("UNKNOWN")),
            v.objective
                .map_or_else(|| "N/A".to_string(), |o| o.to_string())
                .bright_magenta(),
            count(v.nodes).white(),
            count(v.speed).bright_magenta().bold(),
            format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        ),
        Some("schedule_created") => format!(
            "{} {} {} {} assignments created",
            timestamp().bright_black(),
            level_tag(level),
            "[Roster]".bright_cyan(),
            count(v.assignments).bright_green().bold(),
        ),
        Some("schedule_failed") => format!(
            "{} {} {} no schedule: {}",
            timestamp().bright_black(),
            level_tag(level),
            "[Roster]".bright_cyan(),
            format_status(v.status.as_deref().unwrap_or("UNKNOWN")),
        ),
        Some("schedule_rejected") => format!(
            "{} {} {} {}",
            timestamp().bright_black(),
            level_tag(level),
            "[Roster]".bright_cyan(),
            v.error.as_deref().unwrap_or("rejected").bright_red(),
        ),
        _ => String::new(),
    }
}

fn level_tag(level: Level) -> String {
    match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => "WARN".yellow().to_string(),
        Level::INFO => "INFO".bright_green().to_string(),
        _ => "DEBUG".bright_black().to_string(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_status(status: &str) -> String {
    match status {
        "OPTIMAL" | "FEASIBLE" => status.bright_green().bold().to_string(),
        "INFEASIBLE" => status.bright_red().bold().to_string(),
        _ => status.yellow().bold().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
