//! previewcn command line
//!
//! - `export-css` - print the globals.css block for a theme
//! - `replay` - feed JSONL protocol messages through a receiver and print the
//!   resulting document
//! - `presets` - list the built-in catalogs

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use previewcn::config::load_settings;
use previewcn::dom::{MemoryDocument, StyleRegistry};
use previewcn::presets::Presets;
use previewcn::protocol::JsonlReader;
use previewcn::theme::export_css;
use previewcn::transport::WindowPort;
use previewcn::{logging, ThemeConfig, ThemeReceiver};

#[derive(Parser, Debug)]
#[command(name = "previewcn")]
#[command(about = "Live shadcn/ui theme editing tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the CSS for a theme
    ExportCss {
        /// Color preset (e.g. blue, zinc, rose)
        #[arg(long, short = 'c')]
        color: String,

        /// Radius step name (none, sm, md, lg, xl, full) or a CSS length
        #[arg(long, short = 'r')]
        radius: Option<String>,
    },
    /// Apply JSONL messages from stdin to an empty document and print it as JSON
    Replay,
    /// List built-in color, font and radius presets as JSON
    Presets,
}

fn main() -> Result<()> {
    let _guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::ExportCss { color, radius } => export(&color, radius.as_deref()),
        Command::Replay => replay(),
        Command::Presets => list_presets(),
    }
}

fn export(color: &str, radius: Option<&str>) -> Result<()> {
    let presets = Presets::builtin();
    if presets.colors.get(color).is_none() {
        let known: Vec<&str> = presets.colors.all().iter().map(|p| p.name.as_str()).collect();
        bail!("Unknown color preset '{}' (known: {})", color, known.join(", "));
    }

    let config = ThemeConfig {
        color_preset: Some(color.to_string()),
        radius: radius.map(|r| presets.radii.resolve(r).to_string()),
        ..Default::default()
    };
    let css = export_css(&config, &presets.colors).context("Nothing to export")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", css).context("Failed to write CSS")?;
    Ok(())
}

fn replay() -> Result<()> {
    let settings = load_settings();
    let registry = StyleRegistry::receiver().with_trusted_font_host(settings.trusted_font_host);
    let mut receiver =
        ThemeReceiver::with_registry(MemoryDocument::new(), WindowPort::top_level(), registry);
    receiver.mount();

    let mut reader = JsonlReader::new(io::stdin().lock());
    let mut total = 0usize;
    let mut applied = 0usize;
    while let Some(value) = reader.next_value().context("Failed to read stdin")? {
        total += 1;
        if receiver.handle_value(value) {
            applied += 1;
        }
    }
    info!(total, applied, "Replay finished");

    let snapshot =
        serde_json::to_string_pretty(receiver.document()).context("Failed to serialize document")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", snapshot).context("Failed to write snapshot")?;
    Ok(())
}

fn list_presets() -> Result<()> {
    let presets = Presets::builtin();
    let listing = serde_json::json!({
        "colors": presets.colors.all(),
        "fonts": presets.fonts.all(),
        "radii": presets.radii.all(),
    });
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        serde_json::to_string_pretty(&listing).context("Failed to serialize presets")?
    )
    .context("Failed to write presets")?;
    Ok(())
}
