use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use text2card::{
    CardSession, ExportMode, FontSource, HostContext, MonospaceMeasurer, Orientation,
    SessionOpts, Theme, builtin_themes, find_theme, png_data_url,
};

#[derive(Parser, Debug)]
#[command(name = "text2card", version, about = "Turn text into an auto-fitted card image")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out and export a card as `Text2Card.png` (or to the clipboard).
    Render(RenderArgs),
    /// Lay out a card and print the solved geometry as JSON.
    Layout(CardArgs),
    /// List the built-in themes.
    Themes {
        /// Print the full palettes as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Card text. Paragraphs are separated by a blank line.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Read the card text from a file (`-` for stdin).
    #[arg(long = "in")]
    input: Option<PathBuf>,

    /// Author line shown in the card's bottom-right corner.
    #[arg(long)]
    author: Option<String>,

    /// Built-in theme name (case-insensitive).
    #[arg(long)]
    theme: Option<String>,

    /// Theme JSON file; overrides `--theme`.
    #[arg(long)]
    theme_json: Option<PathBuf>,

    /// Portrait card (height = 1.414 x width) instead of landscape.
    #[arg(long)]
    portrait: bool,

    /// Card width in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Seed for a reproducible draw.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file for the card text; the generic family is used if it fails to load.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Measure with fixed-advance metrics instead of shaping (hosts without fonts).
    #[arg(long)]
    monospace_metrics: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    card: CardArgs,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Copy the image to the system clipboard instead of writing a file.
    #[arg(long)]
    copy: bool,

    /// Transparent margin kept around the trimmed card.
    #[arg(long)]
    margin: Option<u32>,

    /// Also print the written PNG as a `data:` URL.
    #[arg(long, conflicts_with = "copy")]
    data_url: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Themes { json } => cmd_themes(json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_text(args: &CardArgs) -> anyhow::Result<String> {
    match (&args.text, &args.input) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read card text from stdin")?;
            Ok(text)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read card text '{}'", path.display())),
        (None, None) => Ok(String::new()),
    }
}

fn resolve_theme(args: &CardArgs) -> anyhow::Result<Theme> {
    if let Some(path) = &args.theme_json {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read theme '{}'", path.display()))?;
        return Theme::from_json(&json).with_context(|| format!("parse theme '{}'", path.display()));
    }
    match &args.theme {
        Some(name) => find_theme(name).with_context(|| {
            format!("unknown theme '{name}' (see `text2card themes` for the list)")
        }),
        None => Ok(Theme::default()),
    }
}

fn build_session(args: &CardArgs) -> anyhow::Result<CardSession> {
    let text = read_text(args)?;
    let theme = resolve_theme(args)?;
    let orientation = if args.portrait {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };
    let font = args
        .font
        .clone()
        .map_or(FontSource::Generic, FontSource::File);

    let mut session = CardSession::new(SessionOpts {
        card_width: args.width,
        orientation,
        theme,
        host: HostContext::default(),
        author: args.author.clone(),
        seed: args.seed,
        font,
        ..SessionOpts::default()
    });
    if args.monospace_metrics {
        session = session.with_measurer(MonospaceMeasurer::default());
    }
    session.set_text(text);
    Ok(session)
}

fn cmd_layout(args: CardArgs) -> anyhow::Result<()> {
    let mut session = build_session(&args)?;
    let geometry = session.geometry()?;
    let layout = session.relayout().context("lay out card")?.clone();

    let out = serde_json::json!({
        "theme": session.theme().name,
        "author": session.author(),
        "geometry": geometry,
        "layout": layout,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = build_session(&args.card)?;
    session.export_opts_mut().download_dir = args.out_dir.clone();
    if let Some(margin) = args.margin {
        session.export_opts_mut().trim_margin = margin;
    }

    let mode = if args.copy {
        session = attach_system_clipboard(session)?;
        ExportMode::Copy
    } else {
        ExportMode::Download
    };

    let report = match session.export(mode) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e.user_notice());
            return Err(e).context("export card");
        }
    };

    match &report.path {
        Some(path) => println!("wrote {} ({}x{})", path.display(), report.width, report.height),
        None => println!("copied {}x{} image to clipboard", report.width, report.height),
    }

    if args.data_url
        && let Some(path) = &report.path
    {
        let png = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
        println!("{}", png_data_url(&png));
    }
    Ok(())
}

#[cfg(feature = "clipboard")]
fn attach_system_clipboard(session: CardSession) -> anyhow::Result<CardSession> {
    Ok(session.with_clipboard(text2card::SystemClipboard::new()))
}

#[cfg(not(feature = "clipboard"))]
fn attach_system_clipboard(_session: CardSession) -> anyhow::Result<CardSession> {
    anyhow::bail!("this build has no clipboard support (enable the `clipboard` feature)")
}

fn cmd_themes(json: bool) -> anyhow::Result<()> {
    let themes = builtin_themes();
    if json {
        println!("{}", serde_json::to_string_pretty(&themes)?);
        return Ok(());
    }
    let default = Theme::default();
    for theme in &themes {
        let marker = if theme.name == default.name { "*" } else { " " };
        println!(
            "{marker} {:<22} text {}  card {}  border {}",
            theme.name,
            theme.text_color.to_hex(),
            theme.card_background.to_hex(),
            theme.border_background.to_hex()
        );
    }
    Ok(())
}
