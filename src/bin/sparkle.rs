use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;

use sparkle::{
    Editor, FileDownloads, SessionConfig, SwatchCatalog, Template, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "sparkle", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a session as a 2x PNG.
    Export(ExportArgs),
    /// Render the 1x preview of a session as a PNG.
    Preview(PreviewArgs),
    /// List the built-in templates.
    Templates,
    /// List the built-in background swatches.
    Swatches,
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Input session JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Apply a template after the session file (overrides its framing fields).
    #[arg(long)]
    template: Option<String>,

    /// Width of the preview area in pixels.
    #[arg(long)]
    viewport_width: Option<f64>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path or directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Templates => {
            cmd_templates();
            Ok(())
        }
        Command::Swatches => {
            cmd_swatches();
            Ok(())
        }
    }
}

fn load_editor(args: &SessionArgs) -> anyhow::Result<Editor> {
    let (cfg, root) = SessionConfig::from_path(&args.in_path)?;
    let mut editor = Editor::new(Viewport::unbounded());
    cfg.apply(&mut editor, &root)
        .with_context(|| format!("apply session '{}'", args.in_path.display()))?;

    if let Some(name) = &args.template {
        let t = Template::find(name).with_context(|| format!("unknown template '{name}'"))?;
        editor.apply_template(t);
    }
    if let Some(w) = args.viewport_width {
        anyhow::ensure!(w.is_finite() && w > 0.0, "--viewport-width must be > 0");
        editor.set_viewport(Viewport::with_max_width(w));
    }
    Ok(editor)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut editor = load_editor(&args.session)?;
    let mut sink = FileDownloads::new(&args.out);
    let outcome = editor.export(&mut sink)?;
    for path in sink.written() {
        eprintln!(
            "wrote {} ({}x{})",
            path.display(),
            outcome.width,
            outcome.height
        );
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let editor = load_editor(&args.session)?;
    let mut rasterizer = sparkle::CpuRasterizer::new();
    let bitmap = editor
        .live()
        .rasterize(&mut rasterizer)?
        .context("session has no image to preview")?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bitmap.to_png()?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_templates() {
    for t in Template::all() {
        let ratio = t
            .aspect_ratio
            .map(|r| format!("{r:.4}"))
            .unwrap_or_else(|| "original".to_owned());
        println!(
            "{:<10} padding={:<3} radius={:<3} shadow={:<3} ratio={ratio} inset={}",
            t.name, t.padding, t.border_radius, t.shadow_intensity, t.shadow_inset
        );
    }
}

fn cmd_swatches() {
    for s in SwatchCatalog::builtin().entries() {
        println!("{:<8} {}", s.name, s.swatch.encode());
    }
}
