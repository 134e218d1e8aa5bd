use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use caplet::{ProcessEngine, ProjectSession, RenderInvoker, RenderOutcome, unresolved_tags};

#[derive(Parser, Debug)]
#[command(name = "caplet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack an image, a text file, and optional fonts into a project archive.
    Pack(PackArgs),
    /// Print a project archive's contents and tag diagnostics.
    Inspect(InspectArgs),
    /// Render a project archive through an external engine program.
    Render(RenderArgs),
    /// List the fonts available to a project.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Project name (drives output naming).
    #[arg(long)]
    name: String,

    /// Background image file.
    #[arg(long)]
    image: PathBuf,

    /// Text file with inline [Name] tags.
    #[arg(long)]
    text: Option<PathBuf>,

    /// Custom .ttf font files to register.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Output archive path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project archive.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine program to run.
    #[arg(long)]
    engine: PathBuf,

    /// Scratch directory for file exchange with the engine.
    #[arg(long, default_value = "caplet-scratch")]
    scratch: PathBuf,

    /// Override the engine's success marker.
    #[arg(long)]
    marker: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Optional project archive whose custom fonts should be included.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Render(args) => cmd_render(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn load_session(in_path: &Path) -> anyhow::Result<ProjectSession> {
    let bytes = std::fs::read(in_path)
        .with_context(|| format!("failed to read archive '{}'", in_path.display()))?;
    let mut session = ProjectSession::new("");
    session.import(&bytes)?;
    Ok(session)
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let mut session = ProjectSession::new(args.name);

    let image_bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read image '{}'", args.image.display()))?;
    let image_name = args
        .image
        .file_name()
        .context("image path has no filename")?
        .to_string_lossy()
        .into_owned();
    session.set_image(image_name, image_bytes);

    if let Some(text_path) = &args.text {
        let text = std::fs::read_to_string(text_path)
            .with_context(|| format!("failed to read text '{}'", text_path.display()))?;
        session.set_text(text);
    }

    for font_path in &args.fonts {
        let bytes = std::fs::read(font_path)
            .with_context(|| format!("failed to read font '{}'", font_path.display()))?;
        let filename = font_path
            .file_name()
            .context("font path has no filename")?
            .to_string_lossy()
            .into_owned();
        session.upload_font(bytes, &filename)?;
    }

    let archive = session.export()?;
    std::fs::write(&args.out, archive)
        .with_context(|| format!("failed to write archive '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let session = load_session(&args.in_path)?;
    let state = session.state();

    println!("project: {}", state.project_name);
    if let Some(image) = &state.image {
        println!("image: {} ({} bytes)", image.name, image.bytes.len());
    }
    println!("characters: {}", state.characters.len());
    for character in &state.characters {
        println!(
            "  {} (font {}, height {}, stroke {})",
            character.name, character.font_path, character.font_height, character.stroke_width
        );
    }
    let customs: Vec<_> = session.registry().custom_fonts().collect();
    if !customs.is_empty() {
        println!("custom fonts: {}", customs.len());
        for (resource, font_bytes) in customs {
            println!("  {} ({} bytes)", resource.name, font_bytes.len());
        }
    }

    let unresolved = unresolved_tags(&state.text_content, &state.characters);
    if unresolved.is_empty() {
        println!("tags: all resolved");
    } else {
        println!("unresolved tags: {}", unresolved.join(", "));
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.in_path)?;
    let mut invoker = RenderInvoker::new(&args.scratch);
    if let Some(marker) = args.marker {
        invoker = invoker.with_success_marker(marker);
    }
    let mut engine = ProcessEngine::new(&args.engine);

    match session.render(&mut invoker, &mut engine)? {
        RenderOutcome::Rendered { bytes } => {
            std::fs::write(&args.out, bytes)
                .with_context(|| format!("failed to write output '{}'", args.out.display()))?;
            eprintln!("wrote {}", args.out.display());
            Ok(())
        }
        RenderOutcome::Failed { message } => {
            anyhow::bail!("engine reported failure:\n{message}")
        }
    }
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let session = match &args.in_path {
        Some(in_path) => load_session(in_path)?,
        None => ProjectSession::new(""),
    };
    for resource in session.registry().scan() {
        println!("{}  {}", resource.path, resource.name);
    }
    Ok(())
}
