//! # Card Studio CLI
//!
//! Reference host wiring: builds a scene from a template, optionally places
//! an uploaded image, and exports the flattened card to a PNG file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use card_core::{Editor, Template};
use card_renderer::{decode_bitmap, Exporter, EXPORT_FILENAME};

#[derive(Parser, Debug)]
#[command(name = "card", about = "Render a card template to a PNG image")]
struct CliArgs {
    /// Template to load (see --list).
    #[arg(short, long, default_value = "birthday")]
    template: String,

    /// Output file path.
    #[arg(short, long, default_value = EXPORT_FILENAME)]
    out: PathBuf,

    /// Optional image file to place on the card.
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Canvas width in units.
    #[arg(long, default_value_t = card_core::DEFAULT_CANVAS_WIDTH)]
    width: f32,

    /// Canvas height in units.
    #[arg(long, default_value_t = card_core::DEFAULT_CANVAS_HEIGHT)]
    height: f32,

    /// List available templates and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "card_cli=info,card_renderer=info,card_core=info".into()),
        )
        .init();

    let args = CliArgs::parse();

    if args.list {
        for template in Template::ALL {
            println!("{template}");
        }
        return Ok(());
    }

    let template: Template = args
        .template
        .parse()
        .with_context(|| format!("unknown template '{}'", args.template))?;

    let exporter = Exporter::with_defaults();

    // The renderer's font catalog doubles as the measurement collaborator,
    // so the editor and the raster pipeline agree on text extents.
    let measurer: Box<dyn card_core::TextMeasurer> = if exporter.renderer().fonts().has_fonts() {
        Box::new(exporter.renderer().fonts().clone())
    } else {
        tracing::warn!("no system fonts; falling back to fixed-advance measurement");
        Box::new(card_core::FixedAdvance::default())
    };

    let mut editor = Editor::new(args.width, args.height, measurer);
    editor.load_template(template);
    tracing::info!(%template, objects = editor.scene().len(), "loaded template");

    if let Some(path) = &args.image {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        match decode_bitmap(&bytes) {
            Ok(bitmap) => {
                editor.insert_image(bitmap);
                editor.scene_mut().clear_selection();
            }
            // Non-image input is rejected with no scene change.
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping image"),
        }
    }

    exporter
        .write_png(editor.scene(), &args.out)
        .with_context(|| format!("exporting to {}", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}
