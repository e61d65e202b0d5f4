//! Draw a sample page of vector shapes.
//!
//! Usage: `draw_shapes [OUTPUT] [CONFIG.json]`
//!
//! Writes `shapes.pdf` when no output path is given. The optional JSON file
//! supplies the writer configuration (version and document metadata).

use pdf_scribe::writer::{LineCap, LineJoin, PdfWriter, PdfWriterConfig};
use pdf_scribe::Result;
use std::path::PathBuf;

struct Args {
    output: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn from_args() -> Self {
        let mut args = std::env::args().skip(1);
        Self {
            output: args
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("shapes.pdf")),
            config: args.next().map(PathBuf::from),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PdfWriterConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            PdfWriterConfig::from_json(&json)
        },
        None => Ok(PdfWriterConfig::default()
            .with_title("Shapes")
            .with_producer(pdf_scribe::NAME)),
    }
}

fn draw(writer: &mut PdfWriter) -> Result<()> {
    let mut page = writer.add_letter_page()?;

    // Filled rectangle with a thick outline
    page.save_state()
        .set_fill_color(0.9, 0.3, 0.2)
        .set_stroke_gray(0.1)
        .set_line_width(4.0)
        .set_line_join(LineJoin::Round)
        .rect(72.0, 600.0, 200.0, 120.0)
        .fill_stroke()
        .restore_state();

    // Dashed zig-zag
    page.save_state()
        .set_stroke_color(0.1, 0.4, 0.8)
        .set_line_width(2.0)
        .set_line_cap(LineCap::Round)
        .set_dash_pattern(vec![6.0, 3.0], 0.0)
        .move_to(72.0, 500.0)
        .line_to(172.0, 560.0)
        .line_to(272.0, 500.0)
        .line_to(372.0, 560.0)
        .stroke()
        .restore_state();

    // Curved triangle, filled even-odd
    page.save_state()
        .transform(1.0, 0.0, 0.0, 1.0, 300.0, 300.0)
        .set_fill_gray(0.6)
        .move_to(0.0, 0.0)
        .curve_to(50.0, 120.0, 150.0, 120.0, 200.0, 0.0)
        .curve_to_v(150.0, -40.0, 100.0, -80.0)
        .curve_to_y(50.0, -40.0, 0.0, 0.0)
        .close_path()
        .fill_even_odd()
        .restore_state();

    page.finish();
    Ok(())
}

fn run(args: &Args) -> Result<u64> {
    let config = load_config(args.config.as_ref())?;
    let mut writer = PdfWriter::with_config(config);
    draw(&mut writer)?;
    writer.save(&args.output)
}

fn main() {
    env_logger::init();

    let args = Args::from_args();
    match run(&args) {
        Ok(bytes) => println!("Wrote {} ({} bytes)", args.output.display(), bytes),
        Err(e) => {
            eprintln!("Failed to write {}: {}", args.output.display(), e);
            std::process::exit(1);
        },
    }
}
