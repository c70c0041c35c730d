//! # Flyerforge CLI
//!
//! Command-line interface for the flyer design studio.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP studio
//! flyerforge serve --listen 0.0.0.0:8080
//!
//! # Render the design to front.svg, back.svg and flyer.html
//! flyerforge render --out build/ --title "RustConf" --year 2026
//!
//! # Center-crop and rescale an image to a 400x400 background
//! flyerforge crop photo.jpg background.png
//!
//! # Generate backgrounds (needs GEMINI_API_KEY)
//! flyerforge generate --prompt "neon circuit board" --out backgrounds/
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flyerforge::{
    FlyerError, Session, StudioConfig,
    design::TextUpdate,
    generate::GenerationClient,
    layout::Face,
    media::{ImageData, encode_png, normalize_image},
    render::export::export_document,
    session::Command,
    transport::{ReqwestTransport, TokioSleep},
};

/// Flyerforge - Flyer and badge design studio
#[derive(Parser, Debug)]
#[command(name = "flyerforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP studio
    Serve {
        /// Address to listen on
        #[arg(long, env = "FLYER_LISTEN")]
        listen: Option<String>,
    },

    /// Render a design to front.svg, back.svg and flyer.html
    Render {
        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        subtitle: Option<String>,

        #[arg(long)]
        year: Option<String>,

        /// Caption under the QR symbol
        #[arg(long)]
        qr_text: Option<String>,

        /// Small caption above the partner name
        #[arg(long)]
        powered_by_text: Option<String>,

        /// First (bold italic) part of the partner name
        #[arg(long)]
        logo_line1: Option<String>,

        /// Second part of the partner name
        #[arg(long)]
        logo_line2: Option<String>,

        /// Open the print dialog when the page loads
        #[arg(long)]
        print: bool,
    },

    /// Center-crop an image to a square and rescale it to 400x400 PNG
    Crop {
        input: PathBuf,
        output: PathBuf,
    },

    /// Generate background images from a prompt
    Generate {
        #[arg(long)]
        prompt: String,

        /// Output directory for background-N.png files
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), FlyerError> {
    let cli = Cli::parse();
    let mut config = StudioConfig::from_env();

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            flyerforge::server::serve(config).await
        }
        Commands::Render {
            out,
            title,
            subtitle,
            year,
            qr_text,
            powered_by_text,
            logo_line1,
            logo_line2,
            print,
        } => {
            let update = TextUpdate {
                title,
                subtitle,
                year,
                qr_text,
                powered_by_text,
                logo_line1,
                logo_line2,
            };
            let mut session = Session::new();
            for (field, value) in update.into_fields() {
                session.apply(Command::SetText(field, value))?;
            }
            let flyer = session.render();
            std::fs::create_dir_all(&out)?;
            for face in Face::ALL {
                let path = out.join(format!("{}.svg", face.as_str()));
                std::fs::write(&path, flyer.face(face))?;
                println!("Wrote {}", path.display());
            }
            let path = out.join("flyer.html");
            std::fs::write(&path, export_document(&flyer, &session.design().title, print))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Crop { input, output } => crop_file(&input, &output),
        Commands::Generate { prompt, out } => {
            let client = GenerationClient::from_config(
                &config,
                Arc::new(ReqwestTransport::new()?),
                Arc::new(TokioSleep),
            );
            let images = client.generate(&prompt).await?;
            std::fs::create_dir_all(&out)?;
            for (index, image) in images.iter().enumerate() {
                let path = out.join(format!("background-{}.png", index));
                write_image(&path, image)?;
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}

fn crop_file(input: &Path, output: &Path) -> Result<(), FlyerError> {
    let img = image::open(input)
        .map_err(|e| FlyerError::Image(format!("Failed to open {}: {}", input.display(), e)))?;
    let png = encode_png(&normalize_image(&img))?;
    std::fs::write(output, png)?;
    println!(
        "Cropped {}x{} -> {}",
        img.width(),
        img.height(),
        output.display()
    );
    Ok(())
}

fn write_image(path: &Path, image: &ImageData) -> Result<(), FlyerError> {
    std::fs::write(path, image.decode()?)?;
    Ok(())
}
