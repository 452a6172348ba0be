use clap::{Parser, Subcommand};
use qr_icon::utils::binarization::binarize;
use qr_icon::utils::grayscale::buffer_to_grayscale;
use qr_icon::{ECLevel, QrConfig, QrError, QrGenerator};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generation and reading")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a QR image, optionally with a centered icon
    Generate {
        #[arg(long)]
        text: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        icon: Option<PathBuf>,
        /// Output width and height in pixels
        #[arg(long)]
        size: Option<usize>,
        /// White frame thickness around the icon
        #[arg(long)]
        border: Option<usize>,
        #[arg(long)]
        ec_level: Option<ECLevel>,
    },
    /// Decode the QR symbol in an image
    Read {
        #[arg(long)]
        image: PathBuf,
    },
    /// Print grayscale/binary stats for an image, then try to decode it
    Inspect {
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = QrConfig::from_env();

    let result = match cli.command {
        Command::Generate {
            text,
            out,
            icon,
            size,
            border,
            ec_level,
        } => {
            let mut config = config;
            if let Some(size) = size {
                config = config.with_size(size, size);
            }
            if let Some(border) = border {
                config = config.with_border(border);
            }
            if let Some(level) = ec_level {
                config = config.with_ec_level(level);
            }
            generate_cmd(config, &text, &out, icon.as_deref())
        }
        Command::Read { image } => read_cmd(config, &image),
        Command::Inspect { image } => inspect_cmd(config, &image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(QrError::NotFound) => {
            println!("No QR code found");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn generate_cmd(config: QrConfig, text: &str, out: &Path, icon: Option<&Path>) -> qr_icon::Result<()> {
    let generator = QrGenerator::new(config);
    let buffer = match icon {
        Some(path) => generator.generate_with_icon_path(text, path)?,
        None => generator.generate(text, None)?,
    };
    let format = image::ImageFormat::from_path(out).unwrap_or(config.format);
    qr_icon::io::write_image(&buffer, out, format)?;
    println!(
        "Wrote {} ({}x{}, EC={})",
        out.display(),
        buffer.width(),
        buffer.height(),
        config.ec_level
    );
    Ok(())
}

fn read_cmd(config: QrConfig, image: &Path) -> qr_icon::Result<()> {
    let text = QrGenerator::new(config).read_path(image)?;
    println!("{text}");
    Ok(())
}

fn inspect_cmd(config: QrConfig, image: &Path) -> qr_icon::Result<()> {
    let buffer = qr_icon::io::read_image(image)?;
    let (width, height) = (buffer.width(), buffer.height());
    println!("Image: {} ({}x{})", image.display(), width, height);

    let gray = buffer_to_grayscale(&buffer);
    let min = gray.iter().copied().min().unwrap_or(0);
    let max = gray.iter().copied().max().unwrap_or(0);
    let avg = if gray.is_empty() {
        0
    } else {
        gray.iter().map(|&v| v as u64).sum::<u64>() / gray.len() as u64
    };
    println!("Grayscale range: {}-{}, average: {}", min, max, avg);

    let binary = binarize(&gray, width, height);
    let dark = binary.count_dark();
    let total = width * height;
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        dark,
        total,
        if total == 0 { 0.0 } else { dark as f64 * 100.0 / total as f64 }
    );

    let text = QrGenerator::new(config).read(&buffer)?;
    println!("Content: {text}");
    Ok(())
}
