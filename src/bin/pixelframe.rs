//! Command-line front end: encode files into images, decode them back, and
//! run the video round trip.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pixelframe::image_io::{decode_file, encode_file};
use pixelframe::media::{locate_ffmpeg, ToolCommand};
use pixelframe::{
    CompressionLevel, EncoderConfiguration, ImageDecoder, ImageEncoder, LosslessFormat,
    PipelineConfiguration, RoundTrip,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixelframe")]
#[command(author, version, about = "Pack binary data into lossless RGB images")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// zlib compression level (0-9)
    #[arg(short, long, global = true, default_value_t = 6)]
    level: u32,

    /// Path to the ffmpeg executable (searched in PATH otherwise)
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into an image (format from the output extension)
    Encode {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(required = true)]
        image: PathBuf,
    },

    /// Decode an image back into the original file
    Decode {
        #[arg(required = true)]
        image: PathBuf,
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Split a video into streams, store each as an image, restore and remux
    Roundtrip {
        /// Input video container
        #[arg(required = true)]
        input: PathBuf,

        /// Directory for streams and images
        #[arg(short, long, default_value = ".")]
        work_dir: PathBuf,

        /// Remuxed output container
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format for the stored streams
        #[arg(long, default_value = "png")]
        format: String,

        /// Refuse streams larger than this many bytes
        #[arg(long)]
        max_size: Option<usize>,
    },

    /// Check that ffmpeg is available
    CheckTools,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "pixelframe=debug".to_string()
        } else {
            "pixelframe=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let encoder_config = EncoderConfiguration {
        compression: CompressionLevel::new(cli.level),
    };

    match cli.command {
        Commands::Encode { input, image } => {
            let encoder = ImageEncoder::new().with_configuration(encoder_config);
            let dims = encode_file(&encoder, &input, &image)
                .with_context(|| format!("failed to encode {}", input.display()))?;
            println!(
                "Encoded {} into {} ({} x {} pixels)",
                input.display(),
                image.display(),
                dims.width,
                dims.height
            );
        }
        Commands::Decode { image, output } => {
            let bytes = decode_file(&ImageDecoder::new(), &image, &output)
                .with_context(|| format!("failed to decode {}", image.display()))?;
            println!(
                "Restored {} bytes from {} into {}",
                bytes,
                image.display(),
                output.display()
            );
        }
        Commands::Roundtrip {
            input,
            work_dir,
            output,
            format,
            max_size,
        } => {
            let config = PipelineConfiguration {
                ffmpeg_path: cli.ffmpeg,
                image_format: LosslessFormat::from_extension(&format)?,
                max_payload_size: max_size,
                encoder: encoder_config,
                ..Default::default()
            };
            let report = RoundTrip::new()
                .with_configuration(config)
                .run(&input, &work_dir, output.as_deref())
                .with_context(|| format!("round trip failed for {}", input.display()))?;

            println!("{}", report.video);
            println!("{}", report.audio);
            if let Some(output) = &report.output {
                println!("Remuxed restored streams into {}", output.display());
            }
            if !report.is_lossless() {
                bail!("restored streams do not match the originals");
            }
        }
        Commands::CheckTools => {
            let ffmpeg = locate_ffmpeg(cli.ffmpeg.as_deref())?;
            let output = ToolCommand::new(ffmpeg.clone()).arg("-version").execute()?;
            let version = output.stdout.lines().next().unwrap_or("unknown version");
            println!("ffmpeg: {} ({})", ffmpeg.display(), version);
        }
    }

    Ok(())
}
