use autorot::io::{load_rgb_image, save_rgb_image};
use autorot::{
    max_inscribed_side, rotate_with, AngleCost, CostOutput, OutputEncoding, Prediction,
    RotateConfig, SamplerMode,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Autorot CLI: rotation, cropping and angle costs")]
struct Cli {
    /// Enable tracing output for performance profiling.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rotate an image and crop the largest inscribed square.
    Rotate {
        /// Input image (PNG or JPEG).
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Output image; the format follows the extension.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Rotation angle (degrees unless --radians is given).
        #[arg(short, long, allow_hyphen_values = true, default_value_t = 0.0)]
        angle: f64,
        /// Interpret the angle as radians.
        #[arg(long)]
        radians: bool,
        /// Resample the cropped square to this side length.
        #[arg(long, value_name = "PIXELS")]
        out_size: Option<usize>,
        /// Memoize source colors while sampling.
        #[arg(long)]
        cached: bool,
        /// Fill output rows in parallel.
        #[arg(long)]
        parallel: bool,
    },
    /// Print the inscribed square side for an image size and angle.
    Inscribed {
        #[arg(long)]
        width: usize,
        #[arg(long)]
        height: usize,
        /// Rotation angle (degrees unless --radians is given).
        #[arg(short, long, allow_hyphen_values = true)]
        angle: f64,
        /// Interpret the angle as radians.
        #[arg(long)]
        radians: bool,
    },
    /// Evaluate the angle cost for a JSON batch.
    Cost {
        /// JSON file with `encoding`, `predicted` and `target`.
        #[arg(short, long, value_name = "FILE")]
        batch: PathBuf,
    },
    /// Decode raw network outputs from a JSON file into predictions.
    Decode {
        /// JSON file with `encoding` and `outputs`.
        #[arg(short, long, value_name = "FILE")]
        batch: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct CostBatch {
    #[serde(default = "default_encoding")]
    encoding: String,
    predicted: Vec<f32>,
    target: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct DecodeBatch {
    #[serde(default = "default_encoding")]
    encoding: String,
    outputs: Vec<f32>,
}

fn default_encoding() -> String {
    OutputEncoding::default().name().to_string()
}

#[derive(Debug, Serialize)]
struct RotateRecord {
    input: String,
    output: String,
    angle_rad: f64,
    side: usize,
    width: usize,
    height: usize,
}

#[derive(Debug, Serialize)]
struct InscribedRecord {
    width: usize,
    height: usize,
    angle_rad: f64,
    side: usize,
}

#[derive(Debug, Serialize)]
struct CostRecord {
    encoding: String,
    mean: f32,
    values: Vec<f32>,
    gradient: Vec<f32>,
}

impl CostRecord {
    fn new(encoding: OutputEncoding, out: CostOutput) -> Self {
        Self {
            encoding: encoding.name().to_string(),
            mean: out.mean(),
            values: out.values,
            gradient: out.gradient,
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictionRecord {
    angle_rad: f32,
    angle_deg: f32,
    correction_deg: f32,
    confidence: Option<f32>,
}

impl From<Prediction> for PredictionRecord {
    fn from(value: Prediction) -> Self {
        Self {
            angle_rad: value.angle,
            angle_deg: value.degrees(),
            correction_deg: value.correction().to_degrees(),
            confidence: value.confidence,
        }
    }
}

fn to_radians(angle: f64, radians: bool) -> f64 {
    if radians {
        angle
    } else {
        angle.to_radians()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("autorot=info".parse()?))
            .with_target(false)
            .init();
    }

    let json = match cli.command {
        Command::Rotate {
            input,
            output,
            angle,
            radians,
            out_size,
            cached,
            parallel,
        } => {
            let angle = to_radians(angle, radians);
            let image = load_rgb_image(&input)?;
            let cfg = RotateConfig {
                sampler: if cached {
                    SamplerMode::Cached
                } else {
                    SamplerMode::Direct
                },
                parallel,
            };
            let rotated = rotate_with(&image, angle, out_size, &cfg);
            if rotated.is_empty() {
                return Err(format!(
                    "rotating a {}x{} image by {angle} rad leaves no pixels",
                    image.width(),
                    image.height()
                )
                .into());
            }
            save_rgb_image(&rotated, &output)?;
            tracing::info!(path = %output.display(), side = rotated.width(), "saved rotation");
            serde_json::to_string_pretty(&RotateRecord {
                input: input.display().to_string(),
                output: output.display().to_string(),
                angle_rad: angle,
                side: max_inscribed_side(image.width(), image.height(), angle),
                width: rotated.width(),
                height: rotated.height(),
            })?
        }
        Command::Inscribed {
            width,
            height,
            angle,
            radians,
        } => {
            let angle = to_radians(angle, radians);
            serde_json::to_string_pretty(&InscribedRecord {
                width,
                height,
                angle_rad: angle,
                side: max_inscribed_side(width, height, angle),
            })?
        }
        Command::Cost { batch } => {
            let batch: CostBatch = serde_json::from_str(&fs::read_to_string(&batch)?)?;
            let cost = AngleCost::from_name(&batch.encoding)?;
            let out = cost.evaluate(&batch.predicted, &batch.target)?;
            serde_json::to_string_pretty(&CostRecord::new(cost.encoding(), out))?
        }
        Command::Decode { batch } => {
            let batch: DecodeBatch = serde_json::from_str(&fs::read_to_string(&batch)?)?;
            let cost = AngleCost::from_name(&batch.encoding)?;
            let records: Vec<PredictionRecord> = cost
                .decode(&batch.outputs)?
                .into_iter()
                .map(PredictionRecord::from)
                .collect();
            serde_json::to_string_pretty(&records)?
        }
    };

    println!("{json}");
    Ok(())
}
