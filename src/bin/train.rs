//! Trains a stacked autoencoder on a single bitmap and writes its
//! reconstruction next to the input file.

use autoenkoder::bitmap::{Bitmap, PixelFormat};
use autoenkoder::logging::Logging;
use autoenkoder::pixels;
use autoenkoder::stacked::{LayerConfig, StackedAutoencoder};

use std::path::{Path, PathBuf};
use std::process;

const LEARNING_RATE: f64 = 0.075;
const EPOCHS: usize = 20_000;

fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    input.with_file_name(format!("{}_reconstructed.bmp", stem))
}

/// Chains the input size through each requested hidden size.
fn layer_configs(input_size: usize, hidden_sizes: &[usize]) -> Vec<LayerConfig> {
    let mut configs = Vec::with_capacity(hidden_sizes.len());
    let mut current = input_size;
    for &hidden in hidden_sizes {
        configs.push(LayerConfig {
            input_size: current,
            output_size: hidden,
        });
        current = hidden;
    }
    configs
}

fn run(path: &Path, hidden_sizes: &[usize]) -> autoenkoder::Result<()> {
    let bitmap = Bitmap::read(path)?;
    println!(
        "Loaded {}x{} bitmap ({:?})",
        bitmap.header.width, bitmap.header.height, bitmap.header.pixel_format
    );

    let grayscale = bitmap.to_grayscale();
    let example = pixels::normalize_bytes(&grayscale.data);
    let input_size = example.len();

    let default_sizes = [input_size / 4, 10];
    let hidden_sizes = if hidden_sizes.is_empty() {
        &default_sizes[..]
    } else {
        hidden_sizes
    };

    let configs = layer_configs(input_size, hidden_sizes);
    let mut stack =
        StackedAutoencoder::new(&configs).logging(Logging::Epochs(1000));
    println!(
        "Stack of {} layers, sizes {} -> {:?}",
        stack.layer_count(),
        input_size,
        hidden_sizes
    );

    let examples = [example];
    stack.train(&examples, LEARNING_RATE, EPOCHS)?;
    println!(
        "Reconstruction error: {}",
        stack.calculate_error(&examples)?
    );

    let reconstructed = stack.predict(&examples[0])?;
    let output = Bitmap {
        header: grayscale.header,
        data: pixels::to_pixel_data(PixelFormat::Grayscale, &reconstructed)?,
    };
    let output_path = output_path(path);
    output.write(&output_path)?;
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <image.bmp> [hidden sizes...]", args[0]);
        process::exit(1);
    }

    let mut hidden_sizes = Vec::new();
    for arg in &args[2..] {
        match arg.parse::<usize>() {
            Ok(size) if size > 0 => hidden_sizes.push(size),
            _ => {
                eprintln!("invalid hidden size: {}", arg);
                process::exit(1);
            }
        }
    }

    if let Err(err) = run(Path::new(&args[1]), &hidden_sizes) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_configs_chain_sizes() {
        let configs = layer_configs(100, &[25, 10]);
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].input_size, 100);
        assert_eq!(configs[0].output_size, 25);
        assert_eq!(configs[1].input_size, 25);
        assert_eq!(configs[1].output_size, 10);
    }
}
