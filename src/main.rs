use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use tensorfile::{
    inspect_file, load, load_tensor, save_container, save_image, save_tensor, CodecConfig, ContainerLayout, Element,
    ElementType, Tensor, TensorFileError,
};

#[derive(Parser)]
#[command(name = "tensorfile", about = "Inspect and convert binary tensor files")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the container kind, element type and tensor shapes
    Inspect { path: PathBuf },
    /// Re-encode a file with another element type
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "float32")]
        to: ElementType,
    },
    /// Export the first tensor of a file as an image
    ToImage { input: PathBuf, output: PathBuf },
    /// Write arange(120) as a [5, 4, 2, 3] int32 tensor and read it back
    Demo { path: PathBuf },
}

fn main() -> Result<(), TensorFileError> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Inspect { path } => {
            let info = inspect_file(&path)?;
            match info.preamble.layout {
                ContainerLayout::Single => println!("single tensor, {}", info.preamble.element_type),
                ContainerLayout::Multi { count } => {
                    println!("{} tensors, {}", count, info.preamble.element_type)
                }
            }
            for (i, desc) in info.shapes.iter().enumerate() {
                println!("  [{}] {:?}", i, desc.to_dims());
            }
            println!("payload: {} bytes", info.payload_bytes());
        }
        Command::Convert { input, output, to } => {
            let config = CodecConfig::default().with_element_type(to).build()?;
            let container = load(&input, &config)?;
            save_container(&output, &container, &config)?;
            info!(from = %container.element_type(), %to, tensors = container.len(), "converted");
        }
        Command::ToImage { input, output } => {
            let tensor = load_tensor(&input, &CodecConfig::default())?;
            save_image(&output, &tensor)?;
            info!(output = %output.display(), shape = ?tensor.shape(), "exported image");
        }
        Command::Demo { path } => {
            let config = CodecConfig::default().with_element_type(ElementType::Int32).build()?;
            let c = Tensor::arange(&[5, 4, 2, 3], ElementType::Int32)?;
            save_tensor(&path, &c, &config)?;

            let p = load_tensor(&path, &config)?;
            println!("shape: {:?}", p.shape());
            let matches = p.get([4, 3, 1, 2]) == Some(Element::Int32(2 + 3 + 18 + 96));
            println!("round trip ok: {}", p == c && matches);
        }
    }

    Ok(())
}
