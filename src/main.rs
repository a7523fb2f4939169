use clap::{ArgAction, Parser, Subcommand};
use slideshow_bridge::bridge::{Bridge, Reply};
use slideshow_bridge::manifest::{self, WriteOutcome};
use slideshow_bridge::picker::{FolderPicker, PromptPicker};
use slideshow_bridge::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slideshow-bridge")]
#[command(about = "Pick a folder of images and write its slideshow.json")]
#[command(long_about = "\
Pick a folder of images and write its slideshow.json

The manifest lists every image directly inside the folder, sorted by
filename, as a JSON array of {\"image\": \"<filename>\"} records.

Images are files ending in jpg, jpeg, png, gif, bmp, tiff or webp (any
case). Subfolders are not scanned. An existing slideshow.json is never
overwritten.

Run 'slideshow-bridge gen-config' to generate a documented config.toml.")]
#[command(version = env!("SLIDESHOW_BRIDGE_VERSION"))]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write slideshow.json for a folder
    Build {
        /// Folder containing the images
        folder: PathBuf,
    },
    /// List the images a manifest would contain, without writing it
    Check {
        /// Folder containing the images
        folder: PathBuf,
    },
    /// Print an existing slideshow.json
    Show {
        /// Folder containing slideshow.json
        folder: PathBuf,
    },
    /// Ask for a folder, then write its slideshow.json
    Pick {
        /// Use the OS folder dialog instead of a terminal prompt
        #[arg(long)]
        native: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbosity: u8) {
    // Results go to stdout; logs stay on stderr and are quiet by default.
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("slideshow_bridge={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build { folder } => {
            let bridge_config = config::load_config(&cli.config_dir)?;
            let outcome = manifest::build_manifest(&folder)?;
            output::print_outcome(&outcome);
            print_content_if_enabled(&outcome, &bridge_config)?;
        }
        Command::Check { folder } => {
            let images = manifest::scan_images(&folder)?;
            output::print_image_list(&folder, images.iter().map(String::as_str));
        }
        Command::Show { folder } => {
            let manifest = manifest::load_manifest(&folder)?;
            output::print_image_list(&folder, manifest.images());
        }
        Command::Pick { native } => {
            let bridge_config = config::load_config(&cli.config_dir)?;
            let picker = make_picker(native)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_bridge_event(&event) {
                        eprintln!("{}", line);
                    }
                }
            });

            let mut bridge = Bridge::new(picker, &bridge_config).with_events(tx);
            let reply = bridge.pick_folder();
            // Closes the event channel so the printer can finish
            drop(bridge);
            printer.join().map_err(|_| "event printer panicked")?;

            output::print_reply(&reply);
            match reply {
                Reply::Folder(picked) => {
                    let outcome = picked.manifest?;
                    print_content_if_enabled(&outcome, &bridge_config)?;
                }
                Reply::Error { message, .. } => return Err(message.into()),
                Reply::NotImplemented => return Err("not implemented".into()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Echo a freshly created manifest when `[output] show_content` is set.
fn print_content_if_enabled(
    outcome: &WriteOutcome,
    bridge_config: &config::BridgeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if bridge_config.output.show_content
        && let WriteOutcome::Created { path, .. } = outcome
    {
        println!("{}", std::fs::read_to_string(path)?);
    }
    Ok(())
}

fn make_picker(native: bool) -> Result<Box<dyn FolderPicker>, Box<dyn std::error::Error>> {
    if native {
        #[cfg(feature = "native-dialog")]
        return Ok(Box::new(slideshow_bridge::picker::NativePicker));
        #[cfg(not(feature = "native-dialog"))]
        return Err("built without the `native-dialog` feature".into());
    }
    Ok(Box::new(PromptPicker::stdio()))
}
