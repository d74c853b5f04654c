use std::path::{Path, PathBuf};

use bitmap_extractor::{
    config::Options,
    inspector::PixelTable,
    mode::BitDepth,
    png::{default_output_path, load_image},
    raster::ImageEncoder,
    raw::RawEncoder,
    session::{EditorSession, Event, Notification, Outcome, Response},
    Error,
};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "bitmap-extractor")]
#[command(author, version, about = "Interpret binary files as 1-bit or 8-bit grayscale bitmaps", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interpret a binary file and save it as an image
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Output image path (.png, or .pgm for binary PGM)
        #[arg(short, long, default_value_os_t = default_output_path())]
        output: PathBuf,
    },
    /// Pack a saved image back into a binary file
    Pack {
        /// Image to pack
        image: PathBuf,

        /// Output binary path
        #[arg(short, long)]
        output: PathBuf,

        /// Bit depth of the binary output (1bit or 8bit)
        #[arg(short, long, default_value_t = BitDepth::OneBit)]
        mode: BitDepth,
    },
    /// Print the pixel intensities of a binary file as a table
    Table {
        #[command(flatten)]
        source: SourceArgs,

        /// Values per table row
        #[arg(long)]
        columns: Option<usize>,
    },
    /// Toggle pixels and save the edited bitmap
    Edit {
        #[command(flatten)]
        source: SourceArgs,

        /// Scroll steps applied before clicking, positive to zoom in
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        zoom_steps: i32,

        /// Click position in view coordinates, as X,Y
        #[arg(long = "click", value_parser = parse_point)]
        clicks: Vec<(f32, f32)>,

        /// Output image path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output binary path, re-encoded with the source mode
        #[arg(long)]
        output_bin: Option<PathBuf>,

        /// Output PNG of the view as drawn at the final zoom
        #[arg(long)]
        view_output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Binary file to interpret
    input: PathBuf,

    /// Image width in pixels [default: 128]
    #[arg(short, long)]
    width: Option<String>,

    /// Bit depth: 1bit (black and white) or 8bit (grayscale) [default: 1bit]
    #[arg(short, long)]
    mode: Option<String>,

    /// Only accept .bin / .BIN files
    #[arg(long)]
    strict: bool,

    /// JSON file with default options
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_point(text: &str) -> Result<(f32, f32), String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("Invalid point '{text}': expected X,Y"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("Invalid coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Extract { source, output } => {
            let mut session = open_session(&source)?;
            expect_saved(session.dispatch(Event::SaveImage(output)))?;
            Ok(())
        }
        Command::Pack {
            image,
            output,
            mode,
        } => pack(&image, &output, mode).map_err(|e| e.to_string()),
        Command::Table { source, columns } => {
            let session = open_session(&source)?;
            let columns = columns.unwrap_or(session.options().columns);
            let raster = session
                .raster()
                .ok_or_else(|| Error::FileNotSelected.to_string())?;
            print!("{}", PixelTable::new(raster, columns));
            Ok(())
        }
        Command::Edit {
            source,
            zoom_steps,
            clicks,
            output,
            output_bin,
            view_output,
        } => {
            let mut session = open_session(&source)?;
            expect_done(session.dispatch(Event::Scroll(zoom_steps)))?;
            debug!("Zoom is {}", session.view().zoom());

            let mut toggled = 0;
            for (x, y) in clicks {
                if expect_done(session.dispatch(Event::Click { x, y }))? == Outcome::Redraw {
                    toggled += 1;
                }
            }
            info!("Toggled {toggled} pixel(s)");

            let event = output.map_or(Event::CancelDialog, Event::SaveImage);
            expect_done(session.dispatch(event))?;
            let event = output_bin.map_or(Event::CancelDialog, Event::SaveBin);
            expect_done(session.dispatch(event))?;
            let event = view_output.map_or(Event::CancelDialog, Event::SaveView);
            expect_done(session.dispatch(event))?;
            Ok(())
        }
    }
}

/// Builds a session from the command line and decodes the source file.
fn open_session(source: &SourceArgs) -> Result<EditorSession, String> {
    let mut options = match &source.config {
        Some(path) => Options::load(path).map_err(|e| e.to_string())?,
        None => Options::default(),
    };
    options.strict_extension |= source.strict;

    let mut session = EditorSession::new(options);
    let mut events = vec![Event::OpenFile(source.input.clone())];
    if let Some(width) = &source.width {
        events.push(Event::SetWidth(width.clone()));
    }
    if let Some(mode) = &source.mode {
        events.push(Event::SetMode(mode.clone()));
    }
    events.push(Event::Process);

    for event in events {
        expect_done(session.dispatch(event))?;
    }
    Ok(session)
}

fn pack(image: &Path, output: &Path, mode: BitDepth) -> bitmap_extractor::Result<()> {
    let raster = load_image(image)?;
    RawEncoder::new(&raster, mode).encode_to_file(output)
}

fn expect_done(response: Response) -> Result<Outcome, String> {
    match response {
        Response::Done(outcome) => Ok(outcome),
        Response::Notify(Notification::Error(msg)) => Err(msg),
    }
}

fn expect_saved(response: Response) -> Result<PathBuf, String> {
    match expect_done(response)? {
        Outcome::Saved(path) => {
            println!("Image saved as {}", path.display());
            Ok(path)
        }
        other => Err(format!("Expected a saved file, got {other:?}")),
    }
}
