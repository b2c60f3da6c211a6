use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod batch;
mod config;
mod convert;
mod info;
mod profile;

pub use profile::Profile;

/// idxml-psm - idXML to PSM Parquet converter
#[derive(Parser)]
#[command(name = "idxml-psm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Writer profile for trading speed against file size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower conversion
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one idXML file to a PSM Parquet file
    Convert {
        /// idXML file containing identifications
        #[arg(long, value_name = "FILE")]
        idxml_file: PathBuf,

        /// Folder where the Parquet file will be written
        #[arg(long, value_name = "DIR")]
        output_folder: PathBuf,

        /// mzML file to attach spectra from, by scan number
        #[arg(long, value_name = "FILE")]
        mzml_file: Option<PathBuf>,

        /// Output file name prefix
        #[arg(long, value_name = "PREFIX", default_value = "psm")]
        output_prefix_file: String,

        /// Attach spectrum peaks from the mzML file
        #[arg(long)]
        spectral_data: bool,

        /// Writer profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Convert many idXML files into one merged PSM Parquet file
    ConvertBatch {
        /// Folder containing idXML files
        #[arg(long, value_name = "DIR")]
        idxml_folder: Option<PathBuf>,

        /// Comma-separated list of idXML files
        #[arg(long, value_name = "FILES")]
        idxml_files: Option<String>,

        /// Folder where the merged Parquet file will be written
        #[arg(long, value_name = "DIR")]
        output_folder: PathBuf,

        /// Output file name prefix (default: merged-psm)
        #[arg(long, value_name = "PREFIX")]
        output_prefix_file: Option<String>,

        /// Folder containing mzML files, paired by file name
        #[arg(long, value_name = "DIR")]
        mzml_folder: Option<PathBuf>,

        /// Comma-separated list of mzML files, paired by position
        #[arg(long, value_name = "FILES")]
        mzml_files: Option<String>,

        /// Stop at the first file that fails to convert
        #[arg(long)]
        fail_fast: bool,

        /// Number of conversion workers (needs the parallel feature)
        #[arg(short = 'j', long, value_name = "N")]
        workers: Option<usize>,

        /// Writer profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a PSM Parquet file
    Info {
        /// PSM Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            idxml_file,
            output_folder,
            mzml_file,
            output_prefix_file,
            spectral_data,
            profile,
            config,
        } => convert::run(
            idxml_file,
            output_folder,
            mzml_file,
            output_prefix_file,
            spectral_data,
            Profile::from(profile),
            config,
        ),
        Commands::ConvertBatch {
            idxml_folder,
            idxml_files,
            output_folder,
            output_prefix_file,
            mzml_folder,
            mzml_files,
            fail_fast,
            workers,
            profile,
            config,
        } => batch::run(batch::BatchArgs {
            idxml_folder,
            idxml_files,
            output_folder,
            output_prefix: output_prefix_file,
            mzml_folder,
            mzml_files,
            fail_fast,
            workers,
            profile: Profile::from(profile),
            config,
        }),
        Commands::Info { file } => info::run(file),
    }
}

/// Print the final output path for the user
fn print_output(path: &std::path::Path, records: usize) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;
        println!(
            "{} {} ({} PSMs)",
            style("Wrote").green().bold(),
            style(path.display()).bold(),
            records
        );
    }
    #[cfg(not(feature = "colorized_output"))]
    println!("Wrote {} ({} PSMs)", path.display(), records);
}
