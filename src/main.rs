//! # idxml-psm
//!
//! Command-line tool for converting OpenMS idXML identifications into PSM
//! Parquet files.
//!
//! ## Usage
//!
//! ```bash
//! # Convert one idXML file, attaching spectra from its mzML
//! idxml-psm convert --idxml-file run1.idXML --mzml-file run1.mzML \
//!     --spectral-data --output-folder out/
//!
//! # Convert a folder of idXML files into one merged file
//! idxml-psm -v convert-batch --idxml-folder results/ --mzml-folder raw/ \
//!     --output-folder out/
//!
//! # Inspect the result
//! idxml-psm info out/merged-psm-<uuid>.psm.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
