use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use idxml_psm::batch::convert_file;
use idxml_psm::psm::IdXmlParser;

use super::config::Config;
use super::Profile;

/// Convert one idXML file to a PSM Parquet file
pub fn run(
    idxml_file: PathBuf,
    output_folder: PathBuf,
    mzml_file: Option<PathBuf>,
    output_prefix: String,
    spectral_data: bool,
    profile: Profile,
    config: Option<PathBuf>,
) -> Result<()> {
    if !idxml_file.is_file() {
        anyhow::bail!("idXML file does not exist: {}", idxml_file.display());
    }
    if let Some(mzml) = &mzml_file {
        if !mzml.is_file() {
            anyhow::bail!("mzML file does not exist: {}", mzml.display());
        }
    }
    if spectral_data && mzml_file.is_none() {
        warn!("--spectral-data has no effect without --mzml-file");
    }

    let config = Config::load(config.as_deref())?;
    let writer_config = config.apply_writer(profile.writer_config());

    info!("idXML:   {}", idxml_file.display());
    if let Some(mzml) = &mzml_file {
        info!("mzML:    {}", mzml.display());
    }
    info!("Output:  {}", output_folder.display());
    info!("Profile: {}", profile);

    let converted = convert_file(
        &IdXmlParser,
        &idxml_file,
        mzml_file.as_deref(),
        spectral_data,
        &output_folder,
        &output_prefix,
        &writer_config,
    )
    .with_context(|| format!("Failed to convert {}", idxml_file.display()))?;

    let file_size = std::fs::metadata(&converted.path)
        .map(|m| m.len())
        .unwrap_or(0);
    info!(
        "Wrote {} PSMs ({} with spectra), {:.2} MB",
        converted.records,
        converted.enriched,
        file_size as f64 / 1024.0 / 1024.0
    );
    super::print_output(&converted.path, converted.records);

    Ok(())
}
