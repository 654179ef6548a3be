//! CSV export of simulation traces.
//!
//! A result is written as two files next to each other:
//!
//! ```csv
//! time [s],setpoint,output,error
//! 0,0,0,0
//! ...
//! ```
//!
//! for the continuous trace (`<stem>_continuous.csv`) and
//!
//! ```csv
//! time [s],setpoint,control,output,error
//! ```
//!
//! for the discrete one (`<stem>_discrete.csv`).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rootlocus_types::SimulationResult;

use super::SimulationError;

const CONTINUOUS_HEADER: [&str; 4] = ["time [s]", "setpoint", "output", "error"];
const DISCRETE_HEADER: [&str; 5] = ["time [s]", "setpoint", "control", "output", "error"];

/// CSV export for [`SimulationResult`]
pub trait TraceExport {
    /// Write both traces, returning the continuous and discrete file paths.
    /// A trailing `.csv` on `stem` is dropped.
    fn save_csv(&self, stem: impl AsRef<Path>) -> Result<(PathBuf, PathBuf), SimulationError>;

    fn write_continuous<W: Write>(&self, writer: W) -> Result<(), SimulationError>;

    fn write_discrete<W: Write>(&self, writer: W) -> Result<(), SimulationError>;
}

impl TraceExport for SimulationResult {
    fn save_csv(&self, stem: impl AsRef<Path>) -> Result<(PathBuf, PathBuf), SimulationError> {
        let stem = stem.as_ref();
        let stem = match stem.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => stem.with_extension(""),
            _ => stem.to_path_buf(),
        };

        let continuous = suffixed(&stem, "continuous");
        let discrete = suffixed(&stem, "discrete");

        self.write_continuous(File::create(&continuous)?)?;
        self.write_discrete(File::create(&discrete)?)?;

        log::info!(
            "saved traces to {} and {}",
            continuous.display(),
            discrete.display()
        );
        Ok((continuous, discrete))
    }

    fn write_continuous<W: Write>(&self, writer: W) -> Result<(), SimulationError> {
        write_columns(
            writer,
            &CONTINUOUS_HEADER,
            &[
                &self.time_continuous,
                &self.setpoint_continuous,
                &self.output_continuous,
                &self.error_continuous,
            ],
        )
    }

    fn write_discrete<W: Write>(&self, writer: W) -> Result<(), SimulationError> {
        write_columns(
            writer,
            &DISCRETE_HEADER,
            &[
                &self.time_discrete,
                &self.setpoint_discrete,
                &self.control_discrete,
                &self.output_discrete,
                &self.error_discrete,
            ],
        )
    }
}

fn suffixed(stem: &Path, suffix: &str) -> PathBuf {
    let name = stem
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.with_file_name(format!("{}_{}.csv", name, suffix))
}

fn write_columns<W: Write>(
    writer: W,
    header: &[&str],
    columns: &[&Vec<f64>],
) -> Result<(), SimulationError> {
    let rows = columns.first().map_or(0, |c| c.len());
    if columns.iter().any(|c| c.len() != rows) {
        return Err(SimulationError::RaggedTrace);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header)?;
    for i in 0..rows {
        wtr.write_record(columns.iter().map(|c| c[i].to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
