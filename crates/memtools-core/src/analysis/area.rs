//! Box cross-section areas and area per lipid.
//!
//! Areas are computed from the `box-x` and `box-y` columns of a GROMACS energy XVG file
//! (nm²) or directly from the boxes of parsed frames.

use super::config::AreaSettings;
use super::error::AnalysisError;
use crate::core::io::xvg::XvgData;
use crate::core::models::frame::Frame;
use crate::core::utils::geometry::mean;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const BOX_X_COLUMN: &str = "box-x";
const BOX_Y_COLUMN: &str = "box-y";
/// nm² to Å².
const NM2_TO_A2: f64 = 100.0;
const TABLE_HEADER: &str = "# Step Area (nm^2)";

/// The xy box area over a series of steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaSeries {
    pub step: Vec<f64>,
    pub area: Vec<f64>,
}

impl AreaSeries {
    /// Joins several series end to end, in the order given.
    pub fn concat(series: &[AreaSeries]) -> AreaSeries {
        AreaSeries {
            step: series.iter().flat_map(|s| s.step.iter().copied()).collect(),
            area: series.iter().flat_map(|s| s.area.iter().copied()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step.is_empty()
    }

    pub fn mean_area(&self) -> Option<f64> {
        mean(self.area.iter().copied())
    }
}

/// Computes the xy area `box-x * box-y` for every step of an XVG series.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingColumn`] if either box column is absent.
pub fn xy_area(data: &XvgData) -> Result<AreaSeries, AnalysisError> {
    let x = data
        .column(BOX_X_COLUMN)
        .ok_or_else(|| AnalysisError::MissingColumn(BOX_X_COLUMN.into()))?;
    let y = data
        .column(BOX_Y_COLUMN)
        .ok_or_else(|| AnalysisError::MissingColumn(BOX_Y_COLUMN.into()))?;
    Ok(AreaSeries {
        step: data.step.clone(),
        area: x.iter().zip(y).map(|(x, y)| x * y).collect(),
    })
}

/// The xy area of each frame's box, in frame order.
pub fn frame_areas(frames: &[Frame]) -> Vec<f64> {
    frames.iter().map(|f| f.sim_box().xy_area()).collect()
}

/// Converts xy areas (nm²) into areas per lipid (Å²).
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidLipidCount`] if `lipids` is zero.
pub fn area_per_lipid(area: &[f64], lipids: usize) -> Result<Vec<f64>, AnalysisError> {
    if lipids == 0 {
        return Err(AnalysisError::InvalidLipidCount);
    }
    Ok(area.iter().map(|a| NM2_TO_A2 * a / lipids as f64).collect())
}

/// Converts a series of xy areas into a series of areas per lipid using `settings`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidLipidCount`] if the configured lipid count is zero.
pub fn area_per_lipid_with(series: &AreaSeries, settings: &AreaSettings) -> Result<AreaSeries, AnalysisError> {
    Ok(AreaSeries {
        step: series.step.clone(),
        area: area_per_lipid(&series.area, settings.lipid_count)?,
    })
}

/// Formats a value as `d.ddddddddddddddddddde±XX`, the layout of C's `%.18e`.
fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

/// Writes the series as a two-column `Step Area` table preceded by a comment header.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_area_table(series: &AreaSeries, mut writer: impl Write) -> Result<(), csv::Error> {
    writeln!(writer, "{}", TABLE_HEADER)?;
    let mut table = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(writer);
    for (step, area) in series.step.iter().zip(&series.area) {
        table.write_record([format_scientific(*step), format_scientific(*area)])?;
    }
    table.flush()?;
    Ok(())
}

/// Writes the area table to a file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or writing fails.
pub fn write_area_table_to_path<P: AsRef<Path>>(series: &AreaSeries, path: P) -> Result<(), csv::Error> {
    debug!(
        "Writing {} area value(s) to '{}'",
        series.len(),
        path.as_ref().display()
    );
    let file = File::create(path.as_ref())?;
    write_area_table(series, file)
}
