use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum XvgError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("Line {line} has {found} column(s), expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Legend '{legend}' has no matching data column ({columns} column(s) present)")]
    LegendWithoutColumn { legend: String, columns: usize },
}

/// A time series read from a GROMACS XVG file.
///
/// The first data column is the step (or time). Every `@ sN legend "..."` directive
/// names data column `N + 1`; legend names are lower-cased with quotes removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XvgData {
    pub step: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl XvgData {
    /// Looks up a named column (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let name = name.to_lowercase();
        self.columns
            .iter()
            .find(|(legend, _)| *legend == name)
            .map(|(_, values)| values.as_slice())
    }

    /// The column names in legend order.
    pub fn legends(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(legend, _)| legend.as_str())
    }

    pub fn len(&self) -> usize {
        self.step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step.is_empty()
    }
}

fn parse_legend(line: &str) -> Option<String> {
    if !line.starts_with("@ s") {
        return None;
    }
    let (_, legend) = line.rsplit_once("legend")?;
    Some(legend.trim().replace('"', "").to_lowercase())
}

/// The GROMACS XVG time-series format.
pub struct XvgFile;

impl XvgFile {
    /// Reads an XVG file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a data value is not a number, if data rows disagree on the
    /// number of columns, or if a legend names a column that does not exist.
    pub fn read_from(reader: &mut impl BufRead) -> Result<XvgData, XvgError> {
        let mut legends = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut width = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if let Some(legend) = parse_legend(&line) {
                legends.push(legend);
                continue;
            }
            if line.starts_with('#') || line.starts_with('@') || line.trim().is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| XvgError::InvalidNumber {
                        line: line_num,
                        value: token.into(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(XvgError::RaggedRow {
                    line: line_num,
                    expected,
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        let width = width.unwrap_or(0);
        let data_columns = width.saturating_sub(1);
        if rows.is_empty() {
            return Ok(XvgData {
                step: Vec::new(),
                columns: legends.into_iter().map(|l| (l, Vec::new())).collect(),
            });
        }
        if let Some(legend) = legends.get(data_columns) {
            return Err(XvgError::LegendWithoutColumn {
                legend: legend.clone(),
                columns: data_columns,
            });
        }

        let step = rows.iter().map(|row| row[0]).collect();
        let columns = legends
            .into_iter()
            .enumerate()
            .map(|(i, legend)| (legend, rows.iter().map(|row| row[i + 1]).collect()))
            .collect();
        debug!("Read {} XVG row(s) with {} column(s)", rows.len(), width);
        Ok(XvgData { step, columns })
    }

    /// Reads an XVG file from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<XvgData, XvgError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
