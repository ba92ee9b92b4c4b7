use crate::core::io::traits::TrajectoryFile;
use crate::core::models::frame::Frame;
use crate::core::models::particle::Particle;
use crate::core::models::simulation_box::SimulationBox;
use nalgebra::{Point3, Vector3};
use std::fmt;
use std::io::{self, BufRead, Lines, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// Residue and atom numbers wrap at this value in the five-character columns.
const NUMBER_WRAP: usize = 100_000;
/// Upper bound on the particle storage reserved from an atom count before any record is read.
const MAX_RESERVED_PARTICLES: usize = 1 << 16;

/// A fixed-width column of an atom record. Offsets are zero-based, `end` exclusive.
#[derive(Debug, Clone, Copy)]
struct Column {
    start: usize,
    end: usize,
    label: &'static str,
}

impl Column {
    const fn new(start: usize, end: usize, label: &'static str) -> Self {
        Self { start, end, label }
    }
}

const RESIDUE_NUMBER: Column = Column::new(0, 5, "1-5");
const RESIDUE_NAME: Column = Column::new(5, 10, "6-10");
const ATOM_NAME: Column = Column::new(10, 15, "11-15");
const ATOM_NUMBER: Column = Column::new(15, 20, "16-20");
const POSITION: [Column; 3] = [
    Column::new(20, 28, "21-28"),
    Column::new(28, 36, "29-36"),
    Column::new(36, 44, "37-44"),
];
const VELOCITY: [Column; 3] = [
    Column::new(44, 52, "45-52"),
    Column::new(52, 60, "53-60"),
    Column::new(60, 68, "61-68"),
];

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: GroParseErrorKind },
    #[error("Unexpected end of input after line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum GroParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Velocity columns 45-68 are only partially populated")]
    IncompleteVelocity,
    #[error("Box line must hold 3 or 9 numbers, found {count}")]
    InvalidBoxLength { count: usize },
    #[error("Invalid number on box line (value: '{value}')")]
    InvalidBoxValue { value: String },
}

/// Where the parser stands within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectHeader,
    ExpectAtomCount,
    ExpectAtomLine(usize),
    ExpectBox,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseState::ExpectHeader => write!(f, "a title line"),
            ParseState::ExpectAtomCount => write!(f, "an atom count line"),
            ParseState::ExpectAtomLine(remaining) => write!(f, "{} more atom line(s)", remaining),
            ParseState::ExpectBox => write!(f, "a box line"),
        }
    }
}

/// Extracts a fixed-width field, tolerating lines that end before the column does.
///
/// Offsets count characters, not bytes, so a multibyte name does not shift the columns
/// that follow it.
fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut offsets = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()));
    let Some(from) = offsets.nth(start) else {
        return "";
    };
    let to = offsets.nth(end - start - 1).unwrap_or(line.len());
    line[from..to].trim()
}

fn field(line: &str, column: Column) -> &str {
    slice_and_trim(line, column.start, column.end)
}

fn required_field(line: &str, column: Column, line_num: usize) -> Result<&str, GroError> {
    let value = field(line, column);
    if value.is_empty() {
        return Err(GroError::Parse {
            line: line_num,
            kind: GroParseErrorKind::MissingRequiredField {
                columns: column.label.into(),
            },
        });
    }
    Ok(value)
}

fn parse_int<T: FromStr>(line: &str, column: Column, line_num: usize) -> Result<T, GroError> {
    let value = required_field(line, column, line_num)?;
    value.parse().map_err(|_| GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidInt {
            columns: column.label.into(),
            value: value.into(),
        },
    })
}

fn parse_float(value: &str, column: Column, line_num: usize) -> Result<f64, GroError> {
    value.parse().map_err(|_| GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidFloat {
            columns: column.label.into(),
            value: value.into(),
        },
    })
}

fn parse_vector(line: &str, columns: &[Column; 3], line_num: usize) -> Result<[f64; 3], GroError> {
    let mut v = [0.0; 3];
    for (slot, &column) in v.iter_mut().zip(columns) {
        *slot = parse_float(required_field(line, column, line_num)?, column, line_num)?;
    }
    Ok(v)
}

fn parse_atom_count(line: &str, line_num: usize) -> Result<usize, GroError> {
    let value = line.trim();
    value.parse().map_err(|_| GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidAtomCount {
            value: value.into(),
        },
    })
}

fn parse_velocity(line: &str, line_num: usize) -> Result<Option<Vector3<f64>>, GroError> {
    let populated = VELOCITY
        .iter()
        .filter(|&&column| !field(line, column).is_empty())
        .count();
    match populated {
        0 => Ok(None),
        3 => {
            let [vx, vy, vz] = parse_vector(line, &VELOCITY, line_num)?;
            Ok(Some(Vector3::new(vx, vy, vz)))
        }
        _ => Err(GroError::Parse {
            line: line_num,
            kind: GroParseErrorKind::IncompleteVelocity,
        }),
    }
}

fn parse_particle(line: &str, line_num: usize) -> Result<Particle, GroError> {
    let residue_number: isize = parse_int(line, RESIDUE_NUMBER, line_num)?;
    let residue_name = required_field(line, RESIDUE_NAME, line_num)?;
    let atom_name = required_field(line, ATOM_NAME, line_num)?;
    let atom_number: usize = parse_int(line, ATOM_NUMBER, line_num)?;
    let [x, y, z] = parse_vector(line, &POSITION, line_num)?;

    let mut particle = Particle::new(
        residue_number,
        residue_name,
        atom_name,
        atom_number,
        Point3::new(x, y, z),
    );
    particle.velocity = parse_velocity(line, line_num)?;
    Ok(particle)
}

fn parse_box(line: &str, line_num: usize) -> Result<SimulationBox, GroError> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidBoxValue {
                    value: token.into(),
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    SimulationBox::from_values(&values).ok_or(GroError::Parse {
        line: line_num,
        kind: GroParseErrorKind::InvalidBoxLength {
            count: values.len(),
        },
    })
}

/// Wraps a non-negative residue number into the five-character column.
///
/// Negative numbers are written unchanged; any that fit the column read back as-is.
fn wrap_residue_number(number: isize) -> isize {
    if number < 0 {
        number
    } else {
        number % NUMBER_WRAP as isize
    }
}

/// Formats one atom record in the fixed GRO column layout.
///
/// Names longer than five characters are truncated and non-negative numbers wrap at
/// 100000, so every record keeps the column contract regardless of its content.
fn format_particle(particle: &Particle) -> String {
    let p = &particle.position;
    let mut line = format!(
        "{:>5}{:<5.5}{:<5.5}{:>5}{:>8.3}{:>8.3}{:>8.3}",
        wrap_residue_number(particle.residue_number),
        particle.residue_name,
        particle.atom_name,
        particle.atom_number % NUMBER_WRAP,
        p.x,
        p.y,
        p.z
    );
    if let Some(v) = &particle.velocity {
        line.push_str(&format!("{:>8.4}{:>8.4}{:>8.4}", v.x, v.y, v.z));
    }
    line
}

fn format_box(sim_box: &SimulationBox) -> String {
    sim_box
        .values()
        .iter()
        .map(|v| format!("{:>15.9}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A lazy, single-pass GRO frame parser.
///
/// Each call to [`next`](Iterator::next) consumes exactly the lines of one frame. After
/// the first error the reader yields `None`, since the remaining input can no longer be
/// aligned to frame boundaries.
pub struct GroReader<R> {
    lines: Lines<R>,
    line_num: usize,
    finished: bool,
}

impl<R: BufRead> GroReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            finished: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, GroError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
        }
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, GroError> {
        let mut state = ParseState::ExpectHeader;
        let mut header = String::new();
        let mut particles = Vec::new();

        loop {
            let Some(line) = self.next_line()? else {
                return match state {
                    ParseState::ExpectHeader => Ok(None),
                    // A trailing blank line after the last frame is not a new frame.
                    ParseState::ExpectAtomCount if header.trim().is_empty() => Ok(None),
                    _ => Err(GroError::UnexpectedEof {
                        line: self.line_num,
                        expected: state.to_string(),
                    }),
                };
            };

            state = match state {
                ParseState::ExpectHeader => {
                    header = line;
                    ParseState::ExpectAtomCount
                }
                ParseState::ExpectAtomCount => {
                    let count = parse_atom_count(&line, self.line_num)?;
                    particles = Vec::with_capacity(count.min(MAX_RESERVED_PARTICLES));
                    if count == 0 {
                        ParseState::ExpectBox
                    } else {
                        ParseState::ExpectAtomLine(count)
                    }
                }
                ParseState::ExpectAtomLine(remaining) => {
                    particles.push(parse_particle(&line, self.line_num)?);
                    if remaining == 1 {
                        ParseState::ExpectBox
                    } else {
                        ParseState::ExpectAtomLine(remaining - 1)
                    }
                }
                ParseState::ExpectBox => {
                    let sim_box = parse_box(&line, self.line_num)?;
                    trace!(
                        "Parsed frame '{}' with {} particle(s), ending on line {}",
                        header,
                        particles.len(),
                        self.line_num
                    );
                    return Ok(Some(Frame::new(header, sim_box, particles)));
                }
            };
        }
    }
}

impl<R: BufRead> Iterator for GroReader<R> {
    type Item = Result<Frame, GroError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// The GROMACS GRO configuration format.
pub struct GroFile;

impl GroFile {
    /// Renders a frame in its exact textual GRO form.
    ///
    /// Velocity columns are written per particle, only for particles that carry a
    /// velocity. Use [`Frame::without_velocities`] or [`Frame::with_zero_velocities`]
    /// first when uniform records are required.
    pub fn serialize(frame: &Frame) -> String {
        let mut out = String::new();
        out.push_str(frame.header());
        out.push('\n');
        out.push_str(&frame.len().to_string());
        out.push('\n');
        for particle in frame.particles() {
            out.push_str(&format_particle(particle));
            out.push('\n');
        }
        out.push_str(&format_box(frame.sim_box()));
        out.push('\n');
        out
    }
}

impl TrajectoryFile for GroFile {
    type Error = GroError;
    type Frames<R: BufRead> = GroReader<R>;

    fn frames<R: BufRead>(reader: R) -> Self::Frames<R> {
        GroReader::new(reader)
    }

    fn write_to(frame: &Frame, writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(Self::serialize(frame).as_bytes())?;
        Ok(())
    }
}
