use crate::core::models::frame::Frame;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Defines the interface for reading and writing frame-based trajectory formats.
///
/// Reading is lazy: [`frames`](TrajectoryFile::frames) returns an iterator that parses
/// one frame per step in a single forward pass over the input. Writing works on one
/// fully materialized frame at a time.
pub trait TrajectoryFile {
    /// The error type for I/O and format errors.
    type Error: Error + From<io::Error>;

    /// The lazy frame iterator produced for a reader of type `R`.
    type Frames<R: BufRead>: Iterator<Item = Result<Frame, Self::Error>>;

    /// Starts parsing frames from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// An iterator yielding each parsed frame, or the first error encountered.
    fn frames<R: BufRead>(reader: R) -> Self::Frames<R>;

    /// Writes a single frame to a writer.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to write.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(frame: &Frame, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads every frame from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns the first parse or I/O error; frames parsed before it are discarded.
    fn read_all<R: BufRead>(reader: R) -> Result<Vec<Frame>, Self::Error> {
        Self::frames(reader).collect()
    }

    /// Opens a file and starts parsing frames from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    fn open<P: AsRef<Path>>(path: P) -> Result<Self::Frames<BufReader<File>>, Self::Error> {
        let file = File::open(path.as_ref())?;
        debug!("Reading frames from '{}'", path.as_ref().display());
        Ok(Self::frames(BufReader::new(file)))
    }

    /// Reads every frame stored in a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or any frame fails to parse.
    fn read_all_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>, Self::Error> {
        Self::open(path)?.collect()
    }

    /// Writes several frames back-to-back, forming a multi-frame trajectory.
    ///
    /// # Errors
    ///
    /// Returns an error if writing any frame fails.
    fn write_all_to(frames: &[Frame], writer: &mut impl Write) -> Result<(), Self::Error> {
        for frame in frames {
            Self::write_to(frame, writer)?;
        }
        Ok(())
    }

    /// Writes a single frame to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), Self::Error> {
        debug!(
            "Writing frame with {} particle(s) to '{}'",
            frame.len(),
            path.as_ref().display()
        );
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        Self::write_to(frame, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes several frames to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_all_to_path<P: AsRef<Path>>(frames: &[Frame], path: P) -> Result<(), Self::Error> {
        debug!(
            "Writing {} frame(s) to '{}'",
            frames.len(),
            path.as_ref().display()
        );
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        Self::write_all_to(frames, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
