//! Extraction driver
//!
//! Walks a decoded directory table in order and carves every entry out of
//! the image, one output at a time. The first failure aborts the run.

use log::info;

use crate::extractor::job::ExtractionJob;
use crate::extractor::sink::OutputSink;
use crate::io::page_reader::RawPageReader;
use crate::io::seekable::SeekableReader;
use crate::nand::errors::NandResult;
use crate::nand::types::DirectoryTable;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// A file written by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Sanitized output name
    pub name: String,
    /// Bytes written
    pub bytes: u64,
}

/// Outcome of a full extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Written files in table order
    pub files: Vec<ExtractedFile>,
    /// Total bytes written
    pub total_bytes: u64,
}

/// Carves directory entries out of an image
pub struct ExtractionDriver<'a> {
    /// Journal for recording operations
    logger: &'a Logger,
    /// Whether to draw a progress bar
    show_progress: bool,
}

impl<'a> ExtractionDriver<'a> {
    /// Creates a driver without a progress bar
    pub fn new(logger: &'a Logger) -> Self {
        ExtractionDriver {
            logger,
            show_progress: false,
        }
    }

    /// Enables or disables the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Extracts every entry of `table` into `sink`, in table order
    pub fn extract_all<R, S>(
        &self,
        reader: &mut RawPageReader<R>,
        table: &DirectoryTable,
        sink: &mut S,
    ) -> NandResult<ExtractionSummary>
    where
        R: SeekableReader,
        S: OutputSink + ?Sized,
    {
        let progress = if self.show_progress {
            ProgressTracker::new(table.total_length(), "Extracting files")
        } else {
            ProgressTracker::hidden()
        };

        let mut summary = ExtractionSummary::default();
        for entry in table.iter() {
            let job = ExtractionJob::new(entry);
            progress.set_message(job.name());

            let bytes = self.run_job(reader, &job, sink)?;
            progress.increment(bytes);

            summary.total_bytes += bytes;
            summary.files.push(ExtractedFile {
                name: job.name().to_string(),
                bytes,
            });
        }
        progress.finish();

        info!("Extracted {} files ({} bytes)", summary.files.len(), summary.total_bytes);
        self.logger.log(&format!("Extracted {} files ({} bytes)", summary.files.len(), summary.total_bytes))?;
        Ok(summary)
    }

    /// Runs a single job and journals it
    fn run_job<R, S>(&self, reader: &mut RawPageReader<R>, job: &ExtractionJob<'_>, sink: &mut S) -> NandResult<u64>
    where
        R: SeekableReader,
        S: OutputSink + ?Sized,
    {
        info!("Dumping {} ({} bytes at {:#x})", job.name(), job.length(), job.offset());
        let bytes = job.run(reader, sink)?;
        self.logger.log(&format!("{}: {} bytes from {:#x}", job.name(), bytes, job.offset()))?;
        Ok(bytes)
    }
}
