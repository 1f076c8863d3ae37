//! Console reporting sink.

use crate::output::Formatter;
use salfit_search::{ReportingSink, Solution};
use std::io::Write;

/// Prints every improvement of the search to stderr.
pub struct ConsoleSink<W: Write + Send = std::io::Stderr> {
    formatter: Formatter,
    iteration: usize,
    writer: W,
}

impl ConsoleSink {
    /// Sink writing to stderr.
    pub fn new(formatter: Formatter) -> Self {
        Self::with_writer(formatter, std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Sink writing to an arbitrary writer.
    pub fn with_writer(formatter: Formatter, writer: W) -> Self {
        Self {
            formatter,
            iteration: 0,
            writer,
        }
    }

    /// Give the writer back.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportingSink for ConsoleSink<W> {
    fn iteration_started(&mut self, iteration: usize) -> anyhow::Result<()> {
        self.iteration = iteration;
        Ok(())
    }

    fn best_selected(&mut self, best: &Solution, improved: bool) -> anyhow::Result<()> {
        if improved {
            let line = self
                .formatter
                .improvement(self.iteration, best.score(), &best.model.parameters);
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }
}
