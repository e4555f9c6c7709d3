// crates/seccat-core/src/transform.rs

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use tracing::debug;

use crate::error::TransformError;
use crate::escape::escape_line_into;
use crate::options::FormatOptions;

/// Chunk size for the raw copy path.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Minimum width of the right-aligned line counter.
pub const NUMBER_WIDTH: usize = 6;

/// Per-stream counters. A fresh value is created for every input, so
/// numbering and squeeze tracking restart with each file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamState {
    pub line_number: u64,
    pub previous_line_was_blank: bool,
}

impl StreamState {
    pub fn new() -> Self {
        Self {
            line_number: 1,
            previous_line_was_blank: false,
        }
    }
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `input` to `output` applying `options`. Selects the raw copy or
/// the line engine once, up front. Output written before a failure is
/// left in place (it is flushed, not discarded).
pub fn transform<R: Read, W: Write>(
    input: R,
    output: W,
    options: &FormatOptions,
) -> Result<(), TransformError> {
    if options.is_passthrough() {
        debug!("raw copy path");
        copy_raw(input, output).map(|_| ())
    } else {
        debug!(?options, "line path");
        transform_lines(input, output, options).map(|_| ())
    }
}

/// Chunked byte copy with read and write failures kept apart. Returns the
/// number of bytes copied.
pub fn copy_raw<R: Read, W: Write>(mut input: R, mut output: W) -> Result<u64, TransformError> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                output.flush().map_err(TransformError::Write)?;
                return Err(TransformError::Read(e));
            }
        };
        output.write_all(&buf[..n]).map_err(TransformError::Write)?;
        total += n as u64;
    }
    output.flush().map_err(TransformError::Write)?;
    Ok(total)
}

/// Run the line engine over a whole stream. Returns the final state.
pub fn transform_lines<R: Read, W: Write>(
    input: R,
    output: W,
    options: &FormatOptions,
) -> Result<StreamState, TransformError> {
    let mut reader = BufReader::new(input);
    let mut out = BufWriter::new(output);
    let mut engine = LineTransformer::new(options);
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                // Lines already emitted stay emitted.
                out.flush().map_err(TransformError::Write)?;
                return Err(TransformError::Read(e));
            }
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        engine.process_line(&line, &mut out)?;
    }

    out.flush().map_err(TransformError::Write)?;
    Ok(engine.state())
}

/// Applies the squeeze, numbering, escaping and end-marker rules to one
/// terminator-stripped line at a time.
pub struct LineTransformer<'a> {
    options: &'a FormatOptions,
    state: StreamState,
    scratch: Vec<u8>,
}

impl<'a> LineTransformer<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            state: StreamState::new(),
            scratch: Vec::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Emit one line. Returns `false` when the line was squeezed away.
    pub fn process_line<W: Write>(&mut self, line: &[u8], out: &mut W) -> Result<bool, TransformError> {
        let opts = self.options;
        let is_blank = line.is_empty();

        if opts.squeeze_blank && is_blank && self.state.previous_line_was_blank {
            return Ok(false);
        }
        self.state.previous_line_was_blank = is_blank;

        if opts.numbers_line(is_blank) {
            write!(out, "{:>width$}\t", self.state.line_number, width = NUMBER_WIDTH)
                .map_err(TransformError::Write)?;
            self.state.line_number += 1;
        }

        if opts.escapes() {
            escape_line_into(line, opts.show_tabs, &mut self.scratch)?;
            out.write_all(&self.scratch).map_err(TransformError::Write)?;
        } else {
            out.write_all(line).map_err(TransformError::Write)?;
        }

        if opts.show_ends {
            out.write_all(b"$").map_err(TransformError::Write)?;
        }
        out.write_all(b"\n").map_err(TransformError::Write)?;
        Ok(true)
    }
}
