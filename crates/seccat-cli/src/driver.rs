// crates/seccat-cli/src/driver.rs
//
// Per-input loop: every input is attempted, each failure becomes one
// diagnostic line on stderr and only influences the exit status.

use std::io::{self, Write};

use seccat_core::{transform, CatError, FormatOptions};
use tracing::{debug, warn};

use crate::io::input::InputSpec;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub processed: usize,
    pub failures: usize,
}

/// Process inputs in order, writing to stdout.
pub fn process_all(inputs: &[InputSpec], options: &FormatOptions, prog: &str) -> RunReport {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();
    process_all_to(inputs, options, prog, &mut out, &mut err)
}

/// Same as [`process_all`] with explicit sinks.
pub fn process_all_to<W: Write, E: Write>(
    inputs: &[InputSpec],
    options: &FormatOptions,
    prog: &str,
    out: &mut W,
    diag: &mut E,
) -> RunReport {
    let mut report = RunReport::default();

    for spec in inputs {
        report.processed += 1;
        let Err(e) = process_one(spec, options, out) else {
            continue;
        };
        report.failures += 1;

        // What was written before the failure reaches stdout before the
        // diagnostic does; a failing stdout is already reported as `e`.
        let _ = out.flush();
        write_diagnostic(diag, prog, spec, &e);
    }

    report
}

/// `<prog>: <path-or-"stdin">: <description>`
pub fn write_diagnostic<E: Write>(diag: &mut E, prog: &str, spec: &InputSpec, err: &CatError) {
    let _ = writeln!(diag, "{prog}: {}: {err}", spec.label());
}

/// Open one input, stream it through the transformer, release it. The
/// handle is closed on both the success and the error path.
pub fn process_one<W: Write>(
    spec: &InputSpec,
    options: &FormatOptions,
    out: &mut W,
) -> seccat_core::Result<()> {
    debug!(input = %spec.label(), "open");
    let mut source = spec.open(options.follow_symlinks)?;
    let outcome = transform(&mut source, &mut *out, options);
    settle(spec, outcome.map_err(CatError::from), source.close())
}

/// A failed close is a warning only; the transform outcome decides.
pub fn settle(
    spec: &InputSpec,
    outcome: seccat_core::Result<()>,
    closed: io::Result<()>,
) -> seccat_core::Result<()> {
    if let Err(e) = closed {
        warn!(input = %spec.label(), "error closing file: {e}");
    }
    outcome
}
