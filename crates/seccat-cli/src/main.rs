// crates/seccat-cli/src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use seccat_core::FormatOptions;

mod driver;
mod io;
mod logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nSecure version with symlink protection and input validation"
);

#[derive(Parser, Debug)]
#[command(name = "seccat")]
#[command(about = "Concatenate FILE(s) to standard output, refusing to follow symlinks by default", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"), long_version = LONG_VERSION)]
#[command(disable_version_flag = true)]
#[command(after_help = "Examples:\n  seccat -n file.txt\n  seccat -v binary.data")]
pub struct Cli {
    /// Number all output lines
    #[arg(short = 'n', long)]
    pub number: bool,

    /// Number nonempty output lines, overrides -n
    #[arg(short = 'b', long)]
    pub number_nonblank: bool,

    /// Suppress repeated empty output lines
    #[arg(short = 's', long)]
    pub squeeze_blank: bool,

    /// Display $ at end of each line
    #[arg(short = 'E', long)]
    pub show_ends: bool,

    /// Use ^ and M- notation, except for LFD and TAB
    #[arg(short = 'v', long)]
    pub show_nonprinting: bool,

    /// Display TAB characters as ^I
    #[arg(short = 'T', long)]
    pub show_tabs: bool,

    /// Equivalent to -vET
    #[arg(short = 'A', long)]
    pub show_all: bool,

    /// Equivalent to -vE
    #[arg(short = 'e')]
    pub nonprinting_ends: bool,

    /// Equivalent to -vT
    #[arg(short = 't')]
    pub nonprinting_tabs: bool,

    /// Follow symbolic links (default false)
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Output version information and exit
    #[arg(long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Emit debug diagnostics on stderr
    #[arg(long, hide = true)]
    pub debug: bool,

    /// Files to read; `-` or no FILE reads standard input
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Expand the combined flags into one immutable option set.
    pub fn format_options(&self) -> FormatOptions {
        let all = self.show_all;
        FormatOptions {
            number: self.number || self.number_nonblank,
            number_nonblank: self.number_nonblank,
            squeeze_blank: self.squeeze_blank,
            show_ends: self.show_ends || all || self.nonprinting_ends,
            show_nonprinting: self.show_nonprinting
                || all
                || self.nonprinting_ends
                || self.nonprinting_tabs,
            show_tabs: self.show_tabs || all || self.nonprinting_tabs,
            follow_symlinks: self.follow_symlinks,
        }
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| "seccat".to_string())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit 1; help and version go to stdout and exit 0.
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(1);
        }
        Err(e) => e.exit(),
    };

    let prog = program_name();
    match run(&cli, &prog) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{prog}: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, prog: &str) -> anyhow::Result<ExitCode> {
    logging::init(cli.debug)?;

    let options = cli.format_options();
    let inputs = io::input::input_list(&cli.files);
    let report = driver::process_all(&inputs, &options, prog);

    Ok(if report.failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["seccat"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn show_all_expands_to_v_e_t() {
        let o = parse(&["-A"]).format_options();
        assert!(o.show_nonprinting && o.show_ends && o.show_tabs);
        assert!(!o.number && !o.squeeze_blank);
    }

    #[test]
    fn e_and_t_shortcuts() {
        let e = parse(&["-e"]).format_options();
        assert!(e.show_nonprinting && e.show_ends && !e.show_tabs);

        let t = parse(&["-t"]).format_options();
        assert!(t.show_nonprinting && t.show_tabs && !t.show_ends);
    }

    #[test]
    fn clustered_short_flags_and_long_forms() {
        let o = parse(&["-nsL", "--show-tabs", "a.txt", "-"]).format_options();
        assert!(o.number && o.squeeze_blank && o.follow_symlinks && o.show_tabs);
        assert!(!o.show_nonprinting);
    }

    #[test]
    fn number_nonblank_implies_number() {
        let o = parse(&["-b"]).format_options();
        assert!(o.number && o.number_nonblank);
    }

    #[test]
    fn dash_is_a_positional() {
        let cli = parse(&["-", "x"]);
        assert_eq!(cli.files, vec![PathBuf::from("-"), PathBuf::from("x")]);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["seccat", "-Z"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
