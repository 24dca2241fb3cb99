use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct GlobalArgs {
    /// Do not print any log output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose log output (repeat for more).
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_level(&self, debug: bool) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 if debug => "debug",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
