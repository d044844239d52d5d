use clap::Parser;

/// mata: a minimal desktop shell for bundled web content.
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[command(name = "mata", about, disable_version_flag = true)]
pub struct Args {
    /// Enable WebView dev tools, allow reload and the context menu, log at debug.
    #[arg(long)]
    pub debug: bool,
}

/// Parse the process arguments. `None` means the first argument was not
/// recognized and the process should exit quietly.
pub fn parse() -> Option<Args> {
    parse_from(std::env::args_os())
}

/// Only the program name and the first argument are examined, and the first
/// argument, if present, must be exactly `--debug`.
pub fn parse_from<I, T>(args: I) -> Option<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args: Vec<std::ffi::OsString> =
        args.into_iter().take(2).map(Into::into).collect();
    if args.get(1).is_some_and(|first| first != "--debug") {
        return None;
    }
    Args::try_parse_from(args).ok()
}
