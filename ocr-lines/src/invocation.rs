use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Print the text lines found in an image as JSON.
///
/// Takes no flags: every argument is positional, only the first is used.
#[derive(Debug, Parser)]
#[command(name = "ocr-lines", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    #[arg(
        value_name = "IMAGE",
        value_parser = clap::builder::ValueParser::os_string(),
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<OsString>,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub image_path: Option<PathBuf>,
}

impl Invocation {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// `args` includes the program name, as `std::env::args_os` does.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let image_path = Cli::try_parse_from(args)
            .ok()
            .and_then(|cli| cli.args.into_iter().next())
            .map(PathBuf::from);
        Self { image_path }
    }
}
