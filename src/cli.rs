use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "goshare",
    about = "Upload files or screenshots over SFTP and share the public URL",
    long_about = "goshare uploads a local file, several files, or a freshly captured screenshot \
                  to your own server over SFTP and prints the public URL of the upload. \
                  Remote names are random letters unless --keepname is given. \
                  Settings are read from ~/.config/goshare/settings.json.",
    disable_version_flag = true,
    after_help = "EXAMPLES:\n  \
    goshare -s -c\n  \
    goshare -f notes.txt\n  \
    goshare -k -f a.png b.png c.png\n  \
    goshare --settings"
)]
pub struct Args {
    #[arg(short = 's', long, help = "Capture a screenshot with maim")]
    pub screenshot: bool,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        num_args = 1..,
        action = ArgAction::Append,
        help = "Local file(s) to upload",
        long_help = "Local file(s) to upload. Repeat the flag or list several paths. \
                     With more than one file every upload runs concurrently and each \
                     finished file is printed as `path: url`."
    )]
    pub files: Vec<PathBuf>,

    #[arg(
        short = 'k',
        long = "keepname",
        help = "Keep the local file name instead of a random one"
    )]
    pub keep_name: bool,

    #[arg(
        short = 'c',
        long = "copy",
        help = "Copy the URL to the clipboard instead of printing it"
    )]
    pub copy: bool,

    #[arg(short = 'v', long, help = "Print version number")]
    pub version: bool,

    #[arg(long, help = "Print the loaded settings")]
    pub settings: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Settings file to use",
        long_help = "Read settings from PATH instead of ~/.config/goshare/settings.json."
    )]
    pub config: Option<PathBuf>,

    #[arg(short = 'q', long, help = "Only print URLs and errors")]
    pub quiet: bool,

    #[arg(long, conflicts_with = "quiet", help = "Print connection and transfer details")]
    pub verbose: bool,

    /// Set by goshare itself when it detaches a process to own the clipboard.
    #[arg(long = "hold-clipboard", value_name = "TEXT", hide = true)]
    pub hold_clipboard: Option<String>,
}

impl Args {
    /// True when there is nothing to upload and nothing to print.
    pub fn is_empty(&self) -> bool {
        !self.screenshot && self.files.is_empty() && !self.settings
    }
}
