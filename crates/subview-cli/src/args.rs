use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "subview")]
#[command(about = "Live viewer for Claude subagent transcripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory whose sessions are shown (defaults to the current directory)
    #[arg(long)]
    pub project: Option<String>,

    /// Claude data directory (defaults to $CLAUDE_CONFIG_DIR or ~/.claude)
    #[arg(long)]
    pub claude_dir: Option<String>,

    /// Config file (defaults to $SUBVIEW_CONFIG or the platform config directory)
    #[arg(long)]
    pub config: Option<String>,

    /// Start in verbose format instead of compact
    #[arg(long)]
    pub verbose: bool,

    /// Write diagnostics to this file (also $SUBVIEW_LOG_FILE)
    #[arg(long)]
    pub log_file: Option<String>,
}
