mod cmd;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "steamcard", version, about = "Steam game cards for markdown documents")]
struct Cli {
    /// Config file (default: ~/.config/steamcard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile to use from the config file
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Render one markdown file to HTML with game cards resolved
    Render(RenderArgs),

    /// Render every markdown file under a directory
    Build(BuildArgs),

    /// Resolve markers in a JSON document tree (hast format)
    ///
    /// Property values are written back as strings: numbers are stringified,
    /// arrays are space-joined, `true` becomes "" and `false` or null
    /// properties are dropped.
    Tree(TreeArgs),

    /// Fetch and print store data for one application id
    Lookup(LookupArgs),

    /// Print the browser module used by client mode
    ClientScript,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markdown file to render
    pub input: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory containing markdown sources
    pub src: PathBuf,

    /// Directory to write HTML into
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// JSON tree to read (default: stdin)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Write the resolved tree here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Steam application id
    pub app_id: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Render(args) => cmd::render::run(config, profile, args).await,
        Commands::Build(args) => cmd::build::run(config, profile, args).await,
        Commands::Tree(args) => cmd::tree::run(config, profile, args).await,
        Commands::Lookup(args) => cmd::lookup::run(config, profile, args).await,
        Commands::ClientScript => cmd::client_script::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "steamcard", &mut std::io::stdout());
        }
    }

    logging::flush();
}
