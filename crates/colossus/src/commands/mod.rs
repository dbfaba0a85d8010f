pub mod md6;
pub mod resources;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle MD6 model containers
    Md6 {
        #[command(subcommand)]
        command: md6::Md6Commands,
    },
    /// Handle resources archives
    Resources {
        #[command(subcommand)]
        command: resources::ResourcesCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Md6 { command } => command.handle(),
            Commands::Resources { command } => command.handle(),
        }
    }
}
