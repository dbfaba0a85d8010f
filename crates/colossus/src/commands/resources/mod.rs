pub mod extract;
pub mod list;

#[derive(clap::Subcommand)]
pub enum ResourcesCommands {
    /// Extract a resources archive into a directory
    Extract(extract::ExtractArgs),
    /// List the records of a resources archive
    List(list::ListArgs),
}

impl ResourcesCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ResourcesCommands::Extract(extract) => extract.handle(),
            ResourcesCommands::List(list) => list.handle(),
        }
    }
}
