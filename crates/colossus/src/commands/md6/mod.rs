pub mod convert;
pub mod info;

#[derive(clap::Subcommand)]
pub enum Md6Commands {
    /// Convert every part of a model to OBJ files
    Convert(convert::ConvertArgs),
    /// Print the parts of a model without writing anything
    Info(info::InfoArgs),
}

impl Md6Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Md6Commands::Convert(convert) => convert.handle(),
            Md6Commands::Info(info) => info.handle(),
        }
    }
}
