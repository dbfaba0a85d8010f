use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input model file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let mut total_vertices = 0usize;
        let mut total_faces = 0usize;
        let mut count = 0usize;

        for (number, part) in colossus_md6::read::parts(&data).enumerate() {
            let part = part?;
            println!(
                "part {}: {} vertices, {} faces",
                number + 1,
                part.vertices.len(),
                part.faces.len()
            );

            total_vertices += part.vertices.len();
            total_faces += part.faces.len();
            count += 1;
        }

        println!("{count} parts, {total_vertices} vertices, {total_faces} faces");
        Ok(())
    }
}
