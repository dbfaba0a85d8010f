use clap::Args;
use colossus_md6::transform::{self, TransformOptions};
use colossus_md6::write::write_obj;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::BufWriter, path::PathBuf};
use tracing::info;

/// Transform passes baked into the converter. These mirror the coordinate
/// conventions of the tools the meshes are imported into and are not runtime
/// options.
const ROTATE_X_MINUS_90: bool = true;
const FLIP_UV_MAPS: bool = true;
const FLIP_FACE_ORIENTATION: bool = true;
const SHADE_SMOOTH: bool = true;

#[derive(Args)]
pub struct ConvertArgs {
    /// An input model file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let stem = self
            .file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                miette::miette!("unable to derive an output name from {}", self.file.display())
            })?;

        let output_dir = self.file.with_file_name(&stem);
        std::fs::create_dir_all(&output_dir).into_diagnostic()?;

        let options = TransformOptions {
            rotate_x_minus_90: ROTATE_X_MINUS_90,
            flip_uvs: FLIP_UV_MAPS,
            flip_faces: FLIP_FACE_ORIENTATION,
            smooth_normals: SHADE_SMOOTH,
        };

        let mut count = 0usize;
        for (number, part) in colossus_md6::read::parts(&data).enumerate() {
            let mut part = part?;
            transform::apply(&mut part, options);

            let path = output_dir.join(format!("{}_part{}.obj", stem, number + 1));
            info!(
                "writing {} ({} vertices, {} faces)",
                path.display(),
                part.vertices.len(),
                part.faces.len()
            );

            let file = File::create(&path)
                .into_diagnostic()
                .context(format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_obj(&mut out, &part)?;

            count += 1;
        }

        info!("converted {count} parts");
        Ok(())
    }
}
