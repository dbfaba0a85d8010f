use clap::Args;
use colossus_resources::{
    compression::Decompress,
    error::Error,
    extract::{display_name, is_garbage, resolve_output_path, COMPRESSED_SUFFIX},
    OodleLibrary, ResourcesArchive,
};
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Cursor, path::PathBuf};
use tracing::{info, warn};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input resources archive
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// A target directory, defaults to a directory named after the archive
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Extract small extensionless root entries instead of skipping them
    #[arg(long, default_value_t = false)]
    extract_garbage: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        if self
            .file
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("texdb"))
        {
            miette::bail!("texdb archives are a legacy format and are not supported");
        }

        let archive_path = self
            .file
            .canonicalize()
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let decompressor =
            OodleLibrary::locate(&OodleLibrary::search_directories(&archive_path));
        if decompressor.is_none() {
            warn!("no decompression library found, compressed records will keep their compressed form");
        }
        let decompress = decompressor.as_ref().map(|library| library as &dyn Decompress);

        let output_dir = match &self.directory {
            Some(directory) => directory.clone(),
            None => {
                let stem = self.file.file_stem().and_then(|stem| stem.to_str()).ok_or_else(
                    || {
                        miette::miette!(
                            "unable to derive an output name from {}",
                            self.file.display()
                        )
                    },
                )?;
                PathBuf::from(stem)
            }
        };
        std::fs::create_dir_all(&output_dir).into_diagnostic()?;

        let data = std::fs::read(&archive_path).into_diagnostic()?;
        let mut archive = ResourcesArchive::new(Cursor::new(data))?;
        info!("archive version {}, {} records", archive.version(), archive.len());

        let total = archive.len();
        let mut extracted = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for index in 0..total {
            let entry = archive.by_index(index)?.clone();
            let name = display_name(index, &entry);

            if !self.extract_garbage && is_garbage(&name, entry.uncompressed_size) {
                skipped += 1;
                continue;
            }

            let path = resolve_output_path(&output_dir, &name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }

            let payload = match archive.read_payload(index, decompress) {
                Ok(payload) => payload,
                Err(e @ Error::OutOfBounds { .. }) => {
                    warn!("skipping {name}: {e}");
                    failed += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let path = if payload.is_fallback() {
                let mut with_suffix = path.into_os_string();
                with_suffix.push(COMPRESSED_SUFFIX);
                PathBuf::from(with_suffix)
            } else {
                path
            };

            std::fs::write(&path, payload.bytes())
                .into_diagnostic()
                .context(format!("writing {}", path.display()))?;

            extracted += 1;
            if extracted % 100 == 0 {
                info!("extracted {extracted}/{total} records");
            }
        }

        info!("extraction complete, {extracted} extracted, {skipped} skipped");
        if failed > 0 {
            warn!("{failed} records could not be read");
        }
        info!("output folder: {}", output_dir.display());

        Ok(())
    }
}
