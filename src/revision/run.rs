use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::RevisionPipeline;
use crate::config::RevConfig;
use crate::core::RevError;
use crate::graph::{DependencyGraphBuilder, DependencyMap, processing_order};
use crate::manifest::{Manifest, ManifestWriter};
use crate::utils::{ProgressBar, is_within, join_relative, list_files};

/// The dependency map and processing order of an input tree.
#[derive(Debug, Clone)]
pub struct RevisionPlan {
    /// Every file under the input root, in listing order.
    pub files: Vec<String>,
    pub dependencies: DependencyMap,
    /// `files` reordered so dependencies come first.
    pub order: Vec<String>,
}

/// Lists, scans and orders the files under `input` without writing anything.
///
/// # Errors
///
/// Configuration, listing and read errors, and [`RevError::CyclicDependency`].
pub async fn plan(input: &Path, config: &RevConfig) -> Result<RevisionPlan, RevError> {
    config.validate()?;

    let root = input.to_path_buf();
    let files = tokio::task::spawn_blocking(move || list_files(&root))
        .await
        .map_err(|e| RevError::Io(std::io::Error::other(e)))??;
    info!("Found {} files under {}", files.len(), input.display());

    let builder =
        DependencyGraphBuilder::new(input, config.skip_find_deps_set()?, config.skip_rename_set()?)
            .with_max_parallel(config.effective_max_parallel());
    let dependencies = builder.build(&files).await?;

    let order = processing_order(&dependencies)?;

    Ok(RevisionPlan {
        files,
        dependencies,
        order,
    })
}

/// Revisions the tree under `input` into `output` and writes the manifest.
///
/// Files are processed one at a time in dependency order on a blocking task.
/// A manifest left by an earlier run is removed before anything else happens
/// and the new one is written last, so a failed run never leaves one behind.
///
/// # Errors
///
/// [`RevError::ConfigError`] if `output` is `input` or lies inside it, and any
/// error from planning, revisioning or writing the manifest.
pub async fn revise(
    input: &Path,
    output: &Path,
    config: &RevConfig,
    progress: &ProgressBar,
) -> Result<Manifest, RevError> {
    if is_within(output, input) {
        return Err(RevError::ConfigError {
            message: format!(
                "output directory '{}' must not be inside input directory '{}'",
                output.display(),
                input.display()
            ),
        });
    }

    config.validate()?;
    let manifest_path: PathBuf = join_relative(output, &config.manifest);
    remove_stale_manifest(&manifest_path)?;

    let RevisionPlan {
        files,
        dependencies,
        order,
    } = plan(input, config).await?;

    info!("Revisioning {} files into {}", order.len(), output.display());

    progress.set_length(order.len() as u64);
    let mut pipeline = RevisionPipeline::new(input, output, config.skip_rename_set()?);
    let bar = progress.clone();
    let manifest = tokio::task::spawn_blocking(move || {
        for file in &order {
            bar.set_message(file.clone());
            pipeline.process(file, dependencies.dependencies(file))?;
            bar.inc(1);
        }
        Ok::<_, RevError>(pipeline.into_manifest())
    })
    .await
    .map_err(|e| RevError::Io(std::io::Error::other(e)))??;
    progress.finish_and_clear();

    let manifest = manifest.ordered_by(&files);

    if let Some((original, _)) = manifest.iter().find(|(_, revised)| *revised == config.manifest) {
        warn!(
            "Output of '{}' has the manifest name '{}' and will be overwritten by the manifest",
            original, config.manifest
        );
    }
    ManifestWriter::new(&manifest_path).write(&manifest)?;

    Ok(manifest)
}

fn remove_stale_manifest(path: &Path) -> Result<(), RevError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed previous manifest {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RevError::ManifestWriteFailure {
            path: path.to_path_buf(),
            source,
        }),
    }
}
