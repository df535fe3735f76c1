use anyhow::Context;
use showcase_engine::mirror_assets;
use showcase_logging::showcase_info;

use super::config::MirrorSettings;

pub(crate) fn run() -> anyhow::Result<()> {
    let settings = MirrorSettings::from_env().context("failed to resolve mirror settings")?;
    showcase_info!(
        "Mirroring assets from {:?} to {:?}",
        settings.source_root,
        settings.destination_root
    );

    let summary = mirror_assets(&settings.job()).with_context(|| {
        format!(
            "failed to mirror {:?} into {:?}",
            settings.source_root, settings.destination_root
        )
    })?;

    showcase_info!(
        "Asset mirror complete: {} copied, {} excluded",
        summary.files_copied,
        summary.files_excluded
    );
    Ok(())
}
