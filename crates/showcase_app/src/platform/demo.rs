use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use showcase_core::{Msg, PageViewModel, SimulatorId};
use showcase_engine::{CommandClipboard, PageDriver};
use showcase_logging::showcase_info;

use super::presets::{self, DemoPreset};

const BAR_WIDTH: usize = 24;
const SNIPPET_KEY: &str = "install";
const SNIPPET: &str = "cargo add showcase_core showcase_engine";

pub(crate) fn run(presets_path: Option<PathBuf>) -> anyhow::Result<()> {
    let presets = presets::load(presets_path.as_deref())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(drive(presets));
    Ok(())
}

async fn drive(presets: Vec<DemoPreset>) {
    let clipboard = CommandClipboard::detect();
    showcase_info!("Demo clipboard tool: {}", clipboard.program());
    let mut page = PageDriver::new(Arc::new(clipboard));

    for (id, preset) in ids(&presets) {
        page.dispatch(Msg::SimulatorMounted {
            id,
            config: preset.config.clone(),
        });
        page.dispatch(Msg::StartClicked {
            id,
            config: preset.config.clone(),
        });
    }

    while page.state().view().simulators.iter().any(|row| row.running) {
        page.pump().await;
        if page.state_mut().consume_dirty() {
            render(&page.state().view(), &presets);
        }
    }

    page.dispatch(Msg::CopyClicked {
        key: SNIPPET_KEY.to_string(),
        text: SNIPPET.to_string(),
    });
    println!("\n$ {SNIPPET}   [copied]");
    page.pump_until(|state| !state.is_copy_active(SNIPPET_KEY)).await;
    println!("$ {SNIPPET}   [copy]");

    page.dispatch(Msg::PageUnmounted);
}

fn ids(presets: &[DemoPreset]) -> impl Iterator<Item = (SimulatorId, &DemoPreset)> {
    presets
        .iter()
        .enumerate()
        .map(|(index, preset)| (index as SimulatorId + 1, preset))
}

fn render(view: &PageViewModel, presets: &[DemoPreset]) {
    let mut lines = Vec::with_capacity(view.simulators.len());
    for (id, preset) in ids(presets) {
        let Some(row) = view.simulators.iter().find(|row| row.id == id) else {
            continue;
        };
        let percent = row.percent();
        let filled = usize::from(percent) * BAR_WIDTH / 100;
        lines.push(format!(
            "{:<10} [{}{}] {:>3}%{}",
            preset.label,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            percent,
            if row.running { "" } else { "  done" }
        ));
    }
    println!("{}", lines.join("\n"));
    println!();
}
