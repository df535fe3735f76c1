//! Showcase engine: filesystem mirroring and effect execution.
mod clipboard;
mod mirror;
mod runtime;

pub use clipboard::{Clipboard, ClipboardError, CommandClipboard, MemoryClipboard};
pub use mirror::{mirror_assets, ExcludeRule, MirrorError, MirrorJob, MirrorSummary};
pub use runtime::{EffectRunner, PageDriver};
