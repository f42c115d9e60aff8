use std::fs;
use std::path::{Path, PathBuf};

use steamcard_core::card::ResolveReport;
use steamcard_core::client::{CLIENT_MODULE, CLIENT_MODULE_FILE};
use steamcard_core::config::RenderMode;
use steamcard_core::markdown::render_document_with_cancel;
use walkdir::{DirEntry, WalkDir};

use super::{cancel_on_ctrl_c, fail, load_config, steam_resolver, summary};
use crate::BuildArgs;

pub async fn run(config: Option<&Path>, profile: Option<&str>, args: BuildArgs) {
    let rc = load_config("build", config, profile);
    let resolver = steam_resolver("build", &rc);
    let cancel = cancel_on_ctrl_c();

    if !args.src.is_dir() {
        fail("build", format!("source directory not found: {}", args.src.display()));
    }

    let sources = match collect_sources(&args.src) {
        Ok(list) => list,
        Err(e) => fail("build", e),
    };

    let mut total = ResolveReport::default();
    for rel in &sources {
        let src = args.src.join(rel);
        let dest = args.out.join(rel).with_extension("html");

        let input = match fs::read_to_string(&src) {
            Ok(s) => s,
            Err(e) => fail("build", format!("cannot read {}: {e}", src.display())),
        };
        let rendered = match render_document_with_cancel(&input, &resolver, cancel.clone()).await {
            Ok(r) => r,
            Err(e) => fail("build", format!("{}: {e}", src.display())),
        };

        if let Err(e) = write_file(&dest, &rendered.html) {
            fail("build", format!("cannot write {}: {e}", dest.display()));
        }
        tracing::debug!(file = %rel.display(), "{}", summary(&rendered.report));

        total.resolved += rendered.report.resolved;
        total.failed += rendered.report.failed;
        total.skipped += rendered.report.skipped;
    }

    if rc.card.mode == RenderMode::Client {
        let dest = args.out.join(CLIENT_MODULE_FILE);
        if let Err(e) = write_file(&dest, CLIENT_MODULE) {
            fail("build", format!("cannot write {}: {e}", dest.display()));
        }
    }

    println!("OK   steamcard build");
    println!("-- {} documents, {} --", sources.len(), summary(&total));
}

/// Markdown files under `root`, relative to it, in a stable order.
fn collect_sources(root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            out.push(rel.to_path_buf());
        }
    }

    Ok(out)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
