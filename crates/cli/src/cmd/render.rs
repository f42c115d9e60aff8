use std::fs;
use std::path::Path;

use steamcard_core::markdown::render_document_with_cancel;

use super::{cancel_on_ctrl_c, fail, load_config, steam_resolver, summary};
use crate::RenderArgs;

pub async fn run(config: Option<&Path>, profile: Option<&str>, args: RenderArgs) {
    let rc = load_config("render", config, profile);
    let resolver = steam_resolver("render", &rc);

    let input = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => fail("render", format!("cannot read {}: {e}", args.input.display())),
    };

    let rendered = match render_document_with_cancel(&input, &resolver, cancel_on_ctrl_c()).await {
        Ok(r) => r,
        Err(e) => fail("render", e),
    };

    match args.output {
        Some(ref out) => {
            if let Err(e) = fs::write(out, &rendered.html) {
                fail("render", format!("cannot write {}: {e}", out.display()));
            }
            eprintln!("{}: {}", out.display(), summary(&rendered.report));
        }
        None => print!("{}", rendered.html),
    }
}
