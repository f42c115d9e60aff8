use std::fs;
use std::io::Read;
use std::path::Path;

use steamcard_core::Node;

use super::{cancel_on_ctrl_c, fail, load_config, steam_resolver, summary};
use crate::TreeArgs;

pub async fn run(config: Option<&Path>, profile: Option<&str>, args: TreeArgs) {
    let rc = load_config("tree", config, profile);
    let resolver = steam_resolver("tree", &rc);

    let raw = match args.input {
        Some(ref path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map(|_| buf)
                .map_err(|e| format!("cannot read stdin: {e}"))
        }
    };
    let raw = raw.unwrap_or_else(|e| fail("tree", e));

    let mut tree: Node = match serde_json::from_str(&raw) {
        Ok(t) => t,
        Err(e) => fail("tree", format!("invalid document tree: {e}")),
    };

    let report = resolver.resolve_with_cancel(&mut tree, cancel_on_ctrl_c()).await;
    tracing::info!("{}", summary(&report));

    let json = match serde_json::to_string_pretty(&tree) {
        Ok(s) => s,
        Err(e) => fail("tree", e),
    };

    match args.output {
        Some(ref out) => {
            if let Err(e) = fs::write(out, format!("{json}\n")) {
                fail("tree", format!("cannot write {}: {e}", out.display()));
            }
        }
        None => println!("{json}"),
    }
}
