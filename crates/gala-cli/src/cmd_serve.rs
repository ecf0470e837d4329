use std::path::Path;
use std::sync::Arc;

use gala_serve::{EchoPlanner, ServeConfig};

pub fn execute(bind: &str, port: u16, store_dir: Option<&Path>) -> anyhow::Result<()> {
    let store_root = gala_store::store_root(store_dir);
    let config = ServeConfig {
        bind: bind.to_string(),
        port,
    };
    tokio::runtime::Runtime::new()?.block_on(gala_serve::serve(
        &store_root,
        Arc::new(EchoPlanner),
        config,
    ))
}
