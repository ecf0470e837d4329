use std::io::Write;
use std::path::Path;

use gala_pipeline::AgentRun;
use gala_store::JsonlStore;

pub fn execute(transcript: &Path, store_dir: Option<&Path>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_to(transcript, store_dir, &mut out)
}

/// Drive the pipeline over a transcript file, writing each chunk as it is
/// produced.
fn execute_to(
    transcript: &Path,
    store_dir: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(transcript)?;
    let records: Vec<String> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("transcript must be a JSON array of strings: {e}"))?;

    let store_root = gala_store::store_root(store_dir);
    let store = JsonlStore::open(store_root)?;

    let mut run = AgentRun::new(&store);
    for record in &records {
        let chunk = run.ingest(record)?;
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
    }
    for chunk in run.finish() {
        out.write_all(chunk.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
