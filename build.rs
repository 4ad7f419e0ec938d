use anyhow::Result;
use vergen::EmitBuilder;

// Emits VERGEN_GIT_SHA for the CLI's debug banner; outside a git checkout
// vergen falls back to placeholder values.
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
