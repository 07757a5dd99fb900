use anyhow::Result;

/// Whether we are running on macOS
pub fn is_macos() -> bool {
    std::env::consts::OS == "macos"
}

/// Fail unless running on macOS
pub fn require_macos() -> Result<()> {
    if !is_macos() {
        anyhow::bail!("This tool requires macOS");
    }
    Ok(())
}
