//! Source-control provenance for snapshots.

use tokio::process::Command;

const LOG_TARGET: &str = "provenance";

/// Sentinel recorded when the revision cannot be determined.
pub const UNKNOWN_REVISION: &str = "unknown";

/// Short source-control revision of the running checkout.
///
/// Substitutes [`UNKNOWN_REVISION`] on any failure (no git, not a repository,
/// odd output); provenance is never worth failing a run over.
pub async fn git_commit() -> String {
    match Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().await {
        Ok(output) if output.status.success() => {
            let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if revision.is_empty() {
                UNKNOWN_REVISION.to_string()
            } else {
                revision
            }
        }
        Ok(output) => {
            log::debug!(target: LOG_TARGET, "git rev-parse failed: {}", String::from_utf8_lossy(&output.stderr).trim());
            UNKNOWN_REVISION.to_string()
        }
        Err(e) => {
            log::debug!(target: LOG_TARGET, "could not run git: {e}");
            UNKNOWN_REVISION.to_string()
        }
    }
}
