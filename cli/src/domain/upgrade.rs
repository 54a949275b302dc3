//! Upgrade guard: the monotonic-upgrade policy for bootstrap stacks.
//!
//! Pure decision function. It must run before anything is packaged or
//! dispatched; a rejection stops the pipeline.

use plinth_common::UpgradeDecision;

use crate::domain::deploy::DeployedStack;
use crate::domain::error::BootstrapError;
use crate::domain::version::BootstrapVersion;

/// Decide whether `proposed` may replace the deployed stack.
///
/// - nothing deployed: always allowed
/// - `proposed >= deployed.version`: allowed
/// - `proposed < deployed.version`: allowed only with `force`
///
/// # Errors
///
/// Returns [`BootstrapError::DowngradeRejected`] carrying both versions when a
/// downgrade is attempted without `force`.
pub fn check_upgrade(
    proposed: BootstrapVersion,
    deployed: Option<&DeployedStack>,
    force: bool,
) -> Result<UpgradeDecision, BootstrapError> {
    let Some(current) = deployed else {
        return Ok(UpgradeDecision::InitialInstall { to: proposed });
    };
    let from = current.version;

    if proposed > from {
        Ok(UpgradeDecision::Upgrade { from, to: proposed })
    } else if proposed == from {
        Ok(UpgradeDecision::Reapply { version: proposed })
    } else if force {
        Ok(UpgradeDecision::ForcedDowngrade { from, to: proposed })
    } else {
        Err(BootstrapError::DowngradeRejected {
            stack_name: current.stack_name.clone(),
            deployed: from,
            proposed,
        })
    }
}
