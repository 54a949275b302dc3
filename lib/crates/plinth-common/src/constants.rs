//! Well-known names shared by the CLI and anything that reads its output.

/// Name of the template output carrying the bootstrap version.
pub const BOOTSTRAP_VERSION_OUTPUT: &str = "BootstrapVersion";

/// Logical ID of the template resource whose `Properties.Value` carries the
/// bootstrap version.
pub const BOOTSTRAP_VERSION_RESOURCE: &str = "CdkBootstrapVersion";

/// Stack name used when neither the command line nor the config names one.
pub const DEFAULT_TOOLKIT_STACK_NAME: &str = "CDKToolkit";

/// Artifact type identifier for a CloudFormation stack in a cloud assembly.
pub const CLOUDFORMATION_STACK_ARTIFACT: &str = "aws:cloudformation:stack";

/// Placeholder account meaning "whatever the current credentials belong to".
pub const UNKNOWN_ACCOUNT: &str = "unknown-account";

/// Placeholder region meaning "whatever the current profile defaults to".
pub const UNKNOWN_REGION: &str = "unknown-region";

/// URL scheme prefix of an environment identifier (`aws://account/region`).
pub const ENVIRONMENT_SCHEME: &str = "aws://";
