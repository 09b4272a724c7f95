//! Environment-conditioned build plan assembly

use crate::core::{BuildStep, Environment};

/// Number of steps shared by every environment
pub const BASE_STEP_COUNT: usize = 9;

/// Steps appended only for production builds
pub const PRODUCTION_TAIL: [&str; 3] = ["uglify", "clean:scripts", "clean:styles"];

/// Build the ordered compile plan for an environment
///
/// The style compile step carries the environment tag, which selects
/// expanded or compressed output.
pub fn assemble(environment: Environment) -> Vec<BuildStep> {
    let mut steps = vec![
        BuildStep::targeted("clean", "app"),
        BuildStep::targeted("copy", "styles"),
        BuildStep::targeted("copy", "scripts"),
        BuildStep::targeted("copy", "images"),
        BuildStep::new("concat"),
        BuildStep::targeted("sass", environment.tag()),
        BuildStep::new("postcss"),
        BuildStep::new("lint"),
        BuildStep::new("test"),
    ];

    if environment.is_production() {
        steps.extend(PRODUCTION_TAIL.iter().map(|name| BuildStep::new(*name)));
    }

    steps
}
