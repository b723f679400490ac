//! @ai:module:intent Assemble the set of frameworks available to a benchmark run
//! @ai:module:layer application
//! @ai:module:public_api FrameworkRegistry, build_registry
//! @ai:module:stateless true

use crate::config::BenchmarkConfig;
use crate::error::AgentResult;
use crate::frameworks::live::LiveFramework;
use crate::frameworks::mock::{FrameworkProfile, MockFramework};
use crate::frameworks::AgentFramework;
use std::sync::Arc;
use tracing::{info, warn};

/// @ai:intent Frameworks keyed by name, in registration order
#[derive(Clone, Default)]
pub struct FrameworkRegistry {
    frameworks: Vec<Arc<dyn AgentFramework>>,
}

impl FrameworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Add a framework, replacing one with the same name
    /// @ai:effects state:write
    pub fn insert(&mut self, framework: Arc<dyn AgentFramework>) {
        self.frameworks.retain(|f| f.name() != framework.name());
        self.frameworks.push(framework);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentFramework>> {
        self.frameworks.iter().find(|f| f.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frameworks.iter().any(|f| f.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.frameworks.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

/// @ai:intent Build the registry for a run
/// @ai:post niflheim-x is live with a key, simulated when config.run.simulate, absent otherwise
/// @ai:effects pure
pub fn build_registry(
    config: &BenchmarkConfig,
    api_key: Option<String>,
) -> AgentResult<FrameworkRegistry> {
    let mut registry = FrameworkRegistry::new();
    let time_scale = config.run.time_scale;

    if config.run.simulate {
        info!("Using simulated niflheim-x profile");
        registry.insert(Arc::new(MockFramework::new(
            FrameworkProfile::niflheim_x().scaled(time_scale),
        )));
    } else if let Some(key) = api_key {
        registry.insert(Arc::new(LiveFramework::new(config.api.clone(), key)?));
    } else {
        warn!("No API key available, niflheim-x will not be benchmarked");
    }

    for profile in FrameworkProfile::competitors() {
        registry.insert(Arc::new(MockFramework::new(profile.scaled(time_scale))));
    }

    Ok(registry)
}
