//! Shared context for API endpoint modules.

use std::sync::Arc;

use crate::pipeline::RequestPipeline;
use crate::token::AccessTokenStore;

/// Resources every endpoint caller needs: the request pipeline and, through
/// it, the credential store.
#[derive(Clone)]
pub struct ApiContext {
    pub(crate) pipeline: Arc<RequestPipeline>,
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl ApiContext {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    pub fn credentials(&self) -> &AccessTokenStore {
        self.pipeline.credentials()
    }
}

/// Trait for endpoint group implementations.
pub trait OpenApi: Send + Sync {
    /// Get a reference to the shared context
    fn context(&self) -> &ApiContext;

    /// Name of this API group for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
