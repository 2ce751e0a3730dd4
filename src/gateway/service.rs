//! The transformation gateway.
//!
//! Wraps a [`TextRewriter`] with two guarantees:
//!
//! 1. **Never fails**: credential, upstream and reply errors are logged and
//!    replaced by a result from the [`FallbackPool`]. Both fields always come
//!    from the same source; nothing partial is surfaced.
//! 2. **Never early**: [`TransformationGateway::transform`] resolves no sooner
//!    than the configured floor, however fast the rewriter answers.

use crate::domain::error::RewriteError;
use crate::domain::Transformation;
use crate::gateway::client::TextRewriter;
use crate::gateway::fallback::FallbackPool;
use crate::infrastructure::at_least;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

pub struct TransformationGateway {
    rewriter: Arc<dyn TextRewriter>,
    fallback: FallbackPool,
    floor: Duration,
}

impl TransformationGateway {
    #[must_use]
    pub fn new(rewriter: Arc<dyn TextRewriter>, fallback: FallbackPool, floor: Duration) -> Self {
        Self {
            rewriter,
            fallback,
            floor,
        }
    }

    /// Minimum duration of a [`transform`](Self::transform) call.
    #[must_use]
    pub const fn floor(&self) -> Duration {
        self.floor
    }

    /// Transforms `original_text`, taking at least the floor duration.
    pub async fn transform(&self, original_text: &str) -> Transformation {
        let span = tracing::debug_span!("transform", chars = original_text.chars().count());
        at_least(self.transform_unpaced(original_text), self.floor)
            .instrument(span)
            .await
    }

    /// Transforms `original_text` as fast as the rewriter allows.
    pub async fn transform_unpaced(&self, original_text: &str) -> Transformation {
        let outcome = match self.rewriter.rewrite(original_text).await {
            Ok(transformation) if transformation.is_complete() => Ok(transformation),
            Ok(_) => Err(RewriteError::Incomplete),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(transformation) => {
                tracing::debug!("rewrite succeeded");
                transformation
            }
            Err(RewriteError::MissingCredential) => {
                tracing::info!("no API credential configured, using a pre-written affirmation");
                self.fallback.pick()
            }
            Err(e) => {
                tracing::warn!(error = %e, "rewrite failed, using a pre-written affirmation");
                self.fallback.pick()
            }
        }
    }
}

impl std::fmt::Debug for TransformationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationGateway")
            .field("fallback", &self.fallback)
            .field("floor", &self.floor)
            .finish_non_exhaustive()
    }
}
