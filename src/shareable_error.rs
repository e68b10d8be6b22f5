use derive_more::From;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// `anyhow::Error` that can be cloned into store snapshots and sync outcomes.
#[derive(Clone, Error, Debug, From)]
pub struct ShareableError(pub Arc<anyhow::Error>);

impl ShareableError {
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.0.chain().find_map(|cause| cause.downcast_ref::<E>())
    }
}

impl fmt::Display for ShareableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0.as_ref())
    }
}

impl From<anyhow::Error> for ShareableError {
    fn from(e: anyhow::Error) -> Self {
        Self(Arc::new(e))
    }
}
