//! Id-based dispatch in front of a [`Runner`].

use crate::engine::cancel::CancelSignal;
use crate::engine::catalog::{index_by_id, lookup, Catalog, Descriptor};
use crate::engine::runner::{prefer_cancellation, Runner};
use crate::engine::step::StepEvent;
use crate::error::{EngineError, Result};
use std::collections::HashMap;

/// Resolves an algorithm id to a fresh instance and hands it to the runner.
///
/// The descriptor set is re-validated for duplicate ids even when it comes
/// from a [`Catalog`], since pipelines may also be built from hand-assembled
/// lists.
pub struct Pipeline<S, E> {
    runner: Runner<S, E>,
    descriptors: Vec<Descriptor<S, E>>,
    index: HashMap<String, usize>,
}

impl<S, E> Pipeline<S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub fn new(
        runner: Runner<S, E>,
        descriptors: impl IntoIterator<Item = Descriptor<S, E>>,
    ) -> Result<Self> {
        let descriptors: Vec<_> = descriptors.into_iter().collect();
        let index = index_by_id(&descriptors)?;
        Ok(Self {
            runner,
            descriptors,
            index,
        })
    }

    pub fn from_catalog(runner: Runner<S, E>, catalog: &Catalog<S, E>) -> Result<Self> {
        Self::new(runner, catalog.descriptors().iter().cloned())
    }

    pub fn runner(&self) -> &Runner<S, E> {
        &self.runner
    }

    pub fn descriptors(&self) -> &[Descriptor<S, E>] {
        &self.descriptors
    }

    pub fn try_get(&self, id: &str) -> Option<&Descriptor<S, E>> {
        lookup(&self.descriptors, &self.index, id)
    }

    /// Execute the algorithm registered under `id` against a copy of `input`.
    pub async fn execute(&self, id: &str, input: &S, cancel: &CancelSignal) -> Result<S> {
        if id.trim().is_empty() {
            return Err(EngineError::invalid_argument("id", "algorithm id must not be blank"));
        }
        let descriptor = self
            .try_get(id)
            .ok_or_else(|| EngineError::UnknownAlgorithm(id.to_string()))?;

        let algorithm = match descriptor.instantiate() {
            Ok(Some(algorithm)) => algorithm,
            Ok(None) => {
                let err = EngineError::Invariant(format!("factory for '{id}' produced no algorithm"));
                tracing::error!("Pipeline: {}", err);
                return Err(err);
            }
            Err(err) => {
                tracing::error!("Pipeline: factory for '{}' failed: {}", id, err);
                return Err(err);
            }
        };

        match self.runner.execute(algorithm.as_ref(), input, cancel).await {
            Ok(result) => {
                tracing::info!("Pipeline: '{}' completed", id);
                Ok(result)
            }
            Err(err) => {
                let err = prefer_cancellation(err, cancel);
                if err.is_cancelled() {
                    tracing::warn!("Pipeline: execution of '{}' was cancelled", id);
                } else {
                    tracing::error!("Pipeline: execution of '{}' failed: {}", id, err);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithm::{Algorithm, StepPublisher};
    use async_trait::async_trait;

    #[derive(Debug, Clone)]
    struct Bump;

    impl StepEvent for Bump {
        fn kind(&self) -> &'static str {
            "bump"
        }
    }

    struct Increment;

    #[async_trait]
    impl Algorithm<i64, Bump> for Increment {
        fn id(&self) -> &str {
            "increment"
        }

        async fn run(&self, state: &mut i64, publisher: &mut StepPublisher<'_, i64, Bump>) -> Result<()> {
            publisher.checkpoint()?;
            *state += 1;
            publisher.publish(state, Bump).await
        }
    }

    fn pipeline(descriptors: Vec<Descriptor<i64, Bump>>) -> Result<Pipeline<i64, Bump>> {
        Pipeline::new(Runner::new(Vec::new()), descriptors)
    }

    fn increment() -> Descriptor<i64, Bump> {
        Descriptor::<i64, Bump>::builder("increment", "Increment")
            .factory(|| Box::new(Increment))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_dispatches_by_id() {
        let pipeline = pipeline(vec![increment()]).unwrap();
        let result = pipeline.execute("increment", &41, &CancelSignal::new()).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_blank_and_unknown_ids() {
        let pipeline = pipeline(vec![increment()]).unwrap();
        let cancel = CancelSignal::new();

        let blank = pipeline.execute(" ", &0, &cancel).await.unwrap_err();
        assert!(matches!(blank, EngineError::InvalidArgument { name: "id", .. }));

        let unknown = pipeline.execute("decrement", &0, &cancel).await.unwrap_err();
        assert!(matches!(unknown, EngineError::UnknownAlgorithm(id) if id == "decrement"));
    }

    #[tokio::test]
    async fn test_factory_outcomes() {
        let failing = Descriptor::<i64, Bump>::builder("failing", "Failing")
            .fallible_factory(|| Err(EngineError::Config("factory broke".into())))
            .build()
            .unwrap();
        let empty = Descriptor::<i64, Bump>::builder("empty", "Empty")
            .fallible_factory(|| Ok(None))
            .build()
            .unwrap();
        let pipeline = pipeline(vec![failing, empty]).unwrap();
        let cancel = CancelSignal::new();

        let err = pipeline.execute("failing", &0, &cancel).await.unwrap_err();
        assert!(matches!(err, EngineError::Config(msg) if msg == "factory broke"));

        let err = pipeline.execute("empty", &0, &cancel).await.unwrap_err();
        assert!(matches!(err, EngineError::Invariant(_)));
    }

    #[test]
    fn test_duplicate_descriptors_rejected() {
        let err = pipeline(vec![increment(), increment()]).err().unwrap();
        assert!(matches!(err, EngineError::DuplicateId(_)));
    }
}
