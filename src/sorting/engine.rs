use crate::config::EngineConfig;
use crate::engine::{CancelSignal, Pacing, Pipeline, Runner, SharedSink};
use crate::error::{EngineError, Result};
use crate::sorting::catalog::{default_catalog, SortCatalog};
use crate::sorting::{SortOp, SortingState};

pub type SortSink = SharedSink<SortingState, SortOp>;

/// Ready-to-use pipeline over the default sorting catalog.
pub struct SortingEngine {
    catalog: SortCatalog,
    pipeline: Pipeline<SortingState, SortOp>,
    default_algorithm: String,
}

impl SortingEngine {
    /// Engine with no pacing, defaulting to insertion sort.
    pub fn new(sinks: Vec<SortSink>) -> Result<Self> {
        Self::with_config(sinks, &EngineConfig::default())
    }

    pub fn with_config(sinks: Vec<SortSink>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let catalog = default_catalog()?;
        if catalog.try_get(&config.default_algorithm).is_none() {
            tracing::error!(
                "SortingEngine: default algorithm '{}' is not registered",
                config.default_algorithm
            );
            return Err(EngineError::UnknownAlgorithm(config.default_algorithm.clone()));
        }
        let runner = Runner::new(sinks).with_pacing(Pacing::from(&config.pacing));
        let pipeline = Pipeline::from_catalog(runner, &catalog)?;
        Ok(Self {
            catalog,
            pipeline,
            default_algorithm: config.default_algorithm.clone(),
        })
    }

    pub fn catalog(&self) -> &SortCatalog {
        &self.catalog
    }

    pub fn pipeline(&self) -> &Pipeline<SortingState, SortOp> {
        &self.pipeline
    }

    pub fn default_algorithm(&self) -> &str {
        &self.default_algorithm
    }

    pub async fn execute(&self, id: &str, state: &SortingState, cancel: &CancelSignal) -> Result<SortingState> {
        self.pipeline.execute(id, state, cancel).await
    }

    pub async fn execute_default(&self, state: &SortingState, cancel: &CancelSignal) -> Result<SortingState> {
        self.pipeline.execute(&self.default_algorithm, state, cancel).await
    }

    /// Sort plain values, labelling them by input position.
    pub async fn sort_values(
        &self,
        id: &str,
        values: impl IntoIterator<Item = i32>,
        cancel: &CancelSignal,
    ) -> Result<Vec<i32>> {
        let state = SortingState::from_values(values);
        Ok(self.execute(id, &state, cancel).await?.values())
    }
}
