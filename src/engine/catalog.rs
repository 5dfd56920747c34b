//! Algorithm registry.
//!
//! A [`Descriptor`] names one pluggable algorithm and knows how to build a
//! fresh instance of it. A [`Catalog`] is the de-duplicated, id-keyed set of
//! descriptors that selection UIs and the [`Pipeline`](super::pipeline::Pipeline)
//! dispatch against.
//!
//! # Metadata conventions
//!
//! Descriptors carry free-form string metadata. By convention every
//! registered algorithm provides:
//! - [`COMPLEXITY_AVERAGE`], [`COMPLEXITY_BEST`], [`COMPLEXITY_WORST`]
//! - [`STABILITY`] with the value `"Stable"` or `"Unstable"`

use crate::engine::algorithm::BoxedAlgorithm;
use crate::engine::step::StepEvent;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const COMPLEXITY_AVERAGE: &str = "complexity-average";
pub const COMPLEXITY_BEST: &str = "complexity-best";
pub const COMPLEXITY_WORST: &str = "complexity-worst";
pub const STABILITY: &str = "stability";

/// Factory producing a fresh algorithm instance.
///
/// `Ok(None)` is an engine bug and is reported as an invariant violation
/// by the pipeline; `Err` is propagated verbatim.
pub type AlgorithmFactory<S, E> =
    Arc<dyn Fn() -> Result<Option<BoxedAlgorithm<S, E>>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    Stable,
    Unstable,
}

impl Stability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Stable => "Stable",
            Stability::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stability {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Stable" => Ok(Stability::Stable),
            "Unstable" => Ok(Stability::Unstable),
            other => Err(EngineError::invalid_argument(
                "stability",
                format!("expected 'Stable' or 'Unstable', got '{other}'"),
            )),
        }
    }
}

/// Registration record for one algorithm.
pub struct Descriptor<S, E> {
    id: String,
    display_name: String,
    description: String,
    metadata: BTreeMap<String, String>,
    factory: AlgorithmFactory<S, E>,
}

impl<S, E> Clone for Descriptor<S, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            metadata: self.metadata.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<S, E> fmt::Debug for Descriptor<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl<S, E> Descriptor<S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub fn builder(id: impl Into<String>, display_name: impl Into<String>) -> DescriptorBuilder<S, E> {
        DescriptorBuilder {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            metadata: BTreeMap::new(),
            factory: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn complexity_average(&self) -> Option<&str> {
        self.metadata_value(COMPLEXITY_AVERAGE)
    }

    pub fn complexity_best(&self) -> Option<&str> {
        self.metadata_value(COMPLEXITY_BEST)
    }

    pub fn complexity_worst(&self) -> Option<&str> {
        self.metadata_value(COMPLEXITY_WORST)
    }

    /// Parsed stability flag, `None` when absent or malformed.
    pub fn stability(&self) -> Option<Stability> {
        self.metadata_value(STABILITY).and_then(|s| s.parse().ok())
    }

    /// Run the factory once.
    pub fn instantiate(&self) -> Result<Option<BoxedAlgorithm<S, E>>> {
        (self.factory)()
    }

    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

pub struct DescriptorBuilder<S, E> {
    id: String,
    display_name: String,
    description: String,
    metadata: BTreeMap<String, String>,
    factory: Option<AlgorithmFactory<S, E>>,
}

impl<S, E> DescriptorBuilder<S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn complexity(self, average: &str, best: &str, worst: &str) -> Self {
        self.metadata(COMPLEXITY_AVERAGE, average)
            .metadata(COMPLEXITY_BEST, best)
            .metadata(COMPLEXITY_WORST, worst)
    }

    pub fn stability(self, stability: Stability) -> Self {
        self.metadata(STABILITY, stability.as_str())
    }

    /// Infallible factory shorthand.
    pub fn factory<F>(self, factory: F) -> Self
    where
        F: Fn() -> BoxedAlgorithm<S, E> + Send + Sync + 'static,
    {
        self.fallible_factory(move || Ok(Some(factory())))
    }

    pub fn fallible_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<Option<BoxedAlgorithm<S, E>>> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn build(self) -> Result<Descriptor<S, E>> {
        if self.id.trim().is_empty() {
            return Err(EngineError::invalid_argument("id", "must not be blank"));
        }
        if self.display_name.trim().is_empty() {
            return Err(EngineError::invalid_argument("display_name", "must not be blank"));
        }
        let factory = self
            .factory
            .ok_or_else(|| EngineError::invalid_argument("factory", "must be provided"))?;

        Ok(Descriptor {
            id: self.id,
            display_name: self.display_name,
            description: self.description,
            metadata: self.metadata,
            factory,
        })
    }
}

/// Serialisable view of a descriptor, for selection UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub metadata: BTreeMap<String, String>,
}

/// Immutable id → descriptor registry. Registration order is preserved.
pub struct Catalog<S, E> {
    descriptors: Vec<Descriptor<S, E>>,
    index: HashMap<String, usize>,
}

impl<S, E> Clone for Catalog<S, E> {
    fn clone(&self) -> Self {
        Self {
            descriptors: self.descriptors.clone(),
            index: self.index.clone(),
        }
    }
}

impl<S, E> fmt::Debug for Catalog<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors.iter()).finish()
    }
}

impl<S, E> Catalog<S, E>
where
    S: Send + Sync + 'static,
    E: StepEvent,
{
    pub fn new(descriptors: impl IntoIterator<Item = Descriptor<S, E>>) -> Result<Self> {
        let descriptors: Vec<_> = descriptors.into_iter().collect();
        let index = index_by_id(&descriptors)?;
        Ok(Self { descriptors, index })
    }

    pub fn descriptors(&self) -> &[Descriptor<S, E>] {
        &self.descriptors
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(Descriptor::id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Pure lookup. Blank and unknown ids yield `None`.
    pub fn try_get(&self, id: &str) -> Option<&Descriptor<S, E>> {
        lookup(&self.descriptors, &self.index, id)
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.descriptors.iter().map(Descriptor::entry).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries())?)
    }
}

pub(crate) fn index_by_id<S, E>(descriptors: &[Descriptor<S, E>]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(descriptors.len());
    for (position, descriptor) in descriptors.iter().enumerate() {
        if index.insert(descriptor.id.clone(), position).is_some() {
            return Err(EngineError::DuplicateId(descriptor.id.clone()));
        }
    }
    Ok(index)
}

pub(crate) fn lookup<'a, S, E>(
    descriptors: &'a [Descriptor<S, E>],
    index: &HashMap<String, usize>,
    id: &str,
) -> Option<&'a Descriptor<S, E>> {
    if id.trim().is_empty() {
        return None;
    }
    index.get(id).and_then(|&position| descriptors.get(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithm::{Algorithm, StepPublisher};
    use async_trait::async_trait;

    #[derive(Debug, Clone)]
    struct Noop;

    impl StepEvent for Noop {
        fn kind(&self) -> &'static str {
            "noop"
        }
    }

    struct Idle;

    #[async_trait]
    impl Algorithm<Vec<i32>, Noop> for Idle {
        fn id(&self) -> &str {
            "idle"
        }

        async fn run(
            &self,
            _state: &mut Vec<i32>,
            _publisher: &mut StepPublisher<'_, Vec<i32>, Noop>,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn descriptor(id: &str) -> Descriptor<Vec<i32>, Noop> {
        Descriptor::<Vec<i32>, Noop>::builder(id, "Idle")
            .description("does nothing")
            .complexity("O(1)", "O(1)", "O(1)")
            .stability(Stability::Stable)
            .factory(|| Box::new(Idle))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_rejects_blank_fields() {
        let blank_id = Descriptor::<Vec<i32>, Noop>::builder("  ", "Name")
            .factory(|| Box::new(Idle))
            .build();
        assert!(matches!(blank_id, Err(EngineError::InvalidArgument { name: "id", .. })));

        let blank_name = Descriptor::<Vec<i32>, Noop>::builder("id", "")
            .factory(|| Box::new(Idle))
            .build();
        assert!(matches!(
            blank_name,
            Err(EngineError::InvalidArgument { name: "display_name", .. })
        ));
    }

    #[test]
    fn test_metadata_accessors() {
        let d = descriptor("idle");
        assert_eq!(d.complexity_average(), Some("O(1)"));
        assert_eq!(d.stability(), Some(Stability::Stable));
        assert_eq!(d.metadata_value(STABILITY), Some("Stable"));
        assert!(d.instantiate().unwrap().is_some());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![descriptor("a"), descriptor("a")]).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_try_get_is_pure() {
        let catalog = Catalog::new(vec![descriptor("a"), descriptor("b")]).unwrap();

        let first = catalog.try_get("b").map(Descriptor::id);
        let second = catalog.try_get("b").map(Descriptor::id);
        assert_eq!(first, Some("b"));
        assert_eq!(first, second);
        assert!(catalog.try_get("").is_none());
        assert!(catalog.try_get("   ").is_none());
        assert!(catalog.try_get("missing").is_none());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_entries_serialize_camel_case() {
        let catalog = Catalog::new(vec![descriptor("a")]).unwrap();
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"displayName\": \"Idle\""));
        assert!(json.contains("\"complexity-average\": \"O(1)\""));

        let parsed: Vec<CatalogEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog.entries());
    }

    #[test]
    fn test_stability_parse() {
        assert_eq!("Unstable".parse::<Stability>().unwrap(), Stability::Unstable);
        assert!("stable".parse::<Stability>().is_err());
    }
}
