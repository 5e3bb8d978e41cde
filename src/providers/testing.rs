//! Scripted in-memory providers for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::geometry::{BoundingBox, Coordinate, Polyline};
use crate::providers::types::{MapFeature, NamePattern, ProviderError, ProviderResult};
use crate::providers::{FeatureSource, Geocoder, RoutingProvider, SafeZoneSource};

#[derive(Default)]
pub struct FakeGeocoder {
    answers: HashMap<String, ProviderResult<Vec<Coordinate>>>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with(mut self, text: &str, answer: ProviderResult<Vec<Coordinate>>) -> Self {
        self.answers.insert(text.to_string(), answer);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn query(&self, text: &str) -> ProviderResult<Vec<Coordinate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers.get(text).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub struct FakeFeatureSource {
    answers: HashMap<NamePattern, ProviderResult<Vec<MapFeature>>>,
    fallback: ProviderResult<Vec<MapFeature>>,
    seen: Mutex<Vec<(BoundingBox, NamePattern, String)>>,
}

impl FakeFeatureSource {
    /// Answers every query with `fallback` unless overridden by [`Self::with`].
    pub fn new(fallback: ProviderResult<Vec<MapFeature>>) -> Self {
        Self {
            answers: HashMap::new(),
            fallback,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(Err(ProviderError::Status(503)))
    }

    pub fn with(mut self, pattern: NamePattern, answer: ProviderResult<Vec<MapFeature>>) -> Self {
        self.answers.insert(pattern, answer);
        self
    }

    pub fn seen(&self) -> Vec<(BoundingBox, NamePattern, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeatureSource for FakeFeatureSource {
    async fn query(
        &self,
        bbox: &BoundingBox,
        pattern: &NamePattern,
        kind: &str,
    ) -> ProviderResult<Vec<MapFeature>> {
        self.seen
            .lock()
            .unwrap()
            .push((*bbox, pattern.clone(), kind.to_string()));
        self.answers
            .get(pattern)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub struct FakeSafeZones {
    label: &'static str,
    answer: ProviderResult<Vec<Coordinate>>,
    calls: AtomicUsize,
}

impl FakeSafeZones {
    pub fn new(label: &'static str, answer: ProviderResult<Vec<Coordinate>>) -> Self {
        Self {
            label,
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SafeZoneSource for FakeSafeZones {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn candidates(&self, _: Coordinate, _: f64, _: &str) -> ProviderResult<Vec<Coordinate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

pub struct FakeRouter {
    answer: ProviderResult<Polyline>,
}

impl FakeRouter {
    pub fn new(answer: ProviderResult<Polyline>) -> Self {
        Self { answer }
    }

    pub fn failing() -> Self {
        Self::new(Err(ProviderError::Transport("connection refused".into())))
    }
}

#[async_trait]
impl RoutingProvider for FakeRouter {
    async fn route(&self, _: Coordinate, _: Coordinate) -> ProviderResult<Polyline> {
        self.answer.clone()
    }
}

pub fn feature(name: &str, points: &[(f64, f64)]) -> MapFeature {
    MapFeature {
        name: name.to_string(),
        geometry: Polyline::new(points.iter().map(|&(lat, lon)| Coordinate::new(lat, lon)).collect())
            .unwrap(),
    }
}
