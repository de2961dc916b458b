use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinate;

/// Source of the "current" coordinate. Permission prompts, update cadence
/// and reverse geocoding are the implementor's business.
#[async_trait]
pub trait CoordinateProvider: Send + Sync + Debug {
    async fn current_coordinate(&self) -> anyhow::Result<Coordinate>;
}

/// Always answers with the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCoordinate(pub Coordinate);

#[async_trait]
impl CoordinateProvider for FixedCoordinate {
    async fn current_coordinate(&self) -> anyhow::Result<Coordinate> {
        Ok(self.0)
    }
}
