use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{JourneyRequest, JourneyResponse};
use crate::error::Error;

#[async_trait]
pub trait JourneyAPI {
    async fn plan_journey(&self, request: JourneyRequest) -> Result<JourneyResponse, Error>;
}

pub trait API: JourneyAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
