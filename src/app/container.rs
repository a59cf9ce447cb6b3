use std::sync::Arc;

use crate::adapters::{CutlistAtAdapter, TracingProgressAdapter};
use crate::app::retrieve_interactor::RetrieveInteractor;
use crate::config_initialization::CutlistSettings;
use crate::domain::errors::DomainError;
use crate::ports::{CutlistSourcePort, ProgressPort};

pub trait AppContainer: Send + Sync {
    fn retrieve_interactor(&self) -> Arc<RetrieveInteractor>;
}

pub struct DefaultAppContainer {
    retrieve_interactor: Arc<RetrieveInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &CutlistSettings) -> Result<Self, DomainError> {
        let source_port = Arc::new(CutlistAtAdapter::new(settings.server_config())?);
        let progress_port = Arc::new(TracingProgressAdapter::new());

        let retrieve_interactor = Arc::new(
            RetrieveInteractor::new(
                Arc::clone(&source_port) as Arc<dyn CutlistSourcePort>,
                Arc::clone(&progress_port) as Arc<dyn ProgressPort>,
            )
            .with_tick_interval(settings.tick_interval),
        );

        Ok(Self {
            retrieve_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn retrieve_interactor(&self) -> Arc<RetrieveInteractor> {
        Arc::clone(&self.retrieve_interactor)
    }
}
