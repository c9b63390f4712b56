//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{PageServiceImpl, PageSettings};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::content::ContentRepository;
use crate::infrastructure::image_url::ImageUrlResolver;
use crate::infrastructure::sanity::SanityClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub page_service: PageServiceImpl,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        // Initialize content client
        let client = SanityClient::new(&config.content)?;
        let images = ImageUrlResolver::new(client.project_id(), client.dataset());
        let repository = ContentRepository::new(Arc::new(client), config.duration_unit);

        Ok(Self::with_repository(config, repository, images))
    }

    /// State over an already-built repository
    pub fn with_repository(
        config: AppConfig,
        repository: ContentRepository,
        images: ImageUrlResolver,
    ) -> Self {
        let page_service = PageServiceImpl::new(
            repository,
            images,
            PageSettings {
                site_url: config.site_url.clone(),
                mapbox_token: config.mapbox_token.clone(),
            },
        );

        Self {
            config,
            page_service,
        }
    }
}
