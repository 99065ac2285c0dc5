//! Business logic services

pub mod accounts;
pub mod assets;
pub mod authors;
pub mod books;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub accounts: accounts::AccountsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let assets: Arc<dyn assets::AssetStore> =
            Arc::new(assets::LocalAssetStore::new(&config.storage.media_root));

        Self {
            authors: authors::AuthorsService::new(repository.clone(), assets),
            books: books::BooksService::new(repository.clone()),
            accounts: accounts::AccountsService::new(repository, config.auth.clone()),
        }
    }
}
