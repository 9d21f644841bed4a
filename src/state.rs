use std::sync::Arc;

use actix_web::{error::InternalError, web, HttpResponse};
use chrono::Duration;
use serde_json::json;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::Config;
use crate::services::{AccountService, ProfileService, TaskService};
use crate::storage::{ImageStore, LocalImageStore};
use crate::store::{StoreHealth, TaskStore, UserStore};

/// Everything the handlers and the auth middleware need, built once and
/// shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub accounts: web::Data<AccountService>,
    pub tasks: web::Data<TaskService>,
    pub profiles: web::Data<ProfileService>,
    pub tokens: web::Data<TokenService>,
    pub store_health: web::Data<dyn StoreHealth>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, images: Arc<dyn ImageStore>, hasher: PasswordHasher, tokens: TokenService) -> Self
    where
        S: UserStore + TaskStore + StoreHealth + 'static,
    {
        let tokens = Arc::new(tokens);
        let store_health: Arc<dyn StoreHealth> = store.clone();
        let users: Arc<dyn UserStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store;

        Self {
            accounts: web::Data::new(AccountService::new(users.clone(), hasher, tokens.clone())),
            tasks: web::Data::new(TaskService::new(tasks)),
            profiles: web::Data::new(ProfileService::new(users, images)),
            tokens: web::Data::from(tokens),
            store_health: web::Data::from(store_health),
        }
    }

    /// Builds the state for the running server from its configuration.
    pub fn from_config<S>(config: &Config, store: Arc<S>) -> Self
    where
        S: UserStore + TaskStore + StoreHealth + 'static,
    {
        let images = Arc::new(LocalImageStore::new(&config.upload_dir, &config.public_base_url));
        Self::new(
            store,
            images,
            PasswordHasher::new(config.bcrypt_cost),
            TokenService::new(&config.jwt_secret, Duration::hours(config.jwt_ttl_hours)),
        )
    }

    /// Registers the shared services and extractor configuration.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.accounts.clone())
            .app_data(self.tasks.clone())
            .app_data(self.profiles.clone())
            .app_data(self.tokens.clone())
            .app_data(self.store_health.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let message = err.to_string();
                InternalError::from_response(err, bad_request(message)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                let message = err.to_string();
                InternalError::from_response(err, bad_request(message)).into()
            }));
    }
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "message": message }))
}
