//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AdminAuthService, LinkAdminService, ResolveService, ShortenService, ShortenSettings,
};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;

pub type DynShortenService = ShortenService<dyn LinkRepository, dyn CodeGenerator>;
pub type DynResolveService = ResolveService<dyn LinkRepository>;
pub type DynLinkAdminService = LinkAdminService<dyn LinkRepository>;

/// Services and settings shared across requests.
///
/// Cloning is cheap; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<DynShortenService>,
    pub resolve_service: Arc<DynResolveService>,
    pub admin_service: Arc<DynLinkAdminService>,
    pub auth_service: Arc<AdminAuthService>,
    pub cache: Arc<dyn CacheService>,
    /// Host used for new short URLs; `None` means "use the request Host header".
    pub host_uri: Option<String>,
}

impl AppState {
    /// Wires the services around a single store handle.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        cache: Arc<dyn CacheService>,
        auth_service: AdminAuthService,
        settings: ShortenSettings,
        host_uri: Option<String>,
    ) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(
                link_repository.clone(),
                generator,
                settings,
            )),
            resolve_service: Arc::new(ResolveService::new(
                link_repository.clone(),
                cache.clone(),
            )),
            admin_service: Arc::new(LinkAdminService::new(link_repository, cache.clone())),
            auth_service: Arc::new(auth_service),
            cache,
            host_uri,
        }
    }
}
