//! Injected collaborators and the per-request context.

use crate::{action::Action, config::ResourceConfig};
use crudline_core::{Request, Store, Translator, UrlGenerator};
use std::sync::Arc;

/// The collaborators a controller calls through.
pub struct Services<M> {
    store: Arc<dyn Store<M>>,
    urls: Arc<dyn UrlGenerator>,
    translator: Arc<dyn Translator>,
}

impl<M> Clone for Services<M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            urls: Arc::clone(&self.urls),
            translator: Arc::clone(&self.translator),
        }
    }
}

impl<M> Services<M> {
    /// Bundle collaborators.
    pub fn new(
        store: Arc<dyn Store<M>>,
        urls: Arc<dyn UrlGenerator>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            store,
            urls,
            translator,
        }
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &dyn Store<M> {
        self.store.as_ref()
    }

    /// The URL generator.
    pub fn urls(&self) -> &dyn UrlGenerator {
        self.urls.as_ref()
    }

    /// The translator.
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }
}

/// Everything a pipeline stage can see about the running action.
pub struct Context<'a, M> {
    request: &'a dyn Request,
    services: &'a Services<M>,
    config: &'a ResourceConfig,
    action: Action,
}

impl<'a, M> Context<'a, M> {
    pub(crate) fn new(
        request: &'a dyn Request,
        services: &'a Services<M>,
        config: &'a ResourceConfig,
        action: Action,
    ) -> Self {
        Self {
            request,
            services,
            config,
            action,
        }
    }

    /// The inbound request.
    pub fn request(&self) -> &'a dyn Request {
        self.request
    }

    /// Injected collaborators.
    pub fn services(&self) -> &'a Services<M> {
        self.services
    }

    /// The controller's configuration.
    pub fn config(&self) -> &'a ResourceConfig {
        self.config
    }

    /// The running action.
    pub fn action(&self) -> Action {
        self.action
    }
}
