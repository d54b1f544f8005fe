//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::CheckoutService;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// hosted-store client and the checkout service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    supabase: SupabaseClient,
    checkout: CheckoutService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The checkout service is wired over the same hosted-store client the
    /// read paths use; the client's lifecycle stays here, not inside the
    /// workflow.
    #[must_use]
    pub fn new(supabase: SupabaseClient) -> Self {
        let checkout = CheckoutService::new(
            Arc::new(supabase.clone()),
            Arc::new(supabase.clone()),
            Arc::new(supabase.clone()),
        );

        Self {
            inner: Arc::new(AppStateInner { supabase, checkout }),
        }
    }

    /// Get a reference to the hosted-store client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
