//! Application shell: route table and the authentication gate.
//!
//! Authentication is a single persisted flag: logging in accepts any
//! credentials and flips it.

use crate::config::{ConfigError, LocalStore, AUTH_KEY};

/// Every navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Patients,
    Owners,
    Schedule,
    ScheduleConfig,
    Hospitalization,
    Inventory,
    Staff,
    Users,
    Records,
    Settings,
    Login,
    Recovery,
    ResetPassword,
}

impl Route {
    /// URL path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Patients => "/patients",
            Route::Owners => "/owners",
            Route::Schedule => "/schedule",
            Route::ScheduleConfig => "/schedule-config",
            Route::Hospitalization => "/hospitalization",
            Route::Inventory => "/inventory",
            Route::Staff => "/staff",
            Route::Users => "/users",
            Route::Records => "/records",
            Route::Settings => "/settings",
            Route::Login => "/login",
            Route::Recovery => "/recovery",
            Route::ResetPassword => "/reset-password",
        }
    }

    /// Parse a URL path. Unknown paths are handled by [`resolve`].
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Dashboard),
            "/patients" => Some(Route::Patients),
            "/owners" => Some(Route::Owners),
            "/schedule" => Some(Route::Schedule),
            "/schedule-config" => Some(Route::ScheduleConfig),
            "/hospitalization" => Some(Route::Hospitalization),
            "/inventory" => Some(Route::Inventory),
            "/staff" => Some(Route::Staff),
            "/users" => Some(Route::Users),
            "/records" => Some(Route::Records),
            "/settings" => Some(Route::Settings),
            "/login" => Some(Route::Login),
            "/recovery" => Some(Route::Recovery),
            "/reset-password" => Some(Route::ResetPassword),
            _ => None,
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Recovery | Route::ResetPassword)
    }
}

/// Map a requested path to the screen actually shown. Unauthenticated
/// visitors only reach the public routes and land on Login otherwise;
/// authenticated users are bounced from the public routes (and from
/// unknown paths) to the dashboard.
pub fn resolve(path: &str, authenticated: bool) -> Route {
    let requested = Route::parse(path);
    if !authenticated {
        return match requested {
            Some(route) if route.is_public() => route,
            _ => Route::Login,
        };
    }
    match requested {
        Some(route) if route.is_public() => Route::Dashboard,
        Some(route) => route,
        None => Route::Dashboard,
    }
}

/// The persisted login state for one profile.
pub struct Session {
    store: LocalStore,
}

impl Session {
    /// Create a session over the profile store.
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Whether the profile holds a live session.
    pub fn is_authenticated(&self) -> bool {
        self.store.get(AUTH_KEY).as_deref() == Some("true")
    }

    /// Flip the flag on. Credentials are not checked.
    pub fn log_in(&self) -> Result<(), ConfigError> {
        self.store.set(AUTH_KEY, "true")
    }

    /// Drop the flag.
    pub fn log_out(&self) -> Result<(), ConfigError> {
        self.store.remove(AUTH_KEY)
    }
}
