use http::Method;
#[cfg(feature = "trace")]
use tracing::instrument;

/// Every path the service answers on. All of them take POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GetAccountByAccountNumber,
    GetAccountByContactId,
    GetAccountByPhoneNumber,
    GetContactByPhoneNumber,
    GetMostRecentOpenCaseByContactId,
}

pub const ROUTES: [Route; 5] = [
    Route::GetAccountByAccountNumber,
    Route::GetAccountByContactId,
    Route::GetAccountByPhoneNumber,
    Route::GetContactByPhoneNumber,
    Route::GetMostRecentOpenCaseByContactId,
];

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::GetAccountByAccountNumber => "/GetAccountByAccountNumber",
            Route::GetAccountByContactId => "/GetAccountByContactId",
            Route::GetAccountByPhoneNumber => "/GetAccountByPhoneNumber",
            Route::GetContactByPhoneNumber => "/GetContactByPhoneNumber",
            Route::GetMostRecentOpenCaseByContactId => "/GetMostRecentOpenCaseByContactId",
        }
    }

    pub fn method(&self) -> Method {
        Method::POST
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(Route),
    MethodNotAllowed(Method),
    NotFound,
}

#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub fn resolve(method: &Method, path: &str) -> Resolution {
    match ROUTES.iter().find(|route| route.path() == path) {
        None => Resolution::NotFound,
        Some(route) if route.method() == method => Resolution::Matched(*route),
        Some(route) => Resolution::MethodNotAllowed(route.method()),
    }
}
