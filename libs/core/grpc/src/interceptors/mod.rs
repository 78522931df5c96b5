mod auth;

pub use auth::AuthInterceptor;
