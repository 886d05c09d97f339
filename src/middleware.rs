use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;

pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Baseline security headers for every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
}

// Placeholder for rate limiting middleware (limits come from
// config.rate_limit once a limiter is wired in)
// pub fn rate_limit_middleware() -> impl Middleware<...> { ... }
