pub mod http_backend;
pub mod traits;
