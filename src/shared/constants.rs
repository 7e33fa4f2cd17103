/// Literal rendered and exported when a photo slot is empty
pub const NO_PHOTO: &str = "Sin foto";

/// Cookie that carries the identity provider session token
pub const SESSION_COOKIE: &str = "gruas_session";

/// Destination after a successful login
pub const HOME_PATH: &str = "/dashboard/vales";
