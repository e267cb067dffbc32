pub mod claims;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::{Claims, Principal};
pub use identity::{IdentityProvider, JwtIdentityProvider, Session};
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::{
    require_admin, require_owner_or_admin, require_role, require_staff, require_student,
};
