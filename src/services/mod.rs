//! Typed route groups over the gateway.
//!
//! Each group is a zero-cost view borrowing the gateway; payloads cross the
//! boundary as opaque JSON values, query parameters as plain string maps.
//! The route set mirrors the backend's `/api/v1` surface.

mod categories;
mod departments;
mod images;
mod session;
mod topics;

pub use categories::Categories;
pub use departments::Departments;
pub use images::{ImageUpload, Images, PAGE_SIZE};
pub use session::Session;
pub use topics::Topics;

use crate::Gateway;

impl Gateway {
    pub fn topics(&self) -> Topics<'_> {
        Topics { gateway: self }
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories { gateway: self }
    }

    pub fn departments(&self) -> Departments<'_> {
        Departments { gateway: self }
    }

    pub fn session(&self) -> Session<'_> {
        Session { gateway: self }
    }

    pub fn images(&self) -> Images<'_> {
        Images { gateway: self }
    }
}
