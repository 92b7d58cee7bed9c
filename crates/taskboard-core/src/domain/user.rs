//! User Entity

use serde::{Deserialize, Serialize};

use super::Entity;

/// The authenticated user, as returned by `POST /login/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub username: String,
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        Some(self.id)
    }
}
