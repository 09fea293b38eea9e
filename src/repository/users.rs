//! Users table mapping

use super::Record;
use crate::models::User;

impl Record for User {
    const TABLE: &'static str = "users";
    const LABEL: &'static str = "User";
    const COLLECTION: &'static str = "users";
    const KEY_COLUMN: &'static str = "email";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "email"];

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> Option<&str> {
        Some(&self.email)
    }
}
