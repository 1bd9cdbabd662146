//! Current signed-in identity.
//!
//! Admin and customer sessions are stored under separate keys and only one
//! of them is present at a time.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::config::AdminCredentials;
use crate::storage::{self, keys, KeyValueStore};
use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub email: String,
    pub first_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSession {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Session {
    Admin(AdminSession),
    Customer(CustomerSession),
}

#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    credentials: AdminCredentials,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, credentials: AdminCredentials) -> Self {
        Self { kv, credentials }
    }

    pub fn current(&self) -> Result<Option<Session>> {
        if let Some(admin) = self.admin()? {
            return Ok(Some(Session::Admin(admin)));
        }
        Ok(self.customer()?.map(Session::Customer))
    }

    pub fn admin(&self) -> Result<Option<AdminSession>> {
        Ok(storage::load(self.kv.as_ref(), keys::ADMIN_SESSION)?)
    }

    pub fn customer(&self) -> Result<Option<CustomerSession>> {
        Ok(storage::load(self.kv.as_ref(), keys::CUSTOMER_SESSION)?)
    }

    /// Plain equality check against the configured credentials. `None` on
    /// mismatch, and any existing session is left alone.
    pub fn sign_in_admin(&self, email: &str, password: &str) -> Result<Option<AdminSession>> {
        if !self.credentials.matches(email, password) {
            tracing::warn!(email, "admin sign-in rejected");
            return Ok(None);
        }
        let session = AdminSession {
            email: self.credentials.email.clone(),
            first_name: self.credentials.first_name.clone(),
        };
        self.kv.remove(keys::CUSTOMER_SESSION)?;
        storage::save(self.kv.as_ref(), keys::ADMIN_SESSION, &session)?;
        Ok(Some(session))
    }

    pub fn sign_in_customer(&self, session: CustomerSession) -> Result<CustomerSession> {
        self.kv.remove(keys::ADMIN_SESSION)?;
        storage::save(self.kv.as_ref(), keys::CUSTOMER_SESSION, &session)?;
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.kv.remove(keys::ADMIN_SESSION)?;
        self.kv.remove(keys::CUSTOMER_SESSION)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::memory;

    fn store() -> SessionStore {
        SessionStore::new(memory(), AdminCredentials::default())
    }

    fn customer() -> CustomerSession {
        CustomerSession {
            email: "esi@example.com".into(), first_name: "Esi".into(),
            last_name: "Owusu".into(), phone: "0201112222".into(),
        }
    }

    #[test]
    fn test_admin_sign_in() {
        let sessions = store();
        assert!(sessions.sign_in_admin("admin@kingkart.com", "wrong").unwrap().is_none());
        assert!(sessions.current().unwrap().is_none());

        let admin = sessions.sign_in_admin("admin@kingkart.com", "Admin123!").unwrap().unwrap();
        assert_eq!(admin.first_name, "Admin");
        assert_eq!(sessions.current().unwrap(), Some(Session::Admin(admin)));
    }

    #[test]
    fn test_one_session_kind_at_a_time() {
        let sessions = store();
        sessions.sign_in_admin("admin@kingkart.com", "Admin123!").unwrap();
        sessions.sign_in_customer(customer()).unwrap();
        assert!(sessions.admin().unwrap().is_none());
        assert_eq!(sessions.current().unwrap(), Some(Session::Customer(customer())));

        sessions.sign_out().unwrap();
        assert!(sessions.current().unwrap().is_none());
    }

    #[test]
    fn test_session_wire_tag() {
        let json = serde_json::to_value(Session::Customer(customer())).unwrap();
        assert_eq!(json["role"], "CUSTOMER");
        assert_eq!(json["firstName"], "Esi");
    }

    #[test]
    fn test_malformed_session_reads_signed_out() {
        let kv = memory();
        kv.set(keys::ADMIN_SESSION, "{".into()).unwrap();
        let sessions = SessionStore::new(kv, AdminCredentials::default());
        assert!(sessions.current().unwrap().is_none());
    }
}
