//! Remote user/contact directory client.
//!
//! Mirrors the profile and contact list to a hosted directory and
//! verifies phone numbers by one-time code. This sits entirely outside
//! the dispatch path -- a directory outage never touches an
//! activation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;
use crate::profile::User;

/// JSON REST client for the directory service.
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct UserRecord<'a> {
    name: &'a str,
    age: &'a str,
    address: &'a str,
    gender: &'a str,
    verified: bool,
}

#[derive(Serialize)]
struct CodeRecord<'a> {
    phone: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Upsert the profile keyed by phone number, then replace the
    /// stored contact set with the local one (the directory never
    /// merges contact lists).
    pub async fn sync_user(&self, user: &User) -> Result<(), DirectoryError> {
        let record = UserRecord {
            name: &user.name,
            age: &user.age,
            address: &user.address,
            gender: &user.gender,
            verified: user.verified,
        };
        let resp = self
            .client
            .put(format!("{}/users/{}", self.base_url, user.phone))
            .json(&record)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(DirectoryError::Rejected {
                status: resp.status().as_u16(),
            });
        }

        let resp = self
            .client
            .put(format!("{}/users/{}/contacts", self.base_url, user.phone))
            .json(&user.contacts)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(DirectoryError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Generate a 6-digit verification code and register it with the
    /// directory. Returns the code for delivery to the user.
    pub async fn request_code(&self, phone: &str) -> Result<String, DirectoryError> {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        let resp = self
            .client
            .post(format!("{}/verification_codes", self.base_url))
            .json(&CodeRecord { phone, code: &code })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(DirectoryError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        Ok(code)
    }

    /// Check a code the user typed back. Expired or unknown codes
    /// verify as false, not as an error.
    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, DirectoryError> {
        let resp = self
            .client
            .post(format!("{}/verification_codes/verify", self.base_url))
            .json(&CodeRecord { phone, code })
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(DirectoryError::Rejected {
                status: resp.status().as_u16(),
            });
        }
        let body: VerifyResponse = resp.json().await?;
        Ok(body.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Contact;

    fn test_user() -> User {
        let mut user = User::new("Ana", "30", "1 Main St", "+15550000", "female");
        user.add_contact(Contact {
            name: "Alice".to_string(),
            phone: "+1-555-1".to_string(),
            relationship: "Family".to_string(),
        })
        .unwrap();
        user
    }

    #[tokio::test]
    async fn sync_user_upserts_profile_and_replaces_contacts() {
        let mut server = mockito::Server::new_async().await;
        let profile_mock = server
            .mock("PUT", "/users/+15550000")
            .match_header("content-type", "application/json")
            .with_status(200)
            .create_async()
            .await;
        let contacts_mock = server
            .mock("PUT", "/users/+15550000/contacts")
            .with_status(200)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url());
        client.sync_user(&test_user()).await.unwrap();

        profile_mock.assert_async().await;
        contacts_mock.assert_async().await;
    }

    #[tokio::test]
    async fn sync_user_surfaces_rejection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/users/+15550000")
            .with_status(500)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url());
        let err = client.sync_user(&test_user()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Rejected { status: 500 }));
    }

    #[tokio::test]
    async fn request_code_returns_six_digits() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/verification_codes")
            .with_status(201)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url());
        let code = client.request_code("+15550000").await.unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn verify_code_maps_not_found_to_false() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/verification_codes/verify")
            .with_status(404)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url());
        let valid = client.verify_code("+15550000", "123456").await.unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn verify_code_reads_validity_from_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/verification_codes/verify")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"valid\":true}")
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url());
        assert!(client.verify_code("+15550000", "123456").await.unwrap());
    }
}
