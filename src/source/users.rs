//! User fetchers and the raw-to-processed user mapping.

use super::{ApiClient, FetchResult};
use crate::types::{User, UserId};
use serde::Deserialize;

/// Raw user record as returned by `/users`
///
/// Only the fields the processed [`User`] needs are decoded; the remaining
/// raw fields (phone, website, street, geo, catch phrase, ...) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct UserApiResponse {
    /// User ID
    pub id: i64,
    /// Full name
    pub name: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Postal address
    pub address: AddressApiResponse,
    /// Employer
    pub company: CompanyApiResponse,
}

/// Raw nested address
#[derive(Clone, Debug, Deserialize)]
pub struct AddressApiResponse {
    /// City name
    pub city: String,
}

/// Raw nested company
#[derive(Clone, Debug, Deserialize)]
pub struct CompanyApiResponse {
    /// Company name
    pub name: String,
}

/// Flatten a raw user into its processed shape
pub fn transform_user(raw: UserApiResponse) -> User {
    User {
        id: raw.id,
        name: raw.name,
        email: raw.email,
        username: raw.username,
        city: raw.address.city,
        company: raw.company.name,
    }
}

impl ApiClient {
    /// Fetch all users
    pub async fn fetch_users(&self) -> FetchResult<Vec<User>> {
        let response = self.get::<Vec<UserApiResponse>>("/users").await?;
        Ok(response.map(|raw| raw.into_iter().map(transform_user).collect()))
    }

    /// Fetch a specific user by ID
    pub async fn fetch_user_by_id(&self, user_id: UserId) -> FetchResult<User> {
        let response = self
            .get::<UserApiResponse>(&format!("/users/{}", user_id))
            .await?;
        Ok(response.map(transform_user))
    }
}
