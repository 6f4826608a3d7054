use super::CatalogClient;
use crate::domain::accounts::{Account, Credentials, NewAccount, Session, Verification};
use crate::domain::errors::ApiError;

pub struct AccountsClient<'a> {
    client: &'a CatalogClient,
}

impl<'a> AccountsClient<'a> {
    pub fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    pub async fn signup(&self, payload: &NewAccount) -> Result<Account, ApiError> {
        let url = self.client.endpoint("api/auth/signup")?;
        let request = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload);
        self.client.send(request, "Failed to create account").await
    }

    pub async fn verify(&self, payload: &Verification) -> Result<Account, ApiError> {
        let url = self.client.endpoint("api/auth/verify")?;
        let request = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload);
        self.client.send(request, "Failed to verify account").await
    }

    pub async fn login(&self, payload: &Credentials) -> Result<Session, ApiError> {
        let url = self.client.endpoint("api/auth/login")?;
        let request = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload);
        self.client.send(request, "Invalid email or password").await
    }
}
