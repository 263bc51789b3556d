//! reqwest implementation of [`BooksApi`]

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::{BooksApi, ClientError, ClientResult};
use crate::{
    error::ErrorResponse,
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct HttpBooksApi {
    client: Client,
    base_url: String,
}

impl HttpBooksApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into `ClientError::Api`
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    tracing::warn!("Server returned {}: {}", status, message);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list(&self) -> ClientResult<Vec<Book>> {
        let response = self.client.get(self.url("/books")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, data: &CreateBook) -> ClientResult<Book> {
        let response = self
            .client
            .post(self.url("/books"))
            .json(data)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, id: &str, data: &UpdateBook) -> ClientResult<Book> {
        let response = self
            .client
            .put(self.url(&format!("/books/{}", id)))
            .json(data)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> ClientResult<String> {
        let response = self
            .client
            .delete(self.url(&format!("/books/{}", id)))
            .send()
            .await?;
        Ok(check(response).await?.text().await?)
    }
}
