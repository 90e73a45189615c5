use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Products plus the variant fields needed to match SKUs to patterns
const PRODUCTS_QUERY: &str = r#"
query Products($first: Int!, $after: String) {
  products(first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    edges {
      node {
        id
        title
        handle
        availableForSale
        onlineStoreUrl
        featuredImage { url }
        priceRange { minVariantPrice { amount currencyCode } }
        variants(first: 100) {
          edges {
            node {
              id
              sku
              availableForSale
              price { amount currencyCode }
            }
          }
        }
      }
    }
  }
}
"#;

/// Errors that can occur when talking to the storefront API
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Storefront API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unauthorized: invalid storefront access token")]
    Unauthorized,

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("No data returned from storefront API")]
    MissingData,

    #[error("Storefront is not configured")]
    NotConfigured,
}

/// Price as returned by the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/// One purchasable variant of a storefront product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontVariant {
    pub id: String,
    pub sku: Option<String>,
    pub available_for_sale: bool,
    pub price: Money,
}

/// Flattened storefront product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub online_store_url: Option<String>,
    pub featured_image: Option<String>,
    pub price: Money,
    pub variants: Vec<StorefrontVariant>,
}

// GraphQL wire format

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    available_for_sale: bool,
    online_store_url: Option<String>,
    featured_image: Option<ImageNode>,
    price_range: Option<PriceRange>,
    variants: Option<Connection<StorefrontVariant>>,
}

#[derive(Debug, Deserialize)]
struct ImageNode {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRange {
    min_variant_price: Money,
}

impl From<ProductNode> for StorefrontProduct {
    fn from(node: ProductNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
            handle: node.handle,
            available_for_sale: node.available_for_sale,
            online_store_url: node.online_store_url,
            featured_image: node.featured_image.map(|image| image.url),
            price: node
                .price_range
                .map(|range| range.min_variant_price)
                .unwrap_or_else(|| Money {
                    amount: "0".to_string(),
                    currency_code: "USD".to_string(),
                }),
            variants: node
                .variants
                .map(|connection| connection.edges.into_iter().map(|edge| edge.node).collect())
                .unwrap_or_default(),
        }
    }
}

/// Strip scheme and trailing slashes from a configured store URL
pub fn normalize_store_domain(store: &str) -> String {
    store
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

/// Storefront GraphQL API client
pub struct StorefrontClient {
    endpoint: String,
    store_domain: String,
    access_token: String,
    page_size: u32,
    client: Client,
}

impl StorefrontClient {
    /// Create a client for `https://{store_domain}`
    pub fn new(
        store_domain: &str,
        access_token: String,
        api_version: &str,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, StorefrontError> {
        let domain = normalize_store_domain(store_domain);
        Self::with_base_url(
            format!("https://{}", domain),
            domain,
            access_token,
            api_version,
            page_size,
            timeout,
        )
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        base_url: String,
        store_domain: String,
        access_token: String,
        api_version: &str,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, StorefrontError> {
        if store_domain.is_empty() || access_token.is_empty() {
            return Err(StorefrontError::NotConfigured);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: format!(
                "{}/api/{}/graphql.json",
                base_url.trim_end_matches('/'),
                api_version
            ),
            store_domain,
            access_token,
            page_size: page_size.clamp(1, 250),
            client,
        })
    }

    /// Store host used for cart links, without scheme
    pub fn store_domain(&self) -> &str {
        &self.store_domain
    }

    async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, StorefrontError> {
        tracing::debug!("Storefront request to {} with {}", self.endpoint, variables);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StorefrontError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Storefront request failed: {} - {}", status, body);
            return Err(StorefrontError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GraphQlResponse<T> = response.json().await?;
        if !payload.errors.is_empty() {
            let messages: Vec<String> = payload.errors.into_iter().map(|e| e.message).collect();
            return Err(StorefrontError::GraphQl(messages.join("; ")));
        }

        payload.data.ok_or(StorefrontError::MissingData)
    }

    /// Fetch every product, following pagination until the last page
    pub async fn fetch_all_products(&self) -> Result<Vec<StorefrontProduct>, StorefrontError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: ProductsData = self
                .request(
                    PRODUCTS_QUERY,
                    json!({ "first": self.page_size, "after": cursor }),
                )
                .await?;

            let connection = data.products;
            products.extend(connection.edges.into_iter().map(|edge| StorefrontProduct::from(edge.node)));

            match connection.page_info {
                Some(PageInfo {
                    has_next_page: true,
                    end_cursor: Some(next),
                }) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!("Fetched {} storefront products", products.len());
        Ok(products)
    }
}
