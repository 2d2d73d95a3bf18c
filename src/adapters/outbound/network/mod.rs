mod iam_credentials;
mod oauth_client;
pub mod pagination;
mod resource_manager;
mod rest_client;

#[cfg(test)]
pub(crate) mod scripted_client;

pub use iam_credentials::{IamCredentialsImpersonator, DEFAULT_TOKEN_LIFETIME_SECS};
pub use oauth_client::{
    form_body, parse_scopes, AuthorizedUser, OAuthTokenClient, ServiceAccountKey,
    CLOUD_PLATFORM_SCOPE, DEFAULT_TOKEN_URI,
};
pub use resource_manager::ResourceManagerDirectory;
pub use rest_client::{
    base_url_for, build_http_client, interpret_response, RestClientFactory, RestServiceClient,
    CLOUD_RESOURCE_MANAGER, IAM_CREDENTIALS,
};
