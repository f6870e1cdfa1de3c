use std::borrow::Cow;

use reqwest::header::{
    HeaderMap as Headers,
    HeaderValue,
    AUTHORIZATION,
    CONTENT_LENGTH,
    CONTENT_TYPE,
    USER_AGENT,
};
use reqwest::{Client, RequestBuilder as ReqwestRequestBuilder, Url};
use tracing::instrument;

use super::routing::Route;
use super::{HttpError, LightMethod};
use crate::constants;
use crate::internal::prelude::*;

/// A single REST request, before it is handed to the HTTP client.
#[derive(Clone, Debug)]
#[must_use]
pub struct Request<'a> {
    pub(super) body: Option<Vec<u8>>,
    pub(super) headers: Option<Headers>,
    pub(super) method: LightMethod,
    pub(super) route: Route<'a>,
    pub(super) params: Option<Vec<(&'static str, String)>>,
}

impl<'a> Request<'a> {
    pub const fn new(route: Route<'a>, method: LightMethod) -> Self {
        Self {
            body: None,
            headers: None,
            method,
            route,
            params: None,
        }
    }

    pub fn body(mut self, body: Option<Vec<u8>>) -> Self {
        self.body = body;
        self
    }

    pub fn headers(mut self, headers: Option<Headers>) -> Self {
        self.headers = headers;
        self
    }

    pub fn params(mut self, params: Option<Vec<(&'static str, String)>>) -> Self {
        self.params = params;
        self
    }

    /// Turns the request into a [`reqwest::RequestBuilder`], attaching the authorization token,
    /// the user agent and any extra headers.
    ///
    /// A `proxy` replaces the `https://discord.com` origin of the route.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Url`] if the proxied URL is invalid, or [`HttpError::InvalidHeader`]
    /// if the token can not be sent as a header.
    #[instrument(skip(client, token))]
    pub fn build(
        self,
        client: &Client,
        token: &str,
        proxy: Option<&str>,
    ) -> Result<ReqwestRequestBuilder> {
        let Request {
            body,
            headers: request_headers,
            method,
            route,
            params,
        } = self;

        let mut path = route.path();

        if let Some(proxy) = proxy {
            // trim_end_matches to prevent double slashes after the domain
            path = Cow::Owned(path.replace("https://discord.com", proxy.trim_end_matches('/')));
        }

        let mut url = Url::parse(&path).map_err(HttpError::Url)?;

        if let Some(params) = params {
            url.query_pairs_mut().extend_pairs(params);
        }

        let mut builder = client.request(method.reqwest_method(), url);

        let mut headers = Headers::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers
            .insert(AUTHORIZATION, HeaderValue::from_str(token).map_err(HttpError::InvalidHeader)?);

        // Discord will return a 400: Bad Request response if we set the content type header,
        // but don't give a body.
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let length = body
            .as_ref()
            .map(|b| HeaderValue::try_from(b.len().to_string()))
            .transpose()
            .map_err(HttpError::InvalidHeader)?;

        headers.insert(CONTENT_LENGTH, length.unwrap_or_else(|| HeaderValue::from_static("0")));

        if let Some(request_headers) = request_headers {
            headers.extend(request_headers);
        }

        if let Some(bytes) = body {
            builder = builder.body(bytes);
        }

        Ok(builder.headers(headers))
    }

    #[must_use]
    pub fn body_ref(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn headers_ref(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    #[must_use]
    pub fn method_ref(&self) -> &LightMethod {
        &self.method
    }

    #[must_use]
    pub fn route_ref(&self) -> &Route<'_> {
        &self.route
    }

    #[must_use]
    pub fn params_ref(&self) -> Option<&[(&'static str, String)]> {
        self.params.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::id::GuildId;

    #[test]
    fn build_sets_query_and_headers() {
        let request = Request::new(
            Route::GuildMembers {
                guild_id: GuildId::new(1),
            },
            LightMethod::Get,
        )
        .params(Some(vec![("limit", "1000".into()), ("after", "5".into())]));

        let built = request
            .build(&Client::new(), "Bot token", Some("http://localhost:3000/"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            built.url().as_str(),
            "http://localhost:3000/api/v10/guilds/1/members?limit=1000&after=5"
        );
        assert_eq!(built.headers()[AUTHORIZATION], "Bot token");
        assert_eq!(built.headers()[CONTENT_LENGTH], "0");
        assert!(built.headers().get(CONTENT_TYPE).is_none());
    }
}
