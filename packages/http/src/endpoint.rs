//! Resource endpoints.
//!
//! An [`Endpoint`] maps one REST resource to its URL, its auth mode and the
//! tag prefix of its notifications. Each call sends one request and reports
//! its lifecycle to a [`Dispatch`] sink:
//!
//! | call | notifications |
//! |---|---|
//! | `login` | `REQUEST_*`, then `RECEIVE_*` (`{"isLogged": true}`) or `ERROR_*` |
//! | `read` | `REQUEST_*`, then `RECEIVE_*` with the response body |
//! | `create` | `CREATE_*` with the response body |
//! | `update` | `UPDATE_*` with the response body |
//! | `delete` | `REMOVE_*` with the deleted id |
//!
//! Requests that never get a response, and responses whose body is not JSON,
//! are logged and produce no result notification; `login` reports them as
//! `ERROR_*`. The HTTP status is only inspected by `login`. A token store that
//! fails to read the token stops an authenticated call with
//! [`Error::TokenStore`] before anything is dispatched or sent.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crudux_token_store::SharedTokenStore;

use crate::auth::{AuthScheme, AUTHORIZATION};
use crate::config::ApiConfig;
use crate::dispatch::Dispatch;
use crate::encoding::BodyEncoding;
use crate::error::Error;
use crate::executor::HttpExecutor;
use crate::notification::NotificationGroup;
use crate::types::{HttpRequest, HttpResponse, Method, ResourceId};

/// Descriptor of a REST resource.
///
/// Descriptors are immutable snapshots: [`with_auth`](Self::with_auth),
/// [`rename_notification_group`](Self::rename_notification_group) and
/// [`nested`](Self::nested) consume the descriptor and return a new one.
/// Clones share the API's transport and token store.
#[derive(Clone)]
pub struct Endpoint {
    resource_name: String,
    base_url: String,
    path: Vec<String>,
    resource_url: String,
    use_auth: bool,
    auth_scheme: AuthScheme,
    token_key: String,
    group: NotificationGroup,
    executor: Arc<dyn HttpExecutor>,
    tokens: SharedTokenStore,
}

fn clean_segment(segment: &str) -> String {
    segment.trim().trim_matches('/').to_string()
}

impl Endpoint {
    pub(crate) fn new(
        resource_name: String,
        config: &ApiConfig,
        executor: Arc<dyn HttpExecutor>,
        tokens: SharedTokenStore,
    ) -> Self {
        let path = vec![clean_segment(&resource_name)];
        let base_url = config.base_url();
        let resource_url = build_url(&base_url, &path);
        let group = NotificationGroup::new(&resource_name);

        Self {
            resource_name,
            base_url,
            path,
            resource_url,
            use_auth: false,
            auth_scheme: config.auth_scheme.clone(),
            token_key: config.token_key.clone(),
            group,
            executor,
            tokens,
        }
    }

    /// Name of the resource; `<parent>_<name>` once nested.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// URL of the resource collection, always ending in `/`.
    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    pub fn uses_auth(&self) -> bool {
        self.use_auth
    }

    pub fn notification_group(&self) -> &NotificationGroup {
        &self.group
    }

    /// Send the stored token in an `Authorization` header with every request.
    pub fn with_auth(mut self) -> Self {
        self.use_auth = true;
        self
    }

    /// Use `name` as the notification tag prefix. The URL is unchanged.
    pub fn rename_notification_group(mut self, name: impl AsRef<str>) -> Self {
        self.group = NotificationGroup::new(name);
        self
    }

    /// Place this resource under `parent`, optionally under one parent item.
    ///
    /// `companies` nested under `("users", Some(3))` lives at
    /// `<base>/users/3/companies/` and tags its notifications
    /// `*_USERS_COMPANIES`. Each call adds one level.
    pub fn nested(mut self, parent: impl AsRef<str>, parent_id: Option<ResourceId>) -> Self {
        let parent = clean_segment(parent.as_ref());

        let mut path = vec![parent.clone()];
        if let Some(id) = parent_id {
            let id = clean_segment(&id.to_string());
            if !id.is_empty() {
                path.push(id);
            }
        }
        path.append(&mut self.path);

        self.path = path;
        self.resource_url = build_url(&self.base_url, &self.path);
        self.resource_name = format!("{}_{}", parent, self.resource_name);
        self.group = NotificationGroup::new(&self.resource_name);
        self
    }

    /// Post `credentials` and keep the returned token.
    ///
    /// On a 2xx response carrying a string `token` field, the token is written
    /// to the token store and `RECEIVE_*` is dispatched with
    /// `{"isLogged": true}`. Otherwise `ERROR_*` is dispatched with the
    /// response body as payload.
    pub fn login<C, D>(&self, credentials: &C, dispatch: &mut D) -> Result<(), Error>
    where
        C: Serialize + ?Sized,
        D: Dispatch + ?Sized,
    {
        let body = serde_json::to_value(credentials)?;
        let request = BodyEncoding::Json.apply(
            HttpRequest::new(Method::POST, self.resource_url.clone()),
            Some(&body),
        )?;

        dispatch.dispatch(self.group.request());

        let response = match self.send(&request) {
            Ok(response) => response,
            Err(err) => {
                dispatch.dispatch(self.group.error(json!({ "error": err.to_string() })));
                return Ok(());
            }
        };

        let token = response
            .body
            .as_ref()
            .and_then(|body| body.get("token"))
            .and_then(Value::as_str);

        match token {
            Some(token) if response.is_success() => {
                match self.tokens.set(&self.token_key, token) {
                    Ok(()) => dispatch.dispatch(self.group.receive(json!({ "isLogged": true }))),
                    Err(err) => {
                        log::warn!("Could not store token for {}: {}", self.resource_url, err);
                        dispatch.dispatch(self.group.error(json!({ "error": err.to_string() })));
                    }
                }
            }
            _ => {
                log::debug!(
                    "Login at {} rejected with status {}",
                    self.resource_url,
                    response.status
                );
                dispatch.dispatch(self.group.error(response_payload(&response)));
            }
        }

        Ok(())
    }

    /// Fetch the collection, or one item when `id` is given.
    ///
    /// Any JSON response is dispatched as `RECEIVE_*`, whatever its status.
    pub fn read<D>(&self, id: Option<ResourceId>, dispatch: &mut D) -> Result<(), Error>
    where
        D: Dispatch + ?Sized,
    {
        let url = self.item_url(id.as_ref())?;
        let request = self.prepare(Method::GET, url, BodyEncoding::Json, None)?;

        dispatch.dispatch(self.group.request());

        if let Some(body) = self.send_for_json(&request) {
            dispatch.dispatch(self.group.receive(body));
        }
        Ok(())
    }

    /// Create a resource, sending it as JSON.
    pub fn create<T, D>(&self, resource: &T, dispatch: &mut D) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        D: Dispatch + ?Sized,
    {
        self.create_with(resource, BodyEncoding::Json, dispatch)
    }

    /// Create a resource with the given body encoding.
    pub fn create_with<T, D>(
        &self,
        resource: &T,
        encoding: BodyEncoding,
        dispatch: &mut D,
    ) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        D: Dispatch + ?Sized,
    {
        let value = serde_json::to_value(resource)?;
        let request = self.prepare(
            Method::POST,
            self.resource_url.clone(),
            encoding,
            Some(&value),
        )?;

        if let Some(body) = self.send_for_json(&request) {
            dispatch.dispatch(self.group.created(body));
        }
        Ok(())
    }

    /// Update a resource, sending it as JSON. The resource must have an `id`.
    pub fn update<T, D>(&self, resource: &T, dispatch: &mut D) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        D: Dispatch + ?Sized,
    {
        self.update_with(resource, BodyEncoding::Json, dispatch)
    }

    /// Update a resource with the given body encoding.
    pub fn update_with<T, D>(
        &self,
        resource: &T,
        encoding: BodyEncoding,
        dispatch: &mut D,
    ) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
        D: Dispatch + ?Sized,
    {
        let value = serde_json::to_value(resource)?;
        let id = value
            .get("id")
            .and_then(ResourceId::from_value)
            .ok_or(Error::MissingId)?;

        let url = self.item_url(Some(&id))?;
        let request = self.prepare(Method::PUT, url, encoding, Some(&value))?;

        if let Some(body) = self.send_for_json(&request) {
            dispatch.dispatch(self.group.updated(body));
        }
        Ok(())
    }

    /// Delete one item. `REMOVE_*` carries the id, not the response body.
    pub fn delete<D>(&self, id: impl Into<ResourceId>, dispatch: &mut D) -> Result<(), Error>
    where
        D: Dispatch + ?Sized,
    {
        let id = id.into();
        let url = self.item_url(Some(&id))?;
        let request = self.prepare(Method::DELETE, url, BodyEncoding::Json, None)?;

        let response = match self.send(&request) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{} {} failed: {}", request.method, request.url, err);
                return Ok(());
            }
        };

        if response.is_empty() || response.body.is_some() {
            dispatch.dispatch(self.group.removed(Value::from(id)));
        } else {
            log::warn!(
                "{} {} returned a body that is not JSON",
                request.method,
                request.url
            );
        }
        Ok(())
    }

    /// `<resource url><id>`, with the id escaped as a single path segment.
    fn item_url(&self, id: Option<&ResourceId>) -> Result<String, Error> {
        let Some(id) = id else {
            return Ok(self.resource_url.clone());
        };

        let mut url = url::Url::parse(&self.resource_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("{} cannot hold an item id", self.resource_url)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url.into())
    }

    fn prepare(
        &self,
        method: Method,
        url: String,
        encoding: BodyEncoding,
        body: Option<&Value>,
    ) -> Result<HttpRequest, Error> {
        let request = encoding.apply(HttpRequest::new(method, url), body)?;
        self.authorize(request)
    }

    fn authorize(&self, request: HttpRequest) -> Result<HttpRequest, Error> {
        if !self.use_auth {
            return Ok(request);
        }

        match self.tokens.get(&self.token_key)? {
            Some(token) => {
                let value = self.auth_scheme.header_value(&token);
                Ok(request.with_header(AUTHORIZATION, value))
            }
            None => {
                log::warn!(
                    "No token stored under {:?}; sending {} {} without authorization",
                    self.token_key,
                    request.method,
                    request.url
                );
                Ok(request)
            }
        }
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        log::debug!("{} {}", request.method, request.url);
        let response = self.executor.execute(request)?;
        log::debug!(
            "{} {} -> {} {}",
            request.method,
            request.url,
            response.status,
            response.status_text
        );
        Ok(response)
    }

    fn send_for_json(&self, request: &HttpRequest) -> Option<Value> {
        match self.send(request) {
            Ok(response) => {
                if response.body.is_none() {
                    log::warn!(
                        "{} {} returned a body that is not JSON",
                        request.method,
                        request.url
                    );
                }
                response.body
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", request.method, request.url, err);
                None
            }
        }
    }
}

fn build_url(base_url: &str, path: &[String]) -> String {
    let mut url = base_url.to_string();
    for segment in path.iter().filter(|s| !s.is_empty()) {
        url.push('/');
        url.push_str(segment);
    }
    url.push('/');
    url
}

fn response_payload(response: &HttpResponse) -> Value {
    match &response.body {
        Some(body) => body.clone(),
        None => Value::String(response.body_text.clone()),
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("resource_name", &self.resource_name)
            .field("resource_url", &self.resource_url)
            .field("use_auth", &self.use_auth)
            .field("group", &self.group.name())
            .finish_non_exhaustive()
    }
}
