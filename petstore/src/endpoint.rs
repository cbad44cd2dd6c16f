//! REST endpoint descriptors.
//!
//! An [`Endpoint`] pairs an HTTP method and path template with the
//! [`ResponseFormat`] that decodes its response. Service methods build one
//! per operation and hand it to the client for execution.

use std::marker::PhantomData;

use reqwest::Method;
use url::Url;

use crate::response::ResponseFormat;

/// A single REST API operation.
///
/// Path templates are relative to the client's base URL (no leading slash)
/// and may contain `{param}` placeholders. The format type parameter ties
/// the operation to its response decoder at compile time.
///
/// ## Examples
///
/// ```rust,ignore
/// use reqwest::Method;
/// use petstore::endpoint::Endpoint;
/// use petstore::response::JsonFormat;
/// use petstore::models::Pet;
///
/// let get_pet: Endpoint<JsonFormat<Pet>> =
///     Endpoint::new("get_pet_by_id", Method::GET, "pet/{petId}");
/// ```
#[derive(Debug)]
pub struct Endpoint<F: ResponseFormat> {
    /// Operation identifier, used in spans and error messages.
    id: &'static str,
    /// HTTP method for this operation.
    method: Method,
    /// URL path template relative to the base URL.
    path: &'static str,
    /// Phantom data for the response format type.
    _format: PhantomData<F>,
}

// Manual impl so `F` itself does not need `Clone`
impl<F: ResponseFormat> Clone for Endpoint<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            method: self.method.clone(),
            path: self.path,
            _format: PhantomData,
        }
    }
}

impl<F: ResponseFormat> Endpoint<F> {
    /// Creates an endpoint descriptor.
    pub fn new(id: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            id,
            method,
            path,
            _format: PhantomData,
        }
    }

    /// Returns the operation identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the HTTP method for this operation.
    pub fn method(&self) -> Method {
        self.method.clone()
    }

    /// Returns the path template for this operation.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Substitutes path parameters into the template.
    ///
    /// Values are percent-encoded, so a username like `sally/admin` cannot
    /// escape its path segment.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let path = endpoint.render_path(&[("petId", "42")]);
    /// // "pet/{petId}" becomes "pet/42"
    /// ```
    pub fn render_path(&self, params: &[(&str, &str)]) -> String {
        let mut path = self.path.to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), &urlencoding::encode(value));
        }
        path
    }

    /// Returns the full URL for this operation under `base_url`.
    ///
    /// The base URL keeps its path prefix because templates are relative;
    /// `pet/{petId}` under `http://host/v2/` resolves to `http://host/v2/pet/42`.
    pub fn url(&self, base_url: &Url, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
        base_url.join(&self.render_path(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::EmptyFormat;

    fn endpoint(path: &'static str) -> Endpoint<EmptyFormat> {
        Endpoint::new("test_op", Method::GET, path)
    }

    #[test]
    fn substitutes_path_params() {
        let ep = endpoint("pet/{petId}");
        assert_eq!(ep.render_path(&[("petId", "42")]), "pet/42");
    }

    #[test]
    fn encodes_reserved_characters() {
        let ep = endpoint("user/{username}");
        assert_eq!(
            ep.render_path(&[("username", "sally/admin")]),
            "user/sally%2Fadmin"
        );
        assert_eq!(ep.render_path(&[("username", "jo hn")]), "user/jo%20hn");
    }

    #[test]
    fn leaves_template_without_params_alone() {
        let ep = endpoint("store/inventory");
        assert_eq!(ep.render_path(&[]), "store/inventory");
    }

    #[test]
    fn joins_relative_to_base_path() {
        let base = Url::parse("http://localhost:8080/v2/").unwrap();
        let ep = endpoint("pet/{petId}");
        let url = ep.url(&base, &[("petId", "7")]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v2/pet/7");
    }

    #[test]
    fn ignores_unknown_params() {
        let ep = endpoint("store/order/{orderId}");
        assert_eq!(
            ep.render_path(&[("orderId", "3"), ("petId", "9")]),
            "store/order/3"
        );
    }
}
