//! Named endpoint registry and URL builder.
//!
//! Request paths are assembled from a registered template (`:name`
//! placeholders), supplied path parameters and a query string. Array-valued
//! query parameters serialize as one `key=value` pair per element, in order;
//! all keys and values are percent-encoded. Instantiating a builder from an
//! unregistered endpoint name is an error, as is leaving a placeholder
//! unbound at build time.
//!
//! The backend keeps its historical mixed naming: most prefixes are English
//! (`/clients`, `/products`, `/users`, `/finance`), orders live under
//! `/pedido` and the sales subtotal under `/ventas`.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::ApiError;

/// Everything except unreserved characters gets percent-encoded.
const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Registered endpoint templates, by name.
const REGISTRY: &[(&str, &str)] = &[
    ("auth.login", "/auth/login"),
    ("auth.logout", "/auth/logout"),
    ("clients.collection", "/clients"),
    ("clients.entity", "/clients/:id"),
    ("employees.collection", "/employees"),
    ("employees.entity", "/employees/:id"),
    ("orders.collection", "/pedido"),
    ("orders.entity", "/pedido/:id"),
    ("orders.adjust", "/pedido/:id/adjust"),
    ("orders.status", "/pedido/:id/status"),
    ("products.collection", "/products"),
    ("products.entity", "/products/:id"),
    ("products.addition", "/products/:id/additions/:additionId"),
    ("inventory.movements", "/inventory/movements"),
    ("tables.collection", "/tables"),
    ("tables.entity", "/tables/:id"),
    ("users.collection", "/users"),
    ("users.entity", "/users/:id"),
    ("invoices.collection", "/invoices"),
    ("invoices.entity", "/invoices/:id"),
    ("expenses.collection", "/expenses"),
    ("expenses.entity", "/expenses/:id"),
    ("expense-types.collection", "/expense-types"),
    ("expense-types.entity", "/expense-types/:id"),
    ("finance.summary", "/finance/summary"),
    ("sales.subtotal", "/ventas/subtotal"),
];

/// Errors produced while constructing a request path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("unregistered endpoint: {0}")]
    UnregisteredEndpoint(String),
    #[error("unbound path placeholder: :{0}")]
    UnboundPlaceholder(String),
    #[error("path parameter {0} does not appear in the template")]
    UnknownPathParam(String),
}

impl From<UrlError> for ApiError {
    fn from(err: UrlError) -> Self {
        ApiError::Request(err.to_string())
    }
}

/// A query parameter value: a scalar or an array serialized as repeated pairs.
pub trait IntoQueryValue {
    fn append_to(self, key: &str, pairs: &mut Vec<(String, String)>);
}

macro_rules! scalar_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoQueryValue for $ty {
                fn append_to(self, key: &str, pairs: &mut Vec<(String, String)>) {
                    pairs.push((key.to_string(), self.to_string()));
                }
            }
        )*
    };
}

scalar_query_value!(bool, i32, i64, u32, u64, usize, f64, String, chrono::NaiveDate);

impl IntoQueryValue for &str {
    fn append_to(self, key: &str, pairs: &mut Vec<(String, String)>) {
        pairs.push((key.to_string(), self.to_string()));
    }
}

impl<T: IntoQueryValue> IntoQueryValue for Vec<T> {
    fn append_to(self, key: &str, pairs: &mut Vec<(String, String)>) {
        for item in self {
            item.append_to(key, pairs);
        }
    }
}

/// A path parameter value (string or number).
pub trait IntoPathValue {
    fn into_path_value(self) -> String;
}

macro_rules! path_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoPathValue for $ty {
                fn into_path_value(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

path_value!(i32, i64, u32, u64, usize, String);

impl IntoPathValue for &str {
    fn into_path_value(self) -> String {
        self.to_string()
    }
}

/// Builder for one request path.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    template: String,
    path_params: Vec<(String, String)>,
    query_params: Vec<(String, String)>,
}

impl UrlBuilder {
    /// Builder over a raw template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            path_params: Vec::new(),
            query_params: Vec::new(),
        }
    }

    /// Builder over a registered endpoint name.
    ///
    /// Fails when the name is not in the registry.
    pub fn named(name: &str) -> Result<Self, UrlError> {
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, template)| Self::new(*template))
            .ok_or_else(|| UrlError::UnregisteredEndpoint(name.to_string()))
    }

    /// Bind a `:name` placeholder to a value.
    pub fn path_param(mut self, name: &str, value: impl IntoPathValue) -> Self {
        self.path_params
            .push((name.to_string(), value.into_path_value()));
        self
    }

    /// Append a query parameter. Array values append one pair per element.
    pub fn query_param(mut self, key: &str, value: impl IntoQueryValue) -> Self {
        value.append_to(key, &mut self.query_params);
        self
    }

    /// Render the final path.
    ///
    /// Fails when a placeholder is left unbound or a supplied path parameter
    /// does not appear in the template.
    pub fn build(self) -> Result<String, UrlError> {
        let mut used = vec![false; self.path_params.len()];

        let mut path = String::new();
        for segment in self.template.split('/') {
            if segment.is_empty() {
                continue;
            }
            path.push('/');
            if let Some(name) = segment.strip_prefix(':') {
                let index = self
                    .path_params
                    .iter()
                    .position(|(param, _)| param == name)
                    .ok_or_else(|| UrlError::UnboundPlaceholder(name.to_string()))?;
                used[index] = true;
                path.push_str(&encode(&self.path_params[index].1));
            } else {
                path.push_str(segment);
            }
        }

        if let Some(index) = used.iter().position(|u| !u) {
            return Err(UrlError::UnknownPathParam(
                self.path_params[index].0.clone(),
            ));
        }

        if !self.query_params.is_empty() {
            path.push('?');
            let mut first = true;
            for (key, value) in &self.query_params {
                if !first {
                    path.push('&');
                }
                first = false;
                path.push_str(&encode(key));
                path.push('=');
                path.push_str(&encode(value));
            }
        }

        Ok(path)
    }
}

impl fmt::Display for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UrlBuilder({})", self.template)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_path_and_query_params() {
        let url = UrlBuilder::new("/clients/:id")
            .path_param("id", 42)
            .query_param("active", true)
            .build()
            .unwrap();
        assert_eq!(url, "/clients/42?active=true");
    }

    #[test]
    fn array_query_params_repeat_the_key() {
        let url = UrlBuilder::new("/pedido")
            .query_param("estado", vec!["pendiente", "en_proceso"])
            .query_param("mesa", 3)
            .build()
            .unwrap();
        assert_eq!(url, "/pedido?estado=pendiente&estado=en_proceso&mesa=3");
    }

    #[test]
    fn values_are_percent_encoded() {
        let url = UrlBuilder::new("/clients")
            .query_param("name", "José & Hijos")
            .build()
            .unwrap();
        assert_eq!(url, "/clients?name=Jos%C3%A9%20%26%20Hijos");
    }

    #[test]
    fn unregistered_endpoint_is_an_error() {
        assert_eq!(
            UrlBuilder::named("clients.archive").unwrap_err(),
            UrlError::UnregisteredEndpoint("clients.archive".to_string())
        );
    }

    #[test]
    fn named_endpoints_resolve_their_templates() {
        let url = UrlBuilder::named("orders.adjust")
            .unwrap()
            .path_param("id", 7)
            .build()
            .unwrap();
        assert_eq!(url, "/pedido/7/adjust");
    }

    #[test]
    fn unbound_placeholder_is_an_error() {
        assert_eq!(
            UrlBuilder::new("/clients/:id").build().unwrap_err(),
            UrlError::UnboundPlaceholder("id".to_string())
        );
    }

    #[test]
    fn unknown_path_param_is_an_error() {
        assert_eq!(
            UrlBuilder::new("/clients")
                .path_param("id", 1)
                .build()
                .unwrap_err(),
            UrlError::UnknownPathParam("id".to_string())
        );
    }

    #[test]
    fn date_query_params_render_iso() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let url = UrlBuilder::named("finance.summary")
            .unwrap()
            .query_param("fecha_inicio", date)
            .build()
            .unwrap();
        assert_eq!(url, "/finance/summary?fecha_inicio=2026-08-01");
    }
}
