//! Gateway route construction.

use datagroom_domain::DatasetName;
use urlencoding::encode;

/// Caller tag sent by default as the last path segment
pub const DEFAULT_CALLER_TAG: &str = "mcp";
/// View variant requested by default
pub const DEFAULT_VIEW_VARIANT: &str = "default";

/// Builds gateway paths for the three endpoints the tools use.
///
/// Every dynamic segment is percent-encoded; only `A-Z a-z 0-9 - _ . ~`
/// pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoints {
    caller_tag: String,
    view_variant: String,
}

impl GatewayEndpoints {
    pub fn new(caller_tag: impl Into<String>, view_variant: impl Into<String>) -> Self {
        Self {
            caller_tag: caller_tag.into(),
            view_variant: view_variant.into(),
        }
    }

    /// `GET /ds/dsList/{caller}`
    pub fn dataset_list(&self) -> String {
        format!("/ds/dsList/{}", encode(&self.caller_tag))
    }

    /// `GET /ds/view/columns/{dataset}/{variant}/{caller}`
    pub fn columns(&self, dataset: &DatasetName) -> String {
        format!(
            "/ds/view/columns/{}/{}/{}",
            encode(dataset.as_str()),
            encode(&self.view_variant),
            encode(&self.caller_tag)
        )
    }

    /// `POST /ds/viewViaPost/{dataset}/{variant}/{caller}`
    pub fn view(&self, dataset: &DatasetName) -> String {
        format!(
            "/ds/viewViaPost/{}/{}/{}",
            encode(dataset.as_str()),
            encode(&self.view_variant),
            encode(&self.caller_tag)
        )
    }
}

impl Default for GatewayEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_CALLER_TAG, DEFAULT_VIEW_VARIANT)
    }
}
