//! Request tags used to match host responses to the request that caused them.
//!
//! Zellij's `web_request` echoes back an arbitrary string map with the
//! response. Each request is tagged with its tab, endpoint and a generation
//! number; a panel only accepts the response whose tag equals the one it is
//! still waiting for, so late answers to superseded requests are dropped.

use super::modes::Tab;
use crate::api::Endpoint;
use crate::domain::Provider;
use std::collections::BTreeMap;

const TAB_KEY: &str = "zsfile.tab";
const ENDPOINT_KEY: &str = "zsfile.endpoint";
const GENERATION_KEY: &str = "zsfile.generation";

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub tab: Tab,
    pub endpoint: Endpoint,
    pub generation: u64,
}

impl RequestTag {
    /// Encodes the tag as a host request context.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (TAB_KEY.to_string(), self.tab.as_str().to_string()),
            (ENDPOINT_KEY.to_string(), self.endpoint.as_str().to_string()),
            (GENERATION_KEY.to_string(), self.generation.to_string()),
        ])
    }

    /// Decodes a tag from a host response context.
    ///
    /// Returns `None` for contexts that were not produced by [`Self::to_context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            tab: Tab::parse(context.get(TAB_KEY)?)?,
            endpoint: Endpoint::parse(context.get(ENDPOINT_KEY)?)?,
            generation: context.get(GENERATION_KEY)?.parse().ok()?,
        })
    }
}

/// Parameters a pending request was issued with, needed to decode its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    Search {
        query: String,
        page: u32,
        source: Provider,
    },
    Resolve {
        page_url: String,
        provider: Provider,
    },
}

/// The one request a panel is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub tag: RequestTag,
    pub target: RequestTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trip() {
        let tag = RequestTag { tab: Tab::Download, endpoint: Endpoint::Resolve, generation: 17 };
        assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
    }

    #[test]
    fn foreign_contexts_are_ignored() {
        let mut context = BTreeMap::new();
        assert_eq!(RequestTag::from_context(&context), None);

        context.insert(TAB_KEY.to_string(), "search".to_string());
        context.insert(ENDPOINT_KEY.to_string(), "search".to_string());
        context.insert(GENERATION_KEY.to_string(), "not-a-number".to_string());
        assert_eq!(RequestTag::from_context(&context), None);
    }
}
