//! Edge page parsing.
//!
//! A page body looks like
//! `{"data":{"user":{"<edge_key>":{"edges":[{"node":{"username":..}}],"page_info":{..}}}}}`.

use serde::Deserialize;

use super::EdgeKind;
use crate::error_handling::CollectionFault;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(default)]
    user: Option<UserEdges>,
}

#[derive(Deserialize)]
struct UserEdges {
    #[serde(default)]
    edge_followed_by: Option<Connection>,
    #[serde(default)]
    edge_follow: Option<Connection>,
}

#[derive(Deserialize)]
struct Connection {
    #[serde(default)]
    edges: Vec<Edge>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct Edge {
    node: Node,
}

#[derive(Deserialize)]
struct Node {
    username: String,
}

#[derive(Deserialize)]
struct PageInfo {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

/// One page of a relationship edge, consumed immediately by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePage {
    /// Usernames in page order
    pub usernames: Vec<String>,
    /// Whether the API has another page
    pub has_next_page: bool,
    /// Cursor for the next page; empty when absent
    pub end_cursor: String,
}

impl EdgePage {
    /// Parses a page body for the given edge.
    ///
    /// # Errors
    ///
    /// - `MalformedBody` if the body is not JSON or an edge lacks its username
    /// - `MissingUser` if `data` or `data.user` is absent or null
    /// - `MissingEdge` if the user object has no collection for `kind`
    pub fn parse(body: &str, kind: EdgeKind) -> Result<Self, CollectionFault> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|e| CollectionFault::MalformedBody(e.to_string()))?;

        let user = envelope
            .data
            .and_then(|d| d.user)
            .ok_or(CollectionFault::MissingUser)?;

        let connection = match kind {
            EdgeKind::Followers => user.edge_followed_by,
            EdgeKind::Following => user.edge_follow,
        }
        .ok_or(CollectionFault::MissingEdge(kind.edge_key()))?;

        Ok(Self {
            usernames: connection
                .edges
                .into_iter()
                .map(|e| e.node.username)
                .collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor.unwrap_or_default(),
        })
    }
}
