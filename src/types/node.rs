//! Node resources (folders, albums, and pages in the content tree).

use serde::{Deserialize, Serialize};

use super::meta::{decode_value, Envelope, ServerResponse, Uris};
use crate::expand::{self, Expansion};
use crate::types::{ApiDate, FormattedValues, Image, User};
use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Node {
    pub date_added: ApiDate,
    pub date_modified: ApiDate,
    pub description: String,
    pub effective_privacy: String,
    pub effective_security_type: String,
    pub formatted_values: FormattedValues,
    pub has_children: bool,
    pub hide_owner: bool,
    pub is_root: bool,
    pub keywords: Vec<String>,
    pub name: String,
    #[serde(rename = "NodeID")]
    pub node_id: String,
    pub password_hint: String,
    pub privacy: String,
    pub security_type: String,
    pub smug_searchable: String,
    pub sort_direction: String,
    pub sort_index: i64,
    pub sort_method: String,
    #[serde(rename = "Type")]
    pub node_type: String,
    pub url_name: String,
    pub url_path: String,
    pub world_searchable: String,

    pub response_level: String,
    pub uri: String,
    pub uri_description: String,
    pub uris: Uris,
    pub web_uri: String,
}

/// Result of a single-node request.
#[derive(Debug)]
pub struct NodeResponse {
    pub node: Node,
    /// Resolved "ParentNode" expansion.
    pub parent_node: Option<Node>,
    /// Resolved "ParentNodes" expansion, root-most last.
    pub parent_nodes: Vec<Node>,
    /// Resolved "ChildNodes" expansion.
    pub child_nodes: Vec<Node>,
    /// Resolved "HighlightImage" expansion.
    pub highlight_image: Option<Image>,
    /// Resolved "User" expansion.
    pub user: Option<User>,
    pub server: ServerResponse,
}

impl NodeResponse {
    pub(crate) fn assemble(envelope: Envelope, server: ServerResponse) -> Result<Self, Error> {
        let node: Node = decode_value(envelope.response.node)?;
        let expansions = expand::resolve(&node.uris, &envelope.expansions)?;

        let mut res = NodeResponse {
            node,
            parent_node: None,
            parent_nodes: Vec::new(),
            child_nodes: Vec::new(),
            highlight_image: None,
            user: None,
            server,
        };
        for (name, value) in expansions {
            match (name.as_str(), value) {
                ("ParentNode", Expansion::Node(n)) => res.parent_node = Some(n),
                ("ParentNodes", Expansion::Nodes(nodes)) => res.parent_nodes = nodes,
                ("ChildNodes", Expansion::Nodes(nodes)) => res.child_nodes = nodes,
                ("HighlightImage", Expansion::Image(image)) => res.highlight_image = Some(image),
                ("User", Expansion::User(u)) => res.user = Some(u),
                _ => {}
            }
        }
        Ok(res)
    }
}
