//! User resources and the user endpoint result.

use serde::{Deserialize, Serialize};

use super::meta::{decode_value, Envelope, ServerResponse, Uris};
use crate::expand::{self, Expansion};
use crate::types::{Node, UserAlbums};
use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct User {
    pub account_status: String,
    pub domain: String,
    pub domain_only: String,
    pub first_name: String,
    pub friends_view: bool,
    pub image_count: i64,
    pub is_trial: bool,
    pub last_name: String,
    pub name: String,
    pub nick_name: String,
    pub plan: String,
    pub quick_share: bool,
    pub ref_tag: String,
    pub sort_by: String,
    pub total_account_size: i64,
    pub total_uploaded_size: i64,
    pub view_pass_hint: String,
    pub view_password: String,

    pub response_level: String,
    pub uri: String,
    pub uri_description: String,
    pub uris: Uris,
    pub web_uri: String,
}

/// Result of a user request (`user/{nick}` or `!authuser`).
#[derive(Debug)]
pub struct UserResponse {
    pub user: User,
    /// Resolved "Node" expansion: the root of the user's content tree.
    pub node: Option<Node>,
    /// Resolved "UserAlbums" expansion.
    pub user_albums: Option<UserAlbums>,
    pub server: ServerResponse,
}

impl UserResponse {
    pub(crate) fn assemble(envelope: Envelope, server: ServerResponse) -> Result<Self, Error> {
        let user: User = decode_value(envelope.response.user)?;
        let expansions = expand::resolve(&user.uris, &envelope.expansions)?;

        let mut node = None;
        let mut user_albums = None;
        for (name, value) in expansions {
            match (name.as_str(), value) {
                ("Node", Expansion::Node(n)) => node = Some(n),
                ("UserAlbums", Expansion::UserAlbums(ua)) => user_albums = Some(ua),
                _ => {}
            }
        }

        Ok(UserResponse {
            user,
            node,
            user_albums,
            server,
        })
    }
}
