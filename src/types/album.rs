//! Album resources and the album endpoint results.

use serde::{Deserialize, Serialize};

use super::meta::{decode_value, Envelope, Pages, ServerResponse, Uris};
use crate::expand::{self, Expansion};
use crate::types::{ApiDate, Image, Node, User};
use crate::Error;

/// An album as returned by `album/{key}` or embedded in a user's album
/// collection. Fields the server omits decode to their zero value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Album {
    pub album_key: String,
    pub allow_downloads: bool,
    pub backprinting: String,
    pub can_rank: bool,
    pub can_share: bool,
    pub clean: bool,
    pub comments: bool,
    pub date: ApiDate,
    pub description: String,
    #[serde(rename = "EXIF")]
    pub exif: bool,
    pub external: bool,
    pub family_edit: bool,
    pub filenames: bool,
    pub friend_edit: bool,
    pub geography: bool,
    pub has_download_password: bool,
    pub header: String,
    pub hide_owner: bool,
    pub image_count: i64,
    pub images_last_updated: String,
    pub keywords: String,
    pub largest_size: String,
    pub last_updated: String,
    pub name: String,
    pub nice_name: String,
    #[serde(rename = "NodeID")]
    pub node_id: String,
    pub original_sizes: i64,
    pub packaging_branding: bool,
    pub password: String,
    pub password_hint: String,
    pub printable: bool,
    pub privacy: String,
    pub proof_days: i64,
    pub protected: bool,
    pub security_type: String,
    pub share: bool,
    pub smug_searchable: String,
    pub sort_direction: String,
    pub sort_method: String,
    pub square_thumbs: bool,
    pub template_uri: String,
    pub title: String,
    pub total_sizes: i64,
    pub url_name: String,
    pub url_path: String,
    pub watermark: bool,
    pub world_searchable: bool,

    pub response_level: String,
    pub uri: String,
    pub uri_description: String,
    pub uris: Uris,
    pub web_uri: String,

    /// Filled from the "AlbumImages" expansion, never sent inline.
    #[serde(skip)]
    pub images: Vec<Image>,
}

/// A page of a user's albums, either as a collection endpoint's primary
/// payload or nested under the "UserAlbums" expansion.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserAlbums {
    pub uri: String,
    pub locator: String,
    pub locator_type: String,
    pub album: Vec<Album>,
    pub pages: Pages,
}

/// Result of a single-album request.
#[derive(Debug)]
pub struct AlbumResponse {
    pub album: Album,
    /// Resolved "Node" expansion.
    pub node: Option<Node>,
    /// Resolved "User" expansion.
    pub user: Option<User>,
    pub server: ServerResponse,
}

impl AlbumResponse {
    pub(crate) fn assemble(envelope: Envelope, server: ServerResponse) -> Result<Self, Error> {
        let mut album: Album = decode_value(envelope.response.album)?;
        let expansions = expand::resolve(&album.uris, &envelope.expansions)?;

        let mut node = None;
        let mut user = None;
        for (name, value) in expansions {
            match (name.as_str(), value) {
                ("Node", Expansion::Node(n)) => node = Some(n),
                ("User", Expansion::User(u)) => user = Some(u),
                // In album context the image collection belongs to the
                // album itself.
                ("AlbumImages", Expansion::Images(images)) => album.images = images,
                _ => {}
            }
        }

        Ok(AlbumResponse {
            album,
            node,
            user,
            server,
        })
    }
}

/// Result of a `user/{nick}!albums` collection request. No expansion step:
/// the albums and their cursor are embedded directly in the primary payload.
#[derive(Debug)]
pub struct UserAlbumsResponse {
    pub user_albums: UserAlbums,
    pub server: ServerResponse,
}

impl UserAlbumsResponse {
    pub(crate) fn assemble(envelope: Envelope, server: ServerResponse) -> Result<Self, Error> {
        let pages: Pages = decode_value(envelope.response.pages)?;
        // An exhausted window still yields a well-formed empty sequence.
        let album: Vec<Album> = if pages.count > 0 {
            decode_value(envelope.response.album)?
        } else {
            Vec::new()
        };

        Ok(UserAlbumsResponse {
            user_albums: UserAlbums {
                uri: envelope.response.uri,
                locator: envelope.response.locator,
                locator_type: envelope.response.locator_type,
                album,
                pages,
            },
            server,
        })
    }
}
