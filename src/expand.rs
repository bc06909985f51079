//! Expansion resolution: matching a primary object's advertised related
//! links against the envelope's `Expansions` map and decoding each hit into
//! its typed shape.
//!
//! The server returns expansions as an unordered bag of URI-keyed payloads,
//! decoupled from the primary object's own link map. The relation name is
//! the only stable key a caller reasons about, so resolution always goes
//! name -> URI -> payload.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::{
    Album, CatalogSkuPrice, Image, ImageDownload, ImageMetadata, ImageSizeDetails, ImageSizes,
    LargestImage, Node, User, UserAlbums, Uris,
};
use crate::Error;

/// A decoded expansion payload. Cardinality is part of the relation's
/// identity: list relations always decode to a `Vec`, even with one element.
#[derive(Debug)]
pub enum Expansion {
    Album(Album),
    Node(Node),
    Nodes(Vec<Node>),
    Image(Image),
    Images(Vec<Image>),
    User(User),
    Download(ImageDownload),
    Metadata(ImageMetadata),
    Prices(Vec<CatalogSkuPrice>),
    SizeDetails(ImageSizeDetails),
    Sizes(ImageSizes),
    LargestImage(LargestImage),
    UserAlbums(UserAlbums),
}

/// Target shape and cardinality for one relation name.
#[derive(Clone, Copy)]
enum Shape {
    Album,
    Node,
    NodeList,
    Image,
    ImageList,
    User,
    Download,
    Metadata,
    PriceList,
    SizeDetails,
    Sizes,
    LargestImage,
    UserAlbums,
}

struct RelationSpec {
    shape: Shape,
    /// Field the payload's real content is nested under. This is the
    /// relation's locator type, not the relation name itself: the server
    /// nests "AlbumImages" content under "AlbumImage".
    nested: &'static str,
}

/// The closed dispatch table. Relation names without an entry are skipped,
/// which keeps the client forward-compatible with server-added relations.
fn dispatch(name: &str) -> Option<RelationSpec> {
    let spec = match name {
        "Album" | "ImageAlbum" => RelationSpec {
            shape: Shape::Album,
            nested: "Album",
        },
        "Node" | "ParentNode" => RelationSpec {
            shape: Shape::Node,
            nested: "Node",
        },
        "ChildNodes" | "ParentNodes" => RelationSpec {
            shape: Shape::NodeList,
            nested: "Node",
        },
        "HighlightImage" => RelationSpec {
            shape: Shape::Image,
            nested: "Image",
        },
        "ImageDownload" => RelationSpec {
            shape: Shape::Download,
            nested: "ImageDownload",
        },
        "ImageMetadata" => RelationSpec {
            shape: Shape::Metadata,
            nested: "ImageMetadata",
        },
        "User" | "ImageOwner" => RelationSpec {
            shape: Shape::User,
            nested: "User",
        },
        "ImagePrices" => RelationSpec {
            shape: Shape::PriceList,
            nested: "CatalogSkuPrice",
        },
        "ImageSizeDetails" => RelationSpec {
            shape: Shape::SizeDetails,
            nested: "ImageSizeDetails",
        },
        "ImageSizes" => RelationSpec {
            shape: Shape::Sizes,
            nested: "ImageSizes",
        },
        "LargestImage" => RelationSpec {
            shape: Shape::LargestImage,
            nested: "LargestImage",
        },
        "UserAlbums" => RelationSpec {
            shape: Shape::UserAlbums,
            nested: "UserAlbums",
        },
        "AlbumImages" => RelationSpec {
            shape: Shape::ImageList,
            nested: "AlbumImage",
        },
        _ => return None,
    };
    Some(spec)
}

fn decode_shape(shape: Shape, value: Value) -> Result<Expansion, serde_json::Error> {
    Ok(match shape {
        Shape::Album => Expansion::Album(serde_json::from_value(value)?),
        Shape::Node => Expansion::Node(serde_json::from_value(value)?),
        Shape::NodeList => Expansion::Nodes(serde_json::from_value(value)?),
        Shape::Image => Expansion::Image(serde_json::from_value(value)?),
        Shape::ImageList => Expansion::Images(serde_json::from_value(value)?),
        Shape::User => Expansion::User(serde_json::from_value(value)?),
        Shape::Download => Expansion::Download(serde_json::from_value(value)?),
        Shape::Metadata => Expansion::Metadata(serde_json::from_value(value)?),
        Shape::PriceList => Expansion::Prices(serde_json::from_value(value)?),
        Shape::SizeDetails => Expansion::SizeDetails(serde_json::from_value(value)?),
        Shape::Sizes => Expansion::Sizes(serde_json::from_value(value)?),
        Shape::LargestImage => Expansion::LargestImage(serde_json::from_value(value)?),
        Shape::UserAlbums => Expansion::UserAlbums(serde_json::from_value(value)?),
    })
}

/// Resolves a primary object's related links against the raw expansion map.
///
/// Output contains one entry per relation name whose URI had a payload in
/// the map. A link with no payload is the normal "not expanded" case and is
/// skipped, as is a relation name the dispatch table does not know. One bad
/// payload fails the whole resolution.
pub(crate) fn resolve(
    uris: &Uris,
    raw: &HashMap<String, Value>,
) -> Result<HashMap<String, Expansion>, Error> {
    let mut out = HashMap::new();
    for (name, link) in uris {
        let Some(spec) = dispatch(name) else {
            continue;
        };
        let Some(payload) = raw.get(link.uri()) else {
            continue;
        };
        let nested = payload.get(spec.nested).cloned().unwrap_or(Value::Null);
        let decoded = decode_shape(spec.shape, nested).map_err(|source| Error::Expansion {
            relation: name.clone(),
            source,
        })?;
        out.insert(name.clone(), decoded);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LinkRef;

    fn links(pairs: &[(&str, &str)]) -> Uris {
        pairs
            .iter()
            .map(|&(name, uri)| (name.to_string(), LinkRef::Plain(uri.to_string())))
            .collect()
    }

    fn raw_map(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|&(uri, json)| (uri.to_string(), serde_json::from_str(json).unwrap()))
            .collect()
    }

    #[test]
    fn resolves_single_object_relation() {
        let uris = links(&[("Node", "/api/v2/node/h22spN")]);
        let raw = raw_map(&[(
            "/api/v2/node/h22spN",
            r#"{"Locator": "Node", "Node": {"Name": "Photos", "NodeID": "h22spN"}}"#,
        )]);

        let resolved = resolve(&uris, &raw).unwrap();
        assert_eq!(resolved.len(), 1);
        match resolved.get("Node") {
            Some(Expansion::Node(node)) => assert_eq!(node.node_id, "h22spN"),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn resolves_album_images_nested_under_album_image() {
        let uris = links(&[("AlbumImages", "/api/v2/album/kQ3t8P!images?_shorturis=")]);
        let raw = raw_map(&[(
            "/api/v2/album/kQ3t8P!images?_shorturis=",
            r#"{
                "Locator": "AlbumImage",
                "LocatorType": "Objects",
                "AlbumImage": [
                    {"ImageKey": "rPZcMrk", "FileName": "_DSC6480.jpg"},
                    {"ImageKey": "xr2CptT", "FileName": "_DSC6498.jpg"}
                ]
            }"#,
        )]);

        let resolved = resolve(&uris, &raw).unwrap();
        match resolved.get("AlbumImages") {
            Some(Expansion::Images(images)) => {
                assert_eq!(images.len(), 2);
                assert_eq!(images[0].image_key, "rPZcMrk");
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn list_relation_keeps_vec_for_single_element() {
        let uris = links(&[("ChildNodes", "/api/v2/node/h22spN!children")]);
        let raw = raw_map(&[(
            "/api/v2/node/h22spN!children",
            r#"{"Node": [{"NodeID": "q2qP7F"}]}"#,
        )]);

        let resolved = resolve(&uris, &raw).unwrap();
        match resolved.get("ChildNodes") {
            Some(Expansion::Nodes(nodes)) => assert_eq!(nodes.len(), 1),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn unexpanded_link_produces_no_entry_and_no_error() {
        let uris = links(&[("Node", "/api/v2/node/h22spN")]);
        let resolved = resolve(&uris, &HashMap::new()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn uri_lookup_is_exact_including_query_string() {
        let uris = links(&[("AlbumImages", "/api/v2/album/kQ3t8P!images?_shorturis=")]);
        // Payload keyed without the query string must not match.
        let raw = raw_map(&[(
            "/api/v2/album/kQ3t8P!images",
            r#"{"AlbumImage": []}"#,
        )]);
        let resolved = resolve(&uris, &raw).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn unknown_relation_is_ignored_even_when_payload_present() {
        let uris = links(&[("AlbumComments", "/api/v2/album/kQ3t8P!comments")]);
        let raw = raw_map(&[(
            "/api/v2/album/kQ3t8P!comments",
            r#"{"Comment": [{"Text": "nice"}]}"#,
        )]);
        let resolved = resolve(&uris, &raw).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn described_link_resolves_through_its_uri_field() {
        let mut uris = Uris::new();
        uris.insert(
            "User".to_string(),
            LinkRef::Described {
                uri: "/api/v2/user/cmac".to_string(),
                locator: "User".to_string(),
                locator_type: "Object".to_string(),
                description: "User By Nickname".to_string(),
            },
        );
        let raw = raw_map(&[(
            "/api/v2/user/cmac",
            r#"{"User": {"NickName": "cmac", "Name": "cmac"}}"#,
        )]);

        let resolved = resolve(&uris, &raw).unwrap();
        match resolved.get("User") {
            Some(Expansion::User(user)) => assert_eq!(user.nick_name, "cmac"),
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn bad_payload_fails_whole_resolution_naming_the_relation() {
        let uris = links(&[
            ("Node", "/api/v2/node/h22spN"),
            ("ChildNodes", "/api/v2/node/h22spN!children"),
        ]);
        let raw = raw_map(&[
            ("/api/v2/node/h22spN", r#"{"Node": {"NodeID": "h22spN"}}"#),
            // An object where the list relation expects a sequence.
            (
                "/api/v2/node/h22spN!children",
                r#"{"Node": {"NodeID": "q2qP7F"}}"#,
            ),
        ]);

        let err = resolve(&uris, &raw).unwrap_err();
        match err {
            Error::Expansion { relation, .. } => assert_eq!(relation, "ChildNodes"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
