mod meta;
pub use self::meta::{
    ApiDate, FormattedValue, FormattedValues, LinkRef, Pages, ServerResponse, Uris,
};
pub(crate) use self::meta::Envelope;

mod album;
pub use self::album::{Album, AlbumResponse, UserAlbums, UserAlbumsResponse};

mod image;
pub use self::image::{
    CatalogSkuPrice, Image, ImageDownload, ImageMetadata, ImageResponse, ImageSize,
    ImageSizeDetails, ImageSizes, LargestImage,
};

mod node;
pub use self::node::{Node, NodeResponse};

mod user;
pub use self::user::{User, UserResponse};
