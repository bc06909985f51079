//! Image resources, image-size variants, metadata, prices, and the image
//! endpoint result.
//!
//! The API calls an image reached through an album an "AlbumImage" and an
//! image fetched directly an "Image"; both carry the same fields, so one
//! type serves both contexts.

use serde::{Deserialize, Serialize};

use super::meta::{decode_value, Envelope, ServerResponse, Uris};
use crate::expand::{self, Expansion};
use crate::types::{Album, ApiDate, FormattedValues, User};
use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Image {
    pub altitude: f64,
    pub archived_md5: String,
    pub archived_size: i64,
    pub archived_uri: String,
    pub can_buy: bool,
    pub can_edit: bool,
    pub can_share: bool,
    pub caption: String,
    pub collectable: bool,
    pub comments: bool,
    pub date: ApiDate,
    pub date_time_original: ApiDate,
    pub date_time_uploaded: ApiDate,
    pub file_name: String,
    pub format: String,
    pub formatted_values: FormattedValues,
    pub hidden: bool,
    pub image_key: String,
    pub is_archive: bool,
    pub is_video: bool,
    pub keyword_array: Vec<String>,
    pub keywords: String,
    pub last_updated: String,
    pub latitude: String,
    pub longitude: String,
    pub movable: bool,
    pub origin: String,
    pub original_height: i64,
    pub original_size: i64,
    pub original_width: i64,
    pub processing: bool,
    pub protected: bool,
    pub serial: i64,
    pub show_keywords: bool,
    pub thumbnail_url: String,
    pub title: String,
    pub upload_key: String,
    pub watermark: String,
    pub watermarked: bool,

    pub response_level: String,
    pub uri: String,
    pub uri_description: String,
    pub uris: Uris,
    pub web_uri: String,
}

/// Quick-access URLs for every rendered size of an image.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSizes {
    pub tiny_image_url: String,
    pub thumb_image_url: String,
    pub small_image_url: String,
    pub medium_image_url: String,
    pub large_image_url: String,
    #[serde(rename = "XLargeImageUrl")]
    pub x_large_image_url: String,
    #[serde(rename = "X2LargeImageUrl")]
    pub x2_large_image_url: String,
    #[serde(rename = "X3LargeImageUrl")]
    pub x3_large_image_url: String,
    pub original_image_url: String,
    pub largest_image_url: String,
    pub uri: String,
    pub uris: Uris,
}

/// One rendered size of an image.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSize {
    pub url: String,
    pub ext: String,
    pub height: i64,
    pub width: i64,
    pub size: i64,
    pub watermarked: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSizeDetails {
    pub image_url_template: String,
    pub usable_sizes: Vec<String>,
    pub image_size_tiny: ImageSize,
    pub image_size_thumb: ImageSize,
    pub image_size_small: ImageSize,
    pub image_size_medium: ImageSize,
    pub image_size_large: ImageSize,
    #[serde(rename = "ImageSizeXLarge")]
    pub image_size_x_large: ImageSize,
    #[serde(rename = "ImageSizeX2Large")]
    pub image_size_x2_large: ImageSize,
    #[serde(rename = "ImageSizeX3Large")]
    pub image_size_x3_large: ImageSize,
    pub image_size_original: ImageSize,
    pub uri: String,
}

/// The largest size available for download.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct LargestImage {
    pub url: String,
    pub size: i64,
    pub height: i64,
    pub width: i64,
    pub usable: bool,
    pub ext: String,
    pub watermarked: bool,
    pub uri: String,
    pub uris: Uris,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageDownload {
    pub url: String,
    pub uri: String,
}

/// EXIF/IPTC metadata for an image.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageMetadata {
    pub title: String,
    pub caption: String,
    pub user_comment: String,
    pub keywords: String,
    pub author: String,
    pub author_title: String,
    pub copyright: String,
    pub copyright_url: String,
    pub copyright_flag: String,
    pub source: String,
    pub credit: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub country_code: String,
    pub rating: String,
    pub category: String,
    pub headline: String,
    pub special_instructions: String,
    pub date_time_modified: ApiDate,
    pub date_time_created: ApiDate,
    pub date_created: ApiDate,
    pub time_created: String,
    pub date_digitized: ApiDate,
    pub lens: String,
    pub make: String,
    pub model: String,
    pub aperture: String,
    pub exposure: String,
    pub exposure_program: String,
    pub exposure_compensation: String,
    pub exposure_mode: String,
    #[serde(rename = "ISO")]
    pub iso: i64,
    pub focal_length: String,
    pub focal_length35mm: String,
    pub flash: String,
    pub metering: String,
    pub light_source: String,
    pub white_balance: String,
    pub digital_zoom_ratio: String,
    pub contrast: String,
    pub saturation: String,
    pub sharpness: String,
    pub subject_distance: String,
    pub subject_range: String,
    pub sensing_method: String,
    pub color_space: String,
    pub brightness: String,
    pub latitude: f64,
    pub latitude_reference: String,
    pub longitude: f64,
    pub longitude_reference: String,
    pub altitude: f64,
    pub altitude_reference: String,
    pub scene_capture_type: String,
    pub gain_control: String,
    pub scale_factor: String,
    pub circle_of_confusion: String,
    pub field_of_view: String,
    pub depth_of_field: String,
    pub hyperfocal_distance: String,
    pub normalized_light_value: String,
    pub duration: String,
    pub audio_codec: String,
    pub video_codec: String,
    pub software: String,
    pub serial_number: String,
    pub lens_serial_number: String,
    pub uri: String,
}

/// One purchasable SKU price for an image.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct CatalogSkuPrice {
    pub currency: String,
    pub price: f64,
    pub response_level: String,
    pub uri: String,
    pub uris: Uris,
}

/// Result of a single-image request.
#[derive(Debug)]
pub struct ImageResponse {
    pub image: Image,
    /// Resolved "Album"/"ImageAlbum" expansion.
    pub album: Option<Album>,
    /// Resolved "User"/"ImageOwner" expansion.
    pub user: Option<User>,
    pub sizes: Option<ImageSizes>,
    pub size_details: Option<ImageSizeDetails>,
    pub metadata: Option<ImageMetadata>,
    pub largest_image: Option<LargestImage>,
    pub download: Option<ImageDownload>,
    pub prices: Vec<CatalogSkuPrice>,
    pub server: ServerResponse,
}

impl ImageResponse {
    pub(crate) fn assemble(envelope: Envelope, server: ServerResponse) -> Result<Self, Error> {
        let image: Image = decode_value(envelope.response.image)?;
        let expansions = expand::resolve(&image.uris, &envelope.expansions)?;

        let mut res = ImageResponse {
            image,
            album: None,
            user: None,
            sizes: None,
            size_details: None,
            metadata: None,
            largest_image: None,
            download: None,
            prices: Vec::new(),
            server,
        };
        for (name, value) in expansions {
            match (name.as_str(), value) {
                ("Album" | "ImageAlbum", Expansion::Album(a)) => res.album = Some(a),
                ("User" | "ImageOwner", Expansion::User(u)) => res.user = Some(u),
                ("ImageSizes", Expansion::Sizes(s)) => res.sizes = Some(s),
                ("ImageSizeDetails", Expansion::SizeDetails(d)) => res.size_details = Some(d),
                ("ImageMetadata", Expansion::Metadata(m)) => res.metadata = Some(m),
                ("LargestImage", Expansion::LargestImage(l)) => res.largest_image = Some(l),
                ("ImageDownload", Expansion::Download(d)) => res.download = Some(d),
                ("ImagePrices", Expansion::Prices(p)) => res.prices = p,
                _ => {}
            }
        }
        Ok(res)
    }
}
