use reqwest::Client as ReqwestClient;

use crate::internal::prelude::*;
use crate::model::id::AttachmentId;

/// A file uploaded with a message.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#attachment-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Attachment {
    /// The unique ID given to this attachment.
    pub id: AttachmentId,
    /// The filename of the file that was uploaded. This is equivalent to what the uploader had
    /// their file named.
    pub filename: String,
    /// Description for the file (max 1024 characters).
    pub description: Option<String>,
    /// If the attachment is an image, then the height of the image is provided.
    pub height: Option<u32>,
    /// The proxy URL.
    pub proxy_url: String,
    /// The size of the file in bytes.
    pub size: u32,
    /// The URL of the uploaded attachment.
    pub url: String,
    /// If the attachment is an image, then the width of the image is provided.
    pub width: Option<u32>,
    /// The attachment's [media type].
    ///
    /// [media type]: https://en.wikipedia.org/wiki/Media_type
    pub content_type: Option<String>,
    /// Whether this attachment is ephemeral.
    pub ephemeral: Option<bool>,
}

impl Attachment {
    /// If this attachment is an image, then a tuple of the width and height in pixels is returned.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.and_then(|width| self.height.map(|height| (width, height)))
    }

    /// Downloads the attachment, returning back a vector of bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Http`] when there is a problem retrieving the attachment.
    pub async fn download(&self) -> Result<Vec<u8>> {
        let reqwest = ReqwestClient::new();
        let bytes = reqwest.get(&self.url).send().await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
