//! Error types for image generation.
//!
//! Nothing here is fatal to a frame: the facade recovers from every variant by
//! substituting a placeholder or the un-masked source image.

use crate::theme::Asset;

/// Errors raised while resolving or transforming theme images.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
	/// The theme provider has no image for the requested asset.
	#[error("asset missing from theme: {asset:?}")]
	AssetMissing {
		/// The asset that was requested.
		asset: Asset,
	},

	/// A mask and the image it applies to disagree on size.
	#[error("mask is {mask:?} but image is {image:?}")]
	DimensionMismatch {
		/// Width and height of the image.
		image: (u32, u32),
		/// Width and height of the mask.
		mask: (u32, u32),
	},
}

/// Result alias for fallible image operations.
pub type Result<T> = std::result::Result<T, ImageError>;
