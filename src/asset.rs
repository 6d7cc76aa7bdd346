//! Asset representations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized format of asset data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Png,
    Jpg,
    Svg,
    Wav,
    Mp3,
    Sb,
    Sb2,
    Sb3,
}

impl DataFormat {
    /// File extension used when building asset URLs
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Png => "png",
            DataFormat::Jpg => "jpg",
            DataFormat::Svg => "svg",
            DataFormat::Wav => "wav",
            DataFormat::Mp3 => "mp3",
            DataFormat::Sb => "sb",
            DataFormat::Sb2 => "sb2",
            DataFormat::Sb3 => "sb3",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.extension())
    }
}

/// Category of retrievable content
///
/// `name` is what sources are matched against; `runtime_format` is handed
/// to the asset when it is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetType {
    /// Type name, matched against source type sets
    pub name: &'static str,
    /// MIME type of the runtime representation
    pub content_type: &'static str,
    /// Format the asset data is kept in at runtime
    pub runtime_format: DataFormat,
    /// Whether assets of this type never change once published
    pub immutable: bool,
}

impl AssetType {
    pub const IMAGE_BITMAP: AssetType = AssetType {
        name: "ImageBitmap",
        content_type: "image/png",
        runtime_format: DataFormat::Png,
        immutable: true,
    };

    pub const IMAGE_VECTOR: AssetType = AssetType {
        name: "ImageVector",
        content_type: "image/svg+xml",
        runtime_format: DataFormat::Svg,
        immutable: true,
    };

    pub const PROJECT: AssetType = AssetType {
        name: "Project",
        content_type: "application/json",
        runtime_format: DataFormat::Json,
        immutable: false,
    };

    pub const SOUND: AssetType = AssetType {
        name: "Sound",
        content_type: "audio/x-wav",
        runtime_format: DataFormat::Wav,
        immutable: true,
    };

    pub const SPRITE: AssetType = AssetType {
        name: "Sprite",
        content_type: "application/json",
        runtime_format: DataFormat::Json,
        immutable: true,
    };

    /// Built-in asset types
    pub const ALL: [AssetType; 5] = [
        AssetType::IMAGE_BITMAP,
        AssetType::IMAGE_VECTOR,
        AssetType::PROJECT,
        AssetType::SOUND,
        AssetType::SPRITE,
    ];

    /// Look up a built-in asset type by name (case-sensitive)
    pub fn from_name(name: &str) -> Option<AssetType> {
        Self::ALL.iter().copied().find(|t| t.name == name)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}

/// Raw bytes stored in a populated asset
#[derive(Debug, Clone, PartialEq, Eq)]
struct AssetData {
    bytes: Vec<u8>,
    format: DataFormat,
}

/// An asset, either empty or populated with its data
///
/// The bytes and their format are set together by [`Asset::set_data`],
/// so an asset is never observed half filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    asset_type: AssetType,
    asset_id: String,
    data: Option<AssetData>,
}

impl Asset {
    /// Create an empty asset
    pub fn new(asset_type: AssetType, asset_id: impl Into<String>) -> Self {
        Self {
            asset_type,
            asset_id: asset_id.into(),
            data: None,
        }
    }

    pub fn asset_type(&self) -> &AssetType {
        &self.asset_type
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Store the raw bytes and the format they are in
    pub fn set_data(&mut self, bytes: Vec<u8>, format: DataFormat) {
        self.data = Some(AssetData { bytes, format });
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_ref().map(|d| d.bytes.as_slice())
    }

    pub fn data_format(&self) -> Option<DataFormat> {
        self.data.as_ref().map(|d| d.format)
    }

    /// Consume the asset, returning its bytes if populated
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data.map(|d| d.bytes)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({}, {})", self.asset_type, self.asset_id)
    }
}
