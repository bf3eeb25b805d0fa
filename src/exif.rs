//! EXIF enumerated tag values.
//!
//! ImageMagick reports enumerated EXIF tags as their raw integer codes
//! (`exif:ExposureMode = "1"`). These tables map the codes defined by the
//! EXIF 2.3 standard onto named members; the names are what gets stored.

/// Declares a fieldless enum together with its code and name tables.
macro_rules! exif_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $code:literal => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

exif_enum! {
    /// Tag 0xA402.
    ExposureMode {
        AutoExposure = 0 => "AUTO_EXPOSURE",
        ManualExposure = 1 => "MANUAL_EXPOSURE",
        AutoBracket = 2 => "AUTO_BRACKET",
    }
}

exif_enum! {
    /// Tag 0x8822.
    ExposureProgram {
        NotDefined = 0 => "NOT_DEFINED",
        Manual = 1 => "MANUAL",
        NormalProgram = 2 => "NORMAL_PROGRAM",
        AperturePriority = 3 => "APERTURE_PRIORITY",
        ShutterPriority = 4 => "SHUTTER_PRIORITY",
        CreativeProgram = 5 => "CREATIVE_PROGRAM",
        ActionProgram = 6 => "ACTION_PROGRAM",
        PortraitMode = 7 => "PORTRAIT_MODE",
        LandscapeMode = 8 => "LANDSCAPE_MODE",
    }
}

exif_enum! {
    /// Tag 0xA403.
    WhiteBalance {
        Auto = 0 => "AUTO",
        Manual = 1 => "MANUAL",
    }
}

exif_enum! {
    /// Tag 0x9207.
    MeteringMode {
        Unknown = 0 => "UNKNOWN",
        Average = 1 => "AVERAGE",
        CenterWeightedAverage = 2 => "CENTER_WEIGHTED_AVERAGE",
        Spot = 3 => "SPOT",
        MultiSpot = 4 => "MULTI_SPOT",
        Pattern = 5 => "PATTERN",
        Partial = 6 => "PARTIAL",
        Other = 255 => "OTHER",
    }
}

exif_enum! {
    /// Bits 3-4 of the flash tag.
    FlashMode {
        Unknown = 0 => "UNKNOWN",
        CompulsoryFlashFiring = 1 => "COMPULSORY_FLASH_FIRING",
        CompulsoryFlashSuppression = 2 => "COMPULSORY_FLASH_SUPPRESSION",
        AutoMode = 3 => "AUTO_MODE",
    }
}

/// Decoded flash tag (0x9209): bit 0 is "fired", bits 3-4 the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub fired: bool,
    pub mode: FlashMode,
}

impl Flash {
    pub fn from_code(code: u16) -> Self {
        // Every two-bit value is in the mode table
        let mode = FlashMode::from_code((code >> 3) & 0b11).unwrap_or(FlashMode::Unknown);

        Self {
            fired: code & 0x01 != 0,
            mode,
        }
    }
}

/// Parse the integer code of an enumerated tag as ImageMagick prints it.
pub fn parse_code(value: &str) -> Option<u16> {
    value.trim().parse().ok()
}
