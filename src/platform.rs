//! Built-in platform defaults and the setting schema for Android app builds.

use strum::{Display, EnumString, VariantNames};

use crate::models::{Layer, LayerKind, SettingValue};
use crate::resolver::{Schema, SettingType};

/// Name of the built-in defaults layer.
pub const PLATFORM_LAYER: &str = "platform";

/// Lowest SDK level the Flutter embedding still supports.
pub const MIN_SUPPORTED_SDK: i64 = 21;

/// Java toolchain levels accepted for compile options and the Kotlin JVM target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
pub enum JavaVersion {
    #[strum(to_string = "1.8")]
    Java8,
    #[strum(to_string = "11")]
    Java11,
    #[strum(to_string = "17")]
    Java17,
    #[strum(to_string = "21")]
    Java21,
}

/// Platform defaults, the lowest-precedence layer.
pub fn platform_defaults() -> Layer {
    let java = JavaVersion::Java8.to_string();
    let defaults: [(&str, SettingValue); 11] = [
        ("compileSdk", 35.into()),
        ("minSdk", MIN_SUPPORTED_SDK.into()),
        ("targetSdk", 35.into()),
        ("ndkVersion", "26.3.11579264".into()),
        ("compileOptions.sourceCompatibility", java.clone().into()),
        ("compileOptions.targetCompatibility", java.clone().into()),
        ("compileOptions.coreLibraryDesugaringEnabled", false.into()),
        ("kotlinOptions.jvmTarget", java.into()),
        ("multiDexEnabled", false.into()),
        ("versionCode", 1.into()),
        ("versionName", "1.0".into()),
    ];

    let mut layer = Layer::new(PLATFORM_LAYER, LayerKind::Platform);
    for (key, value) in defaults {
        // Keys above are distinct.
        let _ = layer.insert(key, value);
    }
    layer
}

/// Declared types and ordering rules for the settings above.
pub fn android_schema() -> Schema {
    let sdk = SettingType::Integer {
        min: Some(MIN_SUPPORTED_SDK),
    };
    let java = SettingType::enumeration(JavaVersion::VARIANTS);

    Schema::new()
        .declare("namespace", SettingType::String)
        .declare("applicationId", SettingType::String)
        .declare("compileSdk", sdk.clone())
        .declare("minSdk", sdk.clone())
        .declare("targetSdk", sdk)
        .declare("ndkVersion", SettingType::Version)
        .declare("compileOptions.sourceCompatibility", java.clone())
        .declare("compileOptions.targetCompatibility", java.clone())
        .declare("compileOptions.coreLibraryDesugaringEnabled", SettingType::Boolean)
        .declare("kotlinOptions.jvmTarget", java)
        .declare("multiDexEnabled", SettingType::Boolean)
        .declare("versionCode", SettingType::Integer { min: Some(1) })
        .declare("versionName", SettingType::String)
        .range("minSdk", "targetSdk")
        .range("minSdk", "compileSdk")
}
