//! Product categories and the generation form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::UploadedImage;

/// Closed list of product categories offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum ProductCategory {
    #[serde(rename = "Alcove Tubs/Inset Tubs")]
    AlcoveTubs,
    #[serde(rename = "Backwall Kit")]
    BackwallKit,
    #[serde(rename = "Bathroom Sink")]
    BathroomSink,
    #[serde(rename = "Bathtub Kit")]
    BathtubKit,
    #[default]
    #[serde(rename = "Bathtubs")]
    Bathtubs,
    #[serde(rename = "Base")]
    Base,
    #[serde(rename = "Exposed Shower System")]
    ExposedShowerSystem,
    #[serde(rename = "Faucets")]
    Faucets,
    #[serde(rename = "Kitchen Sink Faucet")]
    KitchenSinkFaucet,
    #[serde(rename = "Mirror/Cabinet")]
    MirrorCabinet,
    #[serde(rename = "Shower Curtain Rod")]
    ShowerCurtainRod,
    #[serde(rename = "Shower Door/Tub Door")]
    ShowerDoor,
    #[serde(rename = "Shower Enclosures")]
    ShowerEnclosures,
    #[serde(rename = "Shower Faucet")]
    ShowerFaucet,
    #[serde(rename = "Shower Kit")]
    ShowerKit,
    #[serde(rename = "Toilets")]
    Toilets,
    #[serde(rename = "Utility Sink")]
    UtilitySink,
    #[serde(rename = "Vanity")]
    Vanity,
    #[serde(rename = "Vanity Knob/Handles")]
    VanityKnobHandles,
    #[serde(rename = "Vessel Sink")]
    VesselSink,
}

impl ProductCategory {
    /// All categories in display order.
    pub const ALL: &'static [ProductCategory] = &[
        ProductCategory::AlcoveTubs,
        ProductCategory::BackwallKit,
        ProductCategory::BathroomSink,
        ProductCategory::BathtubKit,
        ProductCategory::Bathtubs,
        ProductCategory::Base,
        ProductCategory::ExposedShowerSystem,
        ProductCategory::Faucets,
        ProductCategory::KitchenSinkFaucet,
        ProductCategory::MirrorCabinet,
        ProductCategory::ShowerCurtainRod,
        ProductCategory::ShowerDoor,
        ProductCategory::ShowerEnclosures,
        ProductCategory::ShowerFaucet,
        ProductCategory::ShowerKit,
        ProductCategory::Toilets,
        ProductCategory::UtilitySink,
        ProductCategory::Vanity,
        ProductCategory::VanityKnobHandles,
        ProductCategory::VesselSink,
    ];

    /// Label shown to users and sent to the planner.
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::AlcoveTubs => "Alcove Tubs/Inset Tubs",
            ProductCategory::BackwallKit => "Backwall Kit",
            ProductCategory::BathroomSink => "Bathroom Sink",
            ProductCategory::BathtubKit => "Bathtub Kit",
            ProductCategory::Bathtubs => "Bathtubs",
            ProductCategory::Base => "Base",
            ProductCategory::ExposedShowerSystem => "Exposed Shower System",
            ProductCategory::Faucets => "Faucets",
            ProductCategory::KitchenSinkFaucet => "Kitchen Sink Faucet",
            ProductCategory::MirrorCabinet => "Mirror/Cabinet",
            ProductCategory::ShowerCurtainRod => "Shower Curtain Rod",
            ProductCategory::ShowerDoor => "Shower Door/Tub Door",
            ProductCategory::ShowerEnclosures => "Shower Enclosures",
            ProductCategory::ShowerFaucet => "Shower Faucet",
            ProductCategory::ShowerKit => "Shower Kit",
            ProductCategory::Toilets => "Toilets",
            ProductCategory::UtilitySink => "Utility Sink",
            ProductCategory::Vanity => "Vanity",
            ProductCategory::VanityKnobHandles => "Vanity Knob/Handles",
            ProductCategory::VesselSink => "Vessel Sink",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ProductCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown product category: {0}")]
pub struct CategoryParseError(String);

/// Default style text pre-filled in the form.
pub const DEFAULT_STYLE: &str = "Modern Minimalist with natural wood accents";

/// Everything submitted for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub product_category: ProductCategory,
    pub style: String,
    #[serde(default)]
    pub images: Vec<UploadedImage>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            product_category: ProductCategory::default(),
            style: DEFAULT_STYLE.to_string(),
            images: Vec::new(),
        }
    }
}

impl FormState {
    pub fn new(product_category: ProductCategory, style: impl Into<String>) -> Self {
        Self {
            product_category,
            style: style.into(),
            images: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<UploadedImage>) -> Self {
        self.images = images;
        self
    }
}
