use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Garment product lines sold for each pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "RC")]
    RainCoat,
    #[serde(rename = "TW")]
    TummyWarmer,
    #[serde(rename = "WC")]
    WinterCoat,
    #[serde(rename = "CC")]
    CoolingCoat,
}

impl ProductType {
    pub fn all() -> [ProductType; 4] {
        [
            ProductType::RainCoat,
            ProductType::TummyWarmer,
            ProductType::WinterCoat,
            ProductType::CoolingCoat,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RC" => Some(ProductType::RainCoat),
            "TW" => Some(ProductType::TummyWarmer),
            "WC" => Some(ProductType::WinterCoat),
            "CC" => Some(ProductType::CoolingCoat),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProductType::RainCoat => "RC",
            ProductType::TummyWarmer => "TW",
            ProductType::WinterCoat => "WC",
            ProductType::CoolingCoat => "CC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::RainCoat => "Rain Coat",
            ProductType::TummyWarmer => "Tummy Warmer",
            ProductType::WinterCoat => "Winter Coat",
            ProductType::CoolingCoat => "Cooling Coat",
        }
    }

    /// Storefront collection the product type is listed under
    pub fn collection_path(&self) -> &'static str {
        match self {
            ProductType::WinterCoat => "dog-winter-coats",
            ProductType::RainCoat => "dog-rain-coats",
            ProductType::TummyWarmer => "dog-tummy-warmers",
            ProductType::CoolingCoat => "cooling-coats",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parsed `TYPE-BREED-SIZE[-COLOR[-VARIANT]]` SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuInfo {
    pub product_type: ProductType,
    pub breed_code: String,
    pub size: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// A purchasable variant selected for one pattern and product type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternProduct {
    pub product_id: String,
    pub title: String,
    pub handle: String,
    pub variant_id: String,
    pub sku: String,
    pub sku_info: SkuInfo,
    /// Shopper-facing product line, e.g. `Winter Coat`
    pub product_type_name: String,
    /// Decimal amount as returned by the storefront
    pub price: String,
    pub currency_code: String,
    pub available_for_sale: bool,
    pub featured_image: Option<String>,
    pub online_store_url: Option<String>,
    /// Add-to-cart deep link
    pub cart_url: Option<String>,
}

pub type ProductsByType = BTreeMap<ProductType, Vec<PatternProduct>>;
