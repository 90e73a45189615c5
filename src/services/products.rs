use chrono::Datelike;
use serde::Serialize;

use crate::models::{MeasurementInput, PatternProduct, ProductType, ProductsByType, SkuInfo};
use crate::services::storefront::{StorefrontProduct, StorefrontVariant};

/// Color code used when a SKU carries none
pub const DEFAULT_COLOR: &str = "DEFAULT";

/// Base color preference, most preferred first
pub const COLOR_PRIORITY: [&str; 19] = [
    "BL", "BG", "RD", "GR", "BK", "WH", "NV", "BR", "GY", "PN", "PR", "YL", "OR", "TE", "LB",
    "DB", "LG", "DG", DEFAULT_COLOR,
];

const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

/// Season used to reorder color preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Season for a calendar month (1 = January)
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn current() -> Self {
        Self::from_month(chrono::Utc::now().month())
    }

    fn preferred_colors(&self) -> [&'static str; 4] {
        match self {
            Season::Spring => ["GR", "YL", "PN", "LB"],
            Season::Summer => ["WH", "LB", "YL", "TE"],
            Season::Fall => ["OR", "BR", "RD", "GY"],
            Season::Winter => ["BK", "NV", "WH", "RD"],
        }
    }
}

fn product_type_colors(product_type: ProductType) -> [&'static str; 4] {
    match product_type {
        ProductType::RainCoat => ["BK", "NV", "DB", "DG"],
        ProductType::WinterCoat => ["RD", "OR", "BR", "BK"],
        ProductType::CoolingCoat => ["WH", "LB", "TE", "YL"],
        ProductType::TummyWarmer => ["BK", "WH", "GY", "BR"],
    }
}

fn promote(priority: &mut Vec<&'static str>, front: [&'static str; 4]) {
    priority.retain(|color| !front.contains(color));
    priority.splice(0..0, front);
}

/// Color preference after season and product-type adjustments
///
/// Product type wins over season because it is applied last.
pub fn color_priority(season: Option<Season>, product_type: Option<ProductType>) -> Vec<&'static str> {
    let mut priority = COLOR_PRIORITY.to_vec();
    if let Some(season) = season {
        promote(&mut priority, season.preferred_colors());
    }
    if let Some(product_type) = product_type {
        promote(&mut priority, product_type_colors(product_type));
    }
    priority
}

/// ReCoat items share the SKU space but are never recommended
#[inline]
pub fn is_recoat_sku(sku: &str) -> bool {
    sku.contains("-RC")
}

/// Parse a `TYPE-BREED-SIZE[-COLOR[-VARIANT]]` SKU
pub fn parse_sku(sku: &str) -> Option<SkuInfo> {
    let sku = sku.trim();
    if sku.is_empty() || is_recoat_sku(sku) {
        return None;
    }

    let parts: Vec<&str> = sku.split('-').collect();
    if parts.len() < 3 {
        return None;
    }

    let product_type = ProductType::from_code(parts[0])?;
    let color = parts
        .get(3)
        .filter(|color| !color.is_empty())
        .copied()
        .unwrap_or(DEFAULT_COLOR);
    let variant = (parts.len() > 4).then(|| parts[4..].join("-"));

    Some(SkuInfo {
        product_type,
        breed_code: parts[1].to_string(),
        size: parts[2].to_string(),
        color: color.to_string(),
        variant,
    })
}

/// Check a SKU's breed and size against a `BREED-SIZE` pattern code
pub fn sku_matches_pattern(info: &SkuInfo, pattern_code: &str) -> bool {
    match pattern_code.split_once('-') {
        Some((breed, size)) => info.breed_code == breed && info.size == size,
        None => false,
    }
}

/// Numeric id from a `gid://shopify/ProductVariant/…` id
pub fn extract_variant_id(variant_id: &str) -> &str {
    match variant_id.strip_prefix(VARIANT_GID_PREFIX) {
        Some(rest) => rest.rsplit('/').next().unwrap_or(rest),
        None => variant_id,
    }
}

#[derive(Serialize)]
struct MeasurementsParam<'a> {
    breed: &'a str,
    neck: f64,
    chest: f64,
    length: f64,
    tail: &'a str,
    chondro: bool,
}

/// Product page deep link with the variant preselected
pub fn build_product_url(
    store_domain: &str,
    handle: &str,
    variant_id: &str,
    product_type: ProductType,
    measurements: Option<&MeasurementInput>,
) -> String {
    let mut url = format!(
        "https://{}/collections/{}/products/{}?variant={}",
        store_domain,
        product_type.collection_path(),
        handle,
        extract_variant_id(variant_id)
    );

    if let Some(input) = measurements {
        let param = MeasurementsParam {
            breed: &input.breed,
            neck: input.neck_circumference,
            chest: input.chest_circumference,
            length: input.back_length,
            tail: input.tail_type.as_str(),
            chondro: input.chondrodystrophic,
        };
        match serde_json::to_string(&param) {
            Ok(json) => {
                url.push_str("&measurements=");
                url.push_str(&urlencoding::encode(&json));
            }
            Err(e) => tracing::warn!("Failed to encode measurements for {}: {}", handle, e),
        }
    }

    url
}

/// Variants of one product and type, grouped by color in first-seen order
type ColorGroups = Vec<(String, Vec<PatternProduct>)>;

fn push_color(groups: &mut ColorGroups, product: PatternProduct) {
    match groups.iter_mut().find(|(color, _)| *color == product.sku_info.color) {
        Some((_, variants)) => variants.push(product),
        None => groups.push((product.sku_info.color.clone(), vec![product])),
    }
}

/// Pick one variant from color groups
///
/// First available variant in priority order, else any available
/// variant, else the first variant seen.
pub fn select_best_available<'a>(
    groups: &'a [(String, Vec<PatternProduct>)],
    priority: &[&str],
) -> Option<&'a PatternProduct> {
    let variants_for = |wanted: &str| {
        groups
            .iter()
            .find(|(color, _)| color == wanted)
            .map(|(_, variants)| variants.as_slice())
            .unwrap_or(&[])
    };

    priority
        .iter()
        .find_map(|color| variants_for(color).iter().find(|p| p.available_for_sale))
        .or_else(|| {
            groups
                .iter()
                .flat_map(|(_, variants)| variants.iter())
                .find(|p| p.available_for_sale)
        })
        .or_else(|| groups.first().and_then(|(_, variants)| variants.first()))
}

fn to_pattern_product(
    product: &StorefrontProduct,
    variant: &StorefrontVariant,
    sku: &str,
    sku_info: SkuInfo,
    store_domain: &str,
    measurements: Option<&MeasurementInput>,
) -> PatternProduct {
    let cart_url = build_product_url(
        store_domain,
        &product.handle,
        &variant.id,
        sku_info.product_type,
        measurements,
    );

    PatternProduct {
        product_id: product.id.clone(),
        title: product.title.clone(),
        handle: product.handle.clone(),
        variant_id: variant.id.clone(),
        sku: sku.to_string(),
        product_type_name: sku_info.product_type.display_name().to_string(),
        sku_info,
        price: variant.price.amount.clone(),
        currency_code: variant.price.currency_code.clone(),
        available_for_sale: variant.available_for_sale && product.available_for_sale,
        featured_image: product.featured_image.clone(),
        online_store_url: product.online_store_url.clone(),
        cart_url: Some(cart_url),
    }
}

/// Group storefront variants for one pattern by product type
///
/// Each product contributes at most one variant per type, chosen by
/// color fallback. Duplicate variant ids are dropped.
pub fn group_products_for_pattern(
    products: &[StorefrontProduct],
    pattern_code: &str,
    store_domain: &str,
    season: Season,
    measurements: Option<&MeasurementInput>,
) -> ProductsByType {
    let mut grouped = ProductsByType::new();

    for product in products {
        let mut by_type: Vec<(ProductType, ColorGroups)> = Vec::new();

        for variant in &product.variants {
            let Some(sku) = variant.sku.as_deref() else {
                continue;
            };
            let Some(info) = parse_sku(sku) else {
                continue;
            };
            if !sku_matches_pattern(&info, pattern_code) {
                continue;
            }

            let product_type = info.product_type;
            let item = to_pattern_product(product, variant, sku, info, store_domain, measurements);
            match by_type.iter_mut().find(|(t, _)| *t == product_type) {
                Some((_, groups)) => push_color(groups, item),
                None => {
                    let mut groups = ColorGroups::new();
                    push_color(&mut groups, item);
                    by_type.push((product_type, groups));
                }
            }
        }

        for (product_type, groups) in by_type {
            let priority = color_priority(Some(season), Some(product_type));
            let Some(selected) = select_best_available(&groups, &priority) else {
                continue;
            };

            let entry = grouped.entry(product_type).or_default();
            if entry.iter().all(|p| p.variant_id != selected.variant_id) {
                tracing::trace!(
                    "Selected {} ({}) for {} {}",
                    selected.sku,
                    selected.sku_info.color,
                    pattern_code,
                    product_type
                );
                entry.push(selected.clone());
            }
        }
    }

    grouped
}

/// Total variants across all product types
pub fn count_products(grouped: &ProductsByType) -> usize {
    grouped.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TailType;
    use crate::services::storefront::Money;

    fn variant(id: &str, sku: &str, available: bool) -> StorefrontVariant {
        StorefrontVariant {
            id: format!("{}{}", VARIANT_GID_PREFIX, id),
            sku: Some(sku.to_string()),
            available_for_sale: available,
            price: Money {
                amount: "59.0".to_string(),
                currency_code: "USD".to_string(),
            },
        }
    }

    fn product(handle: &str, variants: Vec<StorefrontVariant>) -> StorefrontProduct {
        StorefrontProduct {
            id: format!("gid://shopify/Product/{}", handle),
            title: handle.to_string(),
            handle: handle.to_string(),
            available_for_sale: true,
            online_store_url: None,
            featured_image: None,
            price: Money {
                amount: "59.0".to_string(),
                currency_code: "USD".to_string(),
            },
            variants,
        }
    }

    #[test]
    fn test_parse_sku_full() {
        let info = parse_sku("WC-VS-S-BK-FLEECE").unwrap();
        assert_eq!(info.product_type, ProductType::WinterCoat);
        assert_eq!(info.breed_code, "VS");
        assert_eq!(info.size, "S");
        assert_eq!(info.color, "BK");
        assert_eq!(info.variant.as_deref(), Some("FLEECE"));
    }

    #[test]
    fn test_parse_sku_defaults_and_rejections() {
        assert_eq!(parse_sku("TW-GSP-XL").unwrap().color, DEFAULT_COLOR);
        assert!(parse_sku("TW-GSP").is_none());
        assert!(parse_sku("ZZ-VS-S").is_none());
        assert!(parse_sku("WC-VS-S-RC").is_none());
        assert!(parse_sku("").is_none());
    }

    #[test]
    fn test_sku_matches_pattern_exactly() {
        let info = parse_sku("RC-GSP-XL-NV").unwrap();
        assert!(sku_matches_pattern(&info, "GSP-XL"));
        assert!(!sku_matches_pattern(&info, "GSP-L"));
        assert!(!sku_matches_pattern(&info, "GS-XL"));
    }

    #[test]
    fn test_season_from_month() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Fall);
        assert_eq!(Season::from_month(12), Season::Winter);
    }

    #[test]
    fn test_color_priority_reordering() {
        let base = color_priority(None, None);
        assert_eq!(base, COLOR_PRIORITY.to_vec());

        let winter = color_priority(Some(Season::Winter), None);
        assert_eq!(&winter[..4], &["BK", "NV", "WH", "RD"]);

        let rain_in_summer = color_priority(Some(Season::Summer), Some(ProductType::RainCoat));
        assert_eq!(&rain_in_summer[..8], &["BK", "NV", "DB", "DG", "WH", "LB", "YL", "TE"]);
        assert_eq!(rain_in_summer.len(), COLOR_PRIORITY.len());
    }

    #[test]
    fn test_extract_variant_id() {
        assert_eq!(extract_variant_id("gid://shopify/ProductVariant/41417460711486"), "41417460711486");
        assert_eq!(extract_variant_id("41417460711486"), "41417460711486");
    }

    #[test]
    fn test_build_product_url_with_measurements() {
        let input = MeasurementInput {
            breed: "Vizsla".to_string(),
            neck_circumference: 13.0,
            chest_circumference: 26.0,
            back_length: 19.5,
            tail_type: TailType::Straight,
            chondrodystrophic: false,
        };

        let plain = build_product_url(
            "shop.example.com",
            "adventure-coat",
            "gid://shopify/ProductVariant/123",
            ProductType::WinterCoat,
            None,
        );
        assert_eq!(
            plain,
            "https://shop.example.com/collections/dog-winter-coats/products/adventure-coat?variant=123"
        );

        let with = build_product_url(
            "shop.example.com",
            "adventure-coat",
            "123",
            ProductType::RainCoat,
            Some(&input),
        );
        let (_, encoded) = with.split_once("&measurements=").unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["breed"], "Vizsla");
        assert_eq!(value["tail"], "straight");
        assert_eq!(value["chondro"], false);
        assert!(with.contains("/collections/dog-rain-coats/"));
    }

    #[test]
    fn test_color_fallback_prefers_available_priority_color() {
        let products = vec![product(
            "rain-coat",
            vec![
                variant("1", "RC-VS-S-BL", true),
                variant("2", "RC-VS-S-BK", false),
                variant("3", "RC-VS-S-NV", true),
            ],
        )];

        let grouped = group_products_for_pattern(&products, "VS-S", "shop.example.com", Season::Summer, None);
        let rain = &grouped[&ProductType::RainCoat];
        assert_eq!(rain.len(), 1);
        // BK leads rain-coat priority but is sold out
        assert_eq!(rain[0].sku_info.color, "NV");
    }

    #[test]
    fn test_color_fallback_when_nothing_available() {
        let products = vec![product(
            "cooling-coat",
            vec![variant("1", "CC-VS-S-ZZ", false), variant("2", "CC-VS-S-QQ", false)],
        )];

        let grouped = group_products_for_pattern(&products, "VS-S", "shop.example.com", Season::Winter, None);
        assert_eq!(grouped[&ProductType::CoolingCoat][0].sku, "CC-VS-S-ZZ");
    }

    #[test]
    fn test_grouping_filters_pattern_and_recoat() {
        let products = vec![
            product(
                "winter-coat",
                vec![
                    variant("1", "WC-VS-S-RD", true),
                    variant("2", "WC-VS-M-RD", true),
                    variant("3", "TW-VS-S", true),
                ],
            ),
            product("recoat", vec![variant("4", "WC-VS-S-RC", true)]),
        ];

        let grouped = group_products_for_pattern(&products, "VS-S", "shop.example.com", Season::Fall, None);
        assert_eq!(count_products(&grouped), 2);
        assert_eq!(grouped[&ProductType::WinterCoat][0].variant_id, format!("{}1", VARIANT_GID_PREFIX));
        assert_eq!(grouped[&ProductType::TummyWarmer][0].sku_info.color, DEFAULT_COLOR);
        assert!(grouped[&ProductType::WinterCoat][0]
            .cart_url
            .as_deref()
            .unwrap()
            .ends_with("?variant=1"));
    }

    #[test]
    fn test_duplicate_variants_collapsed() {
        let shared = variant("7", "TW-VS-S-BK", true);
        let products = vec![
            product("tummy-warmer", vec![shared.clone()]),
            product("tummy-warmer", vec![shared]),
        ];

        let grouped = group_products_for_pattern(&products, "VS-S", "shop.example.com", Season::Spring, None);
        assert_eq!(grouped[&ProductType::TummyWarmer].len(), 1);
    }
}
