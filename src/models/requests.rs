use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::{MeasurementInput, TailType};

/// Request to find fitting patterns
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindFitRequest {
    #[validate(length(min = 1, max = 100))]
    pub breed: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "neck_circumference", rename = "neckCircumference")]
    pub neck_circumference: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "chest_circumference", rename = "chestCircumference")]
    pub chest_circumference: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(alias = "back_length", rename = "backLength")]
    pub back_length: f64,
    #[serde(
        alias = "tail_type",
        rename = "tailType",
        deserialize_with = "deserialize_tail_label"
    )]
    pub tail_type: TailType,
    #[serde(default)]
    pub chondrodystrophic: bool,
    /// Look up purchasable variants for the matched patterns
    #[serde(default, alias = "include_products", rename = "includeProducts")]
    pub include_products: bool,
}

impl FindFitRequest {
    pub fn to_measurements(&self) -> MeasurementInput {
        MeasurementInput {
            breed: self.breed.clone(),
            neck_circumference: self.neck_circumference,
            chest_circumference: self.chest_circumference,
            back_length: self.back_length,
            tail_type: self.tail_type,
            chondrodystrophic: self.chondrodystrophic,
        }
    }
}

/// Form labels arrive with whatever casing the widget used
fn deserialize_tail_label<'de, D>(deserializer: D) -> Result<TailType, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(TailType::from_label(&label))
}

/// Query for the products-by-pattern endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsByPatternQuery {
    #[serde(rename = "patternCode")]
    pub pattern_code: String,
    #[serde(default, rename = "productType")]
    pub product_type: Option<String>,
}
