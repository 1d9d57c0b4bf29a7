use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{pricing, utils::lenient};

// Upstream catalog types

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "lenient::vec_opt")]
    pub variants: Option<Vec<Variant>>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub sizes: Vec<Size>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub discount_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: Option<i64>,
}

impl Product {
    pub fn variants(&self) -> &[Variant] {
        self.variants.as_deref().unwrap_or_default()
    }

    pub fn sizes(&self) -> impl Iterator<Item = &Size> {
        self.variants().iter().flat_map(|v| v.sizes.iter())
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .or_else(|| self.variants().iter().find_map(|v| v.images.first()))
            .map(String::as_str)
    }
}

impl Size {
    pub fn is_purchasable(&self) -> bool {
        self.stock.is_some_and(|s| s > 0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductListQuery {
    pub section: Option<String>,
    pub limit: Option<u32>,
}

// Response types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub price: String,
    pub mrp: String,
    pub discount: Option<String>,
    pub sold_out: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let resolved = pricing::resolve(product);

        Self {
            slug: product.slug.clone().unwrap_or_default(),
            name: product.name.clone().unwrap_or_default(),
            image: product.primary_image().map(str::to_string),
            hover_image: product.hover_image.clone(),
            price: resolved.price_label(),
            mrp: resolved.mrp_label(),
            discount: resolved.discount_label(),
            sold_out: resolved.sold_out,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub name: String,
    pub price: String,
    pub mrp: String,
    pub purchasable: bool,
}

impl From<&Size> for SizeOption {
    fn from(size: &Size) -> Self {
        let price = size.price.unwrap_or(Decimal::ZERO);

        Self {
            name: size.name.clone().unwrap_or_default(),
            price: pricing::format_price(pricing::effective_price(size)),
            mrp: pricing::format_price(price),
            purchasable: size.is_purchasable(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub name: Option<String>,
    pub images: Vec<String>,
    pub sizes: Vec<SizeOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub card: ProductCard,
    pub description: Option<String>,
    pub variants: Vec<VariantOption>,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        let variants = product
            .variants()
            .iter()
            .map(|v| VariantOption {
                name: v.name.clone(),
                images: v.images.clone(),
                sizes: v.sizes.iter().map(SizeOption::from).collect(),
            })
            .collect();

        Self {
            card: ProductCard::from(&product),
            description: product.description,
            variants,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub trending: Vec<ProductCard>,
    pub new_arrivals: Vec<ProductCard>,
    pub collections: Vec<ProductCard>,
}
