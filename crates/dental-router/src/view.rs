//! View descriptors.

use serde::{Deserialize, Serialize};

/// Result of returning from the hosted checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Succeeded,
    Canceled,
}

impl CheckoutOutcome {
    /// Query parameter set by the checkout redirect.
    pub fn query_key(&self) -> &'static str {
        match self {
            CheckoutOutcome::Succeeded => "success",
            CheckoutOutcome::Canceled => "canceled",
        }
    }
}

/// Static content pages with no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentPage {
    About,
    ShippingPolicy,
    ReturnPolicy,
    PrivacyPolicy,
    TermsOfService,
    Warranty,
    Financing,
    Showroom,
    Careers,
    Accessibility,
}

impl ContentPage {
    pub const ALL: [ContentPage; 10] = [
        ContentPage::About,
        ContentPage::ShippingPolicy,
        ContentPage::ReturnPolicy,
        ContentPage::PrivacyPolicy,
        ContentPage::TermsOfService,
        ContentPage::Warranty,
        ContentPage::Financing,
        ContentPage::Showroom,
        ContentPage::Careers,
        ContentPage::Accessibility,
    ];

    /// Path segment for this page.
    pub fn slug(&self) -> &'static str {
        match self {
            ContentPage::About => "about",
            ContentPage::ShippingPolicy => "shipping-policy",
            ContentPage::ReturnPolicy => "return-policy",
            ContentPage::PrivacyPolicy => "privacy-policy",
            ContentPage::TermsOfService => "terms-of-service",
            ContentPage::Warranty => "warranty",
            ContentPage::Financing => "financing",
            ContentPage::Showroom => "showroom",
            ContentPage::Careers => "careers",
            ContentPage::Accessibility => "accessibility",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ContentPage::About => "About Us",
            ContentPage::ShippingPolicy => "Shipping Policy",
            ContentPage::ReturnPolicy => "Return Policy",
            ContentPage::PrivacyPolicy => "Privacy Policy",
            ContentPage::TermsOfService => "Terms of Service",
            ContentPage::Warranty => "Warranty",
            ContentPage::Financing => "Financing",
            ContentPage::Showroom => "Showroom",
            ContentPage::Careers => "Careers",
            ContentPage::Accessibility => "Accessibility",
        }
    }
}

/// The page the storefront is showing, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    AllProducts,
    #[serde(rename_all = "camelCase")]
    ProductList {
        category_name: String,
        parent_category: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ProductDetail { item_number: String },
    Search { query: String },
    Cart { checkout: Option<CheckoutOutcome> },
    EverydayEssentials,
    Promotions,
    Brands { brand: Option<String> },
    Blog,
    #[serde(rename_all = "camelCase")]
    BlogPost { post_id: String },
    Faq { category: Option<String> },
    BuyingGuides,
    BuyingGuide { guide: String },
    Contact,
    Account,
    Page { page: ContentPage },
}

impl View {
    pub fn product_list(category: impl Into<String>, parent: Option<&str>) -> Self {
        View::ProductList {
            category_name: category.into(),
            parent_category: parent.map(str::to_string),
        }
    }

    pub fn product(item_number: impl Into<String>) -> Self {
        View::ProductDetail {
            item_number: item_number.into(),
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        View::Search {
            query: query.into(),
        }
    }

    pub fn cart() -> Self {
        View::Cart { checkout: None }
    }

    pub fn blog_post(post_id: impl Into<String>) -> Self {
        View::BlogPost {
            post_id: post_id.into(),
        }
    }

    pub fn page(page: ContentPage) -> Self {
        View::Page { page }
    }

    /// Short name of the view kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::AllProducts => "all-products",
            View::ProductList { .. } => "product-list",
            View::ProductDetail { .. } => "product-detail",
            View::Search { .. } => "search",
            View::Cart { .. } => "cart",
            View::EverydayEssentials => "everyday-essentials",
            View::Promotions => "promotions",
            View::Brands { .. } => "brands",
            View::Blog => "blog",
            View::BlogPost { .. } => "blog-post",
            View::Faq { .. } => "faq",
            View::BuyingGuides => "buying-guides",
            View::BuyingGuide { .. } => "buying-guide",
            View::Contact => "contact",
            View::Account => "account",
            View::Page { page } => page.slug(),
        }
    }

    /// Heading for the page, where the view determines it.
    pub fn title(&self) -> String {
        match self {
            View::Home => "Home".to_string(),
            View::AllProducts => "All Products".to_string(),
            View::ProductList { category_name, .. } => category_name.clone(),
            View::ProductDetail { item_number } => format!("Item {}", item_number),
            View::Search { query } if query.is_empty() => "Search".to_string(),
            View::Search { query } => format!("Search results for \"{}\"", query),
            View::Cart { .. } => "Shopping Cart".to_string(),
            View::EverydayEssentials => "Everyday Essentials".to_string(),
            View::Promotions => "All Promotion Products".to_string(),
            View::Brands { brand: Some(b) } => b.clone(),
            View::Brands { brand: None } => "Shop by Brand".to_string(),
            View::Blog => "Blog".to_string(),
            View::BlogPost { .. } => "Blog".to_string(),
            View::Faq { .. } => "Frequently Asked Questions".to_string(),
            View::BuyingGuides => "Buying Guides".to_string(),
            View::BuyingGuide { .. } => "Buying Guide".to_string(),
            View::Contact => "Contact Us".to_string(),
            View::Account => "My Account".to_string(),
            View::Page { page } => page.title().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_page_slugs() {
        for page in ContentPage::ALL {
            assert_eq!(ContentPage::from_slug(page.slug()), Some(page));
        }
        assert_eq!(ContentPage::from_slug("nope"), None);
    }

    #[test]
    fn test_view_json_shape() {
        let view = View::product_list("Dental Chairs", Some("Equipment"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "product-list");
        assert_eq!(json["categoryName"], "Dental Chairs");
        assert_eq!(json["parentCategory"], "Equipment");

        let back: View = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_titles() {
        assert_eq!(View::search("").title(), "Search");
        assert_eq!(View::search("gloves").title(), "Search results for \"gloves\"");
        assert_eq!(View::page(ContentPage::TermsOfService).title(), "Terms of Service");
    }
}
