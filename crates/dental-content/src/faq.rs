//! Frequently asked questions.

use dental_router::View;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// A group of questions shown under one heading on the FAQ page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FaqSection {
    pub slug: &'static str,
    pub title: &'static str,
    pub entries: Vec<FaqEntry>,
}

impl FaqSection {
    /// View that opens the FAQ page at this section.
    pub fn view(&self) -> View {
        View::Faq {
            category: Some(self.slug.to_string()),
        }
    }
}

fn entry(question: &'static str, answer: &'static str) -> FaqEntry {
    FaqEntry { question, answer }
}

/// All FAQ sections in page order.
pub fn faq_sections() -> Vec<FaqSection> {
    vec![
        FaqSection {
            slug: "ordering",
            title: "Ordering",
            entries: vec![
                entry(
                    "How do I place an order?",
                    "Add items to your cart and check out. Payment is taken on our secure hosted checkout page.",
                ),
                entry(
                    "Can I order by phone?",
                    "Yes. Call our sales team during business hours and have the item numbers ready.",
                ),
                entry(
                    "Do you offer volume pricing?",
                    "Practices and groups ordering in volume can contact us for a quote.",
                ),
            ],
        },
        FaqSection {
            slug: "shipping",
            title: "Shipping & Delivery",
            entries: vec![
                entry(
                    "How much is shipping?",
                    "Standard shipping is free on every order in the contiguous United States.",
                ),
                entry(
                    "How long does delivery take?",
                    "Supplies usually ship within one business day. Large equipment ships freight and is scheduled with you.",
                ),
                entry(
                    "Is tax included in the cart total?",
                    "No. Sales tax is calculated at checkout from your shipping address.",
                ),
            ],
        },
        FaqSection {
            slug: "returns",
            title: "Returns & Warranty",
            entries: vec![
                entry(
                    "What is your return policy?",
                    "Unopened supplies can be returned within 30 days. Equipment returns require authorization.",
                ),
                entry(
                    "Who handles warranty claims?",
                    "Contact us with the item number and serial number and we coordinate with the manufacturer.",
                ),
            ],
        },
        FaqSection {
            slug: "account",
            title: "Account & Billing",
            entries: vec![
                entry(
                    "Where can I see my invoices?",
                    "Open My Account and follow the billing portal link to view invoices and payment methods.",
                ),
                entry(
                    "Do you offer financing?",
                    "Yes, equipment financing is available through our partners. See the Financing page.",
                ),
            ],
        },
    ]
}

/// Look up a section by slug.
pub fn faq_section(slug: &str) -> Option<FaqSection> {
    faq_sections().into_iter().find(|s| s.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_router::{url_to_view, view_to_url};

    #[test]
    fn test_section_lookup() {
        let shipping = faq_section("shipping").unwrap();
        assert_eq!(shipping.title, "Shipping & Delivery");
        assert!(faq_section("nope").is_none());
    }

    #[test]
    fn test_section_views_route() {
        for section in faq_sections() {
            assert!(!section.entries.is_empty());
            let view = section.view();
            assert_eq!(url_to_view(&view_to_url(&view), ""), view);
        }
    }
}
