//! Buying guides.

use dental_router::View;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GuideSection {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BuyingGuide {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    /// Department and category the guide shops into.
    pub parent_category: &'static str,
    pub category: &'static str,
    pub sections: Vec<GuideSection>,
}

impl BuyingGuide {
    pub fn view(&self) -> View {
        View::BuyingGuide {
            guide: self.slug.to_string(),
        }
    }

    /// Listing the guide links to.
    pub fn shop_view(&self) -> View {
        View::product_list(self.category, Some(self.parent_category))
    }
}

fn section(heading: &'static str, body: &'static str) -> GuideSection {
    GuideSection { heading, body }
}

pub fn buying_guides() -> Vec<BuyingGuide> {
    vec![
        BuyingGuide {
            slug: "dental-chairs",
            title: "Dental Chair Buying Guide",
            summary: "What to compare when choosing patient chairs for new or existing operatories.",
            parent_category: "Equipment",
            category: "Dental Chairs",
            sections: vec![
                section(
                    "Ergonomics",
                    "Check the lowest and highest seat positions against your clinicians' working posture.",
                ),
                section(
                    "Delivery mounting",
                    "Chair-mounted delivery moves with the patient. Cabinet or rear delivery keeps the chair lighter.",
                ),
                section(
                    "Service",
                    "Ask about parts availability and local technicians before comparing price.",
                ),
            ],
        },
        BuyingGuide {
            slug: "intraoral-sensors",
            title: "Intraoral Sensor Buying Guide",
            summary: "Sensor sizes, cable options and imaging software compatibility.",
            parent_category: "Imaging",
            category: "Intraoral Sensors",
            sections: vec![
                section(
                    "Sizes",
                    "Most practices keep a size 1 and a size 2 sensor. Pediatric practices add a size 0.",
                ),
                section(
                    "Software",
                    "Confirm the sensor has a driver for your imaging software before you buy.",
                ),
            ],
        },
        BuyingGuide {
            slug: "sterilizers",
            title: "Sterilizer Buying Guide",
            summary: "Chamber size, cycle time and drying performance for your instrument volume.",
            parent_category: "Equipment",
            category: "Sterilizers & Autoclaves",
            sections: vec![
                section(
                    "Capacity",
                    "Size the chamber for your busiest day, including cassettes and handpieces.",
                ),
                section(
                    "Cycle time",
                    "Faster cycles reduce the number of instrument sets you need on hand.",
                ),
            ],
        },
        BuyingGuide {
            slug: "curing-lights",
            title: "Curing Light Buying Guide",
            summary: "Output, spectrum and battery life for composite curing.",
            parent_category: "Small Equipment",
            category: "Curing Lights",
            sections: vec![section(
                "Spectrum",
                "Broad-spectrum lights cure materials with alternative photoinitiators.",
            )],
        },
    ]
}

/// Look up a guide by slug.
pub fn guide(slug: &str) -> Option<BuyingGuide> {
    buying_guides().into_iter().find(|g| g.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_router::{url_to_view, view_to_url};

    #[test]
    fn test_guide_lookup() {
        assert_eq!(guide("sterilizers").unwrap().category, "Sterilizers & Autoclaves");
        assert!(guide("unknown").is_none());
    }

    #[test]
    fn test_shop_links_resolve() {
        for g in buying_guides() {
            let shop = g.shop_view();
            assert_eq!(url_to_view(&view_to_url(&shop), ""), shop, "{}", g.slug);
        }
    }
}
