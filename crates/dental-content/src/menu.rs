//! Mega menu.
//!
//! One section per department, each with columns of category links, followed
//! by the shop and resource sections. Every link carries the [`View`] it opens.

use dental_commerce::catalog::CategoryTree;
use dental_router::{view_to_url, View};
use serde::Serialize;

/// Links per column in a department section.
const COLUMN_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuLink {
    pub label: String,
    pub view: View,
}

impl MenuLink {
    pub fn new(label: impl Into<String>, view: View) -> Self {
        Self {
            label: label.into(),
            view,
        }
    }

    pub fn href(&self) -> String {
        view_to_url(&self.view)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuColumn {
    pub heading: Option<String>,
    pub links: Vec<MenuLink>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuSection {
    pub title: String,
    /// Where the section title itself links, if anywhere.
    pub view: Option<View>,
    pub columns: Vec<MenuColumn>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct MegaMenu {
    pub sections: Vec<MenuSection>,
}

impl MegaMenu {
    /// Menu over the built-in category tree.
    pub fn standard() -> Self {
        Self::from_tree(&CategoryTree::standard())
    }

    pub fn from_tree(tree: &CategoryTree) -> Self {
        let mut sections: Vec<MenuSection> = tree
            .roots
            .iter()
            .map(|root| {
                let links: Vec<MenuLink> = root
                    .children
                    .iter()
                    .map(|child| {
                        MenuLink::new(
                            child.name.clone(),
                            View::product_list(child.name.clone(), Some(root.name.as_str())),
                        )
                    })
                    .collect();
                MenuSection {
                    title: root.name.clone(),
                    view: Some(View::product_list(root.name.clone(), None)),
                    columns: links
                        .chunks(COLUMN_SIZE)
                        .map(|chunk| MenuColumn {
                            heading: None,
                            links: chunk.to_vec(),
                        })
                        .collect(),
                }
            })
            .collect();

        sections.push(MenuSection {
            title: "Shop".to_string(),
            view: Some(View::AllProducts),
            columns: vec![MenuColumn {
                heading: None,
                links: vec![
                    MenuLink::new("All Products", View::AllProducts),
                    MenuLink::new("Everyday Essentials", View::EverydayEssentials),
                    MenuLink::new("Promotions", View::Promotions),
                    MenuLink::new("Shop by Brand", View::Brands { brand: None }),
                ],
            }],
        });
        sections.push(MenuSection {
            title: "Resources".to_string(),
            view: None,
            columns: vec![MenuColumn {
                heading: None,
                links: vec![
                    MenuLink::new("Blog", View::Blog),
                    MenuLink::new("Buying Guides", View::BuyingGuides),
                    MenuLink::new("FAQ", View::Faq { category: None }),
                    MenuLink::new("Contact Us", View::Contact),
                ],
            }],
        });

        Self { sections }
    }

    /// Every link in menu order.
    pub fn links(&self) -> impl Iterator<Item = &MenuLink> {
        self.sections
            .iter()
            .flat_map(|s| s.columns.iter())
            .flat_map(|c| c.links.iter())
    }

    pub fn section(&self, title: &str) -> Option<&MenuSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dental_router::url_to_view;

    #[test]
    fn test_standard_sections() {
        let menu = MegaMenu::standard();
        let titles: Vec<&str> = menu.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Equipment", "Imaging", "Small Equipment", "Supplies", "Laboratory", "Shop", "Resources"]
        );

        // eight equipment categories split into columns of five
        let equipment = menu.section("Equipment").unwrap();
        assert_eq!(equipment.columns.len(), 2);
        assert_eq!(equipment.columns[1].links.len(), 3);
    }

    #[test]
    fn test_every_link_round_trips() {
        for link in MegaMenu::standard().links() {
            let href = link.href();
            let (path, query) = href.split_once('?').unwrap_or((href.as_str(), ""));
            assert_eq!(url_to_view(path, query), link.view, "{}", href);
        }
    }

    #[test]
    fn test_category_href() {
        let menu = MegaMenu::standard();
        let link = menu
            .links()
            .find(|l| l.label == "Compressors & Vacuums")
            .unwrap();
        assert_eq!(link.href(), "/category/equipment/compressors-and-vacuums");
    }
}
