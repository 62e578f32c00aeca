//! Category types and the static category tree.
//!
//! The storefront's category hierarchy is two levels deep: a top-level
//! department (e.g. "Equipment") holding leaf categories (e.g. "Dental
//! Chairs"). Category URLs use slugs, so the tree is also the authority for
//! turning a slug back into its display name.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A category record as stored in the product database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Parent category name (None for departments).
    #[serde(default, alias = "parentCategory")]
    pub parent: Option<String>,
    /// Sort order within the parent. Unordered categories sort last.
    #[serde(default)]
    pub order: Option<i32>,
    /// Tile image.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: parent.map(str::to_string),
            order: None,
            image_url: None,
        }
    }

    /// Display ordering: explicit `order` first, then unordered, then by name.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.order, other.order) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.name.cmp(&other.name))
    }

    /// Check if this is a top-level department.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// A node of the category tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    pub name: String,
    pub slug: String,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            children: Vec::new(),
        }
    }

    fn with_children(name: &str, children: &[&str]) -> Self {
        let mut node = Self::new(name);
        node.children = children.iter().map(|c| CategoryNode::new(*c)).collect();
        node
    }

    pub fn child_by_slug(&self, slug: &str) -> Option<&CategoryNode> {
        self.children.iter().find(|c| c.slug == slug)
    }
}

/// The two-level department / category hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryTree {
    pub roots: Vec<CategoryNode>,
}

impl CategoryTree {
    /// The storefront's built-in hierarchy, used for the mega menu and for
    /// resolving category slugs when live categories are unavailable.
    pub fn standard() -> Self {
        Self {
            roots: vec![
                CategoryNode::with_children(
                    "Equipment",
                    &[
                        "Dental Chairs",
                        "Delivery Systems",
                        "Dental Lights",
                        "Operatory Cabinetry",
                        "Dental Stools",
                        "Compressors & Vacuums",
                        "Sterilizers & Autoclaves",
                        "Handpieces",
                    ],
                ),
                CategoryNode::with_children(
                    "Imaging",
                    &[
                        "Intraoral Sensors",
                        "Panoramic X-Ray",
                        "Intraoral Cameras",
                        "Phosphor Plate Scanners",
                        "Cone Beam CT",
                    ],
                ),
                CategoryNode::with_children(
                    "Small Equipment",
                    &[
                        "Curing Lights",
                        "Ultrasonic Scalers",
                        "Amalgamators",
                        "Apex Locators",
                        "Electrosurgery Units",
                    ],
                ),
                CategoryNode::with_children(
                    "Supplies",
                    &[
                        "Gloves",
                        "Masks & Face Shields",
                        "Infection Control & Sterilization",
                        "Impression Materials",
                        "Restoratives",
                        "Endodontics",
                        "Disposables",
                    ],
                ),
                CategoryNode::with_children(
                    "Laboratory",
                    &["Lab Handpieces", "Articulators", "Model Trimmers", "Lab Furnaces"],
                ),
            ],
        }
    }

    /// Build a tree from flat category records, ordering by `order` then
    /// name. Records whose parent is missing become departments.
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut sorted: Vec<&Category> = categories.iter().collect();
        sorted.sort_by(|a, b| a.display_cmp(b));

        let known: Vec<&str> = sorted.iter().map(|c| c.name.as_str()).collect();
        let mut roots: Vec<CategoryNode> = sorted
            .iter()
            .filter(|c| match c.parent.as_deref() {
                None => true,
                Some(p) => !known.contains(&p),
            })
            .map(|c| CategoryNode::new(c.name.clone()))
            .collect();

        for category in &sorted {
            if let Some(parent) = category.parent.as_deref() {
                if let Some(root) = roots.iter_mut().find(|r| r.name == parent) {
                    root.children.push(CategoryNode::new(category.name.clone()));
                }
            }
        }

        Self { roots }
    }

    pub fn root_by_slug(&self, slug: &str) -> Option<&CategoryNode> {
        self.roots.iter().find(|r| r.slug == slug)
    }

    /// Resolve a slug anywhere in the tree to its display name.
    pub fn name_for_slug(&self, slug: &str) -> Option<&str> {
        self.roots
            .iter()
            .flat_map(|r| std::iter::once(r).chain(r.children.iter()))
            .find(|n| n.slug == slug)
            .map(|n| n.name.as_str())
    }

    /// Resolve a `parent/child` slug pair.
    pub fn resolve_pair(&self, parent_slug: &str, child_slug: &str) -> Option<(&str, &str)> {
        let parent = self.root_by_slug(parent_slug)?;
        let child = parent.child_by_slug(child_slug)?;
        Some((parent.name.as_str(), child.name.as_str()))
    }

    /// Department that holds a leaf category.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.roots
            .iter()
            .find(|r| r.children.iter().any(|c| c.name.eq_ignore_ascii_case(name)))
            .map(|r| r.name.as_str())
    }

    /// All leaf category names, in tree order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.roots
            .iter()
            .flat_map(|r| r.children.iter().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Turn a display name into a URL slug.
///
/// Lower-cases, spells `&` as `and`, and collapses every run of other
/// non-alphanumeric characters into one `-`.
///
/// ```
/// use dental_commerce::catalog::slugify;
/// assert_eq!(slugify("Compressors & Vacuums"), "compressors-and-vacuums");
/// assert_eq!(slugify("Panoramic X-Ray"), "panoramic-x-ray");
/// ```
pub fn slugify(name: &str) -> String {
    let spelled = name.replace('&', " and ");
    let mut slug = String::with_capacity(spelled.len());
    let mut pending_dash = false;
    for ch in spelled.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
