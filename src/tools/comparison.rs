//! Product Comparison Builder: basics, per-product details, composed
//! comparison article.

use crate::wizard::{Requirement, Rule, StepDef, WizardSession};

use super::{FieldSpec, InputKind, StepLayout};

pub static STEPS: &[StepDef] = &[
    StepDef {
        index: 1,
        title: "Basic Information",
        description: "Set up your comparison details",
        required: &[
            Requirement {
                field: "title",
                rule: Rule::NonEmptyText,
            },
            Requirement {
                field: "description",
                rule: Rule::NonEmptyText,
            },
        ],
    },
    StepDef {
        index: 2,
        title: "Product Details",
        description: "Add information for each product",
        required: &[Requirement {
            field: "products",
            rule: Rule::EntriesPopulated {
                required_keys: &["details", "pros", "cons"],
            },
        }],
    },
    StepDef {
        index: 3,
        title: "Generated Content",
        description: "Review your comparison content",
        required: &[],
    },
];

pub const LANGUAGES: &[&str] = &["English", "Spanish", "French", "German"];

pub const MIN_PRODUCTS: usize = 2;
pub const MAX_PRODUCTS: usize = 4;
const DEFAULT_PRODUCTS: usize = 3;

/// Keys edited per product row, in form order.
pub const PRODUCT_KEYS: &[(&str, &str)] = &[
    ("name", "Product Name"),
    ("details", "Details"),
    ("pros", "Pros (one per line)"),
    ("cons", "Cons (one per line)"),
];

const BASIC_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        label: "Comparison Title",
        placeholder: "e.g. Best Wireless Earbuds 2026",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "keywords",
        label: "Keywords",
        placeholder: "Enter keywords separated by commas...",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "language",
        label: "Language",
        placeholder: "Select language",
        kind: InputKind::Select {
            options: LANGUAGES,
            custom: None,
        },
    },
    FieldSpec {
        name: "description",
        label: "Description",
        placeholder: "What is being compared and for whom?",
        kind: InputKind::Paragraph,
    },
    FieldSpec {
        name: "product_count",
        label: "Number of Products",
        placeholder: "",
        kind: InputKind::Stepper {
            min: MIN_PRODUCTS,
            max: MAX_PRODUCTS,
        },
    },
];

pub fn layout(step: usize) -> StepLayout {
    match step {
        1 => StepLayout::Form(BASIC_FIELDS),
        2 => StepLayout::Products,
        _ => StepLayout::Output,
    }
}

pub fn product_count(session: &WizardSession) -> usize {
    session
        .choice("product_count")
        .unwrap_or(DEFAULT_PRODUCTS)
        .clamp(MIN_PRODUCTS, MAX_PRODUCTS)
}

/// Size the products list to the selected count. Called when step 1 is
/// left so the count field is settled first.
pub fn seed_products(session: &mut WizardSession) {
    let count = product_count(session);
    session.resize_entries("products", count);
}

fn display_name(entry: &crate::wizard::Entry, index: usize) -> String {
    let name = entry.get("name").trim();
    if !name.is_empty() {
        return name.to_string();
    }
    // Fall back to the first sentence of the details blurb.
    let details = entry.get("details");
    let first = details
        .split('.')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match first {
        Some(s) => s.to_string(),
        None => format!("Product {}", index + 1),
    }
}

fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Compose the full comparison article from the payload.
pub fn compose(session: &WizardSession) -> String {
    let products = session.entries("products");
    let count = products.len();
    let mut out = String::new();

    out.push_str(session.text("title").trim());
    out.push_str("\n\n");
    out.push_str(session.text("description").trim());
    out.push_str("\n\n");

    for (i, product) in products.iter().enumerate() {
        let name = display_name(product, i);
        out.push_str(&format!("## {}. {}\n\n", i + 1, name));
        out.push_str(product.get("details").trim());
        out.push_str("\n\nPros:\n");
        for pro in lines(product.get("pros")) {
            out.push_str(&format!("- {pro}\n"));
        }
        out.push_str("\nCons:\n");
        for con in lines(product.get("cons")) {
            out.push_str(&format!("- {con}\n"));
        }
        out.push('\n');
    }

    out.push_str("## Detailed Pros and Cons Analysis\n\nKey Advantages:\n");
    for (i, product) in products.iter().enumerate() {
        let name = display_name(product, i);
        for pro in lines(product.get("pros")).into_iter().take(2) {
            out.push_str(&format!("- {name}: {pro}\n"));
        }
    }
    out.push_str("\nKey Limitations:\n");
    for (i, product) in products.iter().enumerate() {
        let name = display_name(product, i);
        for con in lines(product.get("cons")).into_iter().take(2) {
            out.push_str(&format!("- {name}: {con}\n"));
        }
    }

    out.push_str(&format!(
        "\n## Summary\n\nAfter analyzing all {count} products in detail, each option brings \
         unique strengths to the table. Here's a quick summary to help you decide:\n\n"
    ));
    for (i, product) in products.iter().enumerate() {
        let name = display_name(product, i);
        if let Some(main_pro) = lines(product.get("pros")).first() {
            out.push_str(&format!("- {name} - {main_pro}\n"));
        }
    }

    out.push_str(&format!(
        "\n## Conclusion\n\nChoosing between these {count} excellent options ultimately depends \
         on your specific needs, budget, and personal preferences. Each product excels in \
         different areas, making them suitable for different types of users.\n\nConsider your \
         primary use case, budget constraints, and the features that matter most to you. We \
         recommend taking advantage of return policies and trial periods when available, since \
         the \"best\" choice is the one that aligns most closely with your individual \
         requirements.\n"
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    fn filled_session() -> WizardSession {
        let mut s = ToolKind::Comparison.new_session();
        s.set_text("title", "Best Earbuds 2026");
        s.set_text("description", "Three premium picks compared.");
        s.set_choice("product_count", 2);
        seed_products(&mut s);
        for (row, name) in ["AirPods Pro", "WF-1000XM4"].iter().enumerate() {
            s.update_entry("products", row, "name", *name);
            s.update_entry("products", row, "details", "Premium earbuds. Great sound.");
            s.update_entry("products", row, "pros", "Great ANC\nComfortable");
            s.update_entry("products", row, "cons", "Expensive\nBulky case");
        }
        s
    }

    #[test]
    fn step_two_blocks_until_every_product_is_filled() {
        let mut s = ToolKind::Comparison.new_session();
        s.set_text("title", "T");
        s.set_text("description", "D");
        assert!(s.advance());
        seed_products(&mut s);
        assert!(!s.advance());
        s.update_entry("products", 0, "details", "d");
        s.update_entry("products", 0, "pros", "p");
        s.update_entry("products", 0, "cons", "c");
        // Remaining rows still empty.
        assert!(!s.advance());
    }

    #[test]
    fn seed_products_matches_selected_count() {
        let mut s = ToolKind::Comparison.new_session();
        s.set_choice("product_count", 4);
        seed_products(&mut s);
        assert_eq!(s.entries("products").len(), 4);
        s.set_choice("product_count", 2);
        seed_products(&mut s);
        assert_eq!(s.entries("products").len(), 2);
    }

    #[test]
    fn compose_covers_every_section() {
        let s = filled_session();
        let article = compose(&s);
        assert!(article.starts_with("Best Earbuds 2026"));
        assert!(article.contains("## 1. AirPods Pro"));
        assert!(article.contains("## 2. WF-1000XM4"));
        assert!(article.contains("Key Advantages:"));
        assert!(article.contains("Key Limitations:"));
        assert!(article.contains("all 2 products"));
        assert!(article.contains("## Conclusion"));
    }

    #[test]
    fn display_name_falls_back_to_details_sentence() {
        let mut s = ToolKind::Comparison.new_session();
        s.resize_entries("products", 1);
        s.update_entry("products", 0, "details", "Flagship earbuds. Very light.");
        let article = {
            s.set_text("title", "T");
            s.set_text("description", "D");
            s.update_entry("products", 0, "pros", "p");
            s.update_entry("products", 0, "cons", "c");
            compose(&s)
        };
        assert!(article.contains("## 1. Flagship earbuds"));
    }
}
