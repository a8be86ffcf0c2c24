// src/registry/page.rs

// --- Imports ---
use crate::registry::models::ProjectAttributes;
use crate::utils::error::RegistryError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static DOCUMENT_GROUP_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("apx-document-group").expect("Failed to compile DOCUMENT_GROUP_SELECTOR")
});

static CARD_HEADER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.card-header").expect("Failed to compile CARD_HEADER_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("Failed to compile CELL_SELECTOR"));

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("Failed to compile LINK_SELECTOR"));

// Attribute tables are walked cell by cell in document order.
static ATTRIBUTE_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("th, td").expect("Failed to compile ATTRIBUTE_CELL_SELECTOR")
});

const REGISTRY_DATE_FORMAT: &str = "%d/%m/%Y";
const SUB_HEADING_CLASS: &str = "attr-sub-hdg";

// --- Data Structures ---
/// A document row from the registry project page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListing {
    pub section: String,
    pub filename: String,
    pub url: String,
    pub updated: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryPage {
    pub documents: Vec<DocumentListing>,
    pub attributes: ProjectAttributes,
}

/// Parses a saved registry project page.
///
/// Rows without a link or with an unreadable date are skipped with a warning.
pub fn parse_registry_page(html: &str) -> RegistryPage {
    let document = Html::parse_document(html);
    RegistryPage {
        documents: parse_document_listing(&document),
        attributes: parse_attributes(&document),
    }
}

pub fn parse_registry_date(value: &str) -> Result<NaiveDate, RegistryError> {
    NaiveDate::parse_from_str(value.trim(), REGISTRY_DATE_FORMAT)
        .map_err(|_| RegistryError::Date(value.trim().to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_document_listing(document: &Html) -> Vec<DocumentListing> {
    let mut listings = Vec::new();

    for group in document.select(&DOCUMENT_GROUP_SELECTOR) {
        let section = group
            .select(&CARD_HEADER_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_default();
        tracing::debug!("Iterating through document group '{}'", section);

        for row in group.select(&ROW_SELECTOR) {
            let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
            if cells.len() < 2 {
                continue; // header or spacer row
            }

            let Some(link) = cells[0].select(&LINK_SELECTOR).next() else {
                tracing::warn!("Document row in '{}' has no link, skipping", section);
                continue;
            };

            let updated = match parse_registry_date(&element_text(cells[1])) {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!("Skipping document row: {}", e);
                    continue;
                }
            };

            listings.push(DocumentListing {
                section: section.clone(),
                filename: element_text(link),
                url: link.value().attr("href").unwrap_or_default().to_string(),
                updated,
            });
        }
    }

    listings
}

/// Collects the values listed under the "VCS" sub-heading, ignoring the CCB block.
fn parse_attributes(document: &Html) -> ProjectAttributes {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    let mut in_vcs_block = false;
    let mut collecting = false;

    for cell in document.select(&ATTRIBUTE_CELL_SELECTOR) {
        let text = element_text(cell);
        let is_header = cell.value().name() == "th";

        if is_header && cell.value().classes().any(|c| c == SUB_HEADING_CLASS) {
            match text.as_str() {
                "VCS" => in_vcs_block = true,
                "CCB" => in_vcs_block = false,
                _ => {}
            }
            collecting = false;
            continue;
        }

        if in_vcs_block && is_header {
            entries.push((text, Vec::new()));
            collecting = true;
        } else if collecting && !is_header {
            if let Some((_, values)) = entries.last_mut() {
                values.push(text);
            }
        }
    }

    let mut attributes = ProjectAttributes::default();
    for (key, values) in entries {
        if values.is_empty() {
            continue;
        }
        let joined = values.join(", ");
        match key.as_str() {
            "Proponent" => attributes.proponent = Some(joined),
            "Estimated Annual Emission Reductions" => attributes.annual_emission_red = Some(joined),
            "VCS Methodology" => attributes.vcs_methodology = Some(joined),
            "Acres/Hectares" => {
                attributes.hectares = values[0].split_whitespace().next().map(str::to_string);
            }
            "VCS Project Validator" => attributes.vcs_project_validator = Some(joined),
            "Project Registration Date" => match parse_registry_date(&values.concat()) {
                Ok(date) => attributes.registration_date = Some(date),
                Err(e) => tracing::warn!("Ignoring registration date: {}", e),
            },
            "Crediting Period Term" => attributes.crediting_period_term = Some(joined),
            _ => continue,
        }
        tracing::info!("{}: {}", key, values.join(", "));
    }

    attributes
}
