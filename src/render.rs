use super::SimpleResult;
use super::error::CatalogResult;
use super::model::DATE_FORMAT;
use axum::response::Html;
use chrono::NaiveDate;
use handlebars::{Handlebars, handlebars_helper};
use rust_embed::RustEmbed;
use serde::Serialize;

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

handlebars_helper!(format_date_helper: |date: str| format_date(date));

/// Renders an ISO date as `DD/MM/YYYY`, anything else is returned as is.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn build_registry() -> SimpleResult<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("formatDate", Box::new(format_date_helper));
    try_with!(
        handlebars.register_embed_templates_with_extension::<Templates>(".hbs"),
        "Failed to register templates"
    );
    log::debug!(
        "Registered templates: {}",
        handlebars
            .get_templates()
            .keys()
            .cloned()
            .collect::<Vec<String>>()
            .join(", ")
    );
    Ok(handlebars)
}

pub fn render<T: Serialize>(
    handlebars: &Handlebars<'_>,
    name: &str,
    data: &T,
) -> CatalogResult<Html<String>> {
    Ok(Html(handlebars.render(name, data)?))
}
