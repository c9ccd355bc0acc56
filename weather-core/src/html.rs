//! HTML binding for weather cards.
//!
//! Templates are embedded and rendered with tera, autoescaping on. Elements
//! tests and front-end code rely on carry a `data-testid` from [`markers`].

use tera::{Context, Tera};
use thiserror::Error;

use crate::card::Card;

pub mod markers {
    pub const CARD: &str = "weather-card";
    pub const CARD_TOGGLE: &str = "card-toggle";
    pub const CARD_BODY: &str = "card-body";
    pub const FORECAST_DAY: &str = "forecast-day";
    pub const FIRE_BAN_BANNER: &str = "fire-ban-banner";
    pub const FDR_ROW: &str = "fdr-row";
    pub const FDR_DAY: &str = "fdr-day";
    pub const FDR_BADGE: &str = "fdr-badge";
    pub const FDR_HELP_BUTTON: &str = "fdr-help-btn";
    pub const FDR_HELP_PANEL: &str = "fdr-help-panel";
}

#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

mod embedded {
    pub const CARD: &str = r#"<section class="weather-card" data-testid="weather-card">
  <header class="card-header">
    <h2>{{ card.location }}</h2>
    <button type="button" data-testid="card-toggle" aria-expanded="{{ state.body_expanded }}">{% if state.body_expanded %}Hide{% else %}Show{% endif %}</button>
  </header>
{%- if state.body_expanded %}
  <div class="card-body" data-testid="card-body">
{%- if card.fire_ban %}
    <div class="fire-ban" data-testid="fire-ban-banner">{{ card.fire_ban }}</div>
{%- endif %}
    <div class="current">
      <span class="temperature">{{ card.current }}</span>
      <span class="description">{{ card.description }}</span>
      <span class="min">{{ card.min }}</span>
      <span class="max">{{ card.max }}</span>
      <span class="humidity">Humidity {{ card.humidity }}</span>
      <span class="wind">Wind {{ card.wind }}</span>
    </div>
    <ol class="forecast">
{%- for day in card.forecast %}
      <li data-testid="forecast-day"><span class="day">{{ day.day }}</span> <span class="min">{{ day.min }}</span> <span class="max">{{ day.max }}</span></li>
{%- endfor %}
    </ol>
    <nav class="links">
{%- for link in card.links %}
      <a href="{{ link.href }}"{% if link.new_tab %} target="_blank" rel="noopener"{% endif %}>{{ link.text }}</a>
{%- endfor %}
    </nav>
{%- if has_fire_danger %}
    <div class="fdr" data-testid="fdr-row">
{%- for cell in card.fire_danger %}
      <div class="fdr-day" data-testid="fdr-day">
        <span class="label">{{ cell.label }}</span>
        <span class="badge" data-testid="fdr-badge" style="background-color: {{ cell.badge.colors.background }};{% if cell.badge.colors.foreground %} color: {{ cell.badge.colors.foreground }};{% endif %}">{{ cell.badge.text }}</span>
      </div>
{%- endfor %}
      <button type="button" data-testid="fdr-help-btn" aria-expanded="{{ state.help_panel_open }}">?</button>
    </div>
{%- if legend %}
    <table class="fdr-help" data-testid="fdr-help-panel">
      <tr><th>Rating</th><th>FBI</th></tr>
{%- for entry in legend %}
      <tr><td><span class="badge" style="background-color: {{ entry.colors.background }};{% if entry.colors.foreground %} color: {{ entry.colors.foreground }};{% endif %}">{{ entry.rating }}</span></td><td>{{ entry.fbi_band }}</td></tr>
{%- endfor %}
    </table>
{%- endif %}
{%- endif %}
  </div>
{%- endif %}
</section>
"#;

    pub const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
</head>
<body>
{%- for card in cards %}
{{ card | safe }}
{%- endfor %}
</body>
</html>
"#;
}

const CARD_TEMPLATE: &str = "card.html";
const PAGE_TEMPLATE: &str = "page.html";

/// Renders [`Card`]s to HTML fragments or a full page.
pub struct HtmlRenderer {
    tera: Tera,
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer").finish_non_exhaustive()
    }
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, HtmlError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(CARD_TEMPLATE, embedded::CARD)?;
        tera.add_raw_template(PAGE_TEMPLATE, embedded::PAGE)?;

        Ok(Self { tera })
    }

    /// One card as an HTML fragment, honoring its toggle state.
    pub fn render_card(&self, card: &Card) -> Result<String, HtmlError> {
        let mut context = Context::new();
        context.insert("card", &card.view);
        context.insert("state", &card.state);
        context.insert("has_fire_danger", &card.view.has_fire_danger());
        context.insert("legend", &card.help_panel());

        Ok(self.tera.render(CARD_TEMPLATE, &context)?)
    }

    /// A standalone document containing every card in order.
    pub fn render_page(&self, title: &str, cards: &[Card]) -> Result<String, HtmlError> {
        let fragments = cards
            .iter()
            .map(|card| self.render_card(card))
            .collect::<Result<Vec<_>, _>>()?;

        let mut context = Context::new();
        context.insert("title", title);
        context.insert("cards", &fragments);

        Ok(self.tera.render(PAGE_TEMPLATE, &context)?)
    }
}
