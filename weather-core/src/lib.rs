//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The report model served by the dashboard API
//! - An HTTP client for that API
//! - Configuration (API origin, timeout)
//! - Card rendering: pure mapping from a report to display values, plus the
//!   AFDRS fire danger palette and legend
//! - An HTML binding for rendered cards
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod card;
pub mod client;
pub mod config;
pub mod html;
pub mod model;
pub mod rating;

pub use card::{Card, CardState, CardView, render};
pub use client::{ApiError, DEFAULT_COUNTRY, HttpWeatherApi, WeatherApi};
pub use config::{ClientSettings, Config, ConfigError};
pub use html::{HtmlError, HtmlRenderer};
pub use model::{DayForecast, FireDangerDay, HealthStatus, WeatherReport};
pub use rating::{BadgeColors, FireDangerRating, TextTone};
