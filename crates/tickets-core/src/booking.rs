// ── Booking links, QR codes and price display ──
//
// Affiliate booking URLs are the event's base URL plus a fixed block of
// tracking parameters, then whatever optional selections the caller made.
// Parameter order is stable: the booking page and the tests both rely on it.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, Luma};
use indexmap::IndexMap;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use tickets_api::{Currency, Event, Language};
use tracing::{error, warn};
use url::form_urlencoded;

const PARTNER: &str = "travelpayouts.com";
const UTM_MEDIUM: &str = "affiliate";
const UTM_CONTENT: &str = "availability_widget";

/// Pixel size of one QR module.
const QR_MODULE_PX: u32 = 10;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Optional selections carried into a booking URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingParams {
    pub currency: Currency,
    /// ISO date pre-selected on the booking page.
    pub date: Option<String>,
    pub timeslot: Option<String>,
    /// Ticket variant id → quantity, in caller order.
    pub tickets: IndexMap<String, u32>,
    pub language: Option<Language>,
    /// Partner campaign id (`tq_campaign`).
    pub campaign_id: Option<String>,
    /// Traffic source (`utm_source`).
    pub affiliate_source: Option<String>,
}

impl BookingParams {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }
}

/// Build the affiliate booking URL for `event`.
///
/// Returns an empty string when the event carries no booking URL.
pub fn generate_booking_url(event: &Event, params: &BookingParams) -> String {
    let base = event.booking_url.as_str();
    if base.is_empty() {
        warn!(event_id = event.id, "no booking URL found for event");
        return String::new();
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("currency", params.currency.as_ref())
        .append_pair("partner", PARTNER)
        .append_pair("utm_campaign", PARTNER)
        .append_pair("utm_medium", UTM_MEDIUM)
        .append_pair("utm_content", UTM_CONTENT);

    if let Some(campaign) = non_empty(params.campaign_id.as_deref()) {
        query.append_pair("tq_campaign", campaign);
    }
    if let Some(source) = non_empty(params.affiliate_source.as_deref()) {
        query.append_pair("utm_source", source);
    }
    if let Some(date) = non_empty(params.date.as_deref()) {
        query.append_pair("selected_date", date);
    }
    if let Some(timeslot) = non_empty(params.timeslot.as_deref()) {
        query.append_pair("selected_timeslot_id", timeslot);
    }
    if let Some(language) = params.language {
        query.append_pair("selected_variant_language", language.as_ref());
    }
    if !params.tickets.is_empty() {
        let variants = params
            .tickets
            .iter()
            .map(|(variant, qty)| format!("{variant}={qty}"))
            .collect::<Vec<_>>()
            .join("&");
        query.append_pair("selected_variants", &variants);
    }

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{}", query.finish())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Encode `url` as a PNG QR code wrapped in a `data:` URI.
///
/// Uses error-correction level L, the smallest version that fits, 10 px
/// modules and the standard 4-module quiet zone. Returns an empty string
/// if encoding fails.
pub fn generate_qr_code(url: &str) -> String {
    match render_qr_png(url) {
        Ok(png) => format!("{PNG_DATA_URI_PREFIX}{}", BASE64.encode(png)),
        Err(e) => {
            error!(error = %e, "error generating QR code");
            String::new()
        }
    }
}

fn render_qr_png(url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)?;
    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(QR_MODULE_PX, QR_MODULE_PX)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// Render an amount with its currency symbol, e.g. `€32.90` or `¥1500`.
///
/// Codes are matched exactly (`"eur"` is unknown) and unknown codes are
/// used verbatim as the symbol. JPY and CNY drop the fractional part;
/// everything else shows two decimals.
pub fn format_price(amount: f64, currency: &str) -> String {
    match currency.parse::<Currency>() {
        Ok(c) if c.as_ref() != currency => format!("{currency}{amount:.2}"),
        // `+ 0.0` folds a negative zero so -0.5 prints as `0`.
        Ok(c) if c.is_whole_units() => format!("{}{:.0}", c.symbol(), amount.trunc() + 0.0),
        Ok(c) => format!("{}{amount:.2}", c.symbol()),
        Err(_) => format!("{currency}{amount:.2}"),
    }
}

/// An event plus its generated booking link and QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub booking_url_with_params: String,
    pub qr_code_data: String,
}

/// Attach a default booking URL (and its QR code) to `event`.
pub fn process_event_data(event: &Event, currency: Currency) -> EnrichedEvent {
    let booking_url_with_params = generate_booking_url(event, &BookingParams::new(currency));
    let qr_code_data = if booking_url_with_params.is_empty() {
        String::new()
    } else {
        generate_qr_code(&booking_url_with_params)
    };

    EnrichedEvent {
        event: event.clone(),
        booking_url_with_params,
        qr_code_data,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn event(booking_url: &str) -> Event {
        serde_json::from_value(json!({
            "id": 976227,
            "title": "Palace of the Parliament Tour",
            "price": 32.9,
            "booking_url": booking_url,
        }))
        .unwrap()
    }

    #[test]
    fn missing_booking_url_yields_empty_string() {
        let url = generate_booking_url(&event(""), &BookingParams::default());
        assert_eq!(url, "");
    }

    #[test]
    fn fixed_affiliate_params_come_first() {
        let url = generate_booking_url(
            &event("https://www.tiqets.com/en/palace/"),
            &BookingParams::new(Currency::Usd),
        );
        insta::assert_snapshot!(url, @"https://www.tiqets.com/en/palace/?currency=USD&partner=travelpayouts.com&utm_campaign=travelpayouts.com&utm_medium=affiliate&utm_content=availability_widget");
    }

    #[test]
    fn existing_query_string_is_extended_with_ampersand() {
        let params = BookingParams {
            date: Some("2026-02-14".into()),
            ..BookingParams::new(Currency::Eur)
        };
        let url = generate_booking_url(&event("https://x/?a=1"), &params);

        assert!(url.starts_with("https://x/?a=1&currency=EUR"));
        assert!(url.contains("partner=travelpayouts.com"));
        assert!(url.contains("selected_date=2026-02-14"));
        assert_eq!(url.matches('?').count(), 1);
    }

    #[test]
    fn optional_params_follow_in_order() {
        let mut tickets = IndexMap::new();
        tickets.insert("47923".to_owned(), 1);
        tickets.insert("47929".to_owned(), 2);

        let params = BookingParams {
            currency: Currency::Gbp,
            date: Some("2026-03-01".into()),
            timeslot: Some("10:00".into()),
            tickets,
            language: Some(Language::Fra),
            campaign_id: Some("spring".into()),
            affiliate_source: Some("newsletter".into()),
        };
        let url = generate_booking_url(&event("https://b/p"), &params);

        insta::assert_snapshot!(url, @"https://b/p?currency=GBP&partner=travelpayouts.com&utm_campaign=travelpayouts.com&utm_medium=affiliate&utm_content=availability_widget&tq_campaign=spring&utm_source=newsletter&selected_date=2026-03-01&selected_timeslot_id=10%3A00&selected_variant_language=fra&selected_variants=47923%3D1%2647929%3D2");
    }

    #[test]
    fn empty_optionals_are_skipped() {
        let params = BookingParams {
            date: Some(String::new()),
            campaign_id: Some(String::new()),
            ..BookingParams::default()
        };
        let url = generate_booking_url(&event("https://b/p"), &params);
        assert!(!url.contains("selected_date"));
        assert!(!url.contains("tq_campaign"));
    }

    #[test]
    fn qr_code_is_a_png_data_uri() {
        let uri = generate_qr_code("https://www.tiqets.com/en/palace/?currency=EUR");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > 100);

        let png = BASE64
            .decode(uri.trim_start_matches(PNG_DATA_URI_PREFIX))
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn qr_code_too_large_is_empty() {
        // Version 40-L holds at most 2953 bytes.
        let huge = "x".repeat(4000);
        assert_eq!(generate_qr_code(&huge), "");
    }

    #[test]
    fn prices_use_symbol_and_precision() {
        assert_eq!(format_price(32.90, "EUR"), "€32.90");
        assert_eq!(format_price(1500.00, "JPY"), "¥1500");
        assert_eq!(format_price(99.99, "CNY"), "¥99");
        assert_eq!(format_price(15.0, "RON"), "lei15.00");
        assert_eq!(format_price(7.5, "XYZ"), "XYZ7.50");
    }

    #[test]
    fn lowercase_codes_are_unknown() {
        assert_eq!(format_price(32.9, "eur"), "eur32.90");
        assert_eq!(format_price(1500.0, "jpy"), "jpy1500.00");
    }

    #[test]
    fn whole_unit_prices_never_show_negative_zero() {
        assert_eq!(format_price(-0.5, "JPY"), "¥0");
        assert_eq!(format_price(-1.5, "JPY"), "¥-1");
    }

    #[test]
    fn enrichment_keeps_original_fields() {
        let raw = event("https://www.tiqets.com/en/palace/");
        let enriched = process_event_data(&raw, Currency::Eur);

        assert_eq!(enriched.event, raw);
        assert!(enriched.booking_url_with_params.contains("currency=EUR"));
        assert!(enriched.qr_code_data.starts_with("data:image/png;base64,"));

        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["id"], 976_227);
        assert_eq!(value["price"], 32.9);
    }

    #[test]
    fn enrichment_without_url_has_no_qr() {
        let enriched = process_event_data(&event(""), Currency::Eur);
        assert_eq!(enriched.booking_url_with_params, "");
        assert_eq!(enriched.qr_code_data, "");
    }
}
