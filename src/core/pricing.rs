use crate::domain::model::{
    Catalog, LineItem, OrderRequest, PricedOrder, PricingSettings, ServiceKey,
};
use std::collections::BTreeMap;

/// Lenient quantity parsing for free-text numeric fields.
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits is read ("3abc" is 3, "2.7" is 2). Empty, non-numeric and
/// negative input all yield 0. Values past `u64::MAX` saturate.
pub fn parse_units(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return 0;
    }

    rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX)
}

/// Units actually billed for a dependent service.
pub fn compute_effective_units(base_count: u64, dependent_count: u64) -> u64 {
    dependent_count.min(base_count)
}

/// True when the raw dependent count exceeds the base count. Advisory only.
pub fn validate_dependency(base_count: u64, dependent_count: u64) -> bool {
    dependent_count > base_count
}

/// An order needs base units, and the catalog must actually price the base service.
pub fn is_submittable(catalog: &Catalog, request: &OrderRequest) -> bool {
    catalog.get(catalog.base()).is_some() && request.units(catalog.base()) > 0
}

pub fn price(
    catalog: &Catalog,
    request: &OrderRequest,
    discount_rate: f64,
    exchange_rate: f64,
) -> PricedOrder {
    let base_key = catalog.base();
    let base_units = request.units(base_key);

    let mut lines = Vec::with_capacity(catalog.services().len());
    let mut effective = BTreeMap::new();
    let mut list_total = 0.0;
    let mut setup_total = 0.0;

    for service in catalog.services() {
        // first entry per key wins, matching Catalog::get
        if effective.contains_key(&service.key) {
            tracing::debug!("Ignoring duplicate catalog entry for {}", service.key);
            continue;
        }
        let requested_units = request.units(service.key);
        let effective_units = if service.key == base_key {
            requested_units
        } else {
            compute_effective_units(base_units, requested_units)
        };
        effective.insert(service.key, effective_units);

        if effective_units == 0 {
            continue;
        }

        let line_total = effective_units as f64 * service.unit_price;
        let line_setup = effective_units as f64 * service.unit_setup_fee;
        list_total += line_total;
        setup_total += line_setup;

        lines.push(LineItem {
            service: service.key,
            display_name: service.display_name.clone(),
            requested_units,
            effective_units,
            unit_price: service.unit_price,
            line_total,
            line_setup,
        });
    }

    let warnings: Vec<ServiceKey> = catalog
        .dependents()
        .filter(|service| validate_dependency(base_units, request.units(service.key)))
        .map(|service| service.key)
        .collect();

    if !warnings.is_empty() {
        tracing::debug!(
            "Dependent services exceed {} base units: {:?}",
            base_units,
            warnings
        );
    }

    PricedOrder::new(
        lines,
        effective,
        list_total,
        list_total * discount_rate,
        setup_total,
        exchange_rate,
        warnings,
        is_submittable(catalog, request),
    )
}

impl OrderRequest {
    /// Builds a request from raw field text, normalizing anything unparseable to 0.
    pub fn from_text<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (ServiceKey, &'a str)>,
    {
        fields
            .into_iter()
            .fold(OrderRequest::new(), |request, (key, text)| {
                request.with_units(key, parse_units(text))
            })
    }
}

/// Catalog plus settings, so callers can re-price on every input change.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    catalog: Catalog,
    settings: PricingSettings,
}

impl PricingEngine {
    pub fn new(catalog: Catalog, settings: PricingSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> PricingSettings {
        self.settings
    }

    pub fn quote(&self, request: &OrderRequest) -> PricedOrder {
        price(
            &self.catalog,
            request,
            self.settings.discount_rate,
            self.settings.exchange_rate,
        )
    }

    pub fn is_submittable(&self, request: &OrderRequest) -> bool {
        is_submittable(&self.catalog, request)
    }
}
