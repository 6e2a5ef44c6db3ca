use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.20;
pub const DEFAULT_EXCHANGE_RATE: f64 = 3744.43;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKey {
    Whatsapp,
    Voice,
    Data,
    Content,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 4] = [
        ServiceKey::Whatsapp,
        ServiceKey::Voice,
        ServiceKey::Data,
        ServiceKey::Content,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKey::Whatsapp => "whatsapp",
            ServiceKey::Voice => "voice",
            ServiceKey::Data => "data",
            ServiceKey::Content => "content",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Short label used in the units summary ("3 con Voz").
    pub fn summary_label(&self) -> &'static str {
        match self {
            ServiceKey::Whatsapp => "Clínicas",
            ServiceKey::Voice => "Voz",
            ServiceKey::Data => "Datos",
            ServiceKey::Content => "Contenido",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub key: ServiceKey,
    pub display_name: String,
    pub unit_price: f64,
    pub unit_setup_fee: f64,
}

impl ServiceDefinition {
    pub fn new(key: ServiceKey, display_name: &str, unit_price: f64, unit_setup_fee: f64) -> Self {
        Self {
            key,
            display_name: display_name.to_string(),
            unit_price,
            unit_setup_fee,
        }
    }
}

/// Ordered service table. Declaration order is the order of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    base: ServiceKey,
    services: Vec<ServiceDefinition>,
}

impl Catalog {
    pub fn new(base: ServiceKey, services: Vec<ServiceDefinition>) -> Self {
        Self { base, services }
    }

    /// Yearly per-clinic prices in USD.
    pub fn standard() -> Self {
        Self::new(
            ServiceKey::Whatsapp,
            vec![
                ServiceDefinition::new(ServiceKey::Whatsapp, "WhatsApp Auto 24/7", 2400.0, 200.0),
                ServiceDefinition::new(ServiceKey::Voice, "Voz IA (300 min)", 600.0, 200.0),
                ServiceDefinition::new(ServiceKey::Data, "Análisis de Datos", 2400.0, 200.0),
                ServiceDefinition::new(ServiceKey::Content, "Fábrica de Contenido IA", 2400.0, 0.0),
            ],
        )
    }

    pub fn base(&self) -> ServiceKey {
        self.base
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn get(&self, key: ServiceKey) -> Option<&ServiceDefinition> {
        self.services.iter().find(|service| service.key == key)
    }

    pub fn dependents(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.iter().filter(move |service| service.key != self.base)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Requested units per service, as typed by the user after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    units: BTreeMap<ServiceKey, u64>,
}

impl OrderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, key: ServiceKey, units: u64) -> Self {
        self.set(key, units);
        self
    }

    pub fn set(&mut self, key: ServiceKey, units: u64) {
        self.units.insert(key, units);
    }

    pub fn units(&self, key: ServiceKey) -> u64 {
        self.units.get(&key).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    pub discount_rate: f64,
    pub exchange_rate: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub service: ServiceKey,
    pub display_name: String,
    pub requested_units: u64,
    pub effective_units: u64,
    pub unit_price: f64,
    pub line_total: f64,
    pub line_setup: f64,
}

/// A quote derived from a catalog, a request and the pricing settings.
/// Amounts are kept at full precision; rounding happens when formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedOrder {
    pub lines: Vec<LineItem>,
    pub list_total: f64,
    pub discount_amount: f64,
    pub discounted_subtotal: f64,
    pub setup_total: f64,
    pub grand_total: f64,
    pub grand_total_secondary: f64,
    /// Dependent services whose requested units exceed the base units.
    pub warnings: Vec<ServiceKey>,
    pub submittable: bool,
    #[serde(skip)]
    effective: BTreeMap<ServiceKey, u64>,
}

impl PricedOrder {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        lines: Vec<LineItem>,
        effective: BTreeMap<ServiceKey, u64>,
        list_total: f64,
        discount_amount: f64,
        setup_total: f64,
        exchange_rate: f64,
        warnings: Vec<ServiceKey>,
        submittable: bool,
    ) -> Self {
        let discounted_subtotal = list_total - discount_amount;
        let grand_total = discounted_subtotal + setup_total;
        Self {
            lines,
            list_total,
            discount_amount,
            discounted_subtotal,
            setup_total,
            grand_total,
            grand_total_secondary: grand_total * exchange_rate,
            warnings,
            submittable,
            effective,
        }
    }

    /// Billed units for a service, including services with no line.
    pub fn effective_units(&self, key: ServiceKey) -> u64 {
        self.effective.get(&key).copied().unwrap_or(0)
    }

    pub fn has_warning(&self, key: ServiceKey) -> bool {
        self.warnings.contains(&key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLead {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl CustomerLead {
    pub fn new(name: &str, email: &str, company: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            company: company.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadCustomer {
    pub name: String,
    pub email: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadServices {
    pub whatsapp: u64,
    pub voice: u64,
    pub data: u64,
    pub content: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadTotals {
    pub list_price: String,
    pub discount: String,
    pub subtotal: String,
    pub setup: String,
    pub total: String,
    #[serde(rename = "totalCOP")]
    pub total_cop: String,
}

/// Body posted to the lead webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub customer: PayloadCustomer,
    pub services: PayloadServices,
    pub totals: PayloadTotals,
    pub timestamp: String,
}
