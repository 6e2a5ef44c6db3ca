use crate::utils::error::Result;
use crate::utils::validation::validate_phone;
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

pub const DEFAULT_CONFIRMATION_PHONE: &str = "573102523739";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub monthly_price: f64,
    /// One-time setup; 0 means included.
    pub setup_fee: f64,
    pub featured: bool,
}

impl Plan {
    fn new(slug: &str, name: &str, tagline: &str, monthly_price: f64, setup_fee: f64) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            tagline: tagline.to_string(),
            monthly_price,
            setup_fee,
            featured: false,
        }
    }

    pub fn price_label(&self) -> String {
        format!("${}/mes", self.monthly_price.round() as u64)
    }

    pub fn setup_label(&self) -> String {
        if self.setup_fee > 0.0 {
            format!(
                "Configuración inicial: ${} USD (único)",
                self.setup_fee.round() as u64
            )
        } else {
            "Configuración inicial: incluida".to_string()
        }
    }
}

pub fn standard_plans() -> Vec<Plan> {
    let mut completo = Plan::new(
        "completo",
        "Plan Completo",
        "Más elegido por clínicas",
        155.0,
        100.0,
    );
    completo.featured = true;

    vec![
        Plan::new("basico", "Plan Básico", "Ideal para negocios pequeños", 50.0, 100.0),
        completo,
        Plan::new(
            "avanzado",
            "Plan Avanzado",
            "Ideal para clínicas que quieren crecer con datos",
            350.0,
            0.0,
        ),
    ]
}

/// Value of the `plan` parameter in a full URL or a bare query string.
fn plan_param(url_or_query: &str) -> Option<String> {
    let input = url_or_query.trim();
    let pairs: Vec<(String, String)> = match Url::parse(input) {
        Ok(url) => url.query_pairs().into_owned().collect(),
        Err(_) => {
            let query = input.split_once('?').map_or(input, |(_, query)| query);
            form_urlencoded::parse(query.as_bytes()).into_owned().collect()
        }
    };

    pairs
        .into_iter()
        .find(|(key, _)| key == "plan")
        .map(|(_, value)| value)
}

/// Plan named by the `plan` query parameter, matched case-insensitively on slug.
pub fn select_plan<'a>(plans: &'a [Plan], url_or_query: &str) -> Option<&'a Plan> {
    let wanted = plan_param(url_or_query)?;
    let found = plans
        .iter()
        .find(|plan| plan.slug.eq_ignore_ascii_case(wanted.trim()));
    if found.is_none() {
        tracing::debug!("Unknown plan '{}' in URL, showing all plans", wanted);
    }
    found
}

/// Either the selected plan alone or the whole table.
pub fn visible_plans<'a>(plans: &'a [Plan], url_or_query: Option<&str>) -> Vec<&'a Plan> {
    match url_or_query.and_then(|input| select_plan(plans, input)) {
        Some(plan) => vec![plan],
        None => plans.iter().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Card,
}

impl PaymentMethod {
    pub fn is_available(&self) -> bool {
        matches!(self, PaymentMethod::BankTransfer)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Pagar por transferencia bancaria",
            PaymentMethod::Card => "Pagar con tarjeta o débito (próximamente)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstructions {
    pub bank: String,
    pub account_type: String,
    pub account_number: String,
    pub holder: String,
    pub tax_id: String,
}

impl Default for TransferInstructions {
    fn default() -> Self {
        Self {
            bank: "Bancolombia".to_string(),
            account_type: "Cuenta de ahorros".to_string(),
            account_number: "270-000012-12".to_string(),
            holder: "CRISTIAN PATIÑO - OSYVA SAS".to_string(),
            tax_id: "1.088.334.538".to_string(),
        }
    }
}

impl TransferInstructions {
    pub fn render(&self, plan: &Plan) -> String {
        [
            format!("{} · {}", plan.name, plan.price_label()),
            format!("Banco: {}", self.bank),
            format!("Tipo de cuenta: {}", self.account_type),
            format!("Número de cuenta: {}", self.account_number),
            format!("Titular: {}", self.holder),
            format!("NIT: {}", self.tax_id),
        ]
        .join("\n")
    }
}

pub fn confirmation_message(plan_name: &str) -> String {
    format!(
        "Hola, ya realicé la transferencia para el {} de Hubu. Adjunto mi comprobante.",
        plan_name
    )
}

/// `https://wa.me/<phone>?text=<message>` with the message percent-encoded.
pub fn whatsapp_confirmation_link(phone: &str, plan_name: &str) -> Result<String> {
    let digits = validate_phone("checkout.whatsapp_phone", phone)?;

    // form encoding turns spaces into '+', and a literal '+' into %2B
    let text: String = form_urlencoded::byte_serialize(confirmation_message(plan_name).as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    Ok(format!("https://wa.me/{}?text={}", digits, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_plan_from_url() {
        let plans = standard_plans();
        let plan = select_plan(&plans, "https://pagos.example.com/?plan=Completo&utm=x").unwrap();
        assert_eq!(plan.slug, "completo");
        assert!(plan.featured);

        assert_eq!(select_plan(&plans, "?plan=basico").unwrap().name, "Plan Básico");
        assert_eq!(select_plan(&plans, "plan=avanzado").unwrap().setup_fee, 0.0);
        assert!(select_plan(&plans, "https://pagos.example.com/").is_none());
        assert!(select_plan(&plans, "?plan=platino").is_none());
    }

    #[test]
    fn test_visible_plans_falls_back_to_all() {
        let plans = standard_plans();
        assert_eq!(visible_plans(&plans, None).len(), 3);
        assert_eq!(visible_plans(&plans, Some("?plan=nope")).len(), 3);
        assert_eq!(visible_plans(&plans, Some("/checkout?plan=basico")).len(), 1);
    }

    #[test]
    fn test_labels() {
        let plans = standard_plans();
        assert_eq!(plans[1].price_label(), "$155/mes");
        assert_eq!(plans[0].setup_label(), "Configuración inicial: $100 USD (único)");
        assert_eq!(plans[2].setup_label(), "Configuración inicial: incluida");
        assert!(!PaymentMethod::Card.is_available());
        assert!(PaymentMethod::BankTransfer.is_available());
    }

    #[test]
    fn test_whatsapp_link_is_percent_encoded() {
        let link = whatsapp_confirmation_link(DEFAULT_CONFIRMATION_PHONE, "Plan Completo").unwrap();
        assert!(link.starts_with("https://wa.me/573102523739?text=Hola%2C%20ya%20realic%C3%A9"));
        assert!(link.contains("Plan%20Completo"));
        assert!(!link.contains(' '));
        assert!(!link.contains('+'));

        let spaced = whatsapp_confirmation_link("+57 310 252-3739", "Plan Básico").unwrap();
        assert!(spaced.starts_with("https://wa.me/573102523739?"));
        assert!(whatsapp_confirmation_link("call-me", "Plan Básico").is_err());
    }

    #[test]
    fn test_transfer_render() {
        let plans = standard_plans();
        let text = TransferInstructions::default().render(&plans[0]);
        assert!(text.starts_with("Plan Básico · $50/mes"));
        assert!(text.contains("Número de cuenta: 270-000012-12"));
    }
}
