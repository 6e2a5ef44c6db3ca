use crate::core::format::{discount_label, format_cop, format_usd};
use crate::domain::model::{
    CustomerLead, OrderPayload, PayloadCustomer, PayloadServices, PayloadTotals, PricedOrder,
    ServiceKey,
};
use chrono::{DateTime, SecondsFormat, Utc};

impl OrderPayload {
    /// Snapshot of a lead and its quote. Units are the billed (clamped) counts.
    pub fn build(lead: &CustomerLead, order: &PricedOrder, timestamp: DateTime<Utc>) -> Self {
        Self {
            customer: PayloadCustomer {
                name: lead.name.clone(),
                email: lead.email.clone(),
                company: lead.company_name().unwrap_or_default().to_string(),
            },
            services: PayloadServices {
                whatsapp: order.effective_units(ServiceKey::Whatsapp),
                voice: order.effective_units(ServiceKey::Voice),
                data: order.effective_units(ServiceKey::Data),
                content: order.effective_units(ServiceKey::Content),
            },
            totals: PayloadTotals {
                list_price: format_usd(order.list_total),
                discount: discount_label(order.discount_amount),
                subtotal: format_usd(order.discounted_subtotal),
                setup: format_usd(order.setup_total),
                total: format_usd(order.grand_total),
                total_cop: format_cop(order.grand_total_secondary),
            },
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn units(&self, key: ServiceKey) -> u64 {
        match key {
            ServiceKey::Whatsapp => self.services.whatsapp,
            ServiceKey::Voice => self.services.voice,
            ServiceKey::Data => self.services.data,
            ServiceKey::Content => self.services.content,
        }
    }

    /// Plain-text confirmation shown after a successful submission.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Resumen de tu Pedido".to_string(),
            format!("Cliente: {}", self.customer.name),
            format!("Email: {}", self.customer.email),
        ];
        if !self.customer.company.trim().is_empty() {
            lines.push(format!("Empresa: {}", self.customer.company));
        }

        for (key, label) in [
            (ServiceKey::Whatsapp, "WhatsApp"),
            (ServiceKey::Voice, "Voz IA"),
            (ServiceKey::Data, "Análisis de Datos"),
            (ServiceKey::Content, "Contenido IA"),
        ] {
            let units = self.units(key);
            if units > 0 {
                lines.push(format!("{}: {} clínicas", label, units));
            }
        }

        lines.push(format!("Total: {} USD", self.totals.total));
        lines.join("\n")
    }
}
