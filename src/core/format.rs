use crate::domain::model::{LineItem, PricedOrder, ServiceKey};

const NBSP: char = '\u{a0}';

fn group_digits(value: u128, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Rounds half away from zero and splits off the sign.
fn whole_units(amount: f64) -> (bool, u128) {
    let rounded = amount.round();
    // `as` saturates, and NaN becomes 0
    (rounded < 0.0, rounded.abs() as u128)
}

/// en-US currency with no fraction digits: `$9,000`, `-$1,800`.
pub fn format_usd(amount: f64) -> String {
    let (negative, whole) = whole_units(amount);
    let sign = if negative && whole > 0 { "-" } else { "" };
    format!("{sign}${}", group_digits(whole, ','))
}

/// es-CO currency with no fraction digits: `$ 31.453.212` (non-breaking space).
pub fn format_cop(amount: f64) -> String {
    let (negative, whole) = whole_units(amount);
    let sign = if negative && whole > 0 { "-" } else { "" };
    format!("{sign}${NBSP}{}", group_digits(whole, '.'))
}

/// Discount as shown in totals, always with a leading minus.
pub fn discount_label(amount: f64) -> String {
    format!("-{}", format_usd(amount))
}

pub fn savings_badge(order: &PricedOrder) -> String {
    if order.discount_amount > 0.0 {
        format!("¡Ahorro corporativo: {} USD!", format_usd(order.discount_amount))
    } else {
        "Configura tu paquete".to_string()
    }
}

/// e.g. `Total de Clínicas: 3 • 3 con Voz • 1 con Contenido`
pub fn units_summary(order: &PricedOrder) -> String {
    let mut summary = format!(
        "Total de Clínicas: {}",
        order.effective_units(ServiceKey::Whatsapp)
    );
    for key in [ServiceKey::Voice, ServiceKey::Data, ServiceKey::Content] {
        let units = order.effective_units(key);
        if units > 0 {
            summary.push_str(&format!(" • {} con {}", units, key.summary_label()));
        }
    }
    summary
}

pub fn line_label(line: &LineItem) -> String {
    format!(
        "{}: {} × {} USD",
        line.display_name,
        line.effective_units,
        format_usd(line.unit_price)
    )
}

/// Plain-text breakdown with totals, for terminals and logs.
pub fn render_quote(order: &PricedOrder) -> String {
    let mut out = String::new();
    if order.lines.is_empty() {
        out.push_str("Configura las cantidades para ver tu presupuesto\n");
    } else {
        out.push_str("Desglose por servicio (precio de lista)\n");
        for line in &order.lines {
            out.push_str(&format!(
                "  {:<48} {:>12} USD\n",
                line_label(line),
                format_usd(line.line_total)
            ));
        }
        out.push_str(&format!("  {}\n", units_summary(order)));
    }

    for key in &order.warnings {
        out.push_str(&format!(
            "  ! {} excede la cantidad de WhatsApp; se facturan {}\n",
            key,
            order.effective_units(*key)
        ));
    }

    out.push_str(&format!("Precio de lista:  {} USD\n", format_usd(order.list_total)));
    out.push_str(&format!("Descuento:        {} USD\n", discount_label(order.discount_amount)));
    out.push_str(&format!("Licencias:        {} USD\n", format_usd(order.discounted_subtotal)));
    out.push_str(&format!("Setup:            {} USD\n", format_usd(order.setup_total)));
    out.push_str(&format!("Total:            {} USD\n", format_usd(order.grand_total)));
    out.push_str(&format!("Total en COP:     {}\n", format_cop(order.grand_total_secondary)));
    out.push_str(&savings_badge(order));
    out.push('\n');
    out
}
