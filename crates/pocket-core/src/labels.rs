//! Descriptions and notes attached to generated transactions.

pub const SAVING_DESCRIPTION: &str = "Ahorro";
pub const WITHDRAWAL_DESCRIPTION: &str = "Retiro de ahorros";
pub const GIFT_NOTE_SUFFIX: &str = "(Marcado como pagado sin restar saldo)";
pub const GIFT_NOTE_DEFAULT: &str = "Marcado como pagado manualmente (Sin restar saldo)";

pub fn transfer_description(from: &str, to: &str) -> String {
    format!("Transferencia: {from} → {to}")
}

pub fn gift_note(details: Option<&str>) -> String {
    match details.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => format!("{text} {GIFT_NOTE_SUFFIX}"),
        None => GIFT_NOTE_DEFAULT.to_string(),
    }
}

pub fn archived_debt_note(name: &str) -> String {
    format!("(Deuda archivada: {name})")
}
