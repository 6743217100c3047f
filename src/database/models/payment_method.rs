use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    InHand,
    Mail,
    Bank {
        bank: String,
        agency: String,
        account: String,
    },
}

impl PaymentMethod {
    /// Text shown in the payment column of the payroll report.
    pub fn describe(&self, address: &str) -> String {
        match self {
            PaymentMethod::InHand => "Cash in hand".to_string(),
            PaymentMethod::Mail => format!("Mail, {}", address),
            PaymentMethod::Bank {
                bank,
                agency,
                account,
            } => format!("{}, Ag. {} CC {}", bank, agency, account),
        }
    }
}
