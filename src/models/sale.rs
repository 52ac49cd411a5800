//! Sales
//!
//! The total is quantity times unit price, recomputed on every edit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, money, PaymentStatus, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub customer_name: String,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(with = "iso_date")]
    pub sale_date: NaiveDate,
    pub payment_status: PaymentStatus,
}

impl Sale {
    /// Quantity times unit price, whatever the stored total says
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl Record for Sale {
    const RESOURCE: &'static str = "sales";
    const SINGULAR: &'static str = "Sale";
    const PLURAL: &'static str = "Sales";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("customerName", "Customer", FieldKind::Text),
            FieldSpec::required("product", "Product", FieldKind::Text),
            FieldSpec::required("quantity", "Quantity", FieldKind::Number),
            FieldSpec::required("unitPrice", "Unit price", FieldKind::Number),
            FieldSpec::required("saleDate", "Sale date", FieldKind::Date),
            FieldSpec::required("paymentStatus", "Payment", FieldKind::Select(PaymentStatus::OPTIONS)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Customer", "Product", "Qty", "Unit price", "Total", "Date", "Payment"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.product.clone(),
            self.quantity.to_string(),
            money(self.unit_price),
            money(self.line_total()),
            format_date(Some(self.sale_date)),
            self.payment_status.to_string(),
        ]
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.customer_name, self.product, self.payment_status.label())
    }

    fn category_label() -> Option<&'static str> {
        Some("Payment")
    }

    fn category(&self) -> Option<String> {
        Some(self.payment_status.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Sale date")
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.sale_date)
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("customerName", &self.customer_name)
            .with("product", &self.product)
            .with("quantity", self.quantity.to_string())
            .with("unitPrice", self.unit_price.to_string())
            .with("saleDate", format_date(Some(self.sale_date)))
            .with("paymentStatus", self.payment_status.as_str())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let quantity = draft.count("quantity", "Quantity")?;
        if quantity == 0 {
            return Err(ValidationError::Rule("Quantity must be at least 1".to_string()));
        }
        let unit_price = draft.number("unitPrice", "Unit price")?;
        if unit_price < 0.0 {
            return Err(ValidationError::Rule("Unit price cannot be negative".to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            customer_name: draft.text("customerName"),
            product: draft.text("product"),
            quantity,
            unit_price,
            total: quantity as f64 * unit_price,
            sale_date: draft.date("saleDate", "Sale date")?,
            payment_status: PaymentStatus::from_draft(draft, "paymentStatus", "Payment")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Draft {
        Draft::blank(Sale::fields())
            .with("customerName", "Acme")
            .with("product", "Desk")
            .with("quantity", "4")
            .with("unitPrice", "120.25")
            .with("saleDate", "2024-09-12")
    }

    #[test]
    fn test_total_derived() {
        let sale = Sale::from_draft("", &draft()).unwrap();
        assert_eq!(sale.total, 481.0);
        let body = serde_json::to_value(&sale).unwrap();
        assert_eq!(body["total"], 481.0);
        assert_eq!(body["saleDate"], "2024-09-12");
    }

    #[test]
    fn test_total_shown_when_backend_omits_it() {
        let json = r#"{"_id":"s1","customerName":"Acme","product":"Chair","quantity":3,"unitPrice":50,"saleDate":"2024-09-12T00:00:00.000Z","paymentStatus":"paid"}"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.total, 0.0);
        assert_eq!(sale.cells()[4], "150.00");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = Sale::from_draft("", &draft().with("quantity", "0")).unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be at least 1");
    }
}
