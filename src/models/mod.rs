//! Frontend Models
//!
//! Typed records for every resource the dashboard manages. Each record knows
//! how to render itself in a table, how to feed the search box, and how to
//! round-trip through a form `Draft`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::form::{Draft, FieldSpec, ValidationError};

/// Fixed set of string choices with wire value and display label
macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            pub fn as_str(&self) -> &'static str {
                match self { $($name::$variant => $value),+ }
            }

            pub fn label(&self) -> &'static str {
                match self { $($name::$variant => $label),+ }
            }

            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }

            pub fn from_draft(draft: &$crate::form::Draft, key: &str, label: &'static str) -> Result<Self, $crate::form::ValidationError> {
                Self::parse(draft.get(key)).ok_or_else(|| $crate::form::ValidationError::Choice {
                    field: label,
                    allowed: Self::OPTIONS.iter().map(|(v, _)| *v).collect::<Vec<_>>().join(", "),
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

mod customer;
mod leave;
mod loan;
mod payroll;
mod project;
mod rejoin;
mod sale;
mod todo;
mod user;
mod withdrawal;

pub use customer::Customer;
pub use leave::Leave;
pub use loan::Loan;
pub use payroll::Payroll;
pub use project::{Project, ProjectStatus};
pub use rejoin::RejoinRequest;
pub use sale::Sale;
pub use todo::{Priority, Todo};
pub use user::{Role, User};
pub use withdrawal::Withdrawal;

/// A record managed by a CRUD page
pub trait Record: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path segment under the API root, e.g. `customers`
    const RESOURCE: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> &str;

    /// Form fields in display order
    fn fields() -> &'static [FieldSpec];

    /// Table headers, matching `cells`
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;

    /// Short human name for the record, the first table cell by default
    fn display_name(&self) -> String {
        self.cells().into_iter().next().unwrap_or_default()
    }

    /// Concatenation of the fields the search box matches against
    fn search_text(&self) -> String;

    /// Label of the category filter, if the page offers one
    fn category_label() -> Option<&'static str> {
        None
    }

    fn category(&self) -> Option<String> {
        None
    }

    /// Label of the date the range filter applies to
    fn date_label() -> Option<&'static str> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    fn to_draft(&self) -> Draft;

    /// Typed parse of a validated draft plus entity rules. `id` is empty for new records.
    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError>;
}

choice_enum! {
    /// Approval workflow shared by leaves, rejoining requests and withdrawals
    ApprovalStatus {
        Pending => "pending", "Pending";
        Approved => "approved", "Approved";
        Rejected => "rejected", "Rejected";
    }
}

choice_enum! {
    PaymentStatus {
        Pending => "pending", "Pending";
        Paid => "paid", "Paid";
    }
}

/// Money as shown in tables
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn yes_no(flag: bool) -> String {
    if flag { "Yes".to_string() } else { "No".to_string() }
}

/// Lenient wire dates: accepts `YYYY-MM-DD` and full ISO timestamps, emits `YYYY-MM-DD`
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
            let raw = Option::<String>::deserialize(d)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => super::parse(value)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", value))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_enum() {
        assert_eq!(ApprovalStatus::parse("approved"), Some(ApprovalStatus::Approved));
        assert_eq!(ApprovalStatus::parse("Approved"), None);
        assert_eq!(ApprovalStatus::Rejected.as_str(), "rejected");
        assert_eq!(ApprovalStatus::Rejected.to_string(), "Rejected");
        assert_eq!(PaymentStatus::ALL.len(), PaymentStatus::OPTIONS.len());
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
    }

    #[test]
    fn test_iso_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(iso_date::parse("2024-03-09"), expected);
        assert_eq!(iso_date::parse("2024-03-09T00:00:00.000Z"), expected);
        assert_eq!(iso_date::parse("09/03/2024"), None);
    }

    #[test]
    fn test_money() {
        assert_eq!(money(1250.0), "1250.00");
        assert_eq!(money(19.999), "20.00");
    }
}
