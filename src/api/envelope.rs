//! Response Envelopes
//!
//! The backend answers list and mutation calls in a few shapes. Each shape is
//! an explicit variant here; anything else fails to decode.

use serde::Deserialize;

/// `GET /{resource}` body: a bare array or `{ "data": [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

/// Create/update/delete body: the record, the record wrapped with a message, or just a message
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MutationReply<T> {
    Record(T),
    Wrapped {
        data: T,
        #[serde(default)]
        message: Option<String>,
    },
    Message { message: String },
    /// 204 or empty body
    #[serde(skip)]
    Empty,
}

impl<T> MutationReply<T> {
    pub fn message(&self) -> Option<&str> {
        match self {
            MutationReply::Wrapped { message, .. } => message.as_deref(),
            MutationReply::Message { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, ProjectStatus};

    #[test]
    fn test_bare_and_wrapped_lists() {
        let bare: ListEnvelope<Project> =
            serde_json::from_str(r#"[{"id":"1","name":"Site","status":"New"}]"#).unwrap();
        let wrapped: ListEnvelope<Project> =
            serde_json::from_str(r#"{"data":[{"_id":"1","name":"Site","status":"New"}],"count":1}"#).unwrap();
        assert_eq!(bare.into_vec(), wrapped.into_vec());
    }

    #[test]
    fn test_other_list_shapes_rejected() {
        let named = serde_json::from_str::<ListEnvelope<Project>>(r#"{"projects":[]}"#);
        assert!(named.is_err());
    }

    #[test]
    fn test_mutation_replies() {
        let record: MutationReply<Project> =
            serde_json::from_str(r#"{"id":"9","name":"App","status":"Working"}"#).unwrap();
        assert_eq!(record.message(), None);
        assert!(matches!(record, MutationReply::Record(ref p) if p.status == ProjectStatus::Working));

        let wrapped: MutationReply<Project> = serde_json::from_str(
            r#"{"message":"Project updated","data":{"id":"9","name":"App","status":"Complete"}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.message(), Some("Project updated"));

        let message: MutationReply<Project> = serde_json::from_str(r#"{"message":"Deleted"}"#).unwrap();
        assert_eq!(message, MutationReply::Message { message: "Deleted".into() });
    }
}
