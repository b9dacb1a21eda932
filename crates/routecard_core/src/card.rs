//! Recorded route cards.

use crate::types::ClusterNumber;
use routecard_storage::{FormRecord, StorageError, StoredRecord};
use serde::Serialize;

/// A route card as recorded in the ledger.
///
/// Wraps the stored row with its parsed cluster number. Serializes flat, with
/// the cluster number as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCard {
    #[serde(skip)]
    cluster_number: ClusterNumber,
    #[serde(flatten)]
    stored: StoredRecord,
}

impl RouteCard {
    /// The card's cluster number.
    #[must_use]
    pub const fn cluster_number(&self) -> ClusterNumber {
        self.cluster_number
    }

    /// Row id assigned by the store.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.stored.id
    }

    /// The form fields as recorded.
    #[must_use]
    pub const fn record(&self) -> &FormRecord {
        &self.stored.record
    }

    /// Insert time assigned by the store.
    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.stored.created_at
    }

    /// Consumes the card, returning the form fields.
    #[must_use]
    pub fn into_record(self) -> FormRecord {
        self.stored.record
    }
}

impl TryFrom<StoredRecord> for RouteCard {
    type Error = StorageError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let cluster_number = stored
            .record
            .cluster_number
            .parse::<ClusterNumber>()
            .map_err(|err| {
                StorageError::Corrupted(format!(
                    "row {} holds malformed cluster number {:?}: {err}",
                    stored.id, stored.record.cluster_number
                ))
            })?;
        Ok(Self {
            cluster_number,
            stored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(cluster_number: &str) -> StoredRecord {
        StoredRecord {
            id: 7,
            record: FormRecord::new(cluster_number),
            created_at: "14.03.2025 10:15:00".to_string(),
        }
    }

    #[test]
    fn card_parses_cluster_number() {
        let card = RouteCard::try_from(stored("К25/03-004")).unwrap();
        assert_eq!(card.cluster_number().sequence(), 4);
        assert_eq!(card.id(), 7);
        assert_eq!(card.created_at(), "14.03.2025 10:15:00");
    }

    #[test]
    fn malformed_row_is_corruption() {
        let err = RouteCard::try_from(stored("K25/03-004")).unwrap_err();
        assert!(matches!(err, StorageError::Corrupted(_)));
    }

    #[test]
    fn card_serializes_flat() {
        let card = RouteCard::try_from(stored("К25/03-004")).unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cluster_number"], "К25/03-004");
        assert_eq!(json["id"], 7);
        assert_eq!(json["created_at"], "14.03.2025 10:15:00");
        assert!(json["cast_number"].is_null());
    }
}
