//! Query parameters for the financial resource endpoints

use serde::{Deserialize, Serialize};

/// Filters for the transaction listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl TransactionQuery {
    /// Query pairs in a stable order, skipping unset filters.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(account_id) = &self.account_id {
            pairs.push(("account_id", account_id.clone()));
        }
        if let Some(from) = &self.from {
            pairs.push(("from", from.clone()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to", to.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_skip_unset_filters() {
        let query = TransactionQuery {
            account_id: Some("acc-1".to_string()),
            limit: Some(25),
            ..TransactionQuery::default()
        };
        assert_eq!(
            query.pairs(),
            vec![("account_id", "acc-1".to_string()), ("limit", "25".to_string())]
        );
        assert!(TransactionQuery::default().pairs().is_empty());
    }
}
